//! Static token and trading pair tables for Polygon PoS.
//!
//! The tables are fixed for the lifetime of the process. Orders may only be
//! built for pairs listed in [`ALLOWED_PAIRS`].

use std::fmt;

use alloy_primitives::{address, Address};

use crate::error::ValidationError;

/// An ERC-20 token the CLI knows how to trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub address: Address,
    pub decimals: u8,
    pub symbol: &'static str,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// Native Circle USDC.
pub const USDC: Token = Token {
    address: address!("3c499c542cEF5E3811e1192ce70d8cC03d5c3359"),
    decimals: 6,
    symbol: "USDC",
};

/// Bridged USDC (PoS bridge).
pub const USDC_E: Token = Token {
    address: address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
    decimals: 6,
    symbol: "USDC.e",
};

pub const USDT: Token = Token {
    address: address!("c2132D05D31c914a87C6611C10748AEb04B58e8F"),
    decimals: 6,
    symbol: "USDT",
};

pub const DAI: Token = Token {
    address: address!("8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063"),
    decimals: 18,
    symbol: "DAI",
};

pub const WETH: Token = Token {
    address: address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619"),
    decimals: 18,
    symbol: "WETH",
};

/// Wrapped POL (formerly WMATIC).
pub const WPOL: Token = Token {
    address: address!("0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"),
    decimals: 18,
    symbol: "WPOL",
};

/// Every token in the reference table.
pub const TOKENS: &[Token] = &[USDC, USDC_E, USDT, DAI, WETH, WPOL];

/// Source/output combinations orders may be created for.
pub const ALLOWED_PAIRS: &[(Token, Token)] = &[
    (USDC, USDT),
    (USDT, USDC),
    (USDC, DAI),
    (DAI, USDC),
    (USDC_E, USDC),
    (USDC, USDC_E),
    (USDC, WETH),
    (WETH, USDC),
    (WPOL, USDC),
    (USDC, WPOL),
];

/// Look up a token by symbol, ignoring ASCII case.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownToken`] when no token matches.
pub fn by_symbol(symbol: &str) -> Result<Token, ValidationError> {
    let wanted = symbol.trim();
    TOKENS
        .iter()
        .find(|t| t.symbol.eq_ignore_ascii_case(wanted))
        .copied()
        .ok_or_else(|| ValidationError::UnknownToken(wanted.to_string()))
}

/// Look up a token by contract address.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownToken`] when the address is not in the table.
pub fn by_address(address: Address) -> Result<Token, ValidationError> {
    TOKENS
        .iter()
        .find(|t| t.address == address)
        .copied()
        .ok_or_else(|| ValidationError::UnknownToken(address.to_checksum(None)))
}

/// A directed pair: the maker gives `source` and receives `output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingPair {
    pub source: Token,
    pub output: Token,
}

impl TradingPair {
    /// Build a pair, rejecting combinations outside [`ALLOWED_PAIRS`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedPair`] for unlisted combinations.
    pub fn new(source: Token, output: Token) -> Result<Self, ValidationError> {
        if ALLOWED_PAIRS
            .iter()
            .any(|(s, o)| *s == source && *o == output)
        {
            Ok(Self { source, output })
        } else {
            Err(ValidationError::UnsupportedPair {
                source_symbol: source.symbol.to_string(),
                output_symbol: output.symbol.to_string(),
            })
        }
    }

    /// Resolve a pair from two symbols.
    ///
    /// # Errors
    ///
    /// Returns an error if either symbol is unknown or the pair is not allowed.
    pub fn from_symbols(source: &str, output: &str) -> Result<Self, ValidationError> {
        Self::new(by_symbol(source)?, by_symbol(output)?)
    }

    /// All allowed pairs in table order.
    pub fn all() -> impl Iterator<Item = TradingPair> {
        ALLOWED_PAIRS.iter().map(|(source, output)| TradingPair {
            source: *source,
            output: *output,
        })
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source.symbol, self.output.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_lookup_ignores_case() {
        assert_eq!(by_symbol("usdc").unwrap(), USDC);
        assert_eq!(by_symbol("  WeTh ").unwrap(), WETH);
        assert_eq!(by_symbol("usdc.E").unwrap(), USDC_E);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = by_symbol("SHIB").unwrap_err();
        assert_eq!(err, ValidationError::UnknownToken("SHIB".into()));
    }

    #[test]
    fn address_lookup_finds_table_entries() {
        for token in TOKENS {
            assert_eq!(by_address(token.address).unwrap(), *token);
        }
    }

    #[test]
    fn unknown_address_is_rejected() {
        let err = by_address(Address::ZERO).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownToken(_)));
    }

    #[test]
    fn token_symbols_are_unique() {
        for (i, a) in TOKENS.iter().enumerate() {
            for b in &TOKENS[i + 1..] {
                assert_ne!(a.symbol, b.symbol);
                assert_ne!(a.address, b.address);
            }
        }
    }

    #[test]
    fn allowed_pair_is_accepted() {
        let pair = TradingPair::from_symbols("USDC", "USDT").unwrap();
        assert_eq!(pair.source, USDC);
        assert_eq!(pair.output, USDT);
        assert_eq!(pair.to_string(), "USDC -> USDT");
    }

    #[test]
    fn unlisted_pair_is_rejected() {
        let err = TradingPair::new(DAI, WETH).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedPair {
                source_symbol: "DAI".into(),
                output_symbol: "WETH".into(),
            }
        );
    }

    #[test]
    fn same_token_pair_is_rejected() {
        assert!(TradingPair::new(USDC, USDC).is_err());
    }

    #[test]
    fn all_pairs_are_constructible() {
        for pair in TradingPair::all() {
            assert!(TradingPair::new(pair.source, pair.output).is_ok());
        }
        assert_eq!(TradingPair::all().count(), ALLOWED_PAIRS.len());
    }
}
