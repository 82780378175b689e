use alloy_primitives::U256;
use rust_decimal::Decimal;

use super::amount::format_token_amount;
use super::token::TradingPair;

/// A priced conversion for one request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub pair: TradingPair,
    /// Source token base units.
    pub input_amount: U256,
    /// Output token base units.
    pub output_amount: U256,
    /// Output tokens per source token, in whole-token terms.
    pub rate: Decimal,
}

impl Quote {
    #[must_use]
    pub fn input_display(&self) -> String {
        format_token_amount(self.input_amount, self.pair.source.decimals)
    }

    #[must_use]
    pub fn output_display(&self) -> String {
        format_token_amount(self.output_amount, self.pair.output.decimals)
    }
}
