//! Conversion between on-chain base units and human-readable decimal strings.

use std::str::FromStr;

use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Render `amount` base units as a decimal string with `decimals` places.
///
/// Trailing fractional zeros are stripped, and whole amounts carry no dot:
/// `1_000_000` at 6 decimals is `"1"`, `1_500_000` is `"1.5"`.
#[must_use]
pub fn format_token_amount(amount: U256, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = usize::from(decimals);
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{digits}", "0".repeat(decimals + 1 - digits.len()))
    } else {
        digits
    };
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Parse a human decimal string into base units.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidAmount`] for empty, signed, or non-numeric
/// input, for more fractional digits than `decimals`, or on overflow.
pub fn parse_token_amount(input: &str, decimals: u8) -> Result<U256, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidAmount {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let text = input.trim();
    if text.is_empty() {
        return Err(invalid("empty"));
    }

    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("expected an unsigned decimal number"));
    }
    if fraction.len() > usize::from(decimals) {
        return Err(invalid(&format!(
            "more than {decimals} fractional digits"
        )));
    }

    let scaled = format!(
        "{whole}{fraction}{}",
        "0".repeat(usize::from(decimals) - fraction.len())
    );
    let scaled = scaled.trim_start_matches('0');
    if scaled.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(scaled, 10).map_err(|_| invalid("out of range"))
}

/// Parse a base-unit integer string such as an order's `makingAmount`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidAmount`] if the text is not an unsigned integer.
pub fn parse_base_units(input: &str) -> Result<U256, ValidationError> {
    parse_token_amount(input, 0)
}

/// Decimal view of a base-unit amount for display math.
///
/// Returns `None` if the value does not fit in a [`Decimal`].
#[must_use]
pub fn to_decimal(amount: U256, decimals: u8) -> Option<Decimal> {
    Decimal::from_str(&format_token_amount(amount, decimals)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn whole_amounts_have_no_fraction() {
        assert_eq!(format_token_amount(U256::from(1_000_000u64), 6), "1");
        assert_eq!(format_token_amount(U256::from(100_000_000u64), 6), "100");
    }

    #[test]
    fn trailing_zeros_are_stripped() {
        assert_eq!(format_token_amount(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_token_amount(U256::from(1_230_000u64), 6), "1.23");
    }

    #[test]
    fn small_amounts_are_zero_padded() {
        assert_eq!(format_token_amount(U256::from(1u64), 6), "0.000001");
        assert_eq!(format_token_amount(U256::from(10u64), 18), "0.00000000000000001");
        assert_eq!(format_token_amount(U256::ZERO, 6), "0");
    }

    #[test]
    fn zero_decimals_prints_integer() {
        assert_eq!(format_token_amount(U256::from(42u64), 0), "42");
    }

    #[test]
    fn large_values_beyond_u128_format() {
        let amount = U256::MAX;
        let text = format_token_amount(amount, 18);
        assert_eq!(parse_token_amount(&text, 18).unwrap(), amount);
    }

    #[test]
    fn parse_accepts_fraction_and_whole() {
        assert_eq!(
            parse_token_amount("1.5", 6).unwrap(),
            U256::from(1_500_000u64)
        );
        assert_eq!(parse_token_amount("100", 6).unwrap(), U256::from(100_000_000u64));
        assert_eq!(parse_token_amount(".25", 2).unwrap(), U256::from(25u64));
        assert_eq!(parse_token_amount("2.", 2).unwrap(), U256::from(200u64));
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", " ", ".", "-1", "+1", "1e6", "abc", "1.2.3", "1,5"] {
            assert!(parse_token_amount(input, 6).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn parse_rejects_excess_precision() {
        let err = parse_token_amount("1.0000001", 6).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount { .. }));
    }

    #[test]
    fn parse_rejects_overflow() {
        let too_big = format!("{}0", U256::MAX);
        assert!(parse_base_units(&too_big).is_err());
    }

    #[test]
    fn round_trip_reconstructs_original() {
        let samples = [
            (U256::from(0u64), 6u8),
            (U256::from(1u64), 6),
            (U256::from(999_999u64), 6),
            (U256::from(1_000_000u64), 6),
            (U256::from(123_456_789u64), 6),
            (U256::from(10u64).pow(U256::from(18u64)), 18),
            (U256::from(1_000_000_000_000_000_001u128), 18),
            (U256::from(7u64), 0),
        ];
        for (amount, decimals) in samples {
            let text = format_token_amount(amount, decimals);
            assert_eq!(parse_token_amount(&text, decimals).unwrap(), amount, "{text}");
        }
    }

    #[test]
    fn decimal_view_matches_formatting() {
        assert_eq!(to_decimal(U256::from(1_500_000u64), 6), Some(dec!(1.5)));
        assert_eq!(to_decimal(U256::MAX, 0), None);
    }
}
