//! Offline quoter with a constant conversion rate.

use alloy_primitives::U256;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::quote::Quote;
use crate::domain::token::TradingPair;
use crate::error::{Result, ValidationError};
use crate::port::outbound::quote::QuoteProvider;

/// Quotes every pair at the same rate, in whole-token terms.
#[derive(Debug, Clone, Copy)]
pub struct FixedRateQuoter {
    rate: Decimal,
}

impl FixedRateQuoter {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRate`] if `rate` is not positive.
    pub fn new(rate: Decimal) -> std::result::Result<Self, ValidationError> {
        if rate <= Decimal::ZERO {
            return Err(ValidationError::InvalidRate(format!(
                "{rate} must be greater than 0"
            )));
        }
        Ok(Self {
            rate: rate.normalize(),
        })
    }

    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// `input × rate` rescaled from source to output decimals, truncated.
    fn convert(&self, pair: TradingPair, input: U256) -> std::result::Result<U256, ValidationError> {
        let overflow = || ValidationError::InvalidAmount {
            input: input.to_string(),
            reason: "conversion overflows 256 bits".to_string(),
        };
        let ten = U256::from(10u8);
        // Positive rate, so the mantissa is positive.
        let mantissa = U256::from(self.rate.mantissa().unsigned_abs());
        let numerator = input
            .checked_mul(mantissa)
            .and_then(|v| v.checked_mul(ten.pow(U256::from(pair.output.decimals))))
            .ok_or_else(overflow)?;
        let denominator = ten
            .pow(U256::from(self.rate.scale()))
            .checked_mul(ten.pow(U256::from(pair.source.decimals)))
            .ok_or_else(overflow)?;
        Ok(numerator / denominator)
    }
}

#[async_trait]
impl QuoteProvider for FixedRateQuoter {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn quote(&self, pair: TradingPair, input_amount: U256) -> Result<Quote> {
        if input_amount.is_zero() {
            return Err(ValidationError::ZeroAmount { field: "amount" }.into());
        }
        let output_amount = self.convert(pair, input_amount)?;
        if output_amount.is_zero() {
            return Err(ValidationError::ZeroAmount {
                field: "expectedOutput",
            }
            .into());
        }

        debug!(
            pair = %pair,
            input = %input_amount,
            output = %output_amount,
            rate = %self.rate,
            "Fixed-rate quote"
        );

        Ok(Quote {
            pair,
            input_amount,
            output_amount,
            rate: self.rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::{DAI, USDC, USDT, WETH};
    use rust_decimal_macros::dec;

    fn pair(source: crate::domain::token::Token, output: crate::domain::token::Token) -> TradingPair {
        TradingPair::new(source, output).unwrap()
    }

    #[tokio::test]
    async fn hundred_usdc_at_default_rate() {
        let quoter = FixedRateQuoter::new(dec!(0.99)).unwrap();
        let quote = quoter
            .quote(pair(USDC, USDT), U256::from(100_000_000u64))
            .await
            .unwrap();
        assert_eq!(quote.output_amount, U256::from(99_000_000u64));
        assert_eq!(quote.output_display(), "99");
        assert_eq!(quote.rate, dec!(0.99));
    }

    #[tokio::test]
    async fn scales_up_to_eighteen_decimals() {
        let quoter = FixedRateQuoter::new(dec!(0.99)).unwrap();
        let quote = quoter
            .quote(pair(USDC, DAI), U256::from(100_000_000u64))
            .await
            .unwrap();
        assert_eq!(
            quote.output_amount,
            U256::from(99u64) * U256::from(10u64).pow(U256::from(18u64))
        );
    }

    #[tokio::test]
    async fn scales_down_and_truncates() {
        let quoter = FixedRateQuoter::new(dec!(2500.5)).unwrap();
        // 0.0000000000000001 WETH is far below one USDC base unit.
        let err = quoter
            .quote(pair(WETH, USDC), U256::from(100u64))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Validation(ValidationError::ZeroAmount { .. })
        ));

        let one_weth = U256::from(10u64).pow(U256::from(18u64));
        let quote = quoter.quote(pair(WETH, USDC), one_weth).await.unwrap();
        assert_eq!(quote.output_amount, U256::from(2_500_500_000u64));
    }

    #[tokio::test]
    async fn zero_input_is_rejected() {
        let quoter = FixedRateQuoter::new(dec!(1)).unwrap();
        assert!(quoter.quote(pair(USDC, USDT), U256::ZERO).await.is_err());
    }

    #[test]
    fn non_positive_rate_is_rejected() {
        assert!(FixedRateQuoter::new(dec!(0)).is_err());
        assert!(FixedRateQuoter::new(dec!(-1)).is_err());
    }

    #[test]
    fn overflow_is_reported() {
        let quoter = FixedRateQuoter::new(dec!(1000)).unwrap();
        assert!(quoter.convert(pair(USDC, DAI), U256::MAX).is_err());
    }
}
