//! Quote provider port.

use alloy_primitives::U256;
use async_trait::async_trait;

use crate::domain::quote::Quote;
use crate::domain::token::TradingPair;
use crate::error::Result;

/// Source of conversion quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Short provider name for display.
    fn name(&self) -> &'static str;

    /// Quote `input_amount` source base units into output base units.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is zero or the provider fails.
    async fn quote(&self, pair: TradingPair, input_amount: U256) -> Result<Quote>;
}
