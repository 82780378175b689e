//! Limit order protocol fill port.

use alloy_primitives::{Address, B256};
use async_trait::async_trait;

use crate::domain::order::SignedOrder;
use crate::error::Result;

/// Outcome of a dry-run fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillSimulation {
    /// The call would succeed against current chain state.
    Success,
    /// The call would revert.
    Reverted {
        /// Decoded revert reason, or the raw selector.
        reason: String,
    },
}

/// Confirmed fill transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReceipt {
    pub tx_hash: B256,
    pub gas_used: u64,
    pub block_number: Option<u64>,
}

/// Port for filling signed orders on-chain as the taker.
#[async_trait]
pub trait OrderFiller: Send + Sync {
    /// Dry-run the fill with `taker` as sender. Spends no gas.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure; reverts are reported through
    /// [`FillSimulation::Reverted`].
    async fn simulate_fill(&self, order: &SignedOrder, taker: Address) -> Result<FillSimulation>;

    /// Broadcast the fill and wait for the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be sent or reverts.
    async fn execute_fill(&self, order: &SignedOrder) -> Result<FillReceipt>;
}
