//! Token ledger port for ERC-20 balance and allowance workflows.
//!
//! Defines the chain operations the balance and approval gate needs, so the
//! gate can run against a live RPC endpoint or an in-memory double.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;

use crate::domain::token::Token;
use crate::error::Result;

/// Port for reading and raising ERC-20 allowances.
///
/// Implementations are bound to one signing account, the owner for
/// [`TokenLedger::approve`].
///
/// # Errors
///
/// Methods return [`Result`] for blockchain interaction failures.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Account that signs approvals.
    fn account(&self) -> Address;

    /// Token balance of `owner`, in base units.
    ///
    /// # Errors
    ///
    /// Returns an error if the balance cannot be read.
    async fn balance_of(&self, token: &Token, owner: Address) -> Result<U256>;

    /// Amount `spender` may transfer from `owner`, in base units.
    ///
    /// # Errors
    ///
    /// Returns an error if the allowance cannot be read.
    async fn allowance(&self, token: &Token, owner: Address, spender: Address) -> Result<U256>;

    /// Submit an approval for `amount` and wait for its receipt.
    ///
    /// Returns the confirmed transaction hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be sent or does not succeed.
    async fn approve(&self, token: &Token, spender: Address, amount: U256) -> Result<B256>;
}
