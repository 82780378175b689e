//! Balance and allowance gate run before signing or filling.
//!
//! The gate reads the balance first and stops on a shortfall, so an account
//! that cannot pay never sends an approval. Allowances are only raised, to
//! exactly the required amount.

use alloy_primitives::{Address, B256, U256};
use tracing::{debug, info};

use crate::domain::amount::format_token_amount;
use crate::domain::token::Token;
use crate::error::{Error, Result};
use crate::port::outbound::ledger::TokenLedger;

/// How the allowance requirement was met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundingOutcome {
    /// Existing allowance already covers the amount.
    AlreadyApproved { allowance: U256 },
    /// An approval transaction was confirmed.
    Approved { tx_hash: B256, amount: U256 },
}

impl FundingOutcome {
    #[must_use]
    pub fn approval_tx(&self) -> Option<B256> {
        match self {
            Self::Approved { tx_hash, .. } => Some(*tx_hash),
            Self::AlreadyApproved { .. } => None,
        }
    }
}

/// Fail with [`Error::InsufficientBalance`] unless `owner` holds `required`.
///
/// Returns the balance read.
///
/// # Errors
///
/// Returns an error if the balance is short or cannot be read.
pub async fn check_balance(
    ledger: &dyn TokenLedger,
    token: &Token,
    owner: Address,
    required: U256,
) -> Result<U256> {
    let balance = ledger.balance_of(token, owner).await?;
    debug!(token = %token, owner = %owner, balance = %balance, required = %required, "Balance read");

    if balance < required {
        return Err(Error::InsufficientBalance {
            token: token.symbol.to_string(),
            required: format_token_amount(required, token.decimals),
            available: format_token_amount(balance, token.decimals),
        });
    }
    Ok(balance)
}

/// Raise the ledger account's allowance for `spender` to `amount` if it is lower.
///
/// # Errors
///
/// Returns an error if the allowance cannot be read or the approval fails.
pub async fn ensure_allowance(
    ledger: &dyn TokenLedger,
    token: &Token,
    spender: Address,
    amount: U256,
) -> Result<FundingOutcome> {
    let owner = ledger.account();
    let allowance = ledger.allowance(token, owner, spender).await?;
    if allowance >= amount {
        debug!(token = %token, allowance = %allowance, "Allowance sufficient");
        return Ok(FundingOutcome::AlreadyApproved { allowance });
    }

    info!(
        token = %token,
        spender = %spender,
        allowance = %allowance,
        amount = %amount,
        "Allowance too low, approving"
    );
    let tx_hash = ledger.approve(token, spender, amount).await?;
    Ok(FundingOutcome::Approved { tx_hash, amount })
}

/// Balance check followed by the allowance gate, for the ledger account.
///
/// # Errors
///
/// Returns [`Error::InsufficientBalance`] without touching the allowance when
/// the balance is short, or any ledger error.
pub async fn ensure_funded(
    ledger: &dyn TokenLedger,
    token: &Token,
    spender: Address,
    amount: U256,
) -> Result<FundingOutcome> {
    check_balance(ledger, token, ledger.account(), amount).await?;
    ensure_allowance(ledger, token, spender, amount).await
}
