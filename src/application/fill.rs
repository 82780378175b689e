//! Taker fill path: gate, then simulate or execute.

use alloy_primitives::Address;
use tracing::info;

use super::funding::{ensure_funded, FundingOutcome};
use crate::domain::order::SignedOrder;
use crate::domain::token::{self, Token};
use crate::error::{ExecutionError, Result, ValidationError};
use crate::port::outbound::ledger::TokenLedger;
use crate::port::outbound::protocol::{FillReceipt, FillSimulation, OrderFiller};

/// Whether the fill is dry-run or broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    #[default]
    Simulate,
    Execute,
}

/// Result of a fill that did not revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    Simulated,
    Executed(FillReceipt),
}

/// Fill report including how the taker's funding was met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub taker_asset: Token,
    pub funding: FundingOutcome,
    pub outcome: FillOutcome,
}

/// Fill `signed` in full as the ledger account.
///
/// The order must not be expired at `now` (unix seconds) and both assets must
/// be known tokens. The taker's balance and allowance of the taker asset are
/// gated for `takingAmount` before the fill is attempted.
///
/// # Errors
///
/// Returns a validation error for an expired order or unknown asset,
/// [`crate::error::Error::InsufficientBalance`] on a short taker balance,
/// [`ExecutionError::Reverted`] if the simulation or transaction reverts, or
/// any ledger or RPC error.
pub async fn fill_order(
    ledger: &dyn TokenLedger,
    filler: &dyn OrderFiller,
    signed: &SignedOrder,
    spender: Address,
    mode: FillMode,
    now: u64,
) -> Result<FillReport> {
    let traits = signed.maker_traits();
    if traits.is_expired(now) {
        return Err(ValidationError::OrderExpired {
            expiration: traits.expiration(),
        }
        .into());
    }

    let order = signed.order();
    token::by_address(order.makerAsset)?;
    let taker_asset = token::by_address(order.takerAsset)?;
    let taker = ledger.account();

    let funding = ensure_funded(ledger, &taker_asset, spender, order.takingAmount).await?;

    let outcome = match mode {
        FillMode::Simulate => match filler.simulate_fill(signed, taker).await? {
            FillSimulation::Success => {
                info!(order_hash = %signed.order_hash(), taker = %taker, "Fill simulation succeeded");
                FillOutcome::Simulated
            }
            FillSimulation::Reverted { reason } => {
                return Err(ExecutionError::Reverted { reason }.into());
            }
        },
        FillMode::Execute => FillOutcome::Executed(filler.execute_fill(signed).await?),
    };

    Ok(FillReport {
        taker_asset,
        funding,
        outcome,
    })
}
