//! Order builder pipeline: quote to parameters to signed order.

use alloy_primitives::{Address, U256};
use alloy_signer::SignerSync;
use alloy_sol_types::Eip712Domain;
use tracing::info;

use super::funding::{ensure_funded, FundingOutcome};
use crate::domain::order::{random_salt, sign_order, OrderParams, SignedOrder};
use crate::domain::quote::Quote;
use crate::domain::traits::MakerTraits;
use crate::error::{Result, ValidationError};
use crate::port::outbound::ledger::TokenLedger;

/// Seconds an order stays fillable unless told otherwise.
pub const DEFAULT_EXPIRY_SECS: u64 = 3600;

/// Maker-chosen order options beyond the quoted amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOptions {
    /// `None` means the order never expires.
    pub expires_in: Option<u64>,
    pub allow_partial_fills: bool,
    pub allow_multiple_fills: bool,
    /// Zero sends proceeds to the maker.
    pub receiver: Address,
    /// Restrict fills to one taker.
    pub allowed_sender: Option<Address>,
    pub nonce: u64,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            expires_in: Some(DEFAULT_EXPIRY_SECS),
            allow_partial_fills: true,
            allow_multiple_fills: true,
            receiver: Address::ZERO,
            allowed_sender: None,
            nonce: 0,
        }
    }
}

impl OrderOptions {
    /// Pack the options into maker traits, with expiry counted from `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::FieldOverflow`] if the nonce or the
    /// resulting expiry timestamp does not fit its 40-bit field.
    pub fn maker_traits(&self, now: u64) -> std::result::Result<MakerTraits, ValidationError> {
        let mut traits = MakerTraits::default()
            .with_partial_fills(self.allow_partial_fills)
            .with_multiple_fills(self.allow_multiple_fills)
            .with_nonce(self.nonce)?;
        if let Some(secs) = self.expires_in {
            traits = traits.with_expiration(now.saturating_add(secs))?;
        }
        if let Some(sender) = self.allowed_sender {
            traits = traits.with_allowed_sender(sender);
        }
        Ok(traits)
    }
}

/// Order parameters that trade exactly the quoted amounts.
///
/// # Errors
///
/// Returns a validation error if the options do not pack into maker traits.
pub fn order_params(
    quote: &Quote,
    maker: Address,
    options: &OrderOptions,
    now: u64,
) -> std::result::Result<OrderParams, ValidationError> {
    Ok(OrderParams {
        pair: quote.pair,
        maker,
        receiver: options.receiver,
        making_amount: quote.input_amount,
        taking_amount: quote.output_amount,
        traits: options.maker_traits(now)?,
    })
}

/// A freshly signed order and how its maker funding was met.
#[derive(Debug, Clone)]
pub struct CreatedOrder {
    pub signed: SignedOrder,
    pub funding: FundingOutcome,
}

/// Gate the maker's funding of the maker asset, then build and sign.
///
/// # Errors
///
/// Returns a validation error if the maker is not the ledger account or an
/// amount is zero, [`crate::error::Error::InsufficientBalance`] on a short
/// balance, or any ledger or signing error.
pub async fn create_signed_order<S>(
    ledger: &dyn TokenLedger,
    signer: &S,
    domain: &Eip712Domain,
    spender: Address,
    params: &OrderParams,
) -> Result<CreatedOrder>
where
    S: SignerSync + ?Sized,
{
    if params.maker != ledger.account() {
        return Err(ValidationError::InvalidOrderField {
            field: "maker",
            reason: format!(
                "{} is not the signing account {}",
                params.maker,
                ledger.account()
            ),
        }
        .into());
    }
    // Validate amounts before any chain traffic.
    let order = params.build(U256::ZERO)?;

    let funding = ensure_funded(ledger, &params.pair.source, spender, order.makingAmount).await?;

    let order = params.build(random_salt())?;
    let signed = sign_order(order, domain, signer)?;
    info!(
        order_hash = %signed.order_hash(),
        pair = %params.pair,
        making = %params.making_amount,
        taking = %params.taking_amount,
        "Order signed"
    );

    Ok(CreatedOrder { signed, funding })
}
