//! Human-readable summaries of orders and funding outcomes.

use alloy_primitives::{Address, U256};
use chrono::DateTime;

use super::output;
use crate::application::funding::FundingOutcome;
use crate::domain::amount::format_token_amount;
use crate::domain::order::SignedOrder;
use crate::domain::token::{self, Token};

/// `"100 USDC"` for known tokens, raw base units and address otherwise.
#[must_use]
pub fn token_amount(asset: Address, amount: U256) -> String {
    match token::by_address(asset) {
        Ok(token) => format!("{} {}", format_token_amount(amount, token.decimals), token),
        Err(_) => format!("{amount} (base units of {asset})"),
    }
}

/// Unix timestamp as UTC, or `"never"` for zero.
#[must_use]
pub fn expiry(timestamp: u64) -> String {
    if timestamp == 0 {
        return "never".to_string();
    }
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map_or_else(
            || timestamp.to_string(),
            |at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        )
}

pub fn print_order(signed: &SignedOrder) {
    let order = signed.order();
    let traits = signed.maker_traits();
    output::field("Order hash", signed.order_hash());
    output::field("Maker", order.maker);
    output::field("Sells", token_amount(order.makerAsset, order.makingAmount));
    output::field("Buys", token_amount(order.takerAsset, order.takingAmount));
    output::field("Expires", expiry(traits.expiration()));
    if !traits.allows_partial_fills() {
        output::field("Fills", "whole order only");
    }
}

pub fn print_funding(token: &Token, outcome: &FundingOutcome) {
    match outcome {
        FundingOutcome::AlreadyApproved { allowance } => {
            output::note(&format!(
                "Allowance of {} {token} already covers this order",
                format_token_amount(*allowance, token.decimals)
            ));
        }
        FundingOutcome::Approved { tx_hash, amount } => {
            output::success(&format!(
                "Approved {} {token}",
                format_token_amount(*amount, token.decimals)
            ));
            output::field("Approval tx", tx_hash);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::{DAI, USDC};

    #[test]
    fn known_tokens_render_with_symbol() {
        assert_eq!(token_amount(USDC.address, U256::from(1_500_000u64)), "1.5 USDC");
        assert_eq!(
            token_amount(DAI.address, U256::from(10u64).pow(U256::from(18u64))),
            "1 DAI"
        );
    }

    #[test]
    fn unknown_tokens_render_raw() {
        let text = token_amount(Address::ZERO, U256::from(5u64));
        assert!(text.starts_with("5 (base units"));
    }

    #[test]
    fn expiry_rendering() {
        assert_eq!(expiry(0), "never");
        assert_eq!(expiry(1_700_000_000), "2023-11-14 22:13:20 UTC");
    }
}
