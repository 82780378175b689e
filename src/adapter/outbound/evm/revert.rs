//! Human-readable rendering of revert payloads.

use alloy_primitives::hex;
use alloy_sol_types::{decode_revert_reason, Panic, Revert, SolError};

use super::contract::*;

/// Zero-argument protocol errors, keyed by selector.
const KNOWN_ERRORS: &[([u8; 4], &str)] = &[
    (AdvanceEpochFailed::SELECTOR, AdvanceEpochFailed::SIGNATURE),
    (ArbitraryStaticCallFailed::SELECTOR, ArbitraryStaticCallFailed::SIGNATURE),
    (BadSignature::SELECTOR, BadSignature::SIGNATURE),
    (BitInvalidatedOrder::SELECTOR, BitInvalidatedOrder::SIGNATURE),
    (ETHTransferFailed::SELECTOR, ETHTransferFailed::SIGNATURE),
    (
        EpochManagerAndBitInvalidatorsAreIncompatible::SELECTOR,
        EpochManagerAndBitInvalidatorsAreIncompatible::SIGNATURE,
    ),
    (EthDepositRejected::SELECTOR, EthDepositRejected::SIGNATURE),
    (InvalidMsgValue::SELECTOR, InvalidMsgValue::SIGNATURE),
    (InvalidPermit2Transfer::SELECTOR, InvalidPermit2Transfer::SIGNATURE),
    (InvalidShortString::SELECTOR, InvalidShortString::SIGNATURE),
    (InvalidatedOrder::SELECTOR, InvalidatedOrder::SIGNATURE),
    (MakingAmountTooLow::SELECTOR, MakingAmountTooLow::SIGNATURE),
    (MismatchArraysLengths::SELECTOR, MismatchArraysLengths::SIGNATURE),
    (OrderExpired::SELECTOR, OrderExpired::SIGNATURE),
    (
        OrderIsNotSuitableForMassInvalidation::SELECTOR,
        OrderIsNotSuitableForMassInvalidation::SIGNATURE,
    ),
    (PartialFillNotAllowed::SELECTOR, PartialFillNotAllowed::SIGNATURE),
    (
        Permit2TransferAmountTooHigh::SELECTOR,
        Permit2TransferAmountTooHigh::SIGNATURE,
    ),
    (PredicateIsNotTrue::SELECTOR, PredicateIsNotTrue::SIGNATURE),
    (PrivateOrder::SELECTOR, PrivateOrder::SIGNATURE),
    (ReentrancyDetected::SELECTOR, ReentrancyDetected::SIGNATURE),
    (RemainingInvalidatedOrder::SELECTOR, RemainingInvalidatedOrder::SIGNATURE),
    (SafeTransferFromFailed::SELECTOR, SafeTransferFromFailed::SIGNATURE),
    (SwapWithZeroAmount::SELECTOR, SwapWithZeroAmount::SIGNATURE),
    (TakingAmountExceeded::SELECTOR, TakingAmountExceeded::SIGNATURE),
    (TakingAmountTooHigh::SELECTOR, TakingAmountTooHigh::SIGNATURE),
    (
        TransferFromMakerToTakerFailed::SELECTOR,
        TransferFromMakerToTakerFailed::SIGNATURE,
    ),
    (
        TransferFromTakerToMakerFailed::SELECTOR,
        TransferFromTakerToMakerFailed::SIGNATURE,
    ),
    (WrongSeriesNonce::SELECTOR, WrongSeriesNonce::SIGNATURE),
    (InvalidExtensionHash::SELECTOR, InvalidExtensionHash::SIGNATURE),
    (MissingOrderExtension::SELECTOR, MissingOrderExtension::SIGNATURE),
    (UnexpectedOrderExtension::SELECTOR, UnexpectedOrderExtension::SIGNATURE),
    (MissingMakerAmountFlag::SELECTOR, MissingMakerAmountFlag::SIGNATURE),
    (
        SafeIncreaseAllowanceFailed::SELECTOR,
        SafeIncreaseAllowanceFailed::SIGNATURE,
    ),
    (ForceApproveFailed::SELECTOR, ForceApproveFailed::SIGNATURE),
];

/// Decode revert data into a display string.
///
/// Known protocol errors render as their signature (`"BadSignature()"`),
/// `Error(string)` and `Panic(uint256)` render their message, and anything
/// else renders with the raw selector so it can be looked up by hand.
#[must_use]
pub fn decode_revert(data: &[u8]) -> String {
    if data.is_empty() {
        return "empty revert data".to_string();
    }
    if data.len() < 4 {
        return format!("malformed revert data ({})", hex::encode_prefixed(data));
    }

    let mut selector = [0u8; 4];
    selector.copy_from_slice(&data[..4]);

    if let Some((_, signature)) = KNOWN_ERRORS.iter().find(|(s, _)| *s == selector) {
        return (*signature).to_string();
    }

    if selector == SimulationResults::SELECTOR {
        if let Ok(result) = SimulationResults::abi_decode(data) {
            return format!(
                "SimulationResults(success={}, res={})",
                result.success,
                hex::encode_prefixed(&result.res)
            );
        }
    }

    if selector == Revert::SELECTOR || selector == Panic::SELECTOR {
        if let Some(reason) = decode_revert_reason(data) {
            return reason;
        }
    }

    format!(
        "unknown error (selector {})",
        hex::encode_prefixed(selector)
    )
}
