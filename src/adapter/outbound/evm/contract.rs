//! Contract bindings for ERC-20 tokens and the limit order protocol.

use alloy_primitives::{Address, U256};
use alloy_sol_types::sol;

use crate::domain::order::Order;

// ERC-20 interface (minimal for balance and approval)
sol! {
    #[sol(rpc)]
    contract IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
    }
}

// The protocol wraps addresses in a uint256 user type, so the ABI order has
// uint256 where the EIP-712 order has address.
sol! {
    #[sol(rpc)]
    interface ILimitOrderProtocol {
        struct Order {
            uint256 salt;
            uint256 maker;
            uint256 receiver;
            uint256 makerAsset;
            uint256 takerAsset;
            uint256 makingAmount;
            uint256 takingAmount;
            uint256 makerTraits;
        }

        function fillOrder(
            Order calldata order,
            bytes32 r,
            bytes32 vs,
            uint256 amount,
            uint256 takerTraits
        ) external payable returns (uint256 makingAmount, uint256 takingAmount, bytes32 orderHash);

        function hashOrder(Order calldata order) external view returns (bytes32);
    }
}

// Custom errors raised by the order mixin and its libraries.
sol! {
    error AdvanceEpochFailed();
    error ArbitraryStaticCallFailed();
    error BadSignature();
    error BitInvalidatedOrder();
    error ETHTransferFailed();
    error EpochManagerAndBitInvalidatorsAreIncompatible();
    error EthDepositRejected();
    error InvalidMsgValue();
    error InvalidPermit2Transfer();
    error InvalidShortString();
    error InvalidatedOrder();
    error MakingAmountTooLow();
    error MismatchArraysLengths();
    error OrderExpired();
    error OrderIsNotSuitableForMassInvalidation();
    error PartialFillNotAllowed();
    error Permit2TransferAmountTooHigh();
    error PredicateIsNotTrue();
    error PrivateOrder();
    error ReentrancyDetected();
    error RemainingInvalidatedOrder();
    error SafeTransferFromFailed();
    error SwapWithZeroAmount();
    error TakingAmountExceeded();
    error TakingAmountTooHigh();
    error TransferFromMakerToTakerFailed();
    error TransferFromTakerToMakerFailed();
    error WrongSeriesNonce();
    error InvalidExtensionHash();
    error MissingOrderExtension();
    error UnexpectedOrderExtension();
    error MissingMakerAmountFlag();
    error SafeIncreaseAllowanceFailed();
    error ForceApproveFailed();
    error SimulationResults(bool success, bytes res);
}

fn address_word(address: Address) -> U256 {
    U256::from_be_slice(address.as_slice())
}

impl From<&Order> for ILimitOrderProtocol::Order {
    fn from(order: &Order) -> Self {
        Self {
            salt: order.salt,
            maker: address_word(order.maker),
            receiver: address_word(order.receiver),
            makerAsset: address_word(order.makerAsset),
            takerAsset: address_word(order.takerAsset),
            makingAmount: order.makingAmount,
            takingAmount: order.takingAmount,
            makerTraits: order.makerTraits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, keccak256};
    use alloy_sol_types::{SolCall, SolError};

    #[test]
    fn abi_order_packs_addresses_into_low_bytes() {
        let maker = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let order = Order {
            salt: U256::from(1u8),
            maker,
            receiver: Address::ZERO,
            makerAsset: maker,
            takerAsset: maker,
            makingAmount: U256::from(2u8),
            takingAmount: U256::from(3u8),
            makerTraits: U256::from(4u8),
        };
        let abi = ILimitOrderProtocol::Order::from(&order);
        let word = abi.maker.to_be_bytes::<32>();
        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], maker.as_slice());
        assert_eq!(abi.receiver, U256::ZERO);
        assert_eq!(abi.makerTraits, U256::from(4u8));
    }

    #[test]
    fn fill_order_selector_matches_deployed_abi() {
        let signature = "fillOrder((uint256,uint256,uint256,uint256,uint256,uint256,uint256,uint256),bytes32,bytes32,uint256,uint256)";
        assert_eq!(ILimitOrderProtocol::fillOrderCall::SIGNATURE, signature);
        assert_eq!(
            ILimitOrderProtocol::fillOrderCall::SELECTOR,
            keccak256(signature)[..4]
        );
    }

    #[test]
    fn erc20_selectors_are_standard() {
        assert_eq!(IERC20::balanceOfCall::SELECTOR, [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(IERC20::allowanceCall::SELECTOR, [0xdd, 0x62, 0xed, 0x3e]);
        assert_eq!(IERC20::approveCall::SELECTOR, [0x09, 0x5e, 0xa7, 0xb3]);
    }

    #[test]
    fn error_selectors_derive_from_signatures() {
        assert_eq!(BadSignature::SIGNATURE, "BadSignature()");
        assert_eq!(BadSignature::SELECTOR, keccak256("BadSignature()")[..4]);
        assert_eq!(
            SimulationResults::SIGNATURE,
            "SimulationResults(bool,bytes)"
        );
    }
}
