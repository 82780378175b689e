//! Well-known keys and builders for orders used across tests.

use alloy_primitives::{address, Address, U256};
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::Eip712Domain;

use crate::domain::order::{protocol_domain, sign_order, OrderParams, SignedOrder};
use crate::domain::token::{TradingPair, USDC, USDT};
use crate::domain::traits::MakerTraits;

/// Anvil development account 0.
pub const MAKER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Anvil development account 1.
pub const TAKER_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub const PROTOCOL: Address = address!("111111125421cA6dc452d289314280a0f8842A65");

pub const CHAIN_ID: u64 = 137;

pub fn maker_signer() -> PrivateKeySigner {
    MAKER_KEY.parse().expect("valid maker key")
}

pub fn taker_signer() -> PrivateKeySigner {
    TAKER_KEY.parse().expect("valid taker key")
}

/// Signing domain of the Polygon deployment.
pub fn domain() -> Eip712Domain {
    protocol_domain(CHAIN_ID, PROTOCOL)
}

/// USDC -> USDT order parameters for the maker account.
pub fn usdc_usdt_params(making: u64, taking: u64) -> OrderParams {
    OrderParams {
        pair: TradingPair::new(USDC, USDT).expect("allowed pair"),
        maker: maker_signer().address(),
        receiver: Address::ZERO,
        making_amount: U256::from(making),
        taking_amount: U256::from(taking),
        traits: MakerTraits::default(),
    }
}

/// Sign `params` with the maker key under [`domain`].
pub fn sign(params: &OrderParams, salt: u64) -> SignedOrder {
    let order = params.build(U256::from(salt)).expect("valid params");
    sign_order(order, &domain(), &maker_signer()).expect("signing succeeds")
}

/// 100 USDC for 99 USDT, signed by the maker.
pub fn signed_order() -> SignedOrder {
    sign(&usdc_usdt_params(100_000_000, 99_000_000), 1)
}
