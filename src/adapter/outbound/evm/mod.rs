//! EVM chain adapter: contract bindings, revert decoding, and the RPC client.

pub mod client;
pub mod contract;
pub mod revert;

pub use client::{onchain_order_hash, EvmClient};
