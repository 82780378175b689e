//! Outbound adapters (driven side).

pub mod evm;
pub mod filler;
pub mod quote;
