//! Outbound ports (driven side).

pub mod filler;
pub mod ledger;
pub mod protocol;
pub mod quote;
