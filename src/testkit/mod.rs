//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`ledger`] - [`MemoryLedger`](ledger::MemoryLedger), an in-memory
//!   [`TokenLedger`](crate::port::outbound::ledger::TokenLedger).
//! - [`filler`] - Scripted [`OrderFiller`](crate::port::outbound::protocol::OrderFiller)
//!   and [`FillerApi`](crate::port::outbound::filler::FillerApi) doubles.
//! - [`domain`] - Well-known keys and signed order builders.

pub mod domain;
pub mod filler;
pub mod ledger;
