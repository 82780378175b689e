//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                  ┌──────────────────────┐
//!                  │     Application      │
//!     ┌────────────┤   Domain + Port      ├─────────────┐
//!     │            └──────────────────────┘             │
//!     ▼                      ▼                          ▼
//! ┌─────────┐         ┌─────────────┐           ┌──────────────┐
//! │  EVM    │         │   Quote     │           │   Filler     │
//! │ Adapter │         │  Adapters   │           │ HTTP Adapter │
//! └─────────┘         └─────────────┘           └──────────────┘
//! ```
//!
//! - [`outbound::ledger::TokenLedger`] - ERC-20 balance, allowance, approve
//! - [`outbound::protocol::OrderFiller`] - simulate or execute a fill
//! - [`outbound::quote::QuoteProvider`] - pricing
//! - [`outbound::filler::FillerApi`] - remote filler service

pub mod outbound;
