//! lopctl - build, sign, simulate, and submit 1inch Limit Order Protocol v4
//! orders on Polygon.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Tokens, amounts, trait words, EIP-712 orders, signatures
//! - [`port`] - Traits for the ledger, fill execution, quoting, and the filler API
//! - [`adapter`] - EVM RPC client, HTTP filler client, quoters, and the CLI
//! - [`application`] - Funding gate, order creation, fill, and submission workflows
//! - [`infrastructure`] - Environment configuration and logging
//!
//! # Features
//!
//! - `testkit` - In-memory ledger and filler doubles plus signed order fixtures
//! - `integration-tests` - Tests that talk to a live Polygon RPC endpoint
//!
//! # Example
//!
//! ```no_run
//! use lopctl::adapter::outbound::quote::FixedRateQuoter;
//! use lopctl::domain::token::TradingPair;
//! use lopctl::port::outbound::quote::QuoteProvider;
//! use rust_decimal::Decimal;
//!
//! # async fn demo() -> lopctl::error::Result<()> {
//! let quoter = FixedRateQuoter::new(Decimal::new(99, 2))?;
//! let pair = TradingPair::from_symbols("USDC", "USDT")?;
//! let amount = alloy_primitives::U256::from(100_000_000u64);
//! let quote = quoter.quote(pair, amount).await?;
//! println!("{}", quote.output_display());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
