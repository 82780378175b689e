//! Filler service adapter.

pub mod client;

pub use client::FillerClient;
