//! Infrastructure layer.
//!
//! Technical concerns that support the workflows without containing order
//! logic: environment configuration and logging setup.

pub mod config;
