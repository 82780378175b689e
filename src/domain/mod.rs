//! Exchange-agnostic data types: tokens, amounts, orders, and signatures.

pub mod amount;
pub mod order;
pub mod quote;
pub mod signature;
pub mod token;
pub mod traits;
