//! Quote providers.

pub mod fixed;
pub mod remote;

pub use fixed::FixedRateQuoter;
pub use remote::RemoteQuoter;
