//! Application services (use cases).
//!
//! Each service is one step of a command pipeline. Services take their
//! collaborators as port trait objects and never read configuration.

pub mod fill;
pub mod funding;
pub mod order;
pub mod submit;
