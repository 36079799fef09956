//! Small helpers shared across the crate: hex formatting for frame logs
//! and timeout arithmetic.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
