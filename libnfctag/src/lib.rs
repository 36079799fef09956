// libnfctag/src/lib.rs

//! libnfctag
//!
//! NFC tag protocol engine for PN533 (SCL3711) and ACR122 readers: frame
//! codec, reply classification, Type 2 and Mifare Classic drivers, NDEF
//! codec and single-target tag emulation.

pub mod constants;
pub mod device;
pub mod error;
pub mod ndef;
pub mod prelude;
pub mod protocol;
pub mod tag;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
