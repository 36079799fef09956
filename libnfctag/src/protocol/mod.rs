// libnfctag/src/protocol/mod.rs

pub mod checksum;
pub mod codec;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;

pub use checksum::{dcs, lcs, lcs_extended};
pub use commands::{Command, Escape};
pub use frame::{Decoded, Frame};
pub use responses::{PassiveTarget, PassiveTargetList, Reply, classify};
