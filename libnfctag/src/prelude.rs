// libnfctag/src/prelude.rs

pub use crate::device::{
    DeviceRegistry, Initialized, Reader, ReaderBuilder, ReaderConfig, Uninitialized,
};
pub use crate::ndef::{Message, Record, TextEncoding};
pub use crate::protocol::{Command, Frame, Reply};
pub use crate::tag::{Tag, TagSession};
pub use crate::transport::{MockTransport, Transport};
pub use crate::{
    BlockData, Chipset, DeviceId, Error, FrameError, KeyType, MifareKey, Result, TagIdentity,
    TagType, Uid,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms};
