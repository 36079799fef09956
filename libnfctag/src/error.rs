// libnfctag/src/error.rs

use thiserror::Error;

use crate::types::{DeviceId, KeyType};

/// Frame-level decode failures. None of these are retried by the codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("empty frame")]
    Empty,

    #[error("invalid preamble")]
    InvalidPreamble,

    #[error("length checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    LengthChecksum { expected: u8, actual: u8 },

    #[error("declared length {declared} does not match carried length {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("truncated frame: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("invalid postamble")]
    InvalidPostamble,

    #[error("negative acknowledgement from reader")]
    Nack,

    #[error("unrecognized frame shape: {0}")]
    UnrecognizedShape(String),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("device not found")]
    DeviceNotFound,

    #[error("device {0} is already claimed")]
    DeviceBusy(DeviceId),

    #[error("device removed")]
    DeviceRemoved,

    #[cfg(feature = "usb")]
    #[error("usb error: {0}")]
    Usb(#[from] rusb::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("operation timed out")]
    Timeout,

    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    #[error("unexpected reply: {0}")]
    UnexpectedReply(String),

    #[error("reader status {status:#04x} for command {command:#04x}: {message}")]
    ReaderStatus {
        command: u8,
        status: u8,
        message: &'static str,
    },

    #[error("no single target in field: {tag_count} tags")]
    NoTarget { tag_count: u8 },

    #[error("unsupported target: SENS_RES={sens_res:#06x} SEL_RES={sel_res:#04x}")]
    UnsupportedTarget { sens_res: u16, sel_res: u8 },

    #[error("authentication exhausted for sector {sector} after {attempts} keys")]
    AuthenticationExhausted { sector: u8, attempts: usize },

    #[error("key {key_type} rejected for sector {sector}")]
    KeyRejected { sector: u8, key_type: KeyType },

    #[error("unsupported tag: capability container {cc:02x?}")]
    UnsupportedTag { cc: [u8; 4] },

    #[error("card is not personalized")]
    NonPersonalized,

    #[error("MAD crc mismatch: expected {expected:#04x}, got {actual:#04x}")]
    MadCrcMismatch { expected: u8, actual: u8 },

    #[error("unknown TLV type {tag:#04x} at offset {offset}")]
    UnknownTlv { tag: u8, offset: usize },

    #[error("TLV at offset {offset} declares {declared} bytes, {available} available")]
    TlvOverflow {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("no NDEF message TLV found")]
    NdefNotFound,

    #[error("NDEF record at offset {offset} declares {declared} bytes, {available} available")]
    RecordOverflow {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("chunked NDEF record at offset {offset} is not supported")]
    ChunkedRecord { offset: usize },

    #[error("unknown URI prefix index {0:#04x}")]
    UnknownUriPrefix(u8),

    #[error("invalid text record: {0}")]
    InvalidText(String),

    #[error("image of {size} bytes exceeds capacity of {capacity} bytes")]
    TooLarge { size: usize, capacity: usize },

    #[error("block {0} out of range")]
    InvalidBlock(u16),

    #[error("unsupported initiator command {0:#04x}")]
    UnsupportedInitiatorCommand(u8),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error was caused by the checksum of a received frame.
    pub fn is_checksum_error(&self) -> bool {
        matches!(
            self,
            Error::Frame(FrameError::ChecksumMismatch { .. })
                | Error::Frame(FrameError::LengthChecksum { .. })
        )
    }

    /// Transport-level failures end the in-flight operation and the session.
    pub fn is_transport_error(&self) -> bool {
        #[cfg(feature = "usb")]
        if matches!(self, Error::Usb(_)) {
            return true;
        }
        matches!(
            self,
            Error::Timeout | Error::DeviceRemoved | Error::Transport(_)
        )
    }
}
