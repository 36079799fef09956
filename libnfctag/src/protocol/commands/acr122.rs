// libnfctag/src/protocol/commands/acr122.rs

use crate::constants::ACR122_APDU_CLASS;
use crate::protocol::Frame;
use crate::types::{KeyType, MifareKey};

/// Volatile key locations of the ACR122 key store.
pub const KEY_LOCATION_A: u8 = 0x00;
pub const KEY_LOCATION_B: u8 = 0x01;

/// Reader-level pseudo-APDUs understood by the ACR122 firmware itself
/// (as opposed to PN532 commands tunnelled through `FF 00 00 00`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Escape {
    /// Load a Mifare key into a volatile key location.
    LoadKey { location: u8, key: MifareKey },
    /// Authenticate a block with the key held at `location`.
    Authenticate {
        block: u8,
        key_type: KeyType,
        location: u8,
    },
    /// Enable or disable the buzzer on card detection.
    Buzzer { enabled: bool },
    /// Set the firmware timeout in 5 second units.
    SetTimeout { units: u8 },
    /// Set the PICC operating parameter (all automatic polling off).
    PiccParameters { value: u8 },
}

impl Escape {
    /// The APDU carried inside the CCID escape.
    pub fn apdu(&self) -> Vec<u8> {
        match self {
            Self::LoadKey { location, key } => {
                let mut out = vec![ACR122_APDU_CLASS, 0x82, 0x00, *location, 0x06];
                out.extend_from_slice(key.as_bytes());
                out
            }
            Self::Authenticate {
                block,
                key_type,
                location,
            } => vec![
                ACR122_APDU_CLASS,
                0x86,
                0x00,
                0x00,
                0x05,
                0x01, // version
                0x00,
                *block,
                key_type.auth_command(),
                *location,
            ],
            Self::Buzzer { enabled } => {
                let state = if *enabled { 0xFF } else { 0x00 };
                vec![ACR122_APDU_CLASS, 0x00, 0x52, state, 0x00]
            }
            Self::SetTimeout { units } => vec![ACR122_APDU_CLASS, 0x00, 0x41, *units, 0x00],
            Self::PiccParameters { value } => vec![ACR122_APDU_CLASS, 0x00, 0x51, *value, 0x00],
        }
    }

    /// The full CCID frame to hand to the transport.
    pub fn encode(&self) -> Vec<u8> {
        Frame::encode_escape(&self.apdu())
    }
}
