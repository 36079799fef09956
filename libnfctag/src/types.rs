// libnfctag/src/types.rs

use crate::Error;
use crate::constants::{
    ACR122U_PRODUCT_ID, ACR122U_VENDOR_ID, SCL3711_PRODUCT_ID, SCL3711_VENDOR_ID,
};
use derive_more::{Deref, Display};
use std::convert::TryFrom;

/// Reader chipset family. Selects the wire framing used for every exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Chipset {
    /// PN533 spoken to directly (SCL3711).
    #[display(fmt = "PN533")]
    Pn533,
    /// PN532 behind the ACR122 CCID escape interface.
    #[display(fmt = "ACR122")]
    Acr122,
}

impl Chipset {
    pub fn from_usb_ids(vendor_id: u16, product_id: u16) -> Option<Self> {
        match (vendor_id, product_id) {
            (SCL3711_VENDOR_ID, SCL3711_PRODUCT_ID) => Some(Self::Pn533),
            (ACR122U_VENDOR_ID, ACR122U_PRODUCT_ID) => Some(Self::Acr122),
            _ => None,
        }
    }
}

/// Tag family derived from the SENS_RES of a passive-target reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagType {
    #[display(fmt = "Type-2")]
    Type2,
    #[display(fmt = "Mifare Classic")]
    MifareClassic,
}

impl TagType {
    pub fn from_sens_res(sens_res: u16) -> Option<Self> {
        match sens_res {
            0x0044 => Some(Self::Type2),
            0x0004 => Some(Self::MifareClassic),
            _ => None,
        }
    }
}

/// Tag serial number (4 to 10 bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref)]
pub struct Uid(Vec<u8>);

impl Uid {
    pub const MIN_LEN: usize = 4;
    pub const MAX_LEN: usize = 10;

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() < Self::MIN_LEN || bytes.len() > Self::MAX_LEN {
            return Err(Error::InvalidLength {
                expected: Self::MIN_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes.to_vec()))
    }
}

/// Identity of the tag selected by the last passive-target detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagIdentity {
    pub tag_type: TagType,
    pub uid: Uid,
}

/// Mifare Classic key slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyType {
    A,
    B,
}

impl KeyType {
    /// MIFARE AUTH command byte for this key slot.
    pub fn auth_command(self) -> u8 {
        match self {
            Self::A => crate::constants::TAG_CMD_MIFARE_AUTH_A,
            Self::B => crate::constants::TAG_CMD_MIFARE_AUTH_B,
        }
    }
}

/// Mifare Classic key - Newtype Pattern (6 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MifareKey([u8; 6]);

impl MifareKey {
    /// Factory default key.
    pub const DEFAULT: Self = Self([0xFF; 6]);
    /// NFC Forum public key for NDEF sectors.
    pub const NFC_FORUM: Self = Self([0xD3, 0xF7, 0xD3, 0xF7, 0xD3, 0xF7]);
    /// MAD public key for sector 0.
    pub const MAD: Self = Self([0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5]);

    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl TryFrom<&[u8]> for MifareKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 6 {
            return Err(Error::InvalidLength {
                expected: 6,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 6];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// BlockData (16 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockData([u8; 16]);

impl BlockData {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }

    pub fn to_ascii_safe(&self) -> String {
        self.0
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() < 16 {
            return Err(Error::InvalidLength {
                expected: 16,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(&bytes[..16]);
        Ok(Self(arr))
    }
}

/// Opaque handle identifying a registered reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "#{}", _0)]
pub struct DeviceId(pub u32);
