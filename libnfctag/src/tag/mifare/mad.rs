// libnfctag/src/tag/mifare/mad.rs

//! Mifare Application Directory (sector 0) and the General Purpose Byte.

use crate::tag::mifare::crc::crc8;
use crate::tag::mifare::layout::{SECTOR_COUNT, SECTOR_LEN};
use crate::{Error, Result};

/// Application ID of an NDEF sector, as stored in the MAD.
pub const NDEF_AID: [u8; 2] = [0x03, 0xE1];
pub const MAD_CRC_OFFSET: usize = 0x10;
pub const MAD_INFO_OFFSET: usize = 0x11;
pub const MAD_AID_OFFSET: usize = 0x12;
pub const MAD_END: usize = 0x30;
/// GPB inside the sector 0 image (trailer byte 9).
pub const GPB_OFFSET: usize = 0x39;
pub const TRAILER_GPB_INDEX: usize = 9;

/// Trailer of sector 0 on a composed card: MAD key A, MAD access bits with
/// GPB 0xC1, default key B.
pub const MAD_TRAILER: [u8; 16] = [
    0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0x78, 0x77, 0x88, 0xC1, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF,
];
/// Trailer of an NDEF sector: NFC Forum key A, read-only with key A,
/// default key B.
pub const NDEF_TRAILER: [u8; 16] = [
    0xD3, 0xF7, 0xD3, 0xF7, 0xD3, 0xF7, 0x7F, 0x07, 0x88, 0x40, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF,
];

/// General Purpose Byte of a sector trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display(fmt = "GPB({:#04x})", _0)]
pub struct Gpb(pub u8);

impl Gpb {
    /// Factory value on cards that were never personalised.
    pub const NON_PERSONALIZED: Self = Self(0x69);
    /// DA, MA and MAD version 1.
    pub const MAD_V1: Self = Self(0xC1);
    /// MA only.
    pub const MULTI_APPLICATION: Self = Self(0x40);

    /// MAD available
    pub fn da(self) -> bool {
        self.0 & 0x80 != 0
    }

    /// Multi-application card
    pub fn ma(self) -> bool {
        self.0 & 0x40 != 0
    }

    /// MAD version
    pub fn adv(self) -> u8 {
        self.0 & 0x03
    }

    pub fn is_non_personalized(self) -> bool {
        self == Self::NON_PERSONALIZED
    }
}

/// Check the CRC byte against the directory.
pub fn validate_crc(sector0: &[u8]) -> Result<()> {
    let table = crate::protocol::parser::slice_at(sector0, MAD_CRC_OFFSET, MAD_END - MAD_CRC_OFFSET)?;
    let expected = crc8(&table[1..]);
    if table[0] != expected {
        return Err(Error::MadCrcMismatch {
            expected,
            actual: table[0],
        });
    }
    Ok(())
}

/// Number of consecutive NDEF sectors declared from sector 1 on. The CRC is
/// checked first.
pub fn ndef_sector_count(sector0: &[u8]) -> Result<u8> {
    validate_crc(sector0)?;
    let count = sector0[MAD_AID_OFFSET..MAD_END]
        .chunks_exact(2)
        .take_while(|aid| *aid == NDEF_AID)
        .count();
    log::debug!("MAD declares {} NDEF sectors", count);
    Ok(count as u8)
}

/// Sector 0 of a card carrying `sectors` NDEF sectors.
pub fn compose_sector0(sectors: usize) -> Result<[u8; SECTOR_LEN]> {
    if sectors >= SECTOR_COUNT as usize {
        return Err(Error::TooLarge {
            size: (sectors + 1) * SECTOR_LEN,
            capacity: SECTOR_COUNT as usize * SECTOR_LEN,
        });
    }
    let mut sector0 = [0u8; SECTOR_LEN];
    for i in 0..sectors {
        let at = MAD_AID_OFFSET + i * 2;
        sector0[at..at + 2].copy_from_slice(&NDEF_AID);
    }
    sector0[MAD_CRC_OFFSET] = crc8(&sector0[MAD_INFO_OFFSET..MAD_END]);
    sector0[MAD_END..].copy_from_slice(&MAD_TRAILER);
    Ok(sector0)
}
