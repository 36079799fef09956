// libnfctag/src/tag/mifare/crc.rs

//! CRCs used by the Mifare Application Directory.

const CRC8_INIT: u8 = 0xC7;
const CRC8_POLY: u8 = 0x1D;
const CRC16_INIT: u16 = 0xC78C;
const CRC16_POLY: u16 = 0x1021;

/// MAD CRC-8 (poly 0x1D, init 0xC7). Bits are shifted out of the top of
/// the register with no input or output reflection; the MAD check bytes
/// written by existing cards match this form only.
pub fn crc8(data: &[u8]) -> u8 {
    data.iter().fold(CRC8_INIT, |mut crc, &b| {
        crc ^= b;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC8_POLY
            } else {
                crc << 1
            };
        }
        crc
    })
}

/// MAD2 CRC-16 (poly 0x1021, init 0xC78C). Same unreflected shift-left
/// form as [`crc8`].
pub fn crc16(data: &[u8]) -> u16 {
    data.iter().fold(CRC16_INIT, |mut crc, &b| {
        crc ^= (b as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ CRC16_POLY
            } else {
                crc << 1
            };
        }
        crc
    })
}
