// libnfctag/src/tag/mifare/layout.rs

//! Mifare Classic 1K geometry and logic block addressing.
//!
//! Logic blocks number the data blocks of the card, skipping block 0
//! (manufacturer data), the MAD blocks of sector 0 are logic 0 and 1, and
//! every sector trailer.

use crate::{Error, Result};

pub const BLOCK_LEN: usize = 16;
pub const BLOCKS_PER_SECTOR: u8 = 4;
pub const SECTOR_COUNT: u8 = 16;
pub const BLOCK_COUNT: u8 = 64;
pub const SECTOR_LEN: usize = 64;
pub const CARD_LEN: usize = 1024;
/// Data bytes of one sector (three blocks).
pub const SECTOR_DATA_LEN: usize = 0x30;
/// Two logic blocks in sector 0, three in each other sector.
pub const LOGIC_BLOCK_COUNT: u8 = 2 + (SECTOR_COUNT - 1) * 3;

pub fn sector_of(block: u8) -> u8 {
    block / BLOCKS_PER_SECTOR
}

pub fn trailer_of(sector: u8) -> u8 {
    sector * BLOCKS_PER_SECTOR + 3
}

pub fn is_trailer(block: u8) -> bool {
    block % BLOCKS_PER_SECTOR == 3
}

fn check_logic(logic: u8) -> Result<()> {
    if logic >= LOGIC_BLOCK_COUNT {
        return Err(Error::InvalidBlock(logic as u16));
    }
    Ok(())
}

/// Sector holding logic block `logic`.
pub fn log2sec(logic: u8) -> Result<u8> {
    check_logic(logic)?;
    Ok(if logic < 2 { 0 } else { (logic - 2) / 3 + 1 })
}

/// Physical block of logic block `logic`.
pub fn log2phy(logic: u8) -> Result<u8> {
    let sector = log2sec(logic)?;
    Ok(if logic < 2 {
        logic + 1
    } else {
        sector * BLOCKS_PER_SECTOR + (logic - 2) % 3
    })
}

/// Physical block number checked against the card size.
pub fn check_block(block: usize) -> Result<u8> {
    u8::try_from(block)
        .ok()
        .filter(|b| *b < BLOCK_COUNT)
        .ok_or(Error::InvalidBlock(block.min(u16::MAX as usize) as u16))
}
