// libnfctag/src/tag/mifare/mod.rs

//! Mifare Classic 1K driver: per-sector authentication, MAD-guided NDEF
//! reads, card composition and block writes.

pub mod crc;
pub mod layout;
pub mod mad;

pub use crc::{crc16, crc8};
pub use layout::{log2phy, log2sec};
pub use mad::Gpb;

use crate::constants::TAG_CMD_MIFARE_WRITE;
use crate::tag::session::{AuthState, TagSession};
use crate::tag::tlv;
use crate::types::{BlockData, KeyType, MifareKey};
use crate::{Error, Result};

use layout::{
    BLOCK_COUNT, BLOCK_LEN, BLOCKS_PER_SECTOR, CARD_LEN, SECTOR_DATA_LEN, SECTOR_LEN, check_block,
    is_trailer, sector_of, trailer_of,
};

/// Key A candidates tried by public authentication, in order.
pub const PUBLIC_KEYS: [MifareKey; 3] = [MifareKey::DEFAULT, MifareKey::NFC_FORUM, MifareKey::MAD];

/// Overwrite the unreadable keys of a trailer read from the tag: key A with
/// the key that unlocked the sector (when it was key A), key B with the
/// default key.
pub fn copy_auth_keys(trailer: &mut [u8; 16], auth: Option<&AuthState>) {
    match auth {
        Some(state) if state.key_type == KeyType::A => {
            trailer[..6].copy_from_slice(state.key.as_bytes());
        }
        _ => log::debug!("key A unknown, trailer keeps the bytes read"),
    }
    trailer[10..].copy_from_slice(MifareKey::DEFAULT.as_bytes());
}

/// Image of a 1K card carrying `ndef`: MAD sector followed by one sector per
/// 48 bytes of NDEF TLV.
pub fn compose(ndef: &[u8]) -> Result<Vec<u8>> {
    let tlv = tlv::ndef_tlv(ndef);
    let sectors = tlv.len().div_ceil(SECTOR_DATA_LEN);
    let size = SECTOR_LEN + sectors * SECTOR_LEN;
    if size > CARD_LEN {
        return Err(Error::TooLarge {
            size,
            capacity: CARD_LEN,
        });
    }

    let mut image = Vec::with_capacity(size);
    image.extend_from_slice(&mad::compose_sector0(sectors)?);
    for chunk in tlv.chunks(SECTOR_DATA_LEN) {
        let mut data = [0u8; SECTOR_DATA_LEN];
        data[..chunk.len()].copy_from_slice(chunk);
        image.extend_from_slice(&data);
        image.extend_from_slice(&mad::NDEF_TRAILER);
    }
    Ok(image)
}

/// Driver for a selected Mifare Classic tag.
pub struct MifareClassic<'r> {
    session: TagSession<'r>,
}

impl<'r> MifareClassic<'r> {
    pub fn new(session: TagSession<'r>) -> Self {
        Self { session }
    }

    pub fn session(&mut self) -> &mut TagSession<'r> {
        &mut self.session
    }

    pub fn into_session(self) -> TagSession<'r> {
        self.session
    }

    /// Unlock the sector of `block` with the first public key A that works,
    /// then prime key B with the default key. A sector that is already
    /// unlocked is left alone.
    pub async fn public_authentication(&mut self, block: u8) -> Result<()> {
        let sector = sector_of(block);
        if self.session.auth_state().is_some_and(|a| a.sector == sector) {
            return Ok(());
        }

        for (attempt, key) in PUBLIC_KEYS.iter().enumerate() {
            log::debug!("sector {}: trying key A {}", sector, key.to_hex());
            if !self
                .session
                .authenticate(block, sector, KeyType::A, key)
                .await?
            {
                continue;
            }
            log::debug!("sector {}: key A accepted on attempt {}", sector, attempt + 1);

            let state = self.session.auth_state().copied();
            if !self
                .session
                .authenticate(block, sector, KeyType::B, &MifareKey::DEFAULT)
                .await?
            {
                return Err(Error::KeyRejected {
                    sector,
                    key_type: KeyType::B,
                });
            }
            // key A is the one trailers need back
            if let Some(state) = state {
                self.session.set_auth_state(state);
            }
            return Ok(());
        }

        Err(Error::AuthenticationExhausted {
            sector,
            attempts: PUBLIC_KEYS.len(),
        })
    }

    /// Unlock the sector of `block` with a caller supplied key B. A rejected
    /// key is reported, never retried with other keys.
    pub async fn private_authentication(&mut self, block: u8, key: &MifareKey) -> Result<()> {
        let sector = sector_of(block);
        let current = AuthState {
            sector,
            key: *key,
            key_type: KeyType::B,
        };
        if self.session.auth_state() == Some(&current) {
            return Ok(());
        }
        if !self
            .session
            .authenticate(block, sector, KeyType::B, key)
            .await?
        {
            return Err(Error::KeyRejected {
                sector,
                key_type: KeyType::B,
            });
        }
        Ok(())
    }

    /// Authenticated READ of one physical block. Trailers come back with
    /// their keys filled in.
    pub async fn read_physical_block(&mut self, block: u8) -> Result<BlockData> {
        let block = check_block(block as usize)?;
        self.public_authentication(block).await?;
        let data = self.session.read_block(block).await?;
        if !is_trailer(block) {
            return Ok(data);
        }
        let mut trailer = *data.as_bytes();
        copy_auth_keys(&mut trailer, self.session.auth_state());
        Ok(BlockData::from_bytes(trailer))
    }

    async fn read_blocks(&mut self, first: u8, count: u8) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(count as usize * BLOCK_LEN);
        for block in first..first.saturating_add(count) {
            out.extend_from_slice(self.read_physical_block(block).await?.as_bytes());
        }
        Ok(out)
    }

    /// Sector 0, failing fast on a card that was never personalised.
    async fn read_directory(&mut self) -> Result<Vec<u8>> {
        let sector0 = self.read_blocks(0, BLOCKS_PER_SECTOR).await?;
        let gpb = Gpb(sector0[mad::GPB_OFFSET]);
        log::debug!("sector 0 {}", gpb);
        if gpb.is_non_personalized() {
            return Err(Error::NonPersonalized);
        }
        Ok(sector0)
    }

    /// Raw card image, trailers with keys filled in. Only the sectors the
    /// MAD declares are read.
    pub async fn read_card(&mut self) -> Result<Vec<u8>> {
        let mut image = self.read_directory().await?;
        let sectors = mad::ndef_sector_count(&image)?;
        let max_block = ((sectors + 1) * BLOCKS_PER_SECTOR).min(BLOCK_COUNT);
        log::debug!("reading {} of {} blocks", max_block, BLOCK_COUNT);
        image.extend(self.read_blocks(BLOCKS_PER_SECTOR, max_block - BLOCKS_PER_SECTOR).await?);
        Ok(image)
    }

    /// Read the NDEF message bytes.
    pub async fn read(&mut self) -> Result<Vec<u8>> {
        let image = self.read_card().await?;
        let data: Vec<u8> = image[SECTOR_LEN..]
            .chunks(SECTOR_LEN)
            .flat_map(|sector| &sector[..SECTOR_DATA_LEN.min(sector.len())])
            .copied()
            .collect();
        Ok(tlv::find_ndef(&data, 0)?.to_vec())
    }

    /// Write a composed card image. Block 0 is never written.
    pub async fn write(&mut self, image: &[u8]) -> Result<()> {
        if image.len() > CARD_LEN {
            return Err(Error::TooLarge {
                size: image.len(),
                capacity: CARD_LEN,
            });
        }
        self.write_physical(1, None, image.get(BLOCK_LEN..).unwrap_or_default())
            .await
    }

    /// Write `data` to consecutive physical blocks from `block`, padding the
    /// last one. Each sector is unlocked with `key` as key B, or with the
    /// public keys when no key is given.
    pub async fn write_physical(
        &mut self,
        block: u8,
        key: Option<&MifareKey>,
        data: &[u8],
    ) -> Result<()> {
        if block == 0 {
            return Err(Error::InvalidBlock(0));
        }
        let count = data.len().div_ceil(BLOCK_LEN);
        check_block(block as usize + count.saturating_sub(1))?;

        for (i, chunk) in data.chunks(BLOCK_LEN).enumerate() {
            let phy = check_block(block as usize + i)?;
            match key {
                Some(key) => self.private_authentication(phy, key).await?,
                None => self.public_authentication(phy).await?,
            }
            self.write_block(phy, chunk).await?;
        }
        Ok(())
    }

    /// Logic blocks from `logic`.
    pub async fn read_logic(&mut self, logic: u8, count: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(count * BLOCK_LEN);
        for i in 0..count {
            let l = logic as usize + i;
            let l = u8::try_from(l).map_err(|_| Error::InvalidBlock(l as u16))?;
            let phy = log2phy(l)?;
            out.extend_from_slice(self.read_physical_block(phy).await?.as_bytes());
        }
        Ok(out)
    }

    /// Write logic blocks from `logic`. After each block the sector's GPB is
    /// set to 0xC1 for sector 0 and 0x40 elsewhere.
    pub async fn write_logic(&mut self, logic: u8, data: &[u8]) -> Result<()> {
        let count = data.len().div_ceil(BLOCK_LEN);
        let last = u8::try_from(logic as usize + count.saturating_sub(1))
            .map_err(|_| Error::InvalidBlock(u16::MAX))?;
        log2phy(last)?;

        for (i, chunk) in data.chunks(BLOCK_LEN).enumerate() {
            let l = logic + i as u8;
            let phy = log2phy(l)?;
            self.public_authentication(phy).await?;
            self.write_block(phy, chunk).await?;
            self.update_gpb(log2sec(l)?).await?;
        }
        Ok(())
    }

    async fn update_gpb(&mut self, sector: u8) -> Result<()> {
        let block = trailer_of(sector);
        let gpb = if block == 3 {
            Gpb::MAD_V1
        } else {
            Gpb::MULTI_APPLICATION
        };
        let mut trailer = *self.read_physical_block(block).await?.as_bytes();
        if trailer[mad::TRAILER_GPB_INDEX] == gpb.0 {
            log::debug!("sector {} {} already set", sector, gpb);
            return Ok(());
        }
        trailer[mad::TRAILER_GPB_INDEX] = gpb.0;
        log::debug!("sector {}: writing {}", sector, gpb);
        self.write_block(block, &trailer).await
    }

    async fn write_block(&mut self, block: u8, chunk: &[u8]) -> Result<()> {
        let mut buf = [0u8; BLOCK_LEN];
        buf[..chunk.len()].copy_from_slice(chunk);
        log::trace!("write block {}", block);
        self.session
            .write_block(TAG_CMD_MIFARE_WRITE, block, &buf)
            .await
    }
}
