// libnfctag/src/tag/type2.rs

//! NFC Forum Type 2 tags (Ultralight family).

use crate::constants::{NXP_MANUFACTURER_ID, READ_CHUNK_LEN, TAG_CMD_TYPE2_WRITE};
use crate::tag::session::TagSession;
use crate::tag::tlv;
use crate::{Error, Result};

pub const PAGE_LEN: usize = 4;
/// UID, internal, lock bytes and CC: pages 0..4.
pub const HEADER_LEN: usize = 16;
pub const CC_OFFSET: usize = 12;
pub const CC_MAGIC: u8 = 0xE1;
pub const CC_VERSION_1_0: u8 = 0x10;
/// Page holding the capability container; writes start here.
pub const CC_PAGE: u8 = 3;
pub const DATA_START_PAGE: u8 = 4;
/// Largest image we compose.
pub const MAX_IMAGE_LEN: usize = 192;
/// Total memory of a plain Ultralight.
pub const ULTRALIGHT_LEN: usize = 64;
pub const ULTRALIGHT_DATA_LEN: usize = 48;
pub const ULTRALIGHT_C_DATA_LEN: usize = 144;
/// Lock control TLV for the Ultralight C dynamic lock bits.
pub const ULTRALIGHT_C_LOCK_TLV: [u8; 5] = [0x01, 0x03, 0xA0, 0x10, 0x44];
/// First page past the Ultralight user memory.
const DETECT_PAGE: u8 = 0x10;

/// Capability container bytes (page 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityContainer(pub [u8; 4]);

impl CapabilityContainer {
    pub fn from_header(header: &[u8]) -> Result<Self> {
        let cc = crate::protocol::parser::slice_at(header, CC_OFFSET, 4)?;
        Ok(Self([cc[0], cc[1], cc[2], cc[3]]))
    }

    pub fn major_version(&self) -> u8 {
        self.0[1] >> 4
    }

    pub fn minor_version(&self) -> u8 {
        self.0[1] & 0x0F
    }

    /// Data area size in bytes.
    pub fn data_size(&self) -> usize {
        self.0[2] as usize * 8
    }

    pub fn read_access(&self) -> u8 {
        self.0[3] >> 4
    }

    pub fn write_access(&self) -> u8 {
        self.0[3] & 0x0F
    }

    /// NDEF magic, mapping version 1.x and open read access.
    pub fn validate(&self) -> Result<()> {
        if self.0[0] != CC_MAGIC || self.major_version() != 1 || self.read_access() != 0 {
            return Err(Error::UnsupportedTag { cc: self.0 });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Type2Variant {
    #[display(fmt = "Ultralight")]
    Ultralight,
    #[display(fmt = "Ultralight C")]
    UltralightC,
    #[display(fmt = "unknown Type 2")]
    Unknown,
}

/// Driver for a selected Type 2 tag.
pub struct Type2Tag<'r> {
    session: TagSession<'r>,
}

impl<'r> Type2Tag<'r> {
    pub fn new(session: TagSession<'r>) -> Self {
        Self { session }
    }

    pub fn session(&mut self) -> &mut TagSession<'r> {
        &mut self.session
    }

    pub fn into_session(self) -> TagSession<'r> {
        self.session
    }

    /// Tell Ultralight from Ultralight C by reading past the Ultralight
    /// memory. Only NXP tags are checked.
    ///
    /// A plain Ultralight NAKs the read and goes idle; select it again
    /// before sending further commands.
    pub async fn detect(&mut self) -> Result<Type2Variant> {
        if self.session.uid().first() != Some(&NXP_MANUFACTURER_ID) {
            return Ok(Type2Variant::Unknown);
        }
        let variant = match self.session.read_block(DETECT_PAGE).await {
            Ok(_) => Type2Variant::UltralightC,
            Err(Error::ReaderStatus { status, .. }) => {
                log::debug!("detect page refused ({:#04x})", status);
                Type2Variant::Ultralight
            }
            Err(e) => return Err(e),
        };
        log::info!("detected {}", variant);
        Ok(variant)
    }

    /// Read the NDEF message bytes.
    pub async fn read(&mut self) -> Result<Vec<u8>> {
        let header = self.session.read_block(0).await?;
        let cc = CapabilityContainer::from_header(header.as_bytes())?;
        cc.validate()?;

        let chunks = cc.data_size().div_ceil(READ_CHUNK_LEN);
        log::debug!("CC {:02x?}: {} data bytes, {} reads", cc.0, cc.data_size(), chunks);

        let mut memory = Vec::with_capacity(HEADER_LEN + chunks * READ_CHUNK_LEN);
        memory.extend_from_slice(header.as_bytes());
        for i in 0..chunks {
            let page = DATA_START_PAGE as usize + i * PAGE_LEN;
            let page = u8::try_from(page).map_err(|_| Error::InvalidBlock(page as u16))?;
            let block = self.session.read_block(page).await?;
            memory.extend_from_slice(block.as_bytes());
        }

        Ok(tlv::find_ndef(&memory, HEADER_LEN)?.to_vec())
    }

    /// Write a composed image. Page 3 (the CC) is the first page written.
    pub async fn write(&mut self, image: &[u8]) -> Result<()> {
        if image.len() > MAX_IMAGE_LEN {
            return Err(Error::TooLarge {
                size: image.len(),
                capacity: MAX_IMAGE_LEN,
            });
        }
        let start = CC_PAGE as usize * PAGE_LEN;
        let body = image.get(start..).unwrap_or_default();
        self.write_pages(CC_PAGE, body).await
    }

    /// 16 bytes starting at `page`.
    pub async fn read_logic(&mut self, page: u8, count: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(count * READ_CHUNK_LEN);
        for i in 0..count {
            let p = page as usize + i * PAGE_LEN;
            let p = u8::try_from(p).map_err(|_| Error::InvalidBlock(p as u16))?;
            out.extend_from_slice(self.session.read_block(p).await?.as_bytes());
        }
        Ok(out)
    }

    pub async fn write_logic(&mut self, page: u8, data: &[u8]) -> Result<()> {
        if page < CC_PAGE {
            return Err(Error::InvalidBlock(page as u16));
        }
        self.write_pages(page, data).await
    }

    /// WRITE page by page, zero-padding the last page.
    async fn write_pages(&mut self, first: u8, data: &[u8]) -> Result<()> {
        for (i, chunk) in data.chunks(PAGE_LEN).enumerate() {
            let page = first as usize + i;
            let page = u8::try_from(page).map_err(|_| Error::InvalidBlock(page as u16))?;
            let mut buf = [0u8; PAGE_LEN];
            buf[..chunk.len()].copy_from_slice(chunk);
            log::trace!("write page {}", page);
            self.session
                .write_block(TAG_CMD_TYPE2_WRITE, page, &buf)
                .await?;
        }
        Ok(())
    }
}

/// Build a Type 2 image holding `ndef`: header with CC, optional lock
/// control TLV, NDEF TLV and terminator.
pub fn compose(ndef: &[u8]) -> Result<Vec<u8>> {
    // header + NDEF TLV header + terminator
    let large = ndef.len() + HEADER_LEN + 2 + 1 > ULTRALIGHT_LEN;
    let data_len = if large {
        ULTRALIGHT_C_DATA_LEN
    } else {
        ULTRALIGHT_DATA_LEN
    };

    let mut image = Vec::with_capacity(MAX_IMAGE_LEN);
    image.extend_from_slice(&[0u8; CC_OFFSET]);
    image.extend_from_slice(&[CC_MAGIC, CC_VERSION_1_0, (data_len / 8) as u8, 0x00]);
    if large {
        image.extend_from_slice(&ULTRALIGHT_C_LOCK_TLV);
    }
    image.extend_from_slice(&tlv::ndef_tlv(ndef));

    if image.len() > MAX_IMAGE_LEN {
        return Err(Error::TooLarge {
            size: image.len(),
            capacity: MAX_IMAGE_LEN,
        });
    }
    Ok(image)
}
