// libnfctag/src/tag/mod.rs

//! Tag drivers. A [`Tag`] is chosen once from the identity the reader
//! reported and wraps the session for that tag.

pub mod mifare;
pub mod operations;
pub mod session;
pub mod tlv;
pub mod type2;

pub use mifare::MifareClassic;
pub use session::{AuthState, TagSession};
pub use type2::Type2Tag;

use crate::types::{MifareKey, TagType};
use crate::{Error, Result};

/// The selected tag, one variant per driver.
pub enum Tag<'r> {
    Type2(Type2Tag<'r>),
    MifareClassic(MifareClassic<'r>),
}

impl<'r> Tag<'r> {
    pub fn new(session: TagSession<'r>) -> Self {
        match session.identity().tag_type {
            TagType::Type2 => Self::Type2(Type2Tag::new(session)),
            TagType::MifareClassic => Self::MifareClassic(MifareClassic::new(session)),
        }
    }

    pub fn tag_type(&self) -> TagType {
        match self {
            Self::Type2(_) => TagType::Type2,
            Self::MifareClassic(_) => TagType::MifareClassic,
        }
    }

    pub fn session(&mut self) -> &mut TagSession<'r> {
        match self {
            Self::Type2(tag) => tag.session(),
            Self::MifareClassic(tag) => tag.session(),
        }
    }

    pub fn into_session(self) -> TagSession<'r> {
        match self {
            Self::Type2(tag) => tag.into_session(),
            Self::MifareClassic(tag) => tag.into_session(),
        }
    }

    /// Image holding `ndef` laid out for this tag type.
    pub fn compose(&self, ndef: &[u8]) -> Result<Vec<u8>> {
        compose_for(self.tag_type(), ndef)
    }

    /// NDEF message bytes stored on the tag.
    pub async fn read(&mut self) -> Result<Vec<u8>> {
        match self {
            Self::Type2(tag) => tag.read().await,
            Self::MifareClassic(tag) => tag.read().await,
        }
    }

    /// Write an image built by [`Tag::compose`].
    pub async fn write(&mut self, image: &[u8]) -> Result<()> {
        match self {
            Self::Type2(tag) => tag.write(image).await,
            Self::MifareClassic(tag) => tag.write(image).await,
        }
    }

    pub async fn read_logic(&mut self, block: u8, count: usize) -> Result<Vec<u8>> {
        match self {
            Self::Type2(tag) => tag.read_logic(block, count).await,
            Self::MifareClassic(tag) => tag.read_logic(block, count).await,
        }
    }

    pub async fn write_logic(&mut self, block: u8, data: &[u8]) -> Result<()> {
        match self {
            Self::Type2(tag) => tag.write_logic(block, data).await,
            Self::MifareClassic(tag) => tag.write_logic(block, data).await,
        }
    }

    /// Physical block write. Mifare Classic only.
    pub async fn write_physical(
        &mut self,
        block: u8,
        key: Option<&MifareKey>,
        data: &[u8],
    ) -> Result<()> {
        match self {
            Self::MifareClassic(tag) => tag.write_physical(block, key, data).await,
            Self::Type2(_) => Err(Error::UnsupportedOperation(
                "physical writes need a Mifare Classic tag".into(),
            )),
        }
    }
}

/// Compose without a selected tag.
pub fn compose_for(tag_type: TagType, ndef: &[u8]) -> Result<Vec<u8>> {
    match tag_type {
        TagType::Type2 => type2::compose(ndef),
        TagType::MifareClassic => mifare::compose(ndef),
    }
}
