// libnfctag/src/tag/operations.rs

//! One-call operations on an initialized reader: select the tag in the
//! field and run a driver operation on it.

use std::time::Duration;

use crate::device::{Initialized, Reader};
use crate::ndef::Message;
use crate::protocol::PassiveTargetList;
use crate::tag::{Tag, TagSession, type2};
use crate::types::{MifareKey, TagIdentity};
use crate::{Error, Result};

impl Reader<Initialized> {
    /// Single detection attempt. Fails with `NoTarget` unless exactly one
    /// supported tag answered.
    pub async fn select_tag(&mut self, timeout: Duration) -> Result<TagIdentity> {
        match self.wait_for_passive_target(timeout).await? {
            PassiveTargetList {
                target: Some(target),
                ..
            } => Ok(TagIdentity {
                tag_type: target.tag_type,
                uid: target.uid,
            }),
            PassiveTargetList { tag_count, .. } => Err(Error::NoTarget { tag_count }),
        }
    }

    /// Wait for a tag and open a driver for it.
    pub async fn open_tag(&mut self, timeout: Duration) -> Result<Tag<'_>> {
        let identity = self.wait_for_tag(timeout).await?;
        Ok(Tag::new(TagSession::new(self, identity)))
    }

    /// Read and parse the NDEF message of the next tag.
    pub async fn read_ndef(&mut self, timeout: Duration) -> Result<Message> {
        let mut tag = self.open_tag(timeout).await?;
        let bytes = tag.read().await?;
        Message::parse(&bytes)
    }

    /// Compose `message` for the next tag and write it. The image size is
    /// checked before anything is written.
    pub async fn write_ndef(&mut self, message: &Message, timeout: Duration) -> Result<()> {
        let mut tag = self.open_tag(timeout).await?;
        let image = tag.compose(&message.to_bytes())?;
        log::info!("writing {} byte {} image", image.len(), tag.tag_type());
        tag.write(&image).await
    }

    pub async fn read_logic(
        &mut self,
        block: u8,
        count: usize,
        timeout: Duration,
    ) -> Result<Vec<u8>> {
        self.open_tag(timeout).await?.read_logic(block, count).await
    }

    pub async fn write_logic(&mut self, block: u8, data: &[u8], timeout: Duration) -> Result<()> {
        self.open_tag(timeout).await?.write_logic(block, data).await
    }

    pub async fn write_physical(
        &mut self,
        block: u8,
        key: Option<&MifareKey>,
        data: &[u8],
        timeout: Duration,
    ) -> Result<()> {
        self.open_tag(timeout)
            .await?
            .write_physical(block, key, data)
            .await
    }

    /// Emulate a Type 2 tag carrying `message` until the initiator halts it.
    pub async fn emulate(&mut self, message: &Message, timeout: Duration) -> Result<()> {
        let image = type2::compose(&message.to_bytes())?;
        self.emulate_tag(&image, timeout).await
    }
}
