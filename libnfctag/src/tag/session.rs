// libnfctag/src/tag/session.rs

use crate::constants::{READ_CHUNK_LEN, TAG_CMD_READ};
use crate::device::{Initialized, Reader};
use crate::protocol::parser::ensure_len;
use crate::types::{BlockData, KeyType, MifareKey, TagIdentity, Uid};
use crate::Result;

/// Sector currently unlocked on a Mifare Classic tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthState {
    pub sector: u8,
    pub key: MifareKey,
    pub key_type: KeyType,
}

/// One selected tag on one reader.
///
/// Holds the reader exclusively for its lifetime, so at most one exchange
/// is in flight and the authentication state cannot change under a caller.
pub struct TagSession<'r> {
    reader: &'r mut Reader<Initialized>,
    identity: TagIdentity,
    auth: Option<AuthState>,
}

impl<'r> TagSession<'r> {
    pub fn new(reader: &'r mut Reader<Initialized>, identity: TagIdentity) -> Self {
        Self {
            reader,
            identity,
            auth: None,
        }
    }

    pub fn identity(&self) -> &TagIdentity {
        &self.identity
    }

    pub fn uid(&self) -> &Uid {
        &self.identity.uid
    }

    pub fn auth_state(&self) -> Option<&AuthState> {
        self.auth.as_ref()
    }

    pub fn reader(&mut self) -> &mut Reader<Initialized> {
        self.reader
    }

    /// Raw tag command through InDataExchange.
    pub async fn transceive(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        self.reader.data_exchange(request).await
    }

    /// READ: 16 bytes starting at `block`.
    pub async fn read_block(&mut self, block: u8) -> Result<BlockData> {
        let data = self.transceive(&[TAG_CMD_READ, block]).await?;
        ensure_len(&data, READ_CHUNK_LEN)?;
        BlockData::try_from(&data[..READ_CHUNK_LEN])
    }

    /// Write command `command` for `block` carrying `data`.
    pub async fn write_block(&mut self, command: u8, block: u8, data: &[u8]) -> Result<()> {
        let mut request = Vec::with_capacity(2 + data.len());
        request.push(command);
        request.push(block);
        request.extend_from_slice(data);
        self.transceive(&request).await?;
        Ok(())
    }

    /// Authenticate and track the result. Any attempt first drops the
    /// current state, so a failed switch never leaves the old sector marked.
    pub async fn authenticate(
        &mut self,
        block: u8,
        sector: u8,
        key_type: KeyType,
        key: &MifareKey,
    ) -> Result<bool> {
        self.auth = None;
        let uid = self.identity.uid.clone();
        let accepted = self.reader.authenticate(block, key_type, key, &uid).await?;
        if accepted {
            self.auth = Some(AuthState {
                sector,
                key: *key,
                key_type,
            });
        }
        Ok(accepted)
    }

    pub(crate) fn set_auth_state(&mut self, state: AuthState) {
        self.auth = Some(state);
    }

    pub fn invalidate_auth(&mut self) {
        self.auth = None;
    }

    /// Deselect and release the tag, ending the session.
    pub async fn release(self) -> Result<()> {
        self.reader.release_target().await
    }
}
