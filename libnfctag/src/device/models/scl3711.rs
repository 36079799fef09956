// libnfctag/src/device/models/scl3711.rs

use super::{ReaderModel, Step};
use crate::protocol::Command;
use crate::types::{Chipset, KeyType, MifareKey, Uid};

/// SCL3711: a PN533 spoken to with native frames. No init handshake is
/// needed and Mifare authentication goes straight to the tag.
pub struct Scl3711Model;

impl Scl3711Model {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Scl3711Model {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderModel for Scl3711Model {
    fn chipset(&self) -> Chipset {
        Chipset::Pn533
    }

    fn name(&self) -> &'static str {
        "SCL3711"
    }

    fn authentication_steps(
        &self,
        block: u8,
        key_type: KeyType,
        key: &MifareKey,
        uid: &Uid,
    ) -> Vec<Step> {
        // MIFARE AUTH: cmd, block, key(6), last four UID bytes
        let mut req = Vec::with_capacity(12);
        req.push(key_type.auth_command());
        req.push(block);
        req.extend_from_slice(key.as_bytes());
        let uid = uid.as_bytes();
        req.extend_from_slice(&uid[uid.len().saturating_sub(4)..]);
        vec![Step::Command(Command::exchange(req))]
    }
}
