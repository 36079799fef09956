// libnfctag/src/device/models/mod.rs

use std::time::Duration;

use crate::protocol::{Command, Escape};
use crate::types::{Chipset, KeyType, MifareKey, Uid};

mod acr122;
mod scl3711;

pub use acr122::Acr122Model;
pub use scl3711::Scl3711Model;

/// One reader interaction issued on behalf of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// PN53x command. Reader status errors propagate.
    Command(Command),
    /// Reader-level escape. A `63 00` answer is a failure.
    Escape(Escape),
    /// Raw frame whose reply content is ignored. A best-effort step only
    /// logs a timeout instead of failing.
    Raw { frame: Vec<u8>, best_effort: bool },
}

/// Chipset-specific behaviour around the generic PN53x exchanges.
pub trait ReaderModel: Send + Sync {
    fn chipset(&self) -> Chipset;

    /// Human readable model name for logs.
    fn name(&self) -> &'static str;

    /// Frames bringing the reader into a known state after it was opened.
    fn init_sequence(&self) -> Vec<Step> {
        Vec::new()
    }

    /// Frames sent before every InListPassiveTarget.
    fn before_passive_target(&self, _timeout: Duration) -> Vec<Step> {
        Vec::new()
    }

    /// Frames sent before TgInitAsTarget.
    fn before_emulation(&self, _timeout: Duration) -> Vec<Step> {
        Vec::new()
    }

    /// Frames authenticating `block` of the selected Mifare Classic tag with
    /// `key` in slot `key_type`. The last step's reply tells whether the
    /// key was accepted.
    fn authentication_steps(
        &self,
        block: u8,
        key_type: KeyType,
        key: &MifareKey,
        uid: &Uid,
    ) -> Vec<Step>;
}

/// Factory to create a model implementation for a chipset.
pub fn create_model_for(chipset: Chipset) -> Box<dyn ReaderModel> {
    match chipset {
        Chipset::Pn533 => Box::new(Scl3711Model::new()),
        Chipset::Acr122 => Box::new(Acr122Model::new()),
    }
}
