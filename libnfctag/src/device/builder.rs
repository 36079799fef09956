// libnfctag/src/device/builder.rs

use crate::device::config::ReaderConfig;
use crate::device::handle::{Initialized, Reader, Uninitialized};
use crate::device::registry::{Claim, Presence};
use crate::transport::Transport;
use crate::{Error, Result};

/// Helper to construct a Reader with optional configuration.
#[derive(Default)]
pub struct ReaderBuilder {
    transport: Option<Box<dyn Transport>>,
    config: ReaderConfig,
    presence: Option<Presence>,
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_presence(mut self, presence: Presence) -> Self {
        self.presence = Some(presence);
        self
    }

    /// Tie the reader to a registry claim so removal of the device fails
    /// pending exchanges.
    pub fn with_claim(self, claim: Claim) -> Self {
        log::debug!("building reader for {} ({})", claim.info.id, claim.info.label);
        self.with_presence(claim.presence)
    }

    /// Consume the builder and return an uninitialized Reader.
    /// Requires a transport to be provided; otherwise returns DeviceNotFound.
    pub fn build_uninitialized(self) -> Result<Reader<Uninitialized>> {
        match self.transport {
            Some(t) => Ok(Reader::with_config(t, self.config, self.presence)),
            None => Err(Error::DeviceNotFound),
        }
    }

    /// Build and run the reader's init sequence.
    pub async fn build(self) -> Result<Reader<Initialized>> {
        self.build_uninitialized()?.initialize().await
    }
}
