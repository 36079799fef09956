// libnfctag/src/transport/traits.rs

use async_trait::async_trait;

use crate::Result;
use crate::types::Chipset;

/// Transport trait abstracts I/O away from protocol/device logic.
///
/// A transport moves whole transport-level frames. It knows nothing about
/// acknowledgements or reply classification; that is the reader's job.
#[async_trait]
pub trait Transport: Send {
    /// Queue one frame for the device. Frames are delivered in order.
    async fn send(&mut self, frame: &[u8]) -> Result<()>;

    /// Await the next frame produced by the device. Returns
    /// `Error::DeviceRemoved` once the device is gone.
    async fn receive(&mut self) -> Result<Vec<u8>>;

    /// Chipset of the reader behind this transport.
    fn chipset(&self) -> Chipset;

    /// Drop frames that are already queued but were never awaited, e.g. the
    /// late reply to an exchange that timed out. Returns how many were
    /// dropped. Transports without a receive queue keep the default.
    fn discard_pending(&mut self) -> usize {
        0
    }
}
