// libnfctag/src/transport/channel.rs

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::transport::traits::Transport;
use crate::types::Chipset;
use crate::utils::HexDump;
use crate::{Error, Result};

/// Transport backed by a pair of tokio channels. The device side pushes
/// received frames through a [`FrameSink`] and drains written frames from
/// the receiver returned by [`ChannelTransport::new`].
pub struct ChannelTransport {
    chipset: Chipset,
    outgoing: mpsc::UnboundedSender<Vec<u8>>,
    incoming: mpsc::UnboundedReceiver<Vec<u8>>,
}

/// Device-side handle delivering frames to a [`ChannelTransport`].
/// Dropping every sink signals that the device went away.
#[derive(Debug, Clone)]
pub struct FrameSink {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl FrameSink {
    /// Deliver one transport-level frame. Returns `false` once the
    /// transport side has been dropped.
    pub fn on_frame_received(&self, frame: Vec<u8>) -> bool {
        self.tx.send(frame).is_ok()
    }
}

/// Device side of a channel transport.
pub struct DeviceLink {
    pub sink: FrameSink,
    pub written: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl ChannelTransport {
    pub fn new(chipset: Chipset) -> (Self, DeviceLink) {
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        (
            Self {
                chipset,
                outgoing: out_tx,
                incoming: in_rx,
            },
            DeviceLink {
                sink: FrameSink { tx: in_tx },
                written: out_rx,
            },
        )
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.outgoing
            .send(frame.to_vec())
            .map_err(|_| Error::DeviceRemoved)
    }

    async fn receive(&mut self) -> Result<Vec<u8>> {
        self.incoming.recv().await.ok_or(Error::DeviceRemoved)
    }

    fn chipset(&self) -> Chipset {
        self.chipset
    }

    fn discard_pending(&mut self) -> usize {
        let mut n = 0;
        while let Ok(frame) = self.incoming.try_recv() {
            log::debug!("discarding late frame {:?}", HexDump::spaced(&frame));
            n += 1;
        }
        n
    }
}
