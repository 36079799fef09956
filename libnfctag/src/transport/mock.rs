// libnfctag/src/transport/mock.rs

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::protocol::Frame;
use crate::transport::traits::Transport;
use crate::types::Chipset;
use crate::{Error, Result};

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<Vec<u8>>,
    responses: VecDeque<Vec<u8>>,
    hang_when_empty: bool,
    removed: bool,
}

/// Mock transport for tests. It records sent frames and returns queued
/// responses. Clones share the same state, so a test can keep a handle
/// after giving the transport to a reader.
#[derive(Debug, Clone)]
pub struct MockTransport {
    chipset: Chipset,
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new(chipset: Chipset) -> Self {
        Self {
            chipset,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the recorded frames.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a raw transport frame.
    pub fn push_response(&self, frame: Vec<u8>) {
        self.lock().responses.push_back(frame);
    }

    /// Queue the positive acknowledgement frame.
    pub fn push_ack(&self) {
        self.push_response(Frame::ack());
    }

    /// Queue a device->host reply body (`D5 ..`) framed for this chipset.
    pub fn push_reply(&self, body: &[u8]) {
        let frame = match self.chipset {
            Chipset::Pn533 => native_reply_frame(body),
            Chipset::Acr122 => {
                let mut data = body.to_vec();
                data.extend_from_slice(&crate::constants::SW_SUCCESS);
                ccid_reply(crate::constants::CCID_RDR_TO_PC_ESCAPE, &data)
            }
        };
        self.push_response(frame);
    }

    /// Queue an ACR122 escape reply carrying only a status word.
    pub fn push_status_word(&self, sw: [u8; 2]) {
        self.push_response(ccid_reply(crate::constants::CCID_RDR_TO_PC_ESCAPE, &sw));
    }

    /// When set, `receive` on an empty queue never completes instead of
    /// failing with `Timeout`, so the caller's own timeout fires.
    pub fn set_hang_when_empty(&self, hang: bool) {
        self.lock().hang_when_empty = hang;
    }

    /// Simulate the device being unplugged.
    pub fn remove_device(&self) {
        self.lock().removed = true;
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.lock().sent.clone()
    }

    pub fn pending(&self) -> usize {
        self.lock().responses.len()
    }

    pub fn clear_sent(&self) {
        self.lock().sent.clear();
    }
}

/// Frame a device->host body as a normal-length PN53x frame.
pub fn native_reply_frame(body: &[u8]) -> Vec<u8> {
    use crate::protocol::checksum::{dcs, lcs};
    let len = body.len() as u8;
    let mut out = Vec::with_capacity(body.len() + 7);
    out.extend_from_slice(&crate::constants::PN53X_PREAMBLE);
    out.push(len);
    out.push(lcs(len));
    out.extend_from_slice(body);
    out.push(dcs(body));
    out.push(crate::constants::PN53X_POSTAMBLE);
    out
}

/// Wrap reply bytes in a reader->host CCID header.
pub fn ccid_reply(message_type: u8, data: &[u8]) -> Vec<u8> {
    let mut out = vec![message_type];
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0x00; 5]);
    out.extend_from_slice(data);
    out
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, frame: &[u8]) -> Result<()> {
        let mut state = self.lock();
        if state.removed {
            return Err(Error::DeviceRemoved);
        }
        state.sent.push(frame.to_vec());
        Ok(())
    }

    async fn receive(&mut self) -> Result<Vec<u8>> {
        let hang = {
            let mut state = self.lock();
            if state.removed {
                return Err(Error::DeviceRemoved);
            }
            match state.responses.pop_front() {
                Some(frame) => return Ok(frame),
                None => state.hang_when_empty,
            }
        };
        if hang {
            std::future::pending::<()>().await;
        }
        Err(Error::Timeout)
    }

    fn chipset(&self) -> Chipset {
        self.chipset
    }
}
