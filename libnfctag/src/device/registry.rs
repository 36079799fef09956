// libnfctag/src/device/registry.rs

use std::collections::BTreeMap;

use tokio::sync::watch;

use crate::types::{Chipset, DeviceId};
use crate::{Error, Result};

/// What the registry knows about a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub id: DeviceId,
    pub chipset: Chipset,
    pub label: String,
    pub claimed: bool,
}

/// Receiving end of a device-presence signal. Readers poll it while
/// waiting for frames so a removal fails the exchange immediately.
#[derive(Debug, Clone)]
pub struct Presence {
    rx: watch::Receiver<bool>,
}

impl Presence {
    pub fn is_present(&self) -> bool {
        *self.rx.borrow() && self.rx.has_changed().is_ok()
    }

    /// Resolves once the device is reported removed (or its registry
    /// entry is dropped).
    pub async fn removed(&mut self) {
        let _ = self.rx.wait_for(|present| !*present).await;
    }
}

struct Entry {
    info: DeviceInfo,
    presence: watch::Sender<bool>,
}

/// Granted by [`DeviceRegistry::claim`].
#[derive(Debug, Clone)]
pub struct Claim {
    pub info: DeviceInfo,
    pub presence: Presence,
}

/// Explicitly owned registry of attached readers. Each reader can be
/// claimed by one session at a time.
#[derive(Default)]
pub struct DeviceRegistry {
    next_id: u32,
    devices: BTreeMap<DeviceId, Entry>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly attached reader and return its handle.
    pub fn register(&mut self, chipset: Chipset, label: impl Into<String>) -> DeviceId {
        let id = DeviceId(self.next_id);
        self.next_id += 1;
        let (presence, _) = watch::channel(true);
        let info = DeviceInfo {
            id,
            chipset,
            label: label.into(),
            claimed: false,
        };
        log::info!("registered {} reader {} ({})", chipset, id, info.label);
        self.devices.insert(id, Entry { info, presence });
        id
    }

    /// All readers currently attached, in registration order.
    pub fn enumerate(&self) -> Vec<DeviceInfo> {
        self.devices.values().map(|e| e.info.clone()).collect()
    }

    /// Claim a reader for exclusive use.
    pub fn claim(&mut self, id: DeviceId) -> Result<Claim> {
        let entry = self.devices.get_mut(&id).ok_or(Error::DeviceNotFound)?;
        if entry.info.claimed {
            return Err(Error::DeviceBusy(id));
        }
        entry.info.claimed = true;
        log::debug!("claimed reader {}", id);
        Ok(Claim {
            info: entry.info.clone(),
            presence: Presence {
                rx: entry.presence.subscribe(),
            },
        })
    }

    /// Give a claimed reader back.
    pub fn release(&mut self, id: DeviceId) -> Result<()> {
        let entry = self.devices.get_mut(&id).ok_or(Error::DeviceNotFound)?;
        entry.info.claimed = false;
        log::debug!("released reader {}", id);
        Ok(())
    }

    /// The reader went away. Any session holding its [`Presence`] fails its
    /// in-flight exchange with `DeviceRemoved`. Returns whether the reader
    /// was known.
    pub fn device_removed(&mut self, id: DeviceId) -> bool {
        match self.devices.remove(&id) {
            Some(entry) => {
                log::info!("reader {} removed", id);
                entry.presence.send_replace(false);
                true
            }
            None => false,
        }
    }
}
