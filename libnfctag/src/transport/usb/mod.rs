// libnfctag/src/transport/usb/mod.rs

#![cfg(feature = "usb")]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use async_trait::async_trait;
use rusb::{Context, DeviceHandle, UsbContext};

use crate::transport::channel::{ChannelTransport, FrameSink};
use crate::transport::traits::Transport;
use crate::types::Chipset;
use crate::utils::HexDump;
use crate::{Error, Result};

mod descriptor;
pub use descriptor::{Endpoints, find_bulk_endpoints};

/// Largest bulk packet the readers accept; longer frames are split.
const USB_PACKET_SIZE: usize = 64;
const READ_POLL: Duration = Duration::from_millis(200);
const WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// A supported reader found on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsbReaderInfo {
    pub bus: u8,
    pub address: u8,
    pub chipset: Chipset,
}

/// List every SCL3711 / ACR122U currently attached.
pub fn scan() -> Result<Vec<UsbReaderInfo>> {
    let ctx = Context::new()?;
    let mut found = Vec::new();
    for device in ctx.devices()?.iter() {
        let dd = device.device_descriptor()?;
        if let Some(chipset) = Chipset::from_usb_ids(dd.vendor_id(), dd.product_id()) {
            found.push(UsbReaderInfo {
                bus: device.bus_number(),
                address: device.address(),
                chipset,
            });
        }
    }
    Ok(found)
}

/// rusb-backed transport. A reader thread pushes every bulk IN transfer
/// into a [`FrameSink`]; a writer thread drains queued frames to the bulk
/// OUT endpoint in 64-byte packets.
pub struct UsbTransport {
    channel: ChannelTransport,
    endpoints: Endpoints,
    stop: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl UsbTransport {
    /// Open the first supported reader found on the bus.
    pub fn open() -> Result<Self> {
        let first = scan()?.into_iter().next().ok_or(Error::DeviceNotFound)?;
        Self::open_at(first)
    }

    /// Open the reader at the given bus position.
    pub fn open_at(info: UsbReaderInfo) -> Result<Self> {
        let ctx = Context::new()?;
        let device = ctx
            .devices()?
            .iter()
            .find(|d| d.bus_number() == info.bus && d.address() == info.address)
            .ok_or(Error::DeviceNotFound)?;

        let endpoints =
            find_bulk_endpoints(&device).unwrap_or_else(|| Endpoints::fallback(info.chipset));
        let mut handle = device.open()?;

        // The kernel may own CCID readers; take the interface over.
        if let Ok(true) = handle.kernel_driver_active(endpoints.interface) {
            let _ = handle.detach_kernel_driver(endpoints.interface);
        }
        handle.claim_interface(endpoints.interface)?;
        log::info!(
            "opened {} reader at {:03}:{:03} (in {:#04x}, out {:#04x})",
            info.chipset,
            info.bus,
            info.address,
            endpoints.bulk_in,
            endpoints.bulk_out
        );

        let handle = Arc::new(handle);
        let (channel, link) = ChannelTransport::new(info.chipset);
        let stop = Arc::new(AtomicBool::new(false));

        let reader = {
            let handle = Arc::clone(&handle);
            let stop = Arc::clone(&stop);
            let sink = link.sink;
            std::thread::spawn(move || read_loop(&handle, endpoints.bulk_in, &sink, &stop))
        };
        {
            let handle = Arc::clone(&handle);
            let mut written = link.written;
            std::thread::spawn(move || {
                while let Some(frame) = written.blocking_recv() {
                    if let Err(e) = write_chunks(&handle, endpoints.bulk_out, &frame) {
                        log::warn!("usb write failed: {}", e);
                        break;
                    }
                }
            });
        }

        Ok(Self {
            channel,
            endpoints,
            stop,
            reader: Some(reader),
        })
    }

    pub fn endpoints(&self) -> Endpoints {
        self.endpoints
    }
}

fn read_loop(handle: &DeviceHandle<Context>, ep: u8, sink: &FrameSink, stop: &AtomicBool) {
    let mut buf = [0u8; 512];
    while !stop.load(Ordering::Relaxed) {
        match handle.read_bulk(ep, &mut buf, READ_POLL) {
            Ok(n) => {
                if !sink.on_frame_received(buf[..n].to_vec()) {
                    break;
                }
            }
            Err(rusb::Error::Timeout) => continue,
            Err(e) => {
                // NoDevice and friends: dropping the sink reports removal
                log::warn!("usb read loop ended: {}", e);
                break;
            }
        }
    }
}

fn write_chunks(handle: &DeviceHandle<Context>, ep: u8, frame: &[u8]) -> Result<()> {
    for chunk in frame.chunks(USB_PACKET_SIZE) {
        handle.write_bulk(ep, chunk, WRITE_TIMEOUT)?;
    }
    Ok(())
}

#[async_trait]
impl Transport for UsbTransport {
    async fn send(&mut self, frame: &[u8]) -> Result<()> {
        log::trace!("usb out {:?}", HexDump::spaced(frame));
        self.channel.send(frame).await
    }

    async fn receive(&mut self) -> Result<Vec<u8>> {
        let frame = self.channel.receive().await?;
        log::trace!("usb in {:?}", HexDump::spaced(&frame));
        Ok(frame)
    }

    fn chipset(&self) -> Chipset {
        self.channel.chipset()
    }

    fn discard_pending(&mut self) -> usize {
        self.channel.discard_pending()
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
        // The interface is released when the last handle clone closes.
    }
}
