// libnfctag/src/transport/usb/descriptor.rs

use rusb::{Device, Direction, TransferType, UsbContext};

use crate::types::Chipset;

/// Bulk endpoints used to talk to a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub interface: u8,
    pub bulk_in: u8,
    pub bulk_out: u8,
}

impl Endpoints {
    /// Endpoint layout documented for each reader, used when the
    /// configuration descriptor cannot be read.
    pub fn fallback(chipset: Chipset) -> Self {
        let ep = match chipset {
            Chipset::Pn533 => 0x04,
            Chipset::Acr122 => 0x02,
        };
        Self {
            interface: 0,
            bulk_in: 0x80 | ep,
            bulk_out: ep,
        }
    }
}

/// Inspect the active configuration and return the first bulk IN/OUT pair
/// found on a single interface.
pub fn find_bulk_endpoints<T: UsbContext>(device: &Device<T>) -> Option<Endpoints> {
    let config = device.active_config_descriptor().ok()?;
    for interface in config.interfaces() {
        for desc in interface.descriptors() {
            let mut bulk_in = None;
            let mut bulk_out = None;
            for ep in desc.endpoint_descriptors() {
                if ep.transfer_type() != TransferType::Bulk {
                    continue;
                }
                match ep.direction() {
                    Direction::In if bulk_in.is_none() => bulk_in = Some(ep.address()),
                    Direction::Out if bulk_out.is_none() => bulk_out = Some(ep.address()),
                    _ => {}
                }
            }
            if let (Some(bulk_in), Some(bulk_out)) = (bulk_in, bulk_out) {
                return Some(Endpoints {
                    interface: desc.interface_number(),
                    bulk_in,
                    bulk_out,
                });
            }
        }
    }
    None
}
