// libnfctag/src/tag/tlv.rs

//! TLV blocks found in the data area of Type 2 and Mifare Classic tags.

use crate::{Error, Result};

pub const TLV_NULL: u8 = 0x00;
pub const TLV_LOCK_CONTROL: u8 = 0x01;
pub const TLV_MEMORY_CONTROL: u8 = 0x02;
pub const TLV_NDEF: u8 = 0x03;
pub const TLV_TERMINATOR: u8 = 0xFE;

/// Marker for the 3-byte length form.
const LONG_LENGTH: u8 = 0xFF;

/// Position fields of a Lock Control or Memory Control TLV. Informational
/// only, nothing here is enforced on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlTlv {
    pub page_addr: u8,
    pub byte_offset: u8,
    /// Number of lock bits (or reserved bytes); a raw 0 means 256.
    pub size: u16,
    pub bytes_per_page: u16,
    pub bytes_locked_per_lock_bit: u8,
}

impl ControlTlv {
    fn decode(value: &[u8], offset: usize) -> Result<Self> {
        let &[position, size, page_control] = value else {
            return Err(Error::TlvOverflow {
                offset,
                declared: 3,
                available: value.len(),
            });
        };
        Ok(Self {
            page_addr: position >> 4,
            byte_offset: position & 0x0F,
            size: if size == 0 { 256 } else { size as u16 },
            bytes_per_page: 1 << (page_control & 0x0F),
            bytes_locked_per_lock_bit: page_control >> 4,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tlv<'a> {
    Null,
    LockControl(ControlTlv),
    MemoryControl(ControlTlv),
    Ndef(&'a [u8]),
    Terminator,
}

/// Sequential TLV reader. Yields `(offset, tlv)` and stops after a
/// terminator, at the end of the buffer, or at the first error.
pub struct TlvScanner<'a> {
    data: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> TlvScanner<'a> {
    pub fn new(data: &'a [u8], start: usize) -> Self {
        Self {
            data,
            offset: start,
            done: false,
        }
    }

    fn next_tlv(&mut self) -> Result<Option<(usize, Tlv<'a>)>> {
        let offset = self.offset;
        let Some(&tag) = self.data.get(offset) else {
            return Ok(None);
        };

        match tag {
            TLV_NULL => {
                self.offset += 1;
                return Ok(Some((offset, Tlv::Null)));
            }
            TLV_TERMINATOR => {
                self.offset += 1;
                return Ok(Some((offset, Tlv::Terminator)));
            }
            TLV_LOCK_CONTROL | TLV_MEMORY_CONTROL | TLV_NDEF => {}
            other => return Err(Error::UnknownTlv { tag: other, offset }),
        }

        let (len, header) = self.length_at(offset)?;
        let start = offset + header;
        let available = self.data.len().saturating_sub(start);
        if len > available {
            return Err(Error::TlvOverflow {
                offset,
                declared: len,
                available,
            });
        }
        let value = &self.data[start..start + len];
        self.offset = start + len;

        let tlv = match tag {
            TLV_LOCK_CONTROL => Tlv::LockControl(ControlTlv::decode(value, offset)?),
            TLV_MEMORY_CONTROL => Tlv::MemoryControl(ControlTlv::decode(value, offset)?),
            _ => Tlv::Ndef(value),
        };
        Ok(Some((offset, tlv)))
    }

    /// Value length and total header size (tag plus length field).
    fn length_at(&self, offset: usize) -> Result<(usize, usize)> {
        let overflow = |declared| Error::TlvOverflow {
            offset,
            declared,
            available: self.data.len().saturating_sub(offset + 1),
        };
        match self.data.get(offset + 1) {
            Some(&LONG_LENGTH) => match self.data.get(offset + 2..offset + 4) {
                Some(&[hi, lo]) => Ok((u16::from_be_bytes([hi, lo]) as usize, 4)),
                _ => Err(overflow(3)),
            },
            Some(&len) => Ok((len as usize, 2)),
            None => Err(overflow(1)),
        }
    }
}

impl<'a> Iterator for TlvScanner<'a> {
    type Item = Result<(usize, Tlv<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_tlv() {
            Ok(Some((offset, tlv))) => {
                if tlv == Tlv::Terminator {
                    self.done = true;
                }
                Some(Ok((offset, tlv)))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Return the value of the first NDEF TLV at or after `start`.
pub fn find_ndef(data: &[u8], start: usize) -> Result<&[u8]> {
    for item in TlvScanner::new(data, start) {
        let (offset, tlv) = item?;
        match tlv {
            Tlv::Null => {}
            Tlv::LockControl(ctl) => log::debug!("lock control TLV at {:#x}: {:?}", offset, ctl),
            Tlv::MemoryControl(ctl) => {
                log::debug!("memory control TLV at {:#x}: {:?}", offset, ctl)
            }
            Tlv::Ndef(value) => {
                log::debug!("NDEF TLV at {:#x}, {} bytes", offset, value.len());
                return Ok(value);
            }
            Tlv::Terminator => break,
        }
    }
    Err(Error::NdefNotFound)
}

/// `03 len ndef FE`, with the 3-byte length form from 255 bytes on.
pub fn ndef_tlv(ndef: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(ndef.len() + 5);
    out.push(TLV_NDEF);
    if ndef.len() < LONG_LENGTH as usize {
        out.push(ndef.len() as u8);
    } else {
        out.push(LONG_LENGTH);
        out.extend_from_slice(&(ndef.len() as u16).to_be_bytes());
    }
    out.extend_from_slice(ndef);
    out.push(TLV_TERMINATOR);
    out
}
