// libnfctag/src/ndef/raw.rs

use crate::{Error, Result};

pub const FLAG_MB: u8 = 0x80;
pub const FLAG_ME: u8 = 0x40;
pub const FLAG_CF: u8 = 0x20;
pub const FLAG_SR: u8 = 0x10;
pub const FLAG_IL: u8 = 0x08;
pub const TNF_MASK: u8 = 0x07;

/// NDEF record header TNF field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeNameFormat {
    Empty,
    WellKnown,
    Mime,
    AbsoluteUri,
    External,
    Unknown,
    Unchanged,
    Reserved,
}

impl TypeNameFormat {
    pub fn from_bits(bits: u8) -> Self {
        match bits & TNF_MASK {
            0 => Self::Empty,
            1 => Self::WellKnown,
            2 => Self::Mime,
            3 => Self::AbsoluteUri,
            4 => Self::External,
            5 => Self::Unknown,
            6 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::WellKnown => 1,
            Self::Mime => 2,
            Self::AbsoluteUri => 3,
            Self::External => 4,
            Self::Unknown => 5,
            Self::Unchanged => 6,
            Self::Reserved => 7,
        }
    }
}

/// One record as it sits in the byte stream, before the type is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub tnf: TypeNameFormat,
    pub record_type: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl RawRecord {
    pub fn new(tnf: TypeNameFormat, record_type: impl Into<Vec<u8>>, payload: Vec<u8>) -> Self {
        Self {
            tnf,
            record_type: record_type.into(),
            id: Vec::new(),
            payload,
        }
    }
}

/// Take `len` bytes at `offset`, reporting a record overflow otherwise.
fn take(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let available = bytes.len().saturating_sub(offset);
    if len > available {
        return Err(Error::RecordOverflow {
            offset,
            declared: len,
            available,
        });
    }
    Ok(&bytes[offset..offset + len])
}

/// Split an NDEF message into raw records. Parsing stops after the record
/// carrying ME; bytes after it are ignored.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let start = offset;
        let header = bytes[offset];
        offset += 1;

        if header & FLAG_CF != 0 {
            return Err(Error::ChunkedRecord { offset: start });
        }

        let type_len = take(bytes, offset, 1)?[0] as usize;
        offset += 1;

        let payload_len = if header & FLAG_SR != 0 {
            let len = take(bytes, offset, 1)?[0] as usize;
            offset += 1;
            len
        } else {
            let b = take(bytes, offset, 4)?;
            offset += 4;
            u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize
        };

        let id_len = if header & FLAG_IL != 0 {
            let len = take(bytes, offset, 1)?[0] as usize;
            offset += 1;
            len
        } else {
            0
        };

        let record_type = take(bytes, offset, type_len)?.to_vec();
        offset += type_len;
        let id = take(bytes, offset, id_len)?.to_vec();
        offset += id_len;
        let payload = take(bytes, offset, payload_len)?.to_vec();
        offset += payload_len;

        let tnf = TypeNameFormat::from_bits(header);
        log::trace!(
            "record at {}: tnf={:?} type={:?} payload={} bytes",
            start,
            tnf,
            String::from_utf8_lossy(&record_type),
            payload.len()
        );
        records.push(RawRecord {
            tnf,
            record_type,
            id,
            payload,
        });

        if header & FLAG_ME != 0 {
            return Ok(records);
        }
    }

    if !records.is_empty() {
        log::debug!("message ended without an ME record");
    }
    Ok(records)
}

impl RawRecord {
    /// Type and ID lengths are single header bytes.
    pub fn fits_header(&self) -> bool {
        self.record_type.len() <= u8::MAX as usize && self.id.len() <= u8::MAX as usize
    }
}

/// Serialize records into one message. MB goes on the first record, ME on
/// the last; the short form is used whenever the payload fits in one byte.
/// Records whose type or ID does not fit a length byte are skipped.
pub fn encode_records(records: &[RawRecord]) -> Vec<u8> {
    let records: Vec<&RawRecord> = records
        .iter()
        .filter(|record| {
            let fits = record.fits_header();
            if !fits {
                log::warn!(
                    "skipping record with {} byte type and {} byte id",
                    record.record_type.len(),
                    record.id.len()
                );
            }
            fits
        })
        .collect();

    let mut out = Vec::new();
    let last = records.len().saturating_sub(1);

    for (i, record) in records.into_iter().enumerate() {
        let short = record.payload.len() <= u8::MAX as usize;
        let mut header = record.tnf.bits();
        if i == 0 {
            header |= FLAG_MB;
        }
        if i == last {
            header |= FLAG_ME;
        }
        if short {
            header |= FLAG_SR;
        }
        if !record.id.is_empty() {
            header |= FLAG_IL;
        }

        out.push(header);
        out.push(record.record_type.len() as u8);
        if short {
            out.push(record.payload.len() as u8);
        } else {
            out.extend_from_slice(&(record.payload.len() as u32).to_be_bytes());
        }
        if !record.id.is_empty() {
            out.push(record.id.len() as u8);
        }
        out.extend_from_slice(&record.record_type);
        out.extend_from_slice(&record.id);
        out.extend_from_slice(&record.payload);
    }
    out
}
