// libnfctag/src/ndef/mod.rs

//! NDEF message codec.
//!
//! `raw` handles the record header layout, `record` maps TNF and type to a
//! typed [`Record`], `rtd` holds the Text and URI payload codecs.

pub mod raw;
pub mod record;
pub mod rtd;

pub use raw::{RawRecord, TypeNameFormat};
pub use record::Record;
pub use rtd::TextEncoding;

use derive_more::{Deref, From};

use crate::Result;

/// Ordered list of records making up one NDEF message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From)]
pub struct Message(Vec<Record>);

impl Message {
    pub fn new(records: Vec<Record>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[Record] {
        &self.0
    }

    pub fn into_records(self) -> Vec<Record> {
        self.0
    }

    /// Parse message bytes (the value of an NDEF TLV).
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let records = raw::parse_records(bytes)?
            .into_iter()
            .map(Record::from_raw)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self(records))
    }

    /// Serialize the message. Records that cannot be written are skipped.
    pub fn to_bytes(&self) -> Vec<u8> {
        let raw: Vec<RawRecord> = self
            .0
            .iter()
            .filter_map(|record| {
                let raw = record.to_raw();
                if raw.is_none() {
                    log::warn!("skipping unsupported record on compose: {:?}", record);
                }
                raw
            })
            .collect();
        raw::encode_records(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_roundtrip() {
        let message = Message::new(vec![
            Record::text("en", "hello"),
            Record::uri("http://www.example.com"),
            Record::mime("text/plain", b"plain".to_vec()),
            Record::android_app("com.example.app"),
        ]);
        let bytes = message.to_bytes();
        assert_eq!(Message::parse(&bytes).unwrap(), message);
    }

    #[test]
    fn unsupported_records_are_skipped() {
        let odd = RawRecord::new(TypeNameFormat::Unknown, Vec::new(), vec![1, 2]);
        let message = Message::new(vec![Record::Unsupported(odd), Record::uri("tel:123")]);
        let parsed = Message::parse(&message.to_bytes()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0], Record::uri("tel:123"));
    }

    #[test]
    fn empty_message() {
        assert!(Message::parse(&[]).unwrap().is_empty());
        assert!(Message::default().to_bytes().is_empty());
    }
}
