// libnfctag/src/ndef/record.rs

use crate::ndef::raw::{RawRecord, TypeNameFormat};
use crate::ndef::rtd::{self, TextEncoding};
use crate::Result;

/// External type of an Android Application Record
pub const AAR_TYPE: &str = "android.com:pkg";

/// An interpreted NDEF record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Text {
        encoding: TextEncoding,
        language: String,
        text: String,
    },
    Uri(String),
    Mime {
        mime_type: String,
        payload: Vec<u8>,
    },
    AndroidApp {
        package: String,
    },
    External {
        record_type: String,
        payload: Vec<u8>,
    },
    /// Parsed but not interpreted. Dropped (with a warning) on compose.
    Unsupported(RawRecord),
}

impl Record {
    pub fn text(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Text {
            encoding: TextEncoding::Utf8,
            language: language.into(),
            text: text.into(),
        }
    }

    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri(uri.into())
    }

    pub fn mime(mime_type: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self::Mime {
            mime_type: mime_type.into(),
            payload: payload.into(),
        }
    }

    pub fn android_app(package: impl Into<String>) -> Self {
        Self::AndroidApp {
            package: package.into(),
        }
    }

    /// Interpret a raw record by its TNF and type.
    pub fn from_raw(raw: RawRecord) -> Result<Self> {
        let record = match raw.tnf {
            TypeNameFormat::WellKnown if raw.record_type == rtd::RTD_TEXT => {
                let (encoding, language, text) = rtd::decode_text(&raw.payload)?;
                Self::Text {
                    encoding,
                    language,
                    text,
                }
            }
            TypeNameFormat::WellKnown if raw.record_type == rtd::RTD_URI => {
                Self::Uri(rtd::decode_uri(&raw.payload)?)
            }
            TypeNameFormat::Mime => Self::Mime {
                mime_type: String::from_utf8_lossy(&raw.record_type).into_owned(),
                payload: raw.payload,
            },
            TypeNameFormat::External if raw.record_type == AAR_TYPE.as_bytes() => {
                Self::AndroidApp {
                    package: String::from_utf8_lossy(&raw.payload).into_owned(),
                }
            }
            TypeNameFormat::External => Self::External {
                record_type: String::from_utf8_lossy(&raw.record_type).into_owned(),
                payload: raw.payload,
            },
            _ => {
                log::debug!(
                    "unsupported record tnf={:?} type={:?}",
                    raw.tnf,
                    String::from_utf8_lossy(&raw.record_type)
                );
                Self::Unsupported(raw)
            }
        };
        Ok(record)
    }

    /// Raw form for composing. `None` for records we cannot write.
    pub fn to_raw(&self) -> Option<RawRecord> {
        let raw = match self {
            Self::Text {
                encoding,
                language,
                text,
            } => RawRecord::new(
                TypeNameFormat::WellKnown,
                rtd::RTD_TEXT,
                rtd::encode_text(*encoding, language, text),
            ),
            Self::Uri(uri) => {
                RawRecord::new(TypeNameFormat::WellKnown, rtd::RTD_URI, rtd::encode_uri(uri))
            }
            Self::Mime { mime_type, payload } => {
                RawRecord::new(TypeNameFormat::Mime, mime_type.as_bytes(), payload.clone())
            }
            Self::AndroidApp { package } => RawRecord::new(
                TypeNameFormat::External,
                AAR_TYPE.as_bytes(),
                package.as_bytes().to_vec(),
            ),
            Self::External {
                record_type,
                payload,
            } => RawRecord::new(TypeNameFormat::External, record_type.as_bytes(), payload.clone()),
            Self::Unsupported(_) => return None,
        };
        Some(raw)
    }
}
