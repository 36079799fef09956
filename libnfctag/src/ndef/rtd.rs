// libnfctag/src/ndef/rtd.rs

//! Well-known record type codecs (Text `T` and URI `U`).

use crate::{Error, Result};

pub const RTD_TEXT: &[u8] = b"T";
pub const RTD_URI: &[u8] = b"U";

const TEXT_UTF16_FLAG: u8 = 0x80;
const TEXT_LANG_MASK: u8 = 0x3F;

/// URI identifier codes. The record stores the index, followed by the rest
/// of the URI.
pub const URI_PREFIXES: [&str; 36] = [
    "",
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cpa://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

/// Pick the longest prefix in the table that starts `uri`. Returns the
/// prefix code and the remaining suffix; code 0 when nothing matches.
pub fn compress_uri(uri: &str) -> (u8, &str) {
    let mut best = 0usize;
    for (code, prefix) in URI_PREFIXES.iter().enumerate().skip(1) {
        if uri.starts_with(prefix) && prefix.len() > URI_PREFIXES[best].len() {
            best = code;
        }
    }
    (best as u8, &uri[URI_PREFIXES[best].len()..])
}

pub fn encode_uri(uri: &str) -> Vec<u8> {
    let (code, rest) = compress_uri(uri);
    let mut out = Vec::with_capacity(1 + rest.len());
    out.push(code);
    out.extend_from_slice(rest.as_bytes());
    out
}

pub fn decode_uri(payload: &[u8]) -> Result<String> {
    let Some((&code, rest)) = payload.split_first() else {
        return Err(Error::InvalidText("empty URI record".into()));
    };
    let prefix = URI_PREFIXES
        .get(code as usize)
        .ok_or(Error::UnknownUriPrefix(code))?;
    let rest = std::str::from_utf8(rest).map_err(|e| Error::InvalidText(e.to_string()))?;
    Ok(format!("{}{}", prefix, rest))
}

/// Character encoding of a Text record body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16,
}

/// Build a Text payload. Language codes longer than 63 bytes are cut.
pub fn encode_text(encoding: TextEncoding, language: &str, text: &str) -> Vec<u8> {
    let lang = language.as_bytes();
    let mut cut = lang.len().min(TEXT_LANG_MASK as usize);
    while !language.is_char_boundary(cut) {
        cut -= 1;
    }
    let lang = &lang[..cut];

    let mut status = lang.len() as u8;
    if encoding == TextEncoding::Utf16 {
        status |= TEXT_UTF16_FLAG;
    }

    let mut out = Vec::with_capacity(1 + lang.len() + text.len() * 2);
    out.push(status);
    out.extend_from_slice(lang);
    match encoding {
        TextEncoding::Utf8 => out.extend_from_slice(text.as_bytes()),
        TextEncoding::Utf16 => {
            for unit in text.encode_utf16() {
                out.extend_from_slice(&unit.to_be_bytes());
            }
        }
    }
    out
}

/// Decode a Text payload into (encoding, language, text).
pub fn decode_text(payload: &[u8]) -> Result<(TextEncoding, String, String)> {
    let Some((&status, rest)) = payload.split_first() else {
        return Err(Error::InvalidText("empty text record".into()));
    };
    let lang_len = (status & TEXT_LANG_MASK) as usize;
    if lang_len > rest.len() {
        return Err(Error::InvalidText(format!(
            "language code of {} bytes in {} byte payload",
            lang_len,
            payload.len()
        )));
    }
    let (lang, body) = rest.split_at(lang_len);
    let language = String::from_utf8(lang.to_vec()).map_err(|e| Error::InvalidText(e.to_string()))?;

    if status & TEXT_UTF16_FLAG != 0 {
        Ok((TextEncoding::Utf16, language, decode_utf16(body)?))
    } else {
        let text = String::from_utf8(body.to_vec()).map_err(|e| Error::InvalidText(e.to_string()))?;
        Ok((TextEncoding::Utf8, language, text))
    }
}

/// UTF-16 with optional byte order mark; big endian without one.
fn decode_utf16(body: &[u8]) -> Result<String> {
    if body.len() % 2 != 0 {
        return Err(Error::InvalidText("odd length UTF-16 text".into()));
    }
    let (little_endian, body) = match body {
        [0xFF, 0xFE, rest @ ..] => (true, rest),
        [0xFE, 0xFF, rest @ ..] => (false, rest),
        _ => (false, body),
    };
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|c| {
            if little_endian {
                u16::from_le_bytes([c[0], c[1]])
            } else {
                u16::from_be_bytes([c[0], c[1]])
            }
        })
        .collect();
    String::from_utf16(&units).map_err(|e| Error::InvalidText(e.to_string()))
}
