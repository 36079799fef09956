//! Hexadecimal helpers used for frame logging and display.

use std::fmt;

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    HexDump::compact(bytes).to_string()
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte.
///
/// Example: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    HexDump::spaced(bytes).to_string()
}

/// Lazily formatted hex view of a buffer. Passing this to `log` macros
/// defers the formatting cost until the record is actually emitted.
#[derive(Clone, Copy)]
pub struct HexDump<'a> {
    bytes: &'a [u8],
    separator: Option<char>,
}

impl<'a> HexDump<'a> {
    pub fn compact(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            separator: None,
        }
    }

    pub fn spaced(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            separator: Some(' '),
        }
    }
}

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.bytes.iter().enumerate() {
            if let (Some(sep), true) = (self.separator, i != 0) {
                write!(f, "{}", sep)?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}
