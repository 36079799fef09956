// libnfctag/src/protocol/parser.rs

use crate::constants::PN53X_CHIP_TO_HOST;
use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Read a big-endian u16 at given index, with bounds checking.
pub fn be_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    ensure_len(data, idx + 2)?;
    Ok(u16::from_be_bytes([data[idx], data[idx + 1]]))
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Ensure the first byte (response code) equals `expected` and that at
/// least one byte exists in the slice. Returns UnexpectedResponse on mismatch.
pub fn expect_response_code(data: &[u8], expected: u8) -> Result<()> {
    let actual = byte_at(data, 0)?;
    if actual != expected {
        return Err(Error::UnexpectedResponse { expected, actual });
    }
    Ok(())
}

/// Check that `body` is a PN53x reply (`D5`, `command + 1`) to `command`
/// and return the bytes after the echo.
pub fn reply_data(body: &[u8], command: u8) -> Result<&[u8]> {
    expect_response_code(body, PN53X_CHIP_TO_HOST)?;
    expect_response_code(&body[1..], command.wrapping_add(1))?;
    Ok(&body[2..])
}
