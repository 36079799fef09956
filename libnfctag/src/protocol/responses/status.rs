// libnfctag/src/protocol/responses/status.rs

use crate::{Error, Result};

/// Human-readable meaning of a PN53x status byte (error code in the low six
/// bits).
pub fn status_message(status: u8) -> &'static str {
    match status & 0x3F {
        0x00 => "success",
        0x01 => "time out, the target has not answered",
        0x02 => "checksum error during rf communication",
        0x03 => "parity error during rf communication",
        0x04 => "erroneous bit count in anticollision",
        0x05 => "framing error during mifare operation",
        0x06 => "abnormal bit collision in 106 kbps anticollision",
        0x07 => "insufficient communication buffer size",
        0x09 => "rf buffer overflow detected by ciu",
        0x0A => "rf field not activated in time by active mode peer",
        0x0B => "protocol error during rf communication",
        0x0D => "overheated - antenna drivers deactivated",
        0x0E => "internal buffer overflow",
        0x10 => "invalid command parameter",
        0x12 => "unsupported command from initiator",
        0x13 => "format error during rf communication",
        0x14 => "mifare authentication error",
        0x18 => "not support NFC secure",
        0x19 => "i2c bus line is busy",
        0x23 => "wrong uid check byte (14443-3)",
        0x25 => "command invalid in current dep state",
        0x26 => "operation not allowed in this configuration",
        0x27 => "not acceptable command due to context",
        0x29 => "released by initiator while operating as target",
        0x2A => "card ID does not match",
        0x2B => "the card previously activated has disappeared",
        0x2C => "Mismatch between NFCID3 initiator and target in DEP 212/424 kbps",
        0x2D => "Over-current event has been detected",
        0x2E => "NAD missing in DEP frame",
        0x2F => "deselected by initiator while operating as target",
        0x31 => "initiator rf-off state detected in passive mode",
        0x3F => "pn53x application level error",
        _ => "unknown error",
    }
}

/// Turn a non-zero status byte of a reply to `command` into an error.
pub fn check_status(command: u8, status: u8) -> Result<()> {
    if status == 0 {
        return Ok(());
    }
    Err(Error::ReaderStatus {
        command,
        status,
        message: status_message(status),
    })
}
