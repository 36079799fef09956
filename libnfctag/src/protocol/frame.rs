// libnfctag/src/protocol/frame.rs

use crate::constants::{
    ACR122_APDU_CLASS, CCID_HEADER_LEN, CCID_PC_TO_RDR_ESCAPE, CCID_PC_TO_RDR_ICC_POWER_ON,
    CCID_RDR_TO_PC_DATA_BLOCK, CCID_RDR_TO_PC_ESCAPE, PN53X_ACK_FRAME, PN53X_CHIP_TO_HOST,
    PN53X_EXTENDED_MARKER, PN53X_HOST_TO_CHIP, PN53X_NACK_FRAME, PN53X_POSTAMBLE, PN53X_PREAMBLE,
};
use crate::error::FrameError;
use crate::protocol::checksum::{dcs, lcs, lcs_extended};
use crate::types::Chipset;
use crate::{Error, Result};

/// Largest body (TFI + command + data) an extended frame can declare.
const MAX_EXTENDED_BODY: usize = 0xFFFF;

/// Largest body a pseudo-APDU can carry (Lc is a single byte).
const MAX_APDU_BODY: usize = 0xFF;

/// Smallest well-formed PN53x frame (the ACK frame).
const MIN_NATIVE_FRAME_LEN: usize = 6;

/// Outcome of decoding one transport-level frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Positive acknowledgement. The actual reply follows in another frame.
    Ack,
    /// Frame body. For PN53x replies this is `D5, command + 1, data..`;
    /// for ACR122 escape replies it is the raw reply bytes including the
    /// trailing status word.
    Payload(Vec<u8>),
}

/// PN53x frame helper. Encodes host commands for either chipset and decodes
/// whatever the reader sends back.
///
/// Native format (extended length form, always used for writes):
/// `[00 00 FF] [FF FF] [LEN_HI LEN_LO] [LCS] [D4 CMD DATA..] [DCS] [00]`
///
/// ACR122 format:
/// `[6B LEN(4, LE) SLOT SEQ RFU(3)] [FF 00 00 00 Lc] [D4 CMD DATA..]`
pub struct Frame;

impl Frame {
    /// Encode a command for the given chipset.
    pub fn encode(chipset: Chipset, command: u8, data: &[u8]) -> Result<Vec<u8>> {
        match chipset {
            Chipset::Pn533 => Self::encode_native(command, data),
            Chipset::Acr122 => Self::encode_acr122(command, data),
        }
    }

    /// Encode a command as a native PN53x extended frame.
    pub fn encode_native(command: u8, data: &[u8]) -> Result<Vec<u8>> {
        let body_len = data.len() + 2;
        if body_len > MAX_EXTENDED_BODY {
            return Err(Error::InvalidLength {
                expected: MAX_EXTENDED_BODY - 2,
                actual: data.len(),
            });
        }

        let [len_hi, len_lo] = (body_len as u16).to_be_bytes();
        let mut out = Vec::with_capacity(8 + body_len + 2);
        out.extend_from_slice(&PN53X_PREAMBLE);
        out.extend_from_slice(&PN53X_EXTENDED_MARKER);
        out.push(len_hi);
        out.push(len_lo);
        out.push(lcs_extended(len_hi, len_lo));

        let body_start = out.len();
        out.push(PN53X_HOST_TO_CHIP);
        out.push(command);
        out.extend_from_slice(data);
        let checksum = dcs(&out[body_start..]);
        out.push(checksum);
        out.push(PN53X_POSTAMBLE);
        Ok(out)
    }

    /// Encode a command as a PN53x pseudo-APDU inside a CCID escape.
    pub fn encode_acr122(command: u8, data: &[u8]) -> Result<Vec<u8>> {
        let lc = data.len() + 2;
        if lc > MAX_APDU_BODY {
            return Err(Error::InvalidLength {
                expected: MAX_APDU_BODY - 2,
                actual: data.len(),
            });
        }

        let mut apdu = Vec::with_capacity(5 + lc);
        apdu.extend_from_slice(&[ACR122_APDU_CLASS, 0x00, 0x00, 0x00, lc as u8]);
        apdu.push(PN53X_HOST_TO_CHIP);
        apdu.push(command);
        apdu.extend_from_slice(data);
        Ok(Self::encode_escape(&apdu))
    }

    /// Wrap a reader-level APDU (buzzer, key load, ...) in a CCID escape.
    pub fn encode_escape(apdu: &[u8]) -> Vec<u8> {
        Self::ccid_wrap(CCID_PC_TO_RDR_ESCAPE, apdu)
    }

    /// CCID ICC power-on message (slot 0, automatic voltage).
    pub fn icc_power_on() -> Vec<u8> {
        let mut out = Self::ccid_wrap(CCID_PC_TO_RDR_ICC_POWER_ON, &[]);
        out[7] = 0x01;
        out
    }

    /// The positive acknowledgement frame. Sending it aborts whatever the
    /// chip was doing.
    pub fn ack() -> Vec<u8> {
        PN53X_ACK_FRAME.to_vec()
    }

    fn ccid_wrap(message_type: u8, body: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(CCID_HEADER_LEN + body.len());
        out.push(message_type);
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        // slot, sequence, 3 reserved bytes
        out.extend_from_slice(&[0x00; 5]);
        out.extend_from_slice(body);
        out
    }

    /// Decode one frame received from (or sent to) a reader of the given
    /// chipset.
    pub fn decode(chipset: Chipset, raw: &[u8]) -> Result<Decoded> {
        match chipset {
            Chipset::Pn533 => Self::decode_native(raw),
            Chipset::Acr122 => Self::decode_acr122(raw),
        }
    }

    /// Decode a native PN53x frame (normal or extended length).
    pub fn decode_native(raw: &[u8]) -> Result<Decoded> {
        if raw.is_empty() {
            return Err(FrameError::Empty.into());
        }
        if raw == PN53X_ACK_FRAME {
            return Ok(Decoded::Ack);
        }
        if raw.len() < MIN_NATIVE_FRAME_LEN {
            return Err(FrameError::Truncated {
                expected: MIN_NATIVE_FRAME_LEN,
                actual: raw.len(),
            }
            .into());
        }
        if raw[..3] != PN53X_PREAMBLE {
            return Err(FrameError::InvalidPreamble.into());
        }
        if raw == PN53X_NACK_FRAME {
            return Err(FrameError::Nack.into());
        }

        let (len, body_start) = if raw[3..5] == PN53X_EXTENDED_MARKER {
            if raw.len() < 8 {
                return Err(FrameError::Truncated {
                    expected: 8,
                    actual: raw.len(),
                }
                .into());
            }
            let (hi, lo, actual) = (raw[5], raw[6], raw[7]);
            let expected = lcs_extended(hi, lo);
            if actual != expected {
                return Err(FrameError::LengthChecksum { expected, actual }.into());
            }
            (u16::from_be_bytes([hi, lo]) as usize, 8usize)
        } else {
            let (len, actual) = (raw[3], raw[4]);
            let expected = lcs(len);
            if actual != expected {
                return Err(FrameError::LengthChecksum { expected, actual }.into());
            }
            (len as usize, 5usize)
        };

        // body + DCS + postamble
        let required = body_start + len + 2;
        if raw.len() < required {
            return Err(FrameError::Truncated {
                expected: required,
                actual: raw.len(),
            }
            .into());
        }
        if raw.len() > required {
            return Err(FrameError::LengthMismatch {
                declared: len,
                actual: raw.len() - body_start - 2,
            }
            .into());
        }

        let body = &raw[body_start..body_start + len];
        let expected = dcs(body);
        let actual = raw[body_start + len];
        if actual != expected {
            return Err(FrameError::ChecksumMismatch { expected, actual }.into());
        }
        if raw[required - 1] != PN53X_POSTAMBLE {
            return Err(FrameError::InvalidPostamble.into());
        }

        Ok(Decoded::Payload(body.to_vec()))
    }

    /// Decode a frame exchanged with an ACR122. Data-block (0x80) and
    /// escape (0x80/0x83) replies are reduced to the same body a native
    /// reader would produce so the classifier never sees CCID framing.
    pub fn decode_acr122(raw: &[u8]) -> Result<Decoded> {
        let Some(&message_type) = raw.first() else {
            return Err(FrameError::Empty.into());
        };

        match message_type {
            // ACK/NACK or a bare PN53x frame forwarded by the firmware
            0x00 => Self::decode_native(raw),
            CCID_RDR_TO_PC_DATA_BLOCK | CCID_RDR_TO_PC_ESCAPE => {
                let data = Self::ccid_unwrap(raw)?;
                if data.first() == Some(&PN53X_CHIP_TO_HOST) && data.len() >= 4 {
                    // D5 CMD .. SW1 SW2: drop the status word
                    Ok(Decoded::Payload(data[..data.len() - 2].to_vec()))
                } else {
                    Ok(Decoded::Payload(data.to_vec()))
                }
            }
            CCID_PC_TO_RDR_ESCAPE => {
                let apdu = Self::ccid_unwrap(raw)?;
                if apdu.len() >= 5 && apdu[..4] == [ACR122_APDU_CLASS, 0x00, 0x00, 0x00] {
                    let lc = apdu[4] as usize;
                    if apdu.len() - 5 != lc {
                        return Err(FrameError::LengthMismatch {
                            declared: lc,
                            actual: apdu.len() - 5,
                        }
                        .into());
                    }
                    Ok(Decoded::Payload(apdu[5..].to_vec()))
                } else {
                    Ok(Decoded::Payload(apdu.to_vec()))
                }
            }
            other => Err(FrameError::UnrecognizedShape(format!(
                "CCID message type {:#04x}",
                other
            ))
            .into()),
        }
    }

    fn ccid_unwrap(raw: &[u8]) -> Result<&[u8]> {
        if raw.len() < CCID_HEADER_LEN {
            return Err(FrameError::Truncated {
                expected: CCID_HEADER_LEN,
                actual: raw.len(),
            }
            .into());
        }
        let declared = u32::from_le_bytes([raw[1], raw[2], raw[3], raw[4]]) as usize;
        let actual = raw.len() - CCID_HEADER_LEN;
        if declared > actual {
            return Err(FrameError::Truncated {
                expected: CCID_HEADER_LEN + declared,
                actual: raw.len(),
            }
            .into());
        }
        if declared < actual {
            return Err(FrameError::LengthMismatch { declared, actual }.into());
        }
        Ok(&raw[CCID_HEADER_LEN..])
    }
}
