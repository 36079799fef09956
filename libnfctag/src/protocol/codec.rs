// libnfctag/src/protocol/codec.rs

use crate::Result;
use crate::types::Chipset;

use super::commands::Command;
use super::frame::{Decoded, Frame};
use super::responses::{Reply, classify};

/// Encode a Command into a full wire frame for the chipset.
pub fn encode_command_frame(chipset: Chipset, cmd: &Command) -> Result<Vec<u8>> {
    cmd.to_frame(chipset)
}

/// Decode a wire frame and classify its body. Returns `None` for the
/// positive acknowledgement frame, which carries no reply.
pub fn decode_reply_frame(chipset: Chipset, frame: &[u8]) -> Result<Option<Reply>> {
    match Frame::decode(chipset, frame)? {
        Decoded::Ack => Ok(None),
        Decoded::Payload(body) => classify(&body).map(Some),
    }
}
