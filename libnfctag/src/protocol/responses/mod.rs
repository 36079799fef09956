// libnfctag/src/protocol/responses/mod.rs

pub mod passive_target;
pub mod status;

pub use passive_target::{PassiveTarget, PassiveTargetList, decode_passive_target_list};
pub use status::{check_status, status_message};

use crate::constants::{
    PN53X_CHIP_TO_HOST, PN53X_CMD_IN_DATA_EXCHANGE, PN53X_CMD_IN_DESELECT,
    PN53X_CMD_IN_LIST_PASSIVE_TARGET, PN53X_CMD_IN_RELEASE, PN53X_CMD_RF_CONFIGURATION,
    PN53X_CMD_TG_GET_INITIATOR_COMMAND, PN53X_CMD_TG_INIT_AS_TARGET,
    PN53X_CMD_TG_RESPONSE_TO_INITIATOR, SW_FAILURE, SW_SUCCESS,
};
use crate::protocol::parser::byte_at;
use crate::{Error, Result};

/// Classified reader reply. Per-command decoders live in
/// `protocol::responses::<name>.rs` and are dispatched from `classify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    DataExchange { status: u8, data: Vec<u8> },
    TargetInit { mode: u8, data: Vec<u8> },
    GetInitiatorCommand { status: u8, data: Vec<u8> },
    ResponseToInitiator { status: u8, data: Vec<u8> },
    RfConfiguration { data: Vec<u8> },
    PassiveTargetList(PassiveTargetList),
    Deselect { status: u8 },
    Release { status: u8 },
    /// ACR122 reader-level escape answered `90 00`.
    SecondChipsetSuccess { data: Vec<u8> },
    /// ACR122 reader-level escape answered `63 00`.
    SecondChipsetFailure,
    /// Anything not matching a known command echo. Carries the raw body.
    Unrecognized(Vec<u8>),
}

impl Reply {
    /// Short name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DataExchange { .. } => "InDataExchange",
            Self::TargetInit { .. } => "TgInitAsTarget",
            Self::GetInitiatorCommand { .. } => "TgGetInitiatorCommand",
            Self::ResponseToInitiator { .. } => "TgResponseToInitiator",
            Self::RfConfiguration { .. } => "RFConfiguration",
            Self::PassiveTargetList(_) => "InListPassiveTarget",
            Self::Deselect { .. } => "InDeselect",
            Self::Release { .. } => "InRelease",
            Self::SecondChipsetSuccess { .. } => "escape success",
            Self::SecondChipsetFailure => "escape failure",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    /// Turn a reply that is not the one an exchange expected into an error.
    pub fn into_unexpected(self) -> Error {
        match self {
            Self::Unrecognized(body) => Error::UnexpectedReply(format!(
                "unrecognized reply {}",
                crate::utils::bytes_to_hex_spaced(&body)
            )),
            other => Error::UnexpectedReply(format!("unexpected {} reply", other.kind())),
        }
    }
}

/// Classify a decoded frame body.
///
/// Non-zero status bytes of InDataExchange, TgGetInitiatorCommand,
/// TgResponseToInitiator, InDeselect and InRelease replies come back as
/// `Error::ReaderStatus`. Unknown shapes come back as `Reply::Unrecognized`.
pub fn classify(body: &[u8]) -> Result<Reply> {
    if body.len() >= 2 && body[0] == PN53X_CHIP_TO_HOST {
        return classify_pn53x(body);
    }

    if body.len() >= 2 {
        let (data, sw) = body.split_at(body.len() - 2);
        if sw == SW_SUCCESS {
            return Ok(Reply::SecondChipsetSuccess {
                data: data.to_vec(),
            });
        }
        if sw == SW_FAILURE && data.is_empty() {
            return Ok(Reply::SecondChipsetFailure);
        }
    }

    Ok(Reply::Unrecognized(body.to_vec()))
}

fn classify_pn53x(body: &[u8]) -> Result<Reply> {
    let echo = body[1];
    let data = &body[2..];
    let command = echo.wrapping_sub(1);

    let reply = match command {
        PN53X_CMD_IN_DATA_EXCHANGE => {
            let status = byte_at(data, 0)?;
            check_status(command, status)?;
            Reply::DataExchange {
                status,
                data: data[1..].to_vec(),
            }
        }
        PN53X_CMD_TG_INIT_AS_TARGET => {
            // mode byte is informational only
            let mode = byte_at(data, 0)?;
            Reply::TargetInit {
                mode,
                data: data[1..].to_vec(),
            }
        }
        PN53X_CMD_TG_GET_INITIATOR_COMMAND => {
            let status = byte_at(data, 0)?;
            check_status(command, status)?;
            Reply::GetInitiatorCommand {
                status,
                data: data[1..].to_vec(),
            }
        }
        PN53X_CMD_TG_RESPONSE_TO_INITIATOR => {
            let status = byte_at(data, 0)?;
            check_status(command, status)?;
            Reply::ResponseToInitiator {
                status,
                data: data[1..].to_vec(),
            }
        }
        PN53X_CMD_RF_CONFIGURATION => Reply::RfConfiguration {
            data: data.to_vec(),
        },
        PN53X_CMD_IN_LIST_PASSIVE_TARGET => match decode_passive_target_list(data)? {
            Some(list) => Reply::PassiveTargetList(list),
            None => Reply::Unrecognized(body.to_vec()),
        },
        PN53X_CMD_IN_DESELECT => {
            let status = byte_at(data, 0)?;
            check_status(command, status)?;
            Reply::Deselect { status }
        }
        PN53X_CMD_IN_RELEASE => {
            let status = byte_at(data, 0)?;
            check_status(command, status)?;
            Reply::Release { status }
        }
        _ => Reply::Unrecognized(body.to_vec()),
    };
    Ok(reply)
}
