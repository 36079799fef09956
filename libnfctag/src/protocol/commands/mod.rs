// libnfctag/src/protocol/commands/mod.rs

pub mod acr122;
pub mod pn53x;

pub use acr122::Escape;
pub use pn53x::{
    encode_in_data_exchange, encode_in_list_passive_target, encode_rf_configuration,
    encode_target, encode_tg_init_as_target,
};

use crate::constants::{
    PN53X_CMD_IN_DATA_EXCHANGE, PN53X_CMD_IN_DESELECT, PN53X_CMD_IN_LIST_PASSIVE_TARGET,
    PN53X_CMD_IN_RELEASE, PN53X_CMD_RF_CONFIGURATION, PN53X_CMD_TG_GET_INITIATOR_COMMAND,
    PN53X_CMD_TG_INIT_AS_TARGET, PN53X_CMD_TG_RESPONSE_TO_INITIATOR, PN53X_HOST_TO_CHIP,
};
use crate::protocol::Frame;
use crate::types::Chipset;

/// High-level PN53x command. New commands should be added here and
/// their parameter encoder placed in `protocol::commands::pn53x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    InListPassiveTarget {
        max_targets: u8,
        baud_rate: u8,
    },
    InDataExchange {
        target: u8,
        data: Vec<u8>,
    },
    InDeselect {
        target: u8,
    },
    InRelease {
        target: u8,
    },
    RfConfiguration {
        item: u8,
        values: Vec<u8>,
    },
    TgInitAsTarget {
        mode: u8,
        mifare_params: [u8; 6],
        felica_params: [u8; 18],
        nfcid3: [u8; 10],
        general_bytes: Vec<u8>,
        historical_bytes: Vec<u8>,
    },
    TgGetInitiatorCommand,
    TgResponseToInitiator {
        data: Vec<u8>,
    },
}

impl Command {
    /// Detect a single 106 kbps Type A target.
    pub fn list_single_type_a() -> Self {
        Self::InListPassiveTarget {
            max_targets: 1,
            baud_rate: pn53x::BRTY_106_TYPE_A,
        }
    }

    /// Send a tag-level command to target 1.
    pub fn exchange(data: impl Into<Vec<u8>>) -> Self {
        Self::InDataExchange {
            target: pn53x::TARGET_1,
            data: data.into(),
        }
    }

    /// Turn the RF field off.
    pub fn rf_off() -> Self {
        Self::RfConfiguration {
            item: pn53x::RF_CFG_FIELD,
            values: vec![0x00],
        }
    }

    /// Passive-only target init presenting as a Type A tag.
    pub fn emulate_type_a() -> Self {
        Self::TgInitAsTarget {
            mode: pn53x::TG_MODE_PASSIVE_ONLY,
            mifare_params: pn53x::EMULATED_MIFARE_PARAMS,
            felica_params: [0; 18],
            nfcid3: [0; 10],
            general_bytes: Vec::new(),
            historical_bytes: Vec::new(),
        }
    }

    /// Return the PN53x command code.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::InListPassiveTarget { .. } => PN53X_CMD_IN_LIST_PASSIVE_TARGET,
            Self::InDataExchange { .. } => PN53X_CMD_IN_DATA_EXCHANGE,
            Self::InDeselect { .. } => PN53X_CMD_IN_DESELECT,
            Self::InRelease { .. } => PN53X_CMD_IN_RELEASE,
            Self::RfConfiguration { .. } => PN53X_CMD_RF_CONFIGURATION,
            Self::TgInitAsTarget { .. } => PN53X_CMD_TG_INIT_AS_TARGET,
            Self::TgGetInitiatorCommand => PN53X_CMD_TG_GET_INITIATOR_COMMAND,
            Self::TgResponseToInitiator { .. } => PN53X_CMD_TG_RESPONSE_TO_INITIATOR,
        }
    }

    /// Encode the parameters that follow the command code.
    pub fn params(&self) -> Vec<u8> {
        match self {
            Self::InListPassiveTarget {
                max_targets,
                baud_rate,
            } => encode_in_list_passive_target(*max_targets, *baud_rate),
            Self::InDataExchange { target, data } => encode_in_data_exchange(*target, data),
            Self::InDeselect { target } | Self::InRelease { target } => encode_target(*target),
            Self::RfConfiguration { item, values } => encode_rf_configuration(*item, values),
            Self::TgInitAsTarget {
                mode,
                mifare_params,
                felica_params,
                nfcid3,
                general_bytes,
                historical_bytes,
            } => encode_tg_init_as_target(
                *mode,
                mifare_params,
                felica_params,
                nfcid3,
                general_bytes,
                historical_bytes,
            ),
            Self::TgGetInitiatorCommand => Vec::new(),
            Self::TgResponseToInitiator { data } => data.clone(),
        }
    }

    /// Encode the frame body: direction byte, command code and parameters.
    pub fn encode(&self) -> Vec<u8> {
        let params = self.params();
        let mut out = Vec::with_capacity(2 + params.len());
        out.push(PN53X_HOST_TO_CHIP);
        out.push(self.command_code());
        out.extend_from_slice(&params);
        out
    }

    /// Encode into a complete frame for the given chipset.
    pub fn to_frame(&self, chipset: Chipset) -> crate::Result<Vec<u8>> {
        Frame::encode(chipset, self.command_code(), &self.params())
    }
}
