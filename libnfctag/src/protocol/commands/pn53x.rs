// libnfctag/src/protocol/commands/pn53x.rs

//! Parameter encoders for the PN53x commands the engine issues. Each returns
//! the bytes that follow the command code in the frame body.

/// Only target number the engine ever selects.
pub const TARGET_1: u8 = 0x01;

/// 106 kbps ISO/IEC 14443 Type A.
pub const BRTY_106_TYPE_A: u8 = 0x00;

/// TgInitAsTarget mode: passive only.
pub const TG_MODE_PASSIVE_ONLY: u8 = 0x01;

/// SENS_RES 0x0004, NFCID1 00 B0 0B, SEL_RES 0x00.
pub const EMULATED_MIFARE_PARAMS: [u8; 6] = [0x04, 0x00, 0x00, 0xB0, 0x0B, 0x00];

/// RFConfiguration item 0x01 (RF field).
pub const RF_CFG_FIELD: u8 = 0x01;

pub fn encode_in_list_passive_target(max_targets: u8, baud_rate: u8) -> Vec<u8> {
    vec![max_targets, baud_rate]
}

pub fn encode_in_data_exchange(target: u8, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + data.len());
    out.push(target);
    out.extend_from_slice(data);
    out
}

pub fn encode_target(target: u8) -> Vec<u8> {
    vec![target]
}

pub fn encode_rf_configuration(item: u8, values: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + values.len());
    out.push(item);
    out.extend_from_slice(values);
    out
}

/// Mode, Mifare params (6), FeliCa params (18), NFCID3t (10), then
/// length-prefixed general bytes and historical bytes.
pub fn encode_tg_init_as_target(
    mode: u8,
    mifare_params: &[u8; 6],
    felica_params: &[u8; 18],
    nfcid3: &[u8; 10],
    general_bytes: &[u8],
    historical_bytes: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(37 + general_bytes.len() + historical_bytes.len());
    out.push(mode);
    out.extend_from_slice(mifare_params);
    out.extend_from_slice(felica_params);
    out.extend_from_slice(nfcid3);
    out.push(general_bytes.len() as u8);
    out.extend_from_slice(general_bytes);
    out.push(historical_bytes.len() as u8);
    out.extend_from_slice(historical_bytes);
    out
}
