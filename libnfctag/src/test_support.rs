//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::constants::{CCID_RDR_TO_PC_DATA_BLOCK, CCID_RDR_TO_PC_ESCAPE, SW_SUCCESS};
use crate::device::{Initialized, Reader};
use crate::transport::Transport;
use crate::transport::mock::{MockTransport, ccid_reply};
use crate::types::Chipset;
use crate::Result;

/// ATR an ACR122U reports on ICC power-on.
pub const ACR122_ATR: [u8; 11] = [
    0x3B, 0x8A, 0x80, 0x01, 0x41, 0x43, 0x52, 0x31, 0x32, 0x32, 0x55,
];

/// Queue the replies to the ACR122 init sequence (ack reset, power on,
/// buzzer off).
#[doc(hidden)]
pub fn push_acr122_init_replies(mock: &MockTransport) {
    mock.push_response(ccid_reply(CCID_RDR_TO_PC_ESCAPE, &SW_SUCCESS));
    mock.push_response(ccid_reply(CCID_RDR_TO_PC_DATA_BLOCK, &ACR122_ATR));
    mock.push_status_word(SW_SUCCESS);
}

/// `D5 4B` body reporting one target with the given SENS_RES and UID.
#[doc(hidden)]
pub fn passive_target_body(sens_res: u16, uid: &[u8]) -> Vec<u8> {
    let sel_res = if sens_res == 0x0004 { 0x08 } else { 0x00 };
    let [hi, lo] = sens_res.to_be_bytes();
    let mut body = vec![0xD5, 0x4B, 0x01, 0x01, hi, lo, sel_res, uid.len() as u8];
    body.extend_from_slice(uid);
    body
}

/// `D5 41 00 ..` InDataExchange success body.
#[doc(hidden)]
pub fn data_exchange_body(data: &[u8]) -> Vec<u8> {
    let mut body = vec![0xD5, 0x41, 0x00];
    body.extend_from_slice(data);
    body
}

/// Initialized reader over `mock`; ACR122 init replies are queued first.
#[doc(hidden)]
pub async fn initialized_mock_reader(mock: &MockTransport) -> Result<Reader<Initialized>> {
    if mock.chipset() == Chipset::Acr122 {
        push_acr122_init_replies(mock);
    }
    Reader::new_with_transport(Box::new(mock.clone()))
        .initialize()
        .await
}
