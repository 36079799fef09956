// fixtures.rs — provides commonly used test payloads/frames

use libnfctag::constants::SW_FAILURE;
use libnfctag::constants::SW_SUCCESS;
use libnfctag::test_support::{data_exchange_body, passive_target_body};
use libnfctag::transport::MockTransport;
use libnfctag::types::{TagIdentity, TagType, Uid};

pub fn mifare_uid() -> Uid {
    Uid::try_from(&[0xDE, 0xAD, 0xBE, 0xEF][..]).unwrap()
}

pub fn ultralight_uid() -> Uid {
    Uid::try_from(&hex::decode("04a1b2c3d4e5f6").unwrap()[..]).unwrap()
}

pub fn mifare_identity() -> TagIdentity {
    TagIdentity {
        tag_type: TagType::MifareClassic,
        uid: mifare_uid(),
    }
}

pub fn ultralight_identity() -> TagIdentity {
    TagIdentity {
        tag_type: TagType::Type2,
        uid: ultralight_uid(),
    }
}

pub fn push_ultralight_detection(mock: &MockTransport) {
    mock.push_reply(&passive_target_body(0x0044, ultralight_uid().as_bytes()));
}

pub fn push_mifare_detection(mock: &MockTransport) {
    mock.push_reply(&passive_target_body(0x0004, mifare_uid().as_bytes()));
}

/// Escape accepted / rejected by an ACR122.
pub fn push_escape_ok(mock: &MockTransport) {
    mock.push_status_word(SW_SUCCESS);
}

pub fn push_escape_rejected(mock: &MockTransport) {
    mock.push_status_word(SW_FAILURE);
}

/// ACR122 replies for a public authentication whose first key works:
/// load + auth key A, load + auth key B.
pub fn push_public_auth_ok(mock: &MockTransport) {
    for _ in 0..4 {
        push_escape_ok(mock);
    }
}

/// InDataExchange answer carrying `data`.
pub fn push_tag_data(mock: &MockTransport, data: &[u8]) {
    mock.push_reply(&data_exchange_body(data));
}

pub fn push_write_ok(mock: &MockTransport) {
    mock.push_reply(&data_exchange_body(&[]));
}

/// Serve Mifare READs of `blocks` straight from `image`.
pub fn push_blocks(mock: &MockTransport, image: &[u8], blocks: std::ops::Range<usize>) {
    for block in blocks {
        push_tag_data(mock, &image[block * 16..block * 16 + 16]);
    }
}

/// Tag-level command carried by a sent ACR122 InDataExchange frame (after
/// CCID header, pseudo-APDU header and `D4 40 01`). `None` for other frames.
pub fn acr122_tag_command(frame: &[u8]) -> Option<&[u8]> {
    (frame.get(15..18) == Some(&[0xD4, 0x40, 0x01][..])).then(|| &frame[18..])
}

/// Tag-level command carried by a sent native frame.
pub fn native_tag_command(frame: &[u8]) -> &[u8] {
    // 00 00 FF FF FF LEN_HI LEN_LO LCS D4 40 01 ... DCS 00
    &frame[11..frame.len() - 2]
}
