#[path = "../common/mod.rs"]
mod common;

use libnfctag::Error;
use libnfctag::tag::type2::{self, Type2Variant};
use libnfctag::tag::{TagSession, Type2Tag};
use libnfctag::test_support::initialized_mock_reader;
use libnfctag::transport::MockTransport;
use libnfctag::types::Chipset;

use common::fixtures::{native_tag_command, push_tag_data, push_write_ok, ultralight_identity};

fn block0(cc: [u8; 4]) -> Vec<u8> {
    let mut block = hex::decode("04a1b2c3d4e5f6000000000000").unwrap()[..12].to_vec();
    block.extend_from_slice(&cc);
    block
}

#[tokio::test]
async fn read_returns_ndef_payload() {
    common::init_logging();
    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();

    push_tag_data(&mock, &block0([0xE1, 0x10, 0x06, 0x00]));
    let mut data = vec![0u8; 48];
    data[..7].copy_from_slice(&[0x03, 0x04, 0xCA, 0xFE, 0xBA, 0xBE, 0xFE]);
    for chunk in data.chunks(16) {
        push_tag_data(&mock, chunk);
    }

    let mut tag = Type2Tag::new(TagSession::new(&mut reader, ultralight_identity()));
    assert_eq!(tag.read().await.unwrap(), vec![0xCA, 0xFE, 0xBA, 0xBE]);

    let pages: Vec<u8> = mock
        .sent()
        .iter()
        .map(|f| native_tag_command(f)[1])
        .collect();
    assert_eq!(pages, vec![0, 4, 8, 12]);
}

#[tokio::test]
async fn unsupported_cc_stops_before_data() {
    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();
    push_tag_data(&mock, &block0([0xE1, 0x10, 0x06, 0x0F << 4]));

    let mut tag = Type2Tag::new(TagSession::new(&mut reader, ultralight_identity()));
    match tag.read().await {
        Err(Error::UnsupportedTag { cc }) => assert_eq!(cc, [0xE1, 0x10, 0x06, 0xF0]),
        other => panic!("expected UnsupportedTag, got: {:?}", other),
    }
    assert_eq!(mock.sent().len(), 1);
}

#[tokio::test]
async fn write_starts_at_cc_page() {
    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();

    let image = type2::compose(&[0xD1, 0x01, 0x01, b'U', 0x00]).unwrap();
    // everything from page 3 on, four bytes per WRITE
    let pages = (image.len() - 12).div_ceil(4);
    for _ in 0..pages {
        push_write_ok(&mock);
    }

    let mut tag = Type2Tag::new(TagSession::new(&mut reader, ultralight_identity()));
    tag.write(&image).await.unwrap();

    let sent = mock.sent();
    assert_eq!(sent.len(), pages);
    assert_eq!(native_tag_command(&sent[0]), &[0xA2, 0x03, 0xE1, 0x10, 0x06, 0x00]);
    assert_eq!(native_tag_command(&sent[1]), &[0xA2, 0x04, 0x03, 0x05, 0xD1, 0x01]);
    let last = native_tag_command(sent.last().unwrap());
    assert_eq!(last[1], 3 + pages as u8 - 1);
}

#[tokio::test]
async fn detect_ultralight_c() {
    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();
    push_tag_data(&mock, &[0u8; 16]);
    let mut tag = Type2Tag::new(TagSession::new(&mut reader, ultralight_identity()));
    assert_eq!(tag.detect().await.unwrap(), Type2Variant::UltralightC);
}

#[tokio::test]
async fn detect_plain_ultralight() {
    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();
    mock.push_reply(&[0xD5, 0x41, 0x01]);
    let mut tag = Type2Tag::new(TagSession::new(&mut reader, ultralight_identity()));
    assert_eq!(tag.detect().await.unwrap(), Type2Variant::Ultralight);
}

#[tokio::test]
async fn detect_skips_non_nxp() {
    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();
    let mut identity = ultralight_identity();
    identity.uid = libnfctag::types::Uid::try_from(&[0x05, 1, 2, 3, 4, 5, 6][..]).unwrap();
    let mut tag = Type2Tag::new(TagSession::new(&mut reader, identity));
    assert_eq!(tag.detect().await.unwrap(), Type2Variant::Unknown);
    assert!(mock.sent().is_empty());
}
