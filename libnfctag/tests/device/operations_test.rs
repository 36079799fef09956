#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use libnfctag::Error;
use libnfctag::device::emulation::read_window;
use libnfctag::ndef::{Message, Record};
use libnfctag::tag::type2;
use libnfctag::test_support::initialized_mock_reader;
use libnfctag::transport::MockTransport;
use libnfctag::types::Chipset;

use common::fixtures::{native_tag_command, push_tag_data, push_ultralight_detection};

const WAIT: Duration = Duration::from_secs(1);

#[tokio::test]
async fn read_ndef_from_ultralight() {
    common::init_logging();
    let message = Message::new(vec![
        Record::uri("https://example.org"),
        Record::text("en", "hi"),
    ]);
    let image = type2::compose(&message.to_bytes()).unwrap();

    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();
    push_ultralight_detection(&mock);
    for page in [0u8, 4, 8, 12] {
        push_tag_data(&mock, &read_window(&image, page));
    }

    assert_eq!(reader.read_ndef(WAIT).await.unwrap(), message);

    let sent = mock.sent();
    assert_eq!(sent.len(), 5);
    let reads: Vec<Vec<u8>> = sent[1..]
        .iter()
        .map(|f| native_tag_command(f).to_vec())
        .collect();
    assert_eq!(
        reads,
        vec![vec![0x30, 0], vec![0x30, 4], vec![0x30, 8], vec![0x30, 12]]
    );
}

#[tokio::test]
async fn oversized_message_is_refused_before_writing() {
    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();
    push_ultralight_detection(&mock);

    let message = Message::new(vec![Record::text("en", "x".repeat(400))]);
    match reader.write_ndef(&message, WAIT).await {
        Err(Error::TooLarge { capacity, .. }) => assert_eq!(capacity, type2::MAX_IMAGE_LEN),
        other => panic!("expected TooLarge, got: {:?}", other),
    }
    // only the detection went out
    assert_eq!(mock.sent().len(), 1);
}

#[tokio::test]
async fn empty_field_is_no_target() {
    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();
    mock.push_reply(&[0xD5, 0x4B, 0x00]);

    assert!(matches!(
        reader.select_tag(WAIT).await,
        Err(Error::NoTarget { tag_count: 0 })
    ));
}

#[tokio::test]
async fn physical_write_needs_mifare() {
    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();
    push_ultralight_detection(&mock);

    assert!(matches!(
        reader.write_physical(4, None, &[0u8; 16], WAIT).await,
        Err(Error::UnsupportedOperation(_))
    ));
}
