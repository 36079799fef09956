use std::time::Duration;

use libnfctag::Error;
use libnfctag::device::emulation::read_window;
use libnfctag::ndef::{Message, Record};
use libnfctag::protocol::Command;
use libnfctag::tag::type2;
use libnfctag::test_support::initialized_mock_reader;
use libnfctag::transport::MockTransport;
use libnfctag::types::Chipset;

#[tokio::test]
async fn phone_reads_emulated_message() {
    let message = Message::new(vec![Record::uri("https://example.org")]);
    let image = type2::compose(&message.to_bytes()).unwrap();

    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();
    // selected, then READ 0, READ 4, HALT
    mock.push_reply(&[0xD5, 0x8D, 0x04, 0x30, 0x00]);
    mock.push_reply(&[0xD5, 0x91, 0x00]);
    mock.push_reply(&[0xD5, 0x89, 0x00, 0x30, 0x04]);
    mock.push_reply(&[0xD5, 0x91, 0x00]);
    mock.push_reply(&[0xD5, 0x89, 0x00, 0x50, 0x00]);

    reader.emulate(&message, Duration::from_secs(1)).await.unwrap();

    let sent = mock.sent();
    assert_eq!(sent.len(), 5);
    let header = read_window(&image, 0);
    assert_eq!(&header[12..], &[0xE1, 0x10, 0x06, 0x00]);
    let expected = Command::TgResponseToInitiator { data: header };
    assert_eq!(sent[1], expected.to_frame(Chipset::Pn533).unwrap());
    let expected = Command::TgResponseToInitiator {
        data: read_window(&image, 4),
    };
    assert_eq!(sent[3], expected.to_frame(Chipset::Pn533).unwrap());
}

#[tokio::test]
async fn write_from_initiator_aborts_emulation() {
    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();
    mock.push_reply(&[0xD5, 0x8D, 0x04, 0x30, 0x00]);
    mock.push_reply(&[0xD5, 0x91, 0x00]);
    mock.push_reply(&[0xD5, 0x89, 0x00, 0xA2, 0x04, 1, 2, 3, 4]);

    let message = Message::new(vec![Record::text("en", "read only")]);
    assert!(matches!(
        reader.emulate(&message, Duration::from_secs(1)).await,
        Err(Error::UnsupportedInitiatorCommand(0xA2))
    ));
}

#[tokio::test]
async fn oversized_message_is_not_emulated() {
    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = initialized_mock_reader(&mock).await.unwrap();
    let message = Message::new(vec![Record::mime("application/octet-stream", vec![0u8; 300])]);
    assert!(matches!(
        reader.emulate(&message, Duration::from_secs(1)).await,
        Err(Error::TooLarge { .. })
    ));
    assert!(mock.sent().is_empty());
}
