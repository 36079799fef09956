#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use libnfctag::device::{ReaderBuilder, ReaderConfig};
use libnfctag::test_support::push_acr122_init_replies;
use libnfctag::transport::MockTransport;
use libnfctag::types::Chipset;

#[tokio::test]
async fn builder_initializes_and_closes_acr122() {
    common::init_logging();
    let mock = MockTransport::new(Chipset::Acr122);
    push_acr122_init_replies(&mock);

    let reader = ReaderBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .with_config(ReaderConfig::default().with_command_timeout(Duration::from_millis(500)))
        .build()
        .await
        .unwrap();
    assert_eq!(reader.model_name(), "ACR122U");
    assert_eq!(reader.config().command_timeout, Duration::from_millis(500));
    assert_eq!(mock.sent().len(), 3);

    mock.push_reply(&[0xD5, 0x45, 0x00]);
    mock.push_reply(&[0xD5, 0x53, 0x00]);
    reader.close().await.unwrap();
    assert_eq!(mock.sent().len(), 5);
    assert_eq!(mock.pending(), 0);
}

#[tokio::test]
async fn native_reader_needs_no_handshake() {
    let mock = MockTransport::new(Chipset::Pn533);
    let reader = ReaderBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .build()
        .await
        .unwrap();
    assert_eq!(reader.model_name(), "SCL3711");
    assert_eq!(reader.chipset(), Chipset::Pn533);
    assert!(mock.sent().is_empty());
}

#[tokio::test]
async fn release_error_is_reported_on_close() {
    let mock = MockTransport::new(Chipset::Pn533);
    let reader = ReaderBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .build()
        .await
        .unwrap();

    mock.push_reply(&[0xD5, 0x45, 0x27]);
    mock.push_reply(&[0xD5, 0x53, 0x00]);
    let err = reader.close().await.unwrap_err();
    assert!(matches!(
        err,
        libnfctag::Error::ReaderStatus { command: 0x44, status: 0x27, .. }
    ));
    // release is still attempted after a failed deselect
    assert_eq!(mock.sent().len(), 2);
}
