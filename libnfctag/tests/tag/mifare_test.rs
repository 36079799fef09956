#[path = "../common/mod.rs"]
mod common;

use libnfctag::Error;
use libnfctag::tag::mifare::{self, mad};
use libnfctag::tag::{MifareClassic, TagSession};
use libnfctag::test_support::initialized_mock_reader;
use libnfctag::transport::MockTransport;
use libnfctag::types::{Chipset, KeyType, MifareKey};

use common::fixtures::{
    acr122_tag_command, mifare_identity, push_blocks, push_escape_ok, push_escape_rejected,
    push_public_auth_ok, push_tag_data, push_write_ok,
};

/// Frames the ACR122 init sequence sends before a test's own traffic.
const INIT_FRAMES: usize = 3;

async fn acr122() -> (MockTransport, libnfctag::Reader<libnfctag::Initialized>) {
    common::init_logging();
    let mock = MockTransport::new(Chipset::Acr122);
    let reader = initialized_mock_reader(&mock).await.unwrap();
    (mock, reader)
}

fn loaded_key(frame: &[u8]) -> &[u8] {
    // FF 82 00 loc 06 key
    assert_eq!(&frame[10..12], &[0xFF, 0x82]);
    &frame[15..21]
}

#[tokio::test]
async fn public_authentication_tries_keys_in_order() {
    let (mock, mut reader) = acr122().await;
    // key A: default and NFC Forum rejected, MAD key accepted
    push_escape_ok(&mock);
    push_escape_rejected(&mock);
    push_escape_ok(&mock);
    push_escape_rejected(&mock);
    push_escape_ok(&mock);
    push_escape_ok(&mock);
    // key B
    push_escape_ok(&mock);
    push_escape_ok(&mock);

    let mut tag = MifareClassic::new(TagSession::new(&mut reader, mifare_identity()));
    tag.public_authentication(5).await.unwrap();

    let auth = *tag.session().auth_state().unwrap();
    assert_eq!(auth.sector, 1);
    assert_eq!(auth.key, MifareKey::MAD);
    assert_eq!(auth.key_type, KeyType::A);

    let sent = mock.sent();
    assert_eq!(sent.len(), INIT_FRAMES + 8);
    assert_eq!(loaded_key(&sent[3]), MifareKey::DEFAULT.as_bytes());
    assert_eq!(loaded_key(&sent[5]), MifareKey::NFC_FORUM.as_bytes());
    assert_eq!(loaded_key(&sent[7]), MifareKey::MAD.as_bytes());
    assert_eq!(loaded_key(&sent[9]), MifareKey::DEFAULT.as_bytes());
    // key B goes to volatile location 1 and authenticates with 0x61
    assert_eq!(&sent[10][10..], &[0xFF, 0x86, 0x00, 0x00, 0x05, 0x01, 0x00, 0x05, 0x61, 0x01]);

    // same sector again: no traffic
    tag.public_authentication(6).await.unwrap();
    assert_eq!(mock.sent().len(), INIT_FRAMES + 8);
}

#[tokio::test]
async fn public_authentication_exhausted() {
    let (mock, mut reader) = acr122().await;
    for _ in 0..3 {
        push_escape_ok(&mock);
        push_escape_rejected(&mock);
    }
    let mut tag = MifareClassic::new(TagSession::new(&mut reader, mifare_identity()));
    match tag.public_authentication(8).await {
        Err(Error::AuthenticationExhausted {
            sector: 2,
            attempts: 3,
        }) => {}
        other => panic!("expected AuthenticationExhausted, got: {:?}", other),
    }
    assert!(tag.session().auth_state().is_none());
}

#[tokio::test]
async fn private_key_rejection_is_reported() {
    let (mock, mut reader) = acr122().await;
    push_escape_ok(&mock);
    push_escape_rejected(&mock);
    let key = MifareKey::from_bytes([1, 2, 3, 4, 5, 6]);
    let mut tag = MifareClassic::new(TagSession::new(&mut reader, mifare_identity()));
    match tag.write_physical(4, Some(&key), &[0xAA; 16]).await {
        Err(Error::KeyRejected {
            sector: 1,
            key_type: KeyType::B,
        }) => {}
        other => panic!("expected KeyRejected, got: {:?}", other),
    }
    // nothing was written
    assert_eq!(mock.sent().len(), INIT_FRAMES + 2);
}

#[tokio::test]
async fn non_personalized_card_short_circuits() {
    let (mock, mut reader) = acr122().await;
    push_public_auth_ok(&mock);
    let mut sector0 = [0u8; 64];
    sector0[mad::GPB_OFFSET] = 0x69;
    push_blocks(&mock, &sector0, 0..4);

    let mut tag = MifareClassic::new(TagSession::new(&mut reader, mifare_identity()));
    assert!(matches!(tag.read().await, Err(Error::NonPersonalized)));
    assert_eq!(mock.sent().len(), INIT_FRAMES + 4 + 4);
    assert_eq!(mock.pending(), 0);
}

#[tokio::test]
async fn read_uses_mad_to_bound_blocks() {
    let (mock, mut reader) = acr122().await;
    let ndef = hex::decode("d101045501612e62").unwrap();
    let image = mifare::compose(&ndef).unwrap();
    assert_eq!(image.len(), 128);

    push_public_auth_ok(&mock);
    push_blocks(&mock, &image, 0..4);
    push_public_auth_ok(&mock);
    push_blocks(&mock, &image, 4..8);

    let mut tag = MifareClassic::new(TagSession::new(&mut reader, mifare_identity()));
    assert_eq!(tag.read().await.unwrap(), ndef);
    assert_eq!(mock.pending(), 0);

    let reads: Vec<u8> = mock
        .sent()
        .iter()
        .filter_map(|f| acr122_tag_command(f).map(<[u8]>::to_vec))
        .filter(|cmd| cmd.first() == Some(&0x30))
        .map(|cmd| cmd[1])
        .collect();
    assert_eq!(reads, vec![0, 1, 2, 3, 4, 5, 6, 7]);
}

#[tokio::test]
async fn corrupt_mad_is_rejected() {
    let (mock, mut reader) = acr122().await;
    let mut image = mifare::compose(&[0xD0, 0x00, 0x00]).unwrap();
    image[0x10] ^= 0xFF;
    push_public_auth_ok(&mock);
    push_blocks(&mock, &image, 0..4);

    let mut tag = MifareClassic::new(TagSession::new(&mut reader, mifare_identity()));
    assert!(matches!(
        tag.read().await,
        Err(Error::MadCrcMismatch { .. })
    ));
}

#[tokio::test]
async fn write_logic_rewrites_gpb() {
    let (mock, mut reader) = acr122().await;
    push_public_auth_ok(&mock);
    push_write_ok(&mock);
    // trailer of sector 1 as read back: key A hidden, factory GPB
    let trailer = hex::decode("000000000000ff078069ffffffffffff").unwrap();
    push_tag_data(&mock, &trailer);
    push_write_ok(&mock);

    let mut tag = MifareClassic::new(TagSession::new(&mut reader, mifare_identity()));
    tag.write_logic(2, b"hello").await.unwrap();

    let sent = mock.sent();
    let data_write = acr122_tag_command(&sent[INIT_FRAMES + 4]).unwrap();
    assert_eq!(&data_write[..2], &[0xA0, 0x04]);
    assert_eq!(&data_write[2..7], b"hello");
    assert_eq!(&data_write[7..], &[0u8; 11]);

    let trailer_write = acr122_tag_command(sent.last().unwrap()).unwrap();
    assert_eq!(&trailer_write[..2], &[0xA0, 0x07]);
    assert_eq!(
        &trailer_write[2..],
        &hex::decode("ffffffffffffff078040ffffffffffff").unwrap()[..]
    );
}

#[tokio::test]
async fn write_logic_keeps_gpb_already_set() {
    let (mock, mut reader) = acr122().await;
    push_public_auth_ok(&mock);
    push_write_ok(&mock);
    push_tag_data(&mock, &hex::decode("000000000000ff078040ffffffffffff").unwrap());

    let mut tag = MifareClassic::new(TagSession::new(&mut reader, mifare_identity()));
    tag.write_logic(3, &[1, 2, 3]).await.unwrap();
    assert_eq!(mock.sent().len(), INIT_FRAMES + 4 + 2);
}

#[tokio::test]
async fn write_image_skips_manufacturer_block() {
    let (mock, mut reader) = acr122().await;
    let image = mifare::compose(&[0xD0, 0x00, 0x00]).unwrap();
    // sector 0: blocks 1..3, sector 1: blocks 4..7
    push_public_auth_ok(&mock);
    for _ in 1..4 {
        push_write_ok(&mock);
    }
    push_public_auth_ok(&mock);
    for _ in 4..8 {
        push_write_ok(&mock);
    }

    let mut tag = MifareClassic::new(TagSession::new(&mut reader, mifare_identity()));
    tag.write(&image).await.unwrap();

    let written: Vec<u8> = mock
        .sent()
        .iter()
        .filter_map(|f| acr122_tag_command(f).map(<[u8]>::to_vec))
        .filter(|cmd| cmd.first() == Some(&0xA0))
        .map(|cmd| cmd[1])
        .collect();
    assert_eq!(written, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn oversized_image_fails_before_writing() {
    assert!(matches!(
        mifare::compose(&vec![0u8; 1000]),
        Err(Error::TooLarge { .. })
    ));
}
