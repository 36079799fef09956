use libnfctag::Error;
use libnfctag::ndef::raw::{RawRecord, TypeNameFormat, encode_records, parse_records};
use libnfctag::ndef::rtd::{self, TextEncoding};
use libnfctag::ndef::{Message, Record};
use proptest::prelude::*;

#[test]
fn smart_poster_style_message() {
    let message = Message::new(vec![
        Record::uri("https://example.org/tag"),
        Record::text("en", "Example tag"),
        Record::mime("application/json", br#"{"id":7}"#.to_vec()),
        Record::android_app("org.example.reader"),
    ]);
    let bytes = message.to_bytes();

    // first header has MB, last has ME
    assert_eq!(bytes[0] & 0x80, 0x80);
    let parsed = Message::parse(&bytes).unwrap();
    assert_eq!(parsed.len(), 4);
    assert_eq!(parsed, message);
}

#[test]
fn uri_prefix_is_compressed() {
    let payload = rtd::encode_uri("http://www.example.com");
    assert_eq!(payload[0], 0x01);
    assert_eq!(&payload[1..], b"example.com");
    assert_eq!(rtd::decode_uri(&payload).unwrap(), "http://www.example.com");

    let bytes = Message::new(vec![Record::uri("http://www.example.com")]).to_bytes();
    assert_eq!(
        hex::encode(&bytes),
        format!("d1010c5501{}", hex::encode("example.com"))
    );
}

#[test]
fn unknown_uri_prefix_fails_parse() {
    let bytes = encode_records(&[RawRecord::new(
        TypeNameFormat::WellKnown,
        rtd::RTD_URI,
        vec![0x40, b'x'],
    )]);
    assert!(matches!(
        Message::parse(&bytes),
        Err(Error::UnknownUriPrefix(0x40))
    ));
}

#[test]
fn utf16_text_decodes_with_and_without_bom() {
    let plain = rtd::encode_text(TextEncoding::Utf16, "ja", "こんにちは");
    assert_eq!(plain[0], 0x80 | 2);
    let (encoding, language, text) = rtd::decode_text(&plain).unwrap();
    assert_eq!(encoding, TextEncoding::Utf16);
    assert_eq!(language, "ja");
    assert_eq!(text, "こんにちは");

    // little-endian with BOM
    let mut with_bom = vec![0x80 | 2, b'e', b'n', 0xFF, 0xFE];
    for unit in "hi".encode_utf16() {
        with_bom.extend_from_slice(&unit.to_le_bytes());
    }
    let (_, _, text) = rtd::decode_text(&with_bom).unwrap();
    assert_eq!(text, "hi");
}

#[test]
fn long_payload_clears_short_record_flag() {
    let payload = vec![0x5A; 300];
    let bytes = Message::new(vec![Record::mime("application/octet-stream", payload.clone())])
        .to_bytes();
    assert_eq!(bytes[0] & 0x10, 0);
    match &Message::parse(&bytes).unwrap()[0] {
        Record::Mime { payload: p, .. } => assert_eq!(p, &payload),
        other => panic!("unexpected record: {:?}", other),
    }
}

#[test]
fn truncated_record_reports_overflow() {
    let mut bytes = Message::new(vec![Record::text("en", "truncate me")]).to_bytes();
    bytes.truncate(bytes.len() - 3);
    match parse_records(&bytes) {
        Err(Error::RecordOverflow {
            declared, available, ..
        }) => assert_eq!(declared - available, 3),
        other => panic!("expected RecordOverflow, got: {:?}", other),
    }
}

#[test]
fn records_with_oversized_type_are_dropped_on_compose() {
    let message = Message::new(vec![
        Record::mime("a".repeat(300), vec![1, 2, 3]),
        Record::text("en", "kept"),
    ]);
    let parsed = Message::parse(&message.to_bytes()).unwrap();
    assert_eq!(parsed.records(), &[Record::text("en", "kept")]);
}

#[test]
fn records_with_oversized_id_are_dropped() {
    let mut raw = RawRecord::new(TypeNameFormat::Mime, b"text/plain".to_vec(), b"x".to_vec());
    raw.id = vec![b'i'; 256];
    assert!(encode_records(&[raw]).is_empty());
}

#[test]
fn empty_and_unknown_records_are_kept_raw() {
    let raw = RawRecord::new(TypeNameFormat::Unknown, Vec::new(), vec![1, 2, 3]);
    let bytes = encode_records(&[raw.clone()]);
    let parsed = Message::parse(&bytes).unwrap();
    assert_eq!(parsed.records(), &[Record::Unsupported(raw)]);
    // nothing left to write
    assert!(parsed.to_bytes().is_empty());
}

proptest! {
    #[test]
    fn text_records_survive_roundtrip(lang in "[a-z]{2}(-[A-Z]{2})?", text in "\\PC{0,80}") {
        let message = Message::new(vec![Record::text(lang, text)]);
        prop_assert_eq!(Message::parse(&message.to_bytes()).unwrap(), message);
    }

    #[test]
    fn uri_records_survive_roundtrip(uri in "(https?://(www\\.)?|mailto:|tel:)?[a-z0-9./]{0,40}") {
        let message = Message::new(vec![Record::uri(uri)]);
        prop_assert_eq!(Message::parse(&message.to_bytes()).unwrap(), message);
    }
}
