use libnfctag::protocol::commands::acr122::{KEY_LOCATION_A, KEY_LOCATION_B};
use libnfctag::protocol::{Command, Escape};
use libnfctag::types::{Chipset, KeyType, MifareKey};

#[test]
fn rf_off_through_acr122() {
    let frame = Command::rf_off().to_frame(Chipset::Acr122).unwrap();
    assert_eq!(
        frame,
        hex::decode("6b090000000000000000ff00000004d4320100").unwrap()
    );
}

#[test]
fn data_exchange_read() {
    let frame = Command::exchange(vec![0x30, 0x04])
        .to_frame(Chipset::Pn533)
        .unwrap();
    // D4 40 01 30 04 -> DCS = 0x100 - 0x49
    assert_eq!(frame, hex::decode("0000ffffff0005fbd440013004b700").unwrap());
}

#[test]
fn load_key_escape() {
    let frame = Escape::LoadKey {
        location: KEY_LOCATION_A,
        key: MifareKey::NFC_FORUM,
    }
    .encode();
    assert_eq!(frame[0], 0x6B);
    assert_eq!(frame[1], 11);
    assert_eq!(&frame[10..], &hex::decode("ff82000006d3f7d3f7d3f7").unwrap()[..]);
}

#[test]
fn authenticate_escape() {
    let frame = Escape::Authenticate {
        block: 7,
        key_type: KeyType::B,
        location: KEY_LOCATION_B,
    }
    .encode();
    assert_eq!(&frame[10..], &hex::decode("ff860000050100076101").unwrap()[..]);
}

#[test]
fn set_timeout_escape() {
    let frame = Escape::SetTimeout { units: 0x01 }.encode();
    assert_eq!(&frame[10..], &[0xFF, 0x00, 0x41, 0x01, 0x00]);
}

#[test]
fn target_init_layout() {
    let body = Command::emulate_type_a().encode();
    assert_eq!(&body[..3], &[0xD4, 0x8C, 0x01]);
    assert_eq!(&body[3..9], &[0x04, 0x00, 0x00, 0xB0, 0x0B, 0x00]);
}
