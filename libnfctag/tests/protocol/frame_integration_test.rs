use libnfctag::error::FrameError;
use libnfctag::protocol::{Decoded, Frame};
use libnfctag::types::Chipset;
use libnfctag::Error;
use proptest::prelude::*;

#[test]
fn native_list_passive_target_vector() {
    let frame = Frame::encode(Chipset::Pn533, 0x4A, &[0x01, 0x00]).unwrap();
    assert_eq!(frame, hex::decode("0000ffffff0004fcd44a0100e100").unwrap());
}

#[test]
fn acr122_list_passive_target_vector() {
    let frame = Frame::encode(Chipset::Acr122, 0x4A, &[0x01, 0x00]).unwrap();
    assert_eq!(
        frame,
        hex::decode("6b090000000000000000ff00000004d44a0100").unwrap()
    );
}

#[test]
fn native_short_reply_decodes() {
    // normal frame: D5 4B 00 (no target)
    let raw = hex::decode("0000ff03fdd54b00e000").unwrap();
    assert_eq!(
        Frame::decode(Chipset::Pn533, &raw).unwrap(),
        Decoded::Payload(vec![0xD5, 0x4B, 0x00])
    );
}

#[test]
fn ack_frame_is_recognized() {
    assert_eq!(
        Frame::decode(Chipset::Pn533, &Frame::ack()).unwrap(),
        Decoded::Ack
    );
}

#[test]
fn acr122_data_block_is_spliced() {
    // 0x80 data block carrying D5 41 00 AA + 90 00
    let raw = hex::decode("80060000000000000000d54100aa9000").unwrap();
    assert_eq!(
        Frame::decode(Chipset::Acr122, &raw).unwrap(),
        Decoded::Payload(vec![0xD5, 0x41, 0x00, 0xAA])
    );
}

#[test]
fn empty_input() {
    assert!(matches!(
        Frame::decode(Chipset::Pn533, &[]),
        Err(Error::Frame(FrameError::Empty))
    ));
}

proptest! {
    #[test]
    fn roundtrip_native(cmd in any::<u8>(), data in prop::collection::vec(any::<u8>(), 0..300)) {
        let frame = Frame::encode_native(cmd, &data).unwrap();
        let mut body = vec![0xD4, cmd];
        body.extend_from_slice(&data);
        prop_assert_eq!(Frame::decode_native(&frame).unwrap(), Decoded::Payload(body));
    }

    #[test]
    fn roundtrip_acr122(cmd in any::<u8>(), data in prop::collection::vec(any::<u8>(), 0..200)) {
        let frame = Frame::encode_acr122(cmd, &data).unwrap();
        let mut body = vec![0xD4, cmd];
        body.extend_from_slice(&data);
        prop_assert_eq!(Frame::decode_acr122(&frame).unwrap(), Decoded::Payload(body));
    }

    #[test]
    fn flipped_data_checksum_is_rejected(
        data in prop::collection::vec(any::<u8>(), 0..64),
        bit in 0u8..8,
    ) {
        let mut frame = Frame::encode_native(0x40, &data).unwrap();
        let at = frame.len() - 2;
        frame[at] ^= 1 << bit;
        let result = Frame::decode_native(&frame);
        prop_assert!(result.as_ref().is_err_and(|e| e.is_checksum_error()), "{:?}", result);
    }
}
