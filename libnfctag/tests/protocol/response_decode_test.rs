use libnfctag::protocol::{Reply, classify};
use libnfctag::types::TagType;
use libnfctag::Error;

#[test]
fn passive_target_list_mifare() {
    let body = hex::decode("d54b010100040804deadbeef").unwrap();
    match classify(&body).unwrap() {
        Reply::PassiveTargetList(list) => {
            assert_eq!(list.tag_count, 1);
            let target = list.target.unwrap();
            assert_eq!(target.tag_type, TagType::MifareClassic);
            assert_eq!(target.sens_res, 0x0004);
            assert_eq!(target.sel_res, 0x08);
            assert_eq!(target.uid.to_hex(), "deadbeef");
        }
        other => panic!("unexpected reply: {:?}", other),
    }
}

#[test]
fn two_targets_is_not_an_error() {
    let body = hex::decode("d54b02010044000704a1b2c3d4e5f6").unwrap();
    match classify(&body).unwrap() {
        Reply::PassiveTargetList(list) => {
            assert_eq!(list.tag_count, 2);
            assert!(list.target.is_none());
        }
        other => panic!("unexpected reply: {:?}", other),
    }
}

#[test]
fn status_error_carries_message() {
    match classify(&[0xD5, 0x41, 0x14]) {
        Err(Error::ReaderStatus {
            command,
            status,
            message,
        }) => {
            assert_eq!(command, 0x40);
            assert_eq!(status, 0x14);
            assert_eq!(message, "mifare authentication error");
        }
        other => panic!("expected ReaderStatus, got: {:?}", other),
    }
}

#[test]
fn rf_configuration_reply() {
    assert_eq!(
        classify(&[0xD5, 0x33]).unwrap(),
        Reply::RfConfiguration { data: vec![] }
    );
}

#[test]
fn garbage_is_unrecognized_not_dropped() {
    let reply = classify(&[0x12, 0x34, 0x56]).unwrap();
    assert_eq!(reply, Reply::Unrecognized(vec![0x12, 0x34, 0x56]));
}
