use std::time::Duration;

use libnfctag::Error;
use libnfctag::device::{DeviceRegistry, ReaderBuilder};
use libnfctag::test_support::passive_target_body;
use libnfctag::transport::MockTransport;
use libnfctag::types::{Chipset, TagType};

#[tokio::test]
async fn claimed_reader_fails_after_removal() {
    let mut registry = DeviceRegistry::new();
    let id = registry.register(Chipset::Pn533, "SCL3711 test");
    let claim = registry.claim(id).unwrap();
    assert!(registry.enumerate()[0].claimed);

    let mock = MockTransport::new(Chipset::Pn533);
    let mut reader = ReaderBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .with_claim(claim)
        .build()
        .await
        .unwrap();

    mock.push_reply(&passive_target_body(0x0044, &[0x04, 1, 2, 3, 4, 5, 6]));
    let identity = reader.select_tag(Duration::from_secs(1)).await.unwrap();
    assert_eq!(identity.tag_type, TagType::Type2);

    assert!(registry.device_removed(id));
    assert!(matches!(
        reader.read_ndef(Duration::from_secs(1)).await,
        Err(Error::DeviceRemoved)
    ));
    // nothing reaches the transport once the device is gone
    assert_eq!(mock.sent().len(), 1);
    assert!(matches!(registry.claim(id), Err(Error::DeviceNotFound)));
}

#[test]
fn second_claim_is_refused_until_release() {
    let mut registry = DeviceRegistry::new();
    let pn533 = registry.register(Chipset::Pn533, "SCL3711");
    let acr122 = registry.register(Chipset::Acr122, "ACR122U");

    let _claim = registry.claim(acr122).unwrap();
    assert!(matches!(registry.claim(acr122), Err(Error::DeviceBusy(d)) if d == acr122));
    assert!(registry.claim(pn533).is_ok());

    registry.release(acr122).unwrap();
    let infos = registry.enumerate();
    assert!(!infos.iter().find(|i| i.id == acr122).unwrap().claimed);
}
