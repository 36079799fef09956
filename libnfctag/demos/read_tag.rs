// Read the NDEF message of the next tag presented to an SCL3711 or ACR122U.
//
// Run with `cargo run --example read_tag --features usb`. Set RUST_LOG=debug
// to see the frames exchanged with the reader.

use std::time::Duration;

use anyhow::Context;
use libnfctag::device::{DeviceRegistry, ReaderBuilder};
use libnfctag::ndef::{Message, Record};
use libnfctag::transport::usb::{self, UsbTransport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let found = usb::scan()?;
    let mut registry = DeviceRegistry::new();
    let ids: Vec<_> = found
        .iter()
        .map(|info| {
            registry.register(
                info.chipset,
                format!("bus {} address {}", info.bus, info.address),
            )
        })
        .collect();
    for info in registry.enumerate() {
        println!("{} {} ({})", info.id, info.chipset, info.label);
    }

    let (first, id) = found
        .into_iter()
        .zip(ids)
        .next()
        .context("no supported reader attached")?;
    let claim = registry.claim(id)?;
    let transport = UsbTransport::open_at(first)?;
    let mut reader = ReaderBuilder::new()
        .with_transport(Box::new(transport))
        .with_claim(claim)
        .build()
        .await?;

    println!("Touch a tag to the {} ...", reader.model_name());
    let message = {
        let mut tag = reader.open_tag(Duration::from_secs(10)).await?;
        let identity = tag.session().identity().clone();
        println!("{} tag, UID {}", identity.tag_type, identity.uid.to_hex());
        Message::parse(&tag.read().await?)?
    };
    for (i, record) in message.iter().enumerate() {
        match record {
            Record::Text { language, text, .. } => println!("  [{}] text ({}): {}", i, language, text),
            Record::Uri(uri) => println!("  [{}] uri: {}", i, uri),
            Record::Mime { mime_type, payload } => {
                println!("  [{}] {} ({} bytes)", i, mime_type, payload.len())
            }
            Record::AndroidApp { package } => println!("  [{}] android app: {}", i, package),
            other => println!("  [{}] {:?}", i, other),
        }
    }

    reader.close().await?;
    registry.release(id)?;
    Ok(())
}
