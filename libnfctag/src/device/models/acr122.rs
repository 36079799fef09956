// libnfctag/src/device/models/acr122.rs

use std::time::Duration;

use super::{ReaderModel, Step};
use crate::protocol::commands::acr122::{KEY_LOCATION_A, KEY_LOCATION_B};
use crate::protocol::{Command, Escape, Frame};
use crate::types::{Chipset, KeyType, MifareKey, Uid};
use crate::utils::acr122_timeout_units;

/// ACR122U: a PN532 behind a CCID interface. PN53x commands are tunnelled
/// through escapes and the firmware handles Mifare keys itself.
pub struct Acr122Model;

impl Acr122Model {
    pub fn new() -> Self {
        Self
    }

    fn set_timeout(timeout: Duration) -> Step {
        let units = acr122_timeout_units(timeout);
        log::debug!("acr122 timeout rounded up to {} secs", u32::from(units) * 5);
        Step::Escape(Escape::SetTimeout { units })
    }
}

impl Default for Acr122Model {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderModel for Acr122Model {
    fn chipset(&self) -> Chipset {
        Chipset::Acr122
    }

    fn name(&self) -> &'static str {
        "ACR122U"
    }

    fn init_sequence(&self) -> Vec<Step> {
        vec![
            // abort anything left over, then power the PICC interface up
            Step::Raw {
                frame: Frame::ack(),
                best_effort: true,
            },
            Step::Raw {
                frame: Frame::icc_power_on(),
                best_effort: true,
            },
            Step::Escape(Escape::Buzzer { enabled: false }),
        ]
    }

    fn before_passive_target(&self, timeout: Duration) -> Vec<Step> {
        vec![Self::set_timeout(timeout)]
    }

    fn before_emulation(&self, timeout: Duration) -> Vec<Step> {
        vec![
            Step::Escape(Escape::PiccParameters { value: 0x00 }),
            Step::Command(Command::rf_off()),
            Self::set_timeout(timeout),
        ]
    }

    fn authentication_steps(
        &self,
        block: u8,
        key_type: KeyType,
        key: &MifareKey,
        _uid: &Uid,
    ) -> Vec<Step> {
        let location = match key_type {
            KeyType::A => KEY_LOCATION_A,
            KeyType::B => KEY_LOCATION_B,
        };
        vec![
            Step::Escape(Escape::LoadKey {
                location,
                key: *key,
            }),
            Step::Escape(Escape::Authenticate {
                block,
                key_type,
                location,
            }),
        ]
    }
}
