//! Timeout helpers used across the crate.
//!
//! Exchange timeouts are plain `Duration`s. The ACR122 firmware takes its
//! own timeout as a count of 5 second units, converted here.

use std::time::Duration;
use tokio::time::Instant;

/// Default timeout for reader commands and escapes.
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 1000;

/// Default timeout for InDataExchange round trips with a tag.
pub const DEFAULT_DATA_EXCHANGE_TIMEOUT_MS: u64 = 3000;

/// Default interval between passive-target polls while waiting for a tag.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

const ACR122_TIMEOUT_UNIT_SECS: u64 = 5;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convert a timeout to ACR122 5-second units, rounding up and capping at
/// 0xFF. Zero stays zero, which the firmware treats as "no timeout".
pub fn acr122_timeout_units(timeout: Duration) -> u8 {
    let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
    let units = secs.div_ceil(ACR122_TIMEOUT_UNIT_SECS);
    units.min(0xFF) as u8
}

/// Time left until `deadline`, or `None` once it has passed.
pub fn remaining(deadline: Instant) -> Option<Duration> {
    deadline
        .checked_duration_since(Instant::now())
        .filter(|d| !d.is_zero())
}
