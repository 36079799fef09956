// libnfctag/src/device/config.rs

use std::time::Duration;

use crate::utils::timeout::{
    DEFAULT_COMMAND_TIMEOUT_MS, DEFAULT_DATA_EXCHANGE_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS, ms,
};

/// Timeouts and polling behaviour of a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderConfig {
    /// Reader-level commands and escapes (init, key loading, release).
    pub command_timeout: Duration,
    /// InDataExchange round trips with a tag.
    pub data_exchange_timeout: Duration,
    /// Pause between passive-target polls in `wait_for_tag`.
    pub poll_interval: Duration,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            command_timeout: ms(DEFAULT_COMMAND_TIMEOUT_MS),
            data_exchange_timeout: ms(DEFAULT_DATA_EXCHANGE_TIMEOUT_MS),
            poll_interval: ms(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl ReaderConfig {
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn with_data_exchange_timeout(mut self, timeout: Duration) -> Self {
        self.data_exchange_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
