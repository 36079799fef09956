// Shared helpers for integration tests.
#![allow(dead_code)]

pub mod fixtures;

/// Capture crate logs in test output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
