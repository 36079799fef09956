// libnfctag/src/device/mod.rs

//! Reader handles: model quirks, the exchange engine, emulation and the
//! registry of attached readers.

pub mod builder;
pub mod config;
pub mod emulation;
pub mod handle;
pub mod models;
pub mod registry;

pub use builder::ReaderBuilder;
pub use config::ReaderConfig;
pub use handle::{Initialized, Reader, Uninitialized};
pub use models::{ReaderModel, Step, create_model_for};
pub use registry::{Claim, DeviceInfo, DeviceRegistry, Presence};
