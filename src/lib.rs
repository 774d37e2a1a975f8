// src/lib.rs

#![no_std] // Specify no_std at the crate root

#[macro_use]
mod fmt;

pub mod common;
pub mod driver;

#[cfg(feature = "impl-native")]
pub mod adapter;

// Re-export key types for convenience
pub use common::{Command, Config, PmsError, PowerState, Reading, StatusMask, StreamingMode};
pub use driver::Pms5003;

#[cfg(feature = "impl-native")]
pub use adapter::NativeAdapter;
