// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod checksum;
pub mod command;
pub mod config;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod reading;
pub mod state;
pub mod status;
pub mod timing;

// --- Re-export key types/traits/functions for easier access ---

// From checksum.rs
pub use checksum::{additive_checksum, verify_frame_checksum};

// From command.rs
pub use command::Command;

// From config.rs
pub use config::Config;

// From error.rs
pub use error::PmsError;

// From frame.rs
pub use frame::{FRAME_LEN, START_BYTE_1, START_BYTE_2};

// From hal_traits.rs
pub use hal_traits::{PmsInstant, PmsSerial, PmsTimer};

// From reading.rs
pub use reading::Reading;

// From state.rs
pub use state::{PowerState, StreamingMode};

// From status.rs
pub use status::StatusMask;

// From timing.rs (constants - users can access via common::timing::*)
// No re-exports by default.
