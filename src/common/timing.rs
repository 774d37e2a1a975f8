// src/common/timing.rs

use core::time::Duration;

// Defaults below follow the sensor datasheet and long-running field use.
// All of them can be changed through `Config`.

// === Frame Acquisition ===

/// How long to scan the input for the `0x42` start byte.
pub const DEFAULT_SEEK_TIMEOUT: Duration = Duration::from_millis(2000);
/// How long a single frame byte may take to arrive before the read is cut short.
pub const DEFAULT_FRAME_READ_TIMEOUT: Duration = Duration::from_millis(1000);

// === Read Orchestration ===

/// Budget for repeated decode attempts in a blocking read.
pub const DEFAULT_BLOCKING_TIMEOUT: Duration = Duration::from_millis(10_000);
/// Fan spin-up time after waking before readings settle (datasheet: >= 30 s).
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_millis(30_000);
/// Default window for averaged reads.
pub const DEFAULT_AVERAGING_WINDOW: Duration = Duration::from_millis(10_000);

// === Polling ===

/// Pause between polls of an idle transport, so waiting does not spin the core.
pub const POLL_INTERVAL: Duration = Duration::from_micros(100);
/// Budget for the transmitter to accept each command byte.
pub const COMMAND_WRITE_TIMEOUT: Duration = Duration::from_millis(50);
/// Budget for the transmit flush after a command.
pub const COMMAND_FLUSH_TIMEOUT: Duration = Duration::from_millis(20);
