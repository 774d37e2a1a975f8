// src/common/config.rs

use core::time::Duration;

use super::timing;

/// Driver settings, normally set once right after construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// Discard whatever is buffered before searching for a frame.
    ///
    /// Recommended when reads are infrequent: a receive buffer that
    /// overflowed while nobody was reading tends to hold torn frames.
    pub drain_buffer: bool,
    /// How long to scan for the start byte.
    pub seek_timeout: Duration,
    /// Default budget for [`blocking_read`](crate::Pms5003::blocking_read).
    pub blocking_timeout: Duration,
    /// How long to wait for the fan after waking the sensor.
    pub startup_delay: Duration,
    /// Per-byte timeout while collecting the 32 frame bytes.
    pub frame_read_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            drain_buffer: true,
            seek_timeout: timing::DEFAULT_SEEK_TIMEOUT,
            blocking_timeout: timing::DEFAULT_BLOCKING_TIMEOUT,
            startup_delay: timing::DEFAULT_STARTUP_DELAY,
            frame_read_timeout: timing::DEFAULT_FRAME_READ_TIMEOUT,
        }
    }
}

impl Config {
    pub fn with_drain_buffer(mut self, drain: bool) -> Self {
        self.drain_buffer = drain;
        self
    }

    pub fn with_seek_timeout(mut self, timeout: Duration) -> Self {
        self.seek_timeout = timeout;
        self
    }

    pub fn with_blocking_timeout(mut self, timeout: Duration) -> Self {
        self.blocking_timeout = timeout;
        self
    }

    pub fn with_startup_delay(mut self, delay: Duration) -> Self {
        self.startup_delay = delay;
        self
    }

    pub fn with_frame_read_timeout(mut self, timeout: Duration) -> Self {
        self.frame_read_timeout = timeout;
        self
    }
}
