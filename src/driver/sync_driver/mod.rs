// src/driver/sync_driver/mod.rs

use crate::common::{
    config::Config,
    hal_traits::{PmsSerial, PmsTimer},
    state::{PowerState, StreamingMode},
};
use core::time::Duration;

mod decoder;
mod io_helpers;
mod orchestrator;
mod power;

#[cfg(test)]
pub(crate) mod mock;

/// Driver for one PMS5003 sensor on one serial channel.
///
/// All operations are synchronous and take `&mut self`; the driver owns the
/// interface and the power/mode state for its whole lifetime.
#[derive(Debug)]
pub struct Pms5003<IF>
where
    IF: PmsSerial + PmsTimer,
{
    interface: IF,
    config: Config,
    power_state: PowerState,
    mode: StreamingMode,
}

impl<IF> Pms5003<IF>
where
    IF: PmsSerial + PmsTimer,
{
    /// Wraps an interface, assuming the sensor's power-on state:
    /// awake and streaming continuously.
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, Config::default())
    }

    pub fn with_config(interface: IF, config: Config) -> Self {
        Pms5003 {
            interface,
            config,
            power_state: PowerState::Awake,
            mode: StreamingMode::Continuous,
        }
    }

    // --- Configuration ---

    /// Drain the receive buffer before every frame search.
    pub fn set_drain_buffer(&mut self, drain: bool) {
        self.config.drain_buffer = drain;
    }

    /// How long to search for the start byte.
    pub fn set_seek_timeout(&mut self, timeout: Duration) {
        self.config.seek_timeout = timeout;
    }

    /// Default budget used by [`blocking_read_default`](Self::blocking_read_default)
    /// and friends.
    pub fn set_blocking_timeout(&mut self, timeout: Duration) {
        self.config.blocking_timeout = timeout;
    }

    /// How long to wait for the fan after waking the sensor.
    pub fn set_startup_delay(&mut self, delay: Duration) {
        self.config.startup_delay = delay;
    }

    pub fn set_frame_read_timeout(&mut self, timeout: Duration) {
        self.config.frame_read_timeout = timeout;
    }

    // --- State Accessors ---

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn power_state(&self) -> PowerState {
        self.power_state
    }

    pub fn streaming_mode(&self) -> StreamingMode {
        self.mode
    }

    /// Gives the interface back.
    pub fn release(self) -> IF {
        self.interface
    }
}
