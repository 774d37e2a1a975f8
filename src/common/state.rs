// src/common/state.rs

/// Power state of the sensor as last commanded by the driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Fan and laser are off; no frames will arrive.
    Asleep,
    /// Running. In on-demand mode nothing is sent until a request.
    Awake,
    /// A passive-mode data request has been issued.
    Requesting,
}

/// Whether the sensor pushes frames on its own or waits to be asked.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamingMode {
    /// "Active" mode: a frame roughly every second.
    Continuous,
    /// "Passive" mode: one frame per request.
    OnDemand,
}
