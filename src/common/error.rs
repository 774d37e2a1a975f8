// src/common/error.rs

/// Failures of the transport underneath the driver.
///
/// Sensor-level problems (bad frames, asleep, timeouts) are not errors; they
/// are reported through [`StatusMask`](super::StatusMask) and attempt counts.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PmsError<E = ()>
where
    E: core::fmt::Debug, // Needed for the generic Io error message
{
    /// Underlying I/O error from the HAL implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// A command byte or the flush after it did not complete in time.
    #[error("Timed out writing command to sensor")]
    WriteTimeout,
}

// Allow mapping from underlying HAL error if From is implemented
impl<E: core::fmt::Debug> From<E> for PmsError<E> {
    fn from(e: E) -> Self {
        PmsError::Io(e)
    }
}

#[cfg(feature = "defmt")]
impl<E: core::fmt::Debug> defmt::Format for PmsError<E> {
    fn format(&self, fmt: defmt::Formatter<'_>) {
        match self {
            PmsError::Io(_) => defmt::write!(fmt, "PmsError::Io"),
            PmsError::WriteTimeout => defmt::write!(fmt, "PmsError::WriteTimeout"),
        }
    }
}
