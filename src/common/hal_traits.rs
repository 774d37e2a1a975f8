// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A point on the monotonic clock provided by [`PmsTimer`].
///
/// Only differences between instants are used, so any epoch works.
pub trait PmsInstant: Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration> {}

impl<T> PmsInstant for T where T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration> {}

/// Abstraction for the clock and delay operations the driver needs.
pub trait PmsTimer {
    /// Monotonic timestamp type.
    type Instant: PmsInstant;

    /// Current time.
    fn now(&self) -> Self::Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Abstraction for synchronous (non-blocking) access to the sensor's UART.
pub trait PmsSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Returns the next received byte without consuming it.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if nothing has been received.
    fn peek_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Number of bytes that can be read right now without blocking.
    ///
    /// This cannot fail. An implementation that hits a transport error while
    /// counting reports `0` and returns the error from the next
    /// [`peek_byte`](Self::peek_byte) or [`read_byte`](Self::read_byte).
    fn available(&mut self) -> usize;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Ok(())` if the byte was accepted for transmission, or `Err(nb::Error::WouldBlock)`
    /// if the write buffer is full. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes have been sent.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}
