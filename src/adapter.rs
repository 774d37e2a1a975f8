// src/adapter.rs

//! Glue between HAL peripherals and the driver's transport traits.
//!
//! [`NativeAdapter`] implements [`PmsSerial`] on top of any UART that
//! implements the `embedded-io` blocking traits plus `ReadReady`, and
//! [`PmsTimer`] on top of an `embedded-hal` [`DelayNs`] and a millisecond
//! clock supplied by the application (usually a wrapper around a
//! monotonic timer or RTC tick counter).

use core::ops::{Add, Sub};
use core::time::Duration;

use arrayvec::ArrayVec;
use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};

use crate::common::hal_traits::{PmsSerial, PmsTimer};

/// Receive bytes buffered inside the adapter, enough for two frames.
const RX_BUFFER_LEN: usize = 64;

/// Milliseconds since an arbitrary epoch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Millis(pub u64);

impl Add<Duration> for Millis {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        let ms = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        Millis(self.0.saturating_add(ms))
    }
}

impl Sub<Millis> for Millis {
    type Output = Duration;
    fn sub(self, rhs: Millis) -> Duration {
        Duration::from_millis(self.0.saturating_sub(rhs.0))
    }
}

/// Bundles a UART, a delay provider and a clock into one driver interface.
pub struct NativeAdapter<U, D, C>
where
    U: embedded_io::ErrorType,
{
    uart: U,
    delay: D,
    clock: C,
    rx: ArrayVec<u8, RX_BUFFER_LEN>,
    /// Error hit by `available`, returned by the next read.
    fault: Option<U::Error>,
}

impl<U, D, C> NativeAdapter<U, D, C>
where
    U: Read + ReadReady + Write,
    D: DelayNs,
    C: Fn() -> u64,
{
    /// `clock` must return a monotonic millisecond count.
    pub fn new(uart: U, delay: D, clock: C) -> Self {
        NativeAdapter {
            uart,
            delay,
            clock,
            rx: ArrayVec::new(),
            fault: None,
        }
    }

    /// Returns the wrapped peripherals.
    pub fn release(self) -> (U, D, C) {
        (self.uart, self.delay, self.clock)
    }

    /// Moves whatever the UART has ready into the local buffer.
    fn fill(&mut self) -> Result<(), U::Error> {
        while !self.rx.is_full() && self.uart.read_ready()? {
            let mut chunk = [0u8; RX_BUFFER_LEN];
            let room = self.rx.remaining_capacity();
            let n = self.uart.read(&mut chunk[..room])?;
            if n == 0 {
                break;
            }
            self.rx.extend(chunk[..n].iter().copied());
        }
        Ok(())
    }
}

impl<U, D, C> PmsSerial for NativeAdapter<U, D, C>
where
    U: Read + ReadReady + Write,
    D: DelayNs,
    C: Fn() -> u64,
{
    type Error = U::Error;

    fn peek_byte(&mut self) -> nb::Result<u8, Self::Error> {
        if let Some(e) = self.fault.take() {
            return Err(nb::Error::Other(e));
        }
        if self.rx.is_empty() {
            self.fill().map_err(nb::Error::Other)?;
        }
        self.rx.first().copied().ok_or(nb::Error::WouldBlock)
    }

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        let byte = self.peek_byte()?;
        self.rx.remove(0);
        Ok(byte)
    }

    fn available(&mut self) -> usize {
        if let Err(e) = self.fill() {
            self.fault = Some(e);
            return 0;
        }
        self.rx.len()
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        match self.uart.write(&[byte]) {
            Ok(0) => Err(nb::Error::WouldBlock),
            Ok(_) => Ok(()),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.uart.flush().map_err(nb::Error::Other)
    }
}

impl<U, D, C> PmsTimer for NativeAdapter<U, D, C>
where
    U: embedded_io::ErrorType,
    D: DelayNs,
    C: Fn() -> u64,
{
    type Instant = Millis;

    fn now(&self) -> Millis {
        Millis((self.clock)())
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_io::ErrorKind;
    use heapless::{Deque, Vec};

    struct FakeUart {
        rx: Deque<u8, 128>,
        tx: Vec<u8, 32>,
        flushed: bool,
    }

    impl embedded_io::ErrorType for FakeUart {
        type Error = Infallible;
    }

    impl Read for FakeUart {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
            let mut n = 0;
            while n < buf.len() {
                match self.rx.pop_front() {
                    Some(b) => {
                        buf[n] = b;
                        n += 1;
                    }
                    None => break,
                }
            }
            Ok(n)
        }
    }

    impl ReadReady for FakeUart {
        fn read_ready(&mut self) -> Result<bool, Infallible> {
            Ok(!self.rx.is_empty())
        }
    }

    impl Write for FakeUart {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            let mut n = 0;
            for b in buf {
                if self.tx.push(*b).is_err() {
                    break;
                }
                n += 1;
            }
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            self.flushed = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeDelay {
        total_ns: u64,
    }

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    struct BrokenUart;

    impl embedded_io::ErrorType for BrokenUart {
        type Error = ErrorKind;
    }

    impl Read for BrokenUart {
        fn read(&mut self, _buf: &mut [u8]) -> Result<usize, ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    impl ReadReady for BrokenUart {
        fn read_ready(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::BrokenPipe)
        }
    }

    impl Write for BrokenUart {
        fn write(&mut self, _buf: &[u8]) -> Result<usize, ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn flush(&mut self) -> Result<(), ErrorKind> {
            Ok(())
        }
    }

    fn uart_with(data: &[u8]) -> FakeUart {
        let mut rx = Deque::new();
        for b in data {
            rx.push_back(*b).unwrap();
        }
        FakeUart { rx, tx: Vec::new(), flushed: false }
    }

    #[test]
    fn test_peek_then_read() {
        let mut adapter = NativeAdapter::new(uart_with(&[0x42, 0x4D]), FakeDelay::default(), || 0);
        assert_eq!(adapter.available(), 2);
        assert_eq!(adapter.peek_byte(), Ok(0x42));
        assert_eq!(adapter.read_byte(), Ok(0x42));
        assert_eq!(adapter.read_byte(), Ok(0x4D));
        assert_eq!(adapter.read_byte(), Err(nb::Error::WouldBlock));
        assert_eq!(adapter.available(), 0);
    }

    #[test]
    fn test_available_is_bounded_by_buffer() {
        let data = [0xAAu8; 100];
        let mut adapter = NativeAdapter::new(uart_with(&data), FakeDelay::default(), || 0);
        assert_eq!(adapter.available(), RX_BUFFER_LEN);
        for _ in 0..100 {
            assert_eq!(adapter.read_byte(), Ok(0xAA));
        }
        assert_eq!(adapter.available(), 0);
    }

    #[test]
    fn test_available_error_surfaces_on_next_read() {
        let mut adapter = NativeAdapter::new(BrokenUart, FakeDelay::default(), || 0);
        assert_eq!(adapter.available(), 0);
        assert_eq!(adapter.peek_byte(), Err(nb::Error::Other(ErrorKind::BrokenPipe)));
    }

    #[test]
    fn test_write_and_flush() {
        let mut adapter = NativeAdapter::new(uart_with(&[]), FakeDelay::default(), || 0);
        adapter.write_byte(0x42).unwrap();
        adapter.flush().unwrap();
        let (uart, _, _) = adapter.release();
        assert_eq!(uart.tx.as_slice(), &[0x42]);
        assert!(uart.flushed);
    }

    #[test]
    fn test_timer_forwards_to_hal() {
        let mut adapter = NativeAdapter::new(uart_with(&[]), FakeDelay::default(), || 1_234);
        assert_eq!(adapter.now(), Millis(1_234));
        adapter.delay_us(5);
        adapter.delay_ms(2);
        let (_, delay, _) = adapter.release();
        assert_eq!(delay.total_ns, 5_000 + 2_000_000);
    }

    #[test]
    fn test_millis_arithmetic() {
        assert_eq!(Millis(10) + Duration::from_millis(5), Millis(15));
        assert_eq!(Millis(10) - Millis(4), Duration::from_millis(6));
        assert_eq!(Millis(4) - Millis(10), Duration::ZERO);
    }
}
