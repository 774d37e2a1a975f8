// src/driver/sync_driver/mock.rs

// Simulated sensor link shared by the driver tests.
//
// Bytes are staged with an arrival time and only become readable once the
// simulated clock has reached it. The clock advances on delays and by one
// byte time for every byte read, so deadline loops always terminate.

use crate::common::{
    additive_checksum,
    command::{Command, COMMAND_LEN},
    frame::{CHECKSUM_OFFSET, FRAME_LEN},
    hal_traits::{PmsSerial, PmsTimer},
};
use core::time::Duration;
use heapless::{Deque, Vec};
use nb::Result as NbResult;

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(pub u64);

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockCommError;

/// Microseconds consumed by each byte read (roughly 9600 baud).
pub const BYTE_TIME_US: u64 = 1_000;
/// Delay between a data request and the sensor's answer arriving.
pub const RESPONSE_LATENCY_US: u64 = 2_000;

pub struct MockInterface {
    pub current_time_us: u64,
    rx: Deque<(u64, u8), 1024>,
    pub write_log: Vec<u8, 256>,
    cmd_start: usize,
    /// Frame sent back whenever a request-data command is flushed.
    pub request_response: Option<[u8; FRAME_LEN]>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    /// Number of bytes `write_byte` accepts before reporting `WouldBlock` forever.
    pub write_capacity: usize,
}

impl MockInterface {
    pub fn new() -> Self {
        MockInterface {
            current_time_us: 0,
            rx: Deque::new(),
            write_log: Vec::new(),
            cmd_start: 0,
            request_response: None,
            fail_reads: false,
            fail_writes: false,
            write_capacity: usize::MAX,
        }
    }

    /// Queues bytes that are readable immediately.
    pub fn stage_read_data(&mut self, data: &[u8]) {
        let now_ms = self.current_time_us / 1_000;
        self.stage_at_ms(now_ms, data);
    }

    /// Queues bytes that become readable at `at_ms` on the simulated clock.
    pub fn stage_at_ms(&mut self, at_ms: u64, data: &[u8]) {
        self.stage_at_us(at_ms * 1_000, data);
    }

    fn stage_at_us(&mut self, at_us: u64, data: &[u8]) {
        for byte in data {
            assert!(self.rx.push_back((at_us, *byte)).is_ok(), "mock rx queue full");
        }
    }

    /// Bytes still queued, whether or not they have arrived yet.
    pub fn queued(&self) -> usize {
        self.rx.len()
    }

    /// Commands written so far, split into 7-byte frames.
    pub fn commands(&self) -> impl Iterator<Item = &[u8]> {
        self.write_log.chunks(COMMAND_LEN)
    }

    pub fn command_count(&self, command: Command) -> usize {
        self.commands()
            .filter(|c| *c == command.as_bytes().as_slice())
            .count()
    }

    fn arrived(&self) -> Option<u8> {
        match self.rx.front() {
            Some((at, byte)) if *at <= self.current_time_us => Some(*byte),
            _ => None,
        }
    }
}

impl PmsTimer for MockInterface {
    type Instant = MockInstant;
    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }
    fn delay_us(&mut self, us: u32) {
        self.current_time_us += us as u64;
    }
    fn delay_ms(&mut self, ms: u32) {
        self.current_time_us += (ms as u64) * 1_000;
    }
}

impl PmsSerial for MockInterface {
    type Error = MockCommError;

    fn peek_byte(&mut self) -> NbResult<u8, Self::Error> {
        if self.fail_reads {
            return Err(nb::Error::Other(MockCommError));
        }
        self.arrived().ok_or(nb::Error::WouldBlock)
    }

    fn read_byte(&mut self) -> NbResult<u8, Self::Error> {
        if self.fail_reads {
            return Err(nb::Error::Other(MockCommError));
        }
        match self.arrived() {
            Some(byte) => {
                self.rx.pop_front();
                self.current_time_us += BYTE_TIME_US;
                Ok(byte)
            }
            None => Err(nb::Error::WouldBlock),
        }
    }

    fn available(&mut self) -> usize {
        let now = self.current_time_us;
        self.rx.iter().take_while(|(at, _)| *at <= now).count()
    }

    fn write_byte(&mut self, byte: u8) -> NbResult<(), Self::Error> {
        if self.fail_writes {
            return Err(nb::Error::Other(MockCommError));
        }
        if self.write_log.len() >= self.write_capacity {
            return Err(nb::Error::WouldBlock);
        }
        self.write_log
            .push(byte)
            .map_err(|_| nb::Error::Other(MockCommError))
    }

    fn flush(&mut self) -> NbResult<(), Self::Error> {
        let written = &self.write_log[self.cmd_start..];
        if written == Command::RequestData.as_bytes().as_slice() {
            if let Some(frame) = self.request_response {
                let at = self.current_time_us + RESPONSE_LATENCY_US;
                self.stage_at_us(at, &frame);
            }
        }
        self.cmd_start = self.write_log.len();
        Ok(())
    }
}

/// Builds a well-formed frame carrying the given measurement words.
pub fn build_frame(standard: [u16; 3], environmental: [u16; 3], counts: [u16; 6]) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[0] = 0x42;
    frame[1] = 0x4D;
    frame[2..4].copy_from_slice(&28u16.to_be_bytes());

    let words = standard.iter().chain(environmental.iter()).chain(counts.iter());
    for (i, word) in words.enumerate() {
        let at = 4 + 2 * i;
        frame[at..at + 2].copy_from_slice(&word.to_be_bytes());
    }

    let sum = additive_checksum(&frame[..CHECKSUM_OFFSET]);
    frame[CHECKSUM_OFFSET..].copy_from_slice(&sum.to_be_bytes());
    frame
}

/// The frame used throughout the tests: PM 10/20/30 and counts 1..=6.
pub fn sample_frame() -> [u8; FRAME_LEN] {
    build_frame([10, 20, 30], [10, 20, 30], [1, 2, 3, 4, 5, 6])
}
