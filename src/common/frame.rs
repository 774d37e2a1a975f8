// src/common/frame.rs

//! Layout of the 32-byte frame streamed by the sensor.
//!
//! | Offset | Size | Field                                   |
//! |--------|------|-----------------------------------------|
//! | 0      | 1    | start byte 1 (`0x42`)                   |
//! | 1      | 1    | start byte 2 (`0x4D`)                   |
//! | 2      | 2    | frame length                            |
//! | 4      | 6    | standard PM1.0 / PM2.5 / PM10           |
//! | 10     | 6    | environmental PM1.0 / PM2.5 / PM10      |
//! | 16     | 12   | particle counts > 0.3 .. > 10 µm        |
//! | 28     | 2    | reserved                                |
//! | 30     | 2    | checksum of bytes 0..30                 |
//!
//! All multi-byte fields are big-endian.

use arrayvec::ArrayVec;

use super::checksum::verify_frame_checksum;
use super::reading::Reading;
use super::status::StatusMask;

/// First byte of every frame (and of every command).
pub const START_BYTE_1: u8 = 0x42;
/// Second byte of every frame (`'M'`).
pub const START_BYTE_2: u8 = 0x4D;
/// Total size of a sensor data frame in bytes.
pub const FRAME_LEN: usize = 32;
/// Offset of the trailing big-endian checksum.
pub const CHECKSUM_OFFSET: usize = 30;

const STANDARD_OFFSET: usize = 4;
const ENVIRONMENTAL_OFFSET: usize = 10;
const COUNTS_OFFSET: usize = 16;

/// Bytes collected during one decode attempt.
///
/// The length of the underlying buffer is the number of bytes actually
/// received, which may be short of [`FRAME_LEN`] if the stream stalled.
#[derive(Debug, Clone, Default)]
pub struct RawFrame {
    bytes: ArrayVec<u8, FRAME_LEN>,
}

impl RawFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a byte. Returns `false` once the frame is already full.
    pub fn push(&mut self, byte: u8) -> bool {
        self.bytes.try_push(byte).is_ok()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    /// The received bytes, zero-padded to a full frame.
    pub fn padded(&self) -> [u8; FRAME_LEN] {
        let mut out = [0u8; FRAME_LEN];
        out[..self.bytes.len()].copy_from_slice(&self.bytes);
        out
    }

    /// Runs the structural checks and returns the bits that passed.
    pub fn check(&self) -> StatusMask {
        let bytes = self.padded();
        let mut status = StatusMask::empty();

        if bytes[0] == START_BYTE_1 {
            status.insert(StatusMask::HAVE_START1);
        }
        if bytes[1] == START_BYTE_2 {
            status.insert(StatusMask::HAVE_START2);
        }
        if self.is_full() {
            status.insert(StatusMask::HAVE_LENGTH);
        }
        // A checksum over padding proves nothing
        if self.is_full() && verify_frame_checksum(&bytes).is_ok() {
            status.insert(StatusMask::HAVE_CHECKSUM);
        }

        status
    }

    /// Copies the measurement words into `reading`.
    ///
    /// Fields are written whether or not the frame passed its checks.
    pub fn extract_into(&self, reading: &mut Reading) {
        let bytes = self.padded();
        read_words(&bytes, STANDARD_OFFSET, &mut reading.pm_standard);
        read_words(&bytes, ENVIRONMENTAL_OFFSET, &mut reading.pm_environmental);
        read_words(&bytes, COUNTS_OFFSET, &mut reading.particle_counts);
    }
}

fn read_words(bytes: &[u8; FRAME_LEN], offset: usize, out: &mut [u16]) {
    for (i, word) in out.iter_mut().enumerate() {
        let at = offset + 2 * i;
        *word = u16::from_be_bytes([bytes[at], bytes[at + 1]]);
    }
}
