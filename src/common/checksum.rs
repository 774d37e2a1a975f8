// src/common/checksum.rs

use super::frame::{CHECKSUM_OFFSET, FRAME_LEN};

/// Received checksum does not match the sum calculated over the frame body.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("checksum mismatch: expected {expected:#06x}, calculated {calculated:#06x}")]
pub struct ChecksumMismatch {
    pub expected: u16,
    pub calculated: u16,
}

/// Calculates the PMS5003 additive checksum for the given bytes.
///
/// The sensor uses the same scheme in both directions: every byte is added
/// into an unsigned 16-bit accumulator, wrapping on overflow.
///
/// # Arguments
///
/// * `data`: The bytes covered by the checksum (everything before the
///   trailing two checksum bytes).
///
/// # Returns
///
/// The 16-bit wrapping sum.
#[inline]
pub const fn additive_checksum(data: &[u8]) -> u16 {
    let mut sum: u16 = 0;
    let mut i = 0;
    while i < data.len() {
        sum = sum.wrapping_add(data[i] as u16);
        i += 1;
    }
    sum
}

/// Verifies the checksum of a complete 32-byte sensor frame.
///
/// Bytes `0..30` are summed and compared with the big-endian value stored
/// in bytes `30..32`.
///
/// # Returns
///
/// * `Ok(())` if the checksum matches.
/// * `Err(ChecksumMismatch)` otherwise.
pub fn verify_frame_checksum(frame: &[u8; FRAME_LEN]) -> Result<(), ChecksumMismatch> {
    let calculated = additive_checksum(&frame[..CHECKSUM_OFFSET]);
    let expected = u16::from_be_bytes([frame[CHECKSUM_OFFSET], frame[CHECKSUM_OFFSET + 1]]);

    if calculated == expected {
        Ok(())
    } else {
        Err(ChecksumMismatch { expected, calculated })
    }
}
