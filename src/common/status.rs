// src/common/status.rs

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign};

/// Diagnostic bitset attached to every [`Reading`](super::Reading).
///
/// The low nibble records which structural checks a frame passed. The two
/// high bits are error flags set by the read orchestration instead of the
/// frame decoder.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusMask(u8);

impl StatusMask {
    /// First byte was `0x42`.
    pub const HAVE_START1: Self = Self(0x01);
    /// Second byte was `0x4D`.
    pub const HAVE_START2: Self = Self(0x02);
    /// All 32 bytes arrived.
    pub const HAVE_LENGTH: Self = Self(0x04);
    /// Checksum matched.
    pub const HAVE_CHECKSUM: Self = Self(0x08);
    /// Every check a frame must pass to be trusted.
    pub const REQUIRED: Self = Self(0x0F);

    /// A read was attempted while the sensor was asleep.
    pub const SENSOR_ASLEEP: Self = Self(0x40);
    /// A blocking read ran out of time without a valid frame.
    pub const SENSOR_TIMEOUT: Self = Self(0x80);

    const ERROR_FLAGS: u8 = 0xC0;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// `true` when all structural checks passed.
    pub const fn is_complete(self) -> bool {
        self.contains(Self::REQUIRED)
    }

    /// `true` when either orchestration error flag is set.
    pub const fn has_error(self) -> bool {
        self.0 & Self::ERROR_FLAGS != 0
    }

    /// Combines two masks for an aggregate reading: a structural bit survives
    /// only if both sides have it, an error flag survives if either side has it.
    pub const fn combine(self, other: Self) -> Self {
        let structural = (self.0 & other.0) & Self::REQUIRED.0;
        let errors = (self.0 | other.0) & Self::ERROR_FLAGS;
        Self(structural | errors)
    }
}

impl BitOr for StatusMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for StatusMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for StatusMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for StatusMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(StatusMask, &str); 6] = [
            (StatusMask::HAVE_START1, "START1"),
            (StatusMask::HAVE_START2, "START2"),
            (StatusMask::HAVE_LENGTH, "LENGTH"),
            (StatusMask::HAVE_CHECKSUM, "CHECKSUM"),
            (StatusMask::SENSOR_ASLEEP, "ASLEEP"),
            (StatusMask::SENSOR_TIMEOUT, "TIMEOUT"),
        ];

        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("NONE")?;
        }
        Ok(())
    }
}
