// src/common/reading.rs

use super::status::StatusMask;

/// One decoded (or averaged) measurement.
///
/// Numeric fields are only meaningful when [`Reading::valid`] is set. A
/// rejected frame still overwrites them with whatever bytes were received.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// PM1.0, PM2.5 and PM10 in µg/m³ (CF=1, standard particle).
    pub pm_standard: [u16; 3],
    /// PM1.0, PM2.5 and PM10 in µg/m³ under atmospheric environment.
    pub pm_environmental: [u16; 3],
    /// Particles beyond 0.3, 0.5, 1.0, 2.5, 5.0 and 10 µm per 0.1 L of air.
    pub particle_counts: [u16; 6],
    /// Which checks passed, plus orchestration error flags.
    pub status: StatusMask,
    /// All required checks passed (for averages: every contributing read did).
    pub valid: bool,
}

impl Reading {
    pub const fn zeroed() -> Self {
        Reading {
            pm_standard: [0; 3],
            pm_environmental: [0; 3],
            particle_counts: [0; 6],
            status: StatusMask::empty(),
            valid: false,
        }
    }

    pub fn pm1_0(&self) -> u16 {
        self.pm_standard[0]
    }

    pub fn pm2_5(&self) -> u16 {
        self.pm_standard[1]
    }

    pub fn pm10(&self) -> u16 {
        self.pm_standard[2]
    }

    pub fn pm1_0_env(&self) -> u16 {
        self.pm_environmental[0]
    }

    pub fn pm2_5_env(&self) -> u16 {
        self.pm_environmental[1]
    }

    pub fn pm10_env(&self) -> u16 {
        self.pm_environmental[2]
    }

    /// `valid` and a complete status mask agree that the numbers can be used.
    pub fn is_trustworthy(&self) -> bool {
        self.valid && self.status.is_complete()
    }

    /// Recomputes `valid` from the status mask.
    pub(crate) fn update_validity(&mut self) {
        self.valid = self.status.is_complete();
    }

    /// Marks this reading as failed with a single error flag.
    pub(crate) fn fail_with(&mut self, flag: StatusMask) {
        self.status = flag;
        self.valid = false;
    }

    /// All twelve numeric fields in frame order.
    pub(crate) fn fields(&self) -> [u16; 12] {
        let mut out = [0u16; 12];
        out[..3].copy_from_slice(&self.pm_standard);
        out[3..6].copy_from_slice(&self.pm_environmental);
        out[6..].copy_from_slice(&self.particle_counts);
        out
    }

    pub(crate) fn set_fields(&mut self, fields: &[u16; 12]) {
        self.pm_standard.copy_from_slice(&fields[..3]);
        self.pm_environmental.copy_from_slice(&fields[3..6]);
        self.particle_counts.copy_from_slice(&fields[6..]);
    }
}
