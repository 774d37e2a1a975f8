// src/driver/sync_driver/decoder.rs

use super::Pms5003;
use crate::common::{
    error::PmsError,
    hal_traits::{PmsSerial, PmsTimer},
    reading::Reading,
    status::StatusMask,
};

impl<IF> Pms5003<IF>
where
    IF: PmsSerial + PmsTimer,
{
    /// Makes a single attempt at decoding one frame into `reading`.
    ///
    /// Optionally drains stale input, resynchronizes on the `0x42` start
    /// byte, collects 32 bytes and runs the structural checks. The numeric
    /// fields are overwritten even when a check fails, so look at
    /// `reading.valid` before using them.
    ///
    /// Only transport failures are returned as errors; everything else is
    /// described by the returned status mask (also stored in `reading`).
    pub fn read(&mut self, reading: &mut Reading) -> Result<StatusMask, PmsError<IF::Error>> {
        let drain = self.config.drain_buffer;
        self.decode(reading, drain)
    }

    pub(super) fn decode(
        &mut self,
        reading: &mut Reading,
        drain: bool,
    ) -> Result<StatusMask, PmsError<IF::Error>> {
        reading.status = StatusMask::empty();

        if drain {
            self.drain_buffer()?;
        }

        if !self.seek_start_byte()? {
            trace!("no start byte within seek timeout");
        }

        let frame = self.read_frame()?;
        reading.status = frame.check();
        frame.extract_into(reading);
        reading.update_validity();

        if !reading.valid {
            debug!("frame rejected: status {}, {} bytes", reading.status, frame.len());
        }
        Ok(reading.status)
    }
}
