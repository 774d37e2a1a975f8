// src/driver/sync_driver/io_helpers.rs

use super::Pms5003;
use crate::common::{
    command::Command,
    error::PmsError,
    frame::{RawFrame, START_BYTE_1},
    hal_traits::{PmsSerial, PmsTimer},
    timing,
};
use core::time::Duration;
use nb::Result as NbResult;

// Implementation block for I/O related helpers
impl<IF> Pms5003<IF>
where
    IF: PmsSerial + PmsTimer,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`.
    ///
    /// Returns `Ok(None)` if the deadline passed first.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<Option<T>, PmsError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let start_time = self.interface.now();
        let deadline = start_time + timeout;

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(Some(result)),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Ok(None);
                    }
                    self.pause();
                }
                Err(nb::Error::Other(e)) => return Err(PmsError::Io(e)),
            }
        }
    }

    /// Yields for one poll interval instead of spinning on an idle transport.
    pub(super) fn pause(&mut self) {
        self.interface
            .delay_us(timing::POLL_INTERVAL.as_micros() as u32);
    }

    /// Blocks for `duration`, in millisecond steps.
    pub(super) fn delay_for(&mut self, duration: Duration) {
        let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        self.interface.delay_ms(ms);
    }

    pub(super) fn elapsed_since(&self, start: IF::Instant) -> Duration {
        self.interface.now() - start
    }

    /// Writes a command frame and waits for it to leave the transmitter.
    pub(super) fn send_command(&mut self, command: Command) -> Result<(), PmsError<IF::Error>> {
        for byte in command.as_bytes() {
            self.execute_blocking_io_with_timeout(timing::COMMAND_WRITE_TIMEOUT, |iface| {
                iface.write_byte(*byte)
            })?
            .ok_or(PmsError::WriteTimeout)?;
        }

        self.execute_blocking_io_with_timeout(timing::COMMAND_FLUSH_TIMEOUT, |iface| iface.flush())?
            .ok_or(PmsError::WriteTimeout)?;

        debug!("sent {} command", command);
        Ok(())
    }

    /// Discards the bytes buffered at the time of the call.
    ///
    /// Bytes arriving while draining are left alone, so a sensor streaming
    /// continuously cannot keep this loop going. Returns the number discarded.
    pub fn drain_buffer(&mut self) -> Result<usize, PmsError<IF::Error>> {
        let pending = self.interface.available();
        let mut drained = 0;

        for _ in 0..pending {
            match self.interface.read_byte() {
                Ok(_) => drained += 1,
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => return Err(PmsError::Io(e)),
            }
        }

        if drained > 0 {
            trace!("drained {} stale bytes", drained);
        }
        Ok(drained)
    }

    /// Consumes input until the next byte is the frame start marker.
    ///
    /// Returns `Ok(false)` if the seek timeout ran out first; the caller
    /// reads a frame regardless and lets the structural checks fail.
    pub(super) fn seek_start_byte(&mut self) -> Result<bool, PmsError<IF::Error>> {
        let timeout = self.config.seek_timeout;
        let start = self.interface.now();
        let mut skipped: usize = 0;

        while self.elapsed_since(start) < timeout {
            match self.interface.peek_byte() {
                Ok(START_BYTE_1) => {
                    if skipped > 0 {
                        trace!("resynchronized after skipping {} bytes", skipped);
                    }
                    return Ok(true);
                }
                Ok(_) => match self.interface.read_byte() {
                    Ok(_) | Err(nb::Error::WouldBlock) => skipped += 1,
                    Err(nb::Error::Other(e)) => return Err(PmsError::Io(e)),
                },
                Err(nb::Error::WouldBlock) => self.pause(),
                Err(nb::Error::Other(e)) => return Err(PmsError::Io(e)),
            }
        }

        Ok(false)
    }

    /// Collects up to one frame's worth of bytes, stopping early if a byte
    /// does not arrive within the frame read timeout.
    pub(super) fn read_frame(&mut self) -> Result<RawFrame, PmsError<IF::Error>> {
        let timeout = self.config.frame_read_timeout;
        let mut frame = RawFrame::new();

        while !frame.is_full() {
            match self.execute_blocking_io_with_timeout(timeout, |iface| iface.read_byte())? {
                Some(byte) => {
                    frame.push(byte);
                }
                None => break,
            }
        }

        Ok(frame)
    }
}
