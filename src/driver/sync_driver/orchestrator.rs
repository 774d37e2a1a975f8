// src/driver/sync_driver/orchestrator.rs

use super::Pms5003;
use crate::common::{
    error::PmsError,
    hal_traits::{PmsSerial, PmsTimer},
    reading::Reading,
    state::{PowerState, StreamingMode},
    status::StatusMask,
    timing,
};
use core::time::Duration;

impl<IF> Pms5003<IF>
where
    IF: PmsSerial + PmsTimer,
{
    /// Retries [`read`](Self::read) until a valid frame arrives or `timeout`
    /// has passed.
    ///
    /// Returns the number of decode attempts. When the sensor is asleep the
    /// call returns `Ok(0)` immediately with `SENSOR_ASLEEP` set. When no
    /// valid frame was obtained, `SENSOR_TIMEOUT` is added to the status of
    /// the last attempt (or is the whole status if no attempt fit in the budget).
    ///
    /// In on-demand mode a data request is sent first unless one is already
    /// outstanding; the request counts as answered once the call returns.
    pub fn blocking_read(
        &mut self,
        reading: &mut Reading,
        timeout: Duration,
    ) -> Result<usize, PmsError<IF::Error>> {
        if self.power_state == PowerState::Asleep {
            warn!("read attempted while sensor is asleep");
            reading.fail_with(StatusMask::SENSOR_ASLEEP);
            return Ok(0);
        }

        let on_demand = self.mode == StreamingMode::OnDemand;
        let mut drain = self.config.drain_buffer;
        if on_demand {
            if self.power_state != PowerState::Requesting {
                // Drain before asking, so the answer is not thrown away
                if drain {
                    self.drain_buffer()?;
                }
                self.request_data()?;
            }
            // The answer to the outstanding request may already be buffered
            drain = false;
        }

        let result = self.attempt_until_valid(reading, timeout, drain);
        if on_demand {
            self.power_state = PowerState::Awake;
        }
        let attempts = result?;

        if attempts == 0 {
            reading.fail_with(StatusMask::SENSOR_TIMEOUT);
        } else if !reading.valid {
            reading.status.insert(StatusMask::SENSOR_TIMEOUT);
        }

        if !reading.valid {
            debug!("blocking read timed out after {} attempts", attempts);
        }
        Ok(attempts)
    }

    /// [`blocking_read`](Self::blocking_read) with the configured timeout.
    pub fn blocking_read_default(
        &mut self,
        reading: &mut Reading,
    ) -> Result<usize, PmsError<IF::Error>> {
        let timeout = self.config.blocking_timeout;
        self.blocking_read(reading, timeout)
    }

    /// Takes a reading even if the sensor is asleep.
    ///
    /// A sleeping sensor is woken, given `startup_delay` for its fan, read
    /// with [`blocking_read`](Self::blocking_read) and put back to sleep
    /// whatever the outcome. Returns the number of decode attempts.
    pub fn forced_read(
        &mut self,
        reading: &mut Reading,
        startup_delay: Duration,
        timeout: Duration,
    ) -> Result<usize, PmsError<IF::Error>> {
        let was_asleep = self.wake_for_read(startup_delay)?;
        let result = self.blocking_read(reading, timeout);
        self.restore_sleep(was_asleep, result)
    }

    /// [`forced_read`](Self::forced_read) with the configured delay and timeout.
    pub fn forced_read_default(
        &mut self,
        reading: &mut Reading,
    ) -> Result<usize, PmsError<IF::Error>> {
        let startup_delay = self.config.startup_delay;
        let timeout = self.config.blocking_timeout;
        self.forced_read(reading, startup_delay, timeout)
    }

    /// Averages every blocking read that completes within `window`.
    ///
    /// Each numeric field becomes the mean of the contributing reads,
    /// rounded half away from zero. The status keeps a structural bit only
    /// if every read had it, `valid` only if every read was valid. With no
    /// contributing read at all the result is zeroed and invalid with
    /// `SENSOR_TIMEOUT`.
    ///
    /// A sleeping sensor is woken (waiting the configured startup delay) and
    /// put back to sleep afterwards. Returns the number of contributing reads.
    pub fn averaged_read(
        &mut self,
        reading: &mut Reading,
        window: Duration,
        per_attempt_timeout: Duration,
    ) -> Result<usize, PmsError<IF::Error>> {
        let startup_delay = self.config.startup_delay;
        let was_asleep = self.wake_for_read(startup_delay)?;
        let result = self.accumulate(reading, window, per_attempt_timeout);
        self.restore_sleep(was_asleep, result)
    }

    /// [`averaged_read`](Self::averaged_read) over the default window, with
    /// the configured blocking timeout per read.
    pub fn averaged_read_default(
        &mut self,
        reading: &mut Reading,
    ) -> Result<usize, PmsError<IF::Error>> {
        let timeout = self.config.blocking_timeout;
        self.averaged_read(reading, timing::DEFAULT_AVERAGING_WINDOW, timeout)
    }

    /// Decodes until a frame passes every check or `timeout` runs out.
    /// Returns the number of attempts made.
    fn attempt_until_valid(
        &mut self,
        reading: &mut Reading,
        timeout: Duration,
        drain: bool,
    ) -> Result<usize, PmsError<IF::Error>> {
        let start = self.interface.now();
        let mut attempts = 0;
        while self.elapsed_since(start) < timeout {
            self.decode(reading, drain)?;
            attempts += 1;
            if reading.valid {
                break;
            }
        }
        Ok(attempts)
    }

    fn accumulate(
        &mut self,
        reading: &mut Reading,
        window: Duration,
        per_attempt_timeout: Duration,
    ) -> Result<usize, PmsError<IF::Error>> {
        let mut sums = [0u64; 12];
        let mut status = StatusMask::REQUIRED;
        let mut valid = true;
        let mut count: usize = 0;
        let mut scratch = Reading::zeroed();

        let start = self.interface.now();
        while self.elapsed_since(start) < window {
            let attempts = self.blocking_read(&mut scratch, per_attempt_timeout)?;
            if attempts == 0 {
                // Nothing fit in the per-read budget; let the clock move
                self.pause();
            }

            for (sum, value) in sums.iter_mut().zip(scratch.fields()) {
                *sum += u64::from(value);
            }
            status = status.combine(scratch.status);
            valid &= scratch.valid;
            count += 1;
        }

        if count == 0 {
            *reading = Reading::zeroed();
            reading.fail_with(StatusMask::SENSOR_TIMEOUT);
            debug!("averaging window too short for a single read");
            return Ok(0);
        }

        let mut fields = [0u16; 12];
        for (field, sum) in fields.iter_mut().zip(sums) {
            *field = rounded_mean(sum, count as u64);
        }
        reading.set_fields(&fields);
        reading.status = status;
        reading.valid = valid;

        debug!("averaged {} reads, valid: {}", count, valid);
        Ok(count)
    }

    /// Wakes the sensor if needed. Returns whether it was asleep.
    fn wake_for_read(&mut self, startup_delay: Duration) -> Result<bool, PmsError<IF::Error>> {
        if self.power_state != PowerState::Asleep {
            return Ok(false);
        }
        self.wake()?;
        self.delay_for(startup_delay);
        Ok(true)
    }

    /// Puts the sensor back to sleep if it was asleep before the read.
    /// An error from the read takes precedence over one from the sleep command.
    fn restore_sleep(
        &mut self,
        was_asleep: bool,
        result: Result<usize, PmsError<IF::Error>>,
    ) -> Result<usize, PmsError<IF::Error>> {
        if !was_asleep {
            return result;
        }
        let slept = self.sleep();
        let count = result?;
        slept?;
        Ok(count)
    }
}

/// `sum / n` rounded half away from zero, in exact integer arithmetic.
fn rounded_mean(sum: u64, n: u64) -> u16 {
    let mean = (2 * sum + n) / (2 * n);
    u16::try_from(mean).unwrap_or(u16::MAX)
}
