// src/driver/sync_driver/power.rs

use super::Pms5003;
use crate::common::{
    command::Command,
    error::PmsError,
    hal_traits::{PmsSerial, PmsTimer},
    state::{PowerState, StreamingMode},
};

// Power and mode control. State is only updated once the command has been
// written and flushed.
impl<IF> Pms5003<IF>
where
    IF: PmsSerial + PmsTimer,
{
    /// Puts the sensor to sleep (fan and laser off).
    pub fn sleep(&mut self) -> Result<(), PmsError<IF::Error>> {
        self.send_command(Command::Sleep)?;
        self.power_state = PowerState::Asleep;
        Ok(())
    }

    /// Wakes the sensor.
    ///
    /// This does not wait for the fan to spin up; readings taken in the next
    /// ~30 s are unreliable. [`forced_read`](Self::forced_read) handles the wait.
    pub fn wake(&mut self) -> Result<(), PmsError<IF::Error>> {
        self.send_command(Command::Wake)?;
        self.power_state = PowerState::Awake;
        Ok(())
    }

    /// Active mode: the sensor streams a frame roughly every second.
    pub fn set_continuous_mode(&mut self) -> Result<(), PmsError<IF::Error>> {
        self.send_command(Command::SetActive)?;
        self.mode = StreamingMode::Continuous;
        Ok(())
    }

    /// Passive mode: the sensor only answers [`request_data`](Self::request_data).
    ///
    /// Useful while waiting for the fan, since nothing fills the receive
    /// buffer in the meantime.
    pub fn set_on_demand_mode(&mut self) -> Result<(), PmsError<IF::Error>> {
        self.send_command(Command::SetPassive)?;
        self.mode = StreamingMode::OnDemand;
        Ok(())
    }

    /// Asks for one frame. Only meaningful in on-demand mode.
    pub fn request_data(&mut self) -> Result<(), PmsError<IF::Error>> {
        self.send_command(Command::RequestData)?;
        self.power_state = PowerState::Requesting;
        Ok(())
    }
}
