// src/common/command.rs

//! Host-to-sensor command definitions.
//!
//! Every command is a 7-byte frame:
//! `0x42 0x4D <cmd> <data_hi> <data_lo> <checksum_hi> <checksum_lo>`,
//! where the checksum is the 16-bit sum of the first five bytes.

use core::fmt;

use super::checksum::additive_checksum;
use super::frame::{START_BYTE_1, START_BYTE_2};

/// Size of a command frame in bytes.
pub const COMMAND_LEN: usize = 7;

/// Represents a command understood by the sensor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Put the sensor to sleep (`E4`, data 0). Fan and laser stop.
    Sleep,
    /// Wake the sensor (`E4`, data 1). Readings need ~30 s to settle.
    Wake,
    /// Switch to passive mode (`E1`, data 0): frames only on request.
    SetPassive,
    /// Switch to active mode (`E1`, data 1): frames are streamed continuously.
    SetActive,
    /// Ask for a single frame while in passive mode (`E2`, data 0).
    RequestData,
}

// Precomputed frames, checked against `Command::encode` in the tests below.
const SLEEP: [u8; COMMAND_LEN] = [0x42, 0x4D, 0xE4, 0x00, 0x00, 0x01, 0x73];
const WAKE: [u8; COMMAND_LEN] = [0x42, 0x4D, 0xE4, 0x00, 0x01, 0x01, 0x74];
const SET_PASSIVE: [u8; COMMAND_LEN] = [0x42, 0x4D, 0xE1, 0x00, 0x00, 0x01, 0x70];
const SET_ACTIVE: [u8; COMMAND_LEN] = [0x42, 0x4D, 0xE1, 0x00, 0x01, 0x01, 0x71];
const REQUEST_DATA: [u8; COMMAND_LEN] = [0x42, 0x4D, 0xE2, 0x00, 0x00, 0x01, 0x71];

impl Command {
    /// Command code byte.
    pub const fn code(self) -> u8 {
        match self {
            Command::Sleep | Command::Wake => 0xE4,
            Command::SetPassive | Command::SetActive => 0xE1,
            Command::RequestData => 0xE2,
        }
    }

    /// 16-bit data argument.
    pub const fn data(self) -> u16 {
        match self {
            Command::Wake | Command::SetActive => 1,
            Command::Sleep | Command::SetPassive | Command::RequestData => 0,
        }
    }

    /// The frame to put on the wire.
    pub const fn as_bytes(&self) -> &'static [u8; COMMAND_LEN] {
        match self {
            Command::Sleep => &SLEEP,
            Command::Wake => &WAKE,
            Command::SetPassive => &SET_PASSIVE,
            Command::SetActive => &SET_ACTIVE,
            Command::RequestData => &REQUEST_DATA,
        }
    }

    /// Builds the frame from the code and data fields.
    pub const fn encode(self) -> [u8; COMMAND_LEN] {
        let [data_hi, data_lo] = self.data().to_be_bytes();
        let head = [START_BYTE_1, START_BYTE_2, self.code(), data_hi, data_lo];
        let [sum_hi, sum_lo] = additive_checksum(&head).to_be_bytes();
        [head[0], head[1], head[2], head[3], head[4], sum_hi, sum_lo]
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Sleep => "sleep",
            Command::Wake => "wake",
            Command::SetPassive => "set-passive",
            Command::SetActive => "set-active",
            Command::RequestData => "request-data",
        };
        f.write_str(name)
    }
}
