//! I2C commands understood by the SFM3000.

use crate::constants::COMMAND_SIZE;

/// Commands written to the sensor. Every command is a fixed 16-bit word sent
/// MSB first.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Starts continuous flow measurement. Flow words can be read back-to-back
    /// afterwards without resending a command.
    StartMeasurement = 0x1000,
    /// Resets the sensor. Continuous measurement has to be started again.
    SoftReset = 0x2000,
    /// Requests the 32-bit serial number.
    ReadSerialId = 0x31AE,
}

impl Command {
    /// Returns the big endian frame sent on the bus.
    pub const fn to_be_bytes(self) -> [u8; COMMAND_SIZE] {
        (self as u16).to_be_bytes()
    }
}

impl From<Command> for [u8; COMMAND_SIZE] {
    fn from(val: Command) -> Self {
        val.to_be_bytes()
    }
}

impl From<Command> for u16 {
    fn from(val: Command) -> Self {
        val as u16
    }
}
