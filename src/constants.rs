// DEFAULT_ADDRESS is the 7-bit I2C address of the sensor. The HAL shifts it
// into the 8-bit form (0x80) on the wire.
pub const DEFAULT_ADDRESS: u8 = 0x40;

// COMMAND_SIZE is the length of every command frame sent to the sensor.
pub const COMMAND_SIZE: usize = 2;

// FLOW_FRAME_SIZE is the length of a flow reading: one 16-bit word followed by its CRC.
pub const FLOW_FRAME_SIZE: usize = 3;

// SERIAL_ID_FRAME_SIZE is the length of the serial id reply: two words, each followed by its CRC.
pub const SERIAL_ID_FRAME_SIZE: usize = 6;

// SERIAL_ID_SETTLE_MS is the wait between the read serial id command and the reply read.
pub const SERIAL_ID_SETTLE_MS: u32 = 5;

// CRC_POLYNOMIAL is x^8 + x^5 + x^4 + 1, processed MSB first.
pub const CRC_POLYNOMIAL: u8 = 0x31;

// CRC_INIT is the seed of each per-word CRC computation.
pub const CRC_INIT: u8 = 0xFF;

// AIR_OFFSET is the datasheet flow offset, in raw counts.
pub const AIR_OFFSET: f32 = 32000.0;

// AIR_SCALE is the datasheet flow scale factor for air, in counts per slm.
pub const AIR_SCALE: f32 = 140.0;
