#![cfg_attr(not(test), no_std)]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

mod constants;
pub use constants::*;

mod error;
pub use error::*;

mod config;
pub use config::*;

pub mod command;
pub use command::Command;

pub mod convert;
pub use convert::{to_physical, Calibration};

pub mod crc;
pub mod frame;

#[cfg(feature = "async")]
pub mod asynch;

/// Measurement state of the sensor as last commanded by this driver.
///
/// The sensor keeps the real state; this is only a mirror of what the driver
/// last told it, so a power loss on the sensor side goes unnoticed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorState {
    /// After power up or a soft reset. Flow reads return stale data.
    Uninitialized,
    /// Continuous measurement was started, flow reads are meaningful.
    Measuring,
}

/// Represents an SFM3000 mass flow sensor.
///
/// This struct provides methods to interact with the sensor,
/// such as starting the measurement, reading the flow and the serial id.
///
/// # Type Parameters
///
/// * `I2C`: The I2C bus the sensor is attached to. It must implement
///   `embedded_hal::i2c::I2c`.
/// * `D`: A delay provider used for the serial id settling time. It must
///   implement `embedded_hal::delay::DelayNs`.
pub struct Sfm3000<I2C, D> {
    i2c: I2C,
    delay: D,
    config: Config,
    state: SensorState,
}

impl<I2C, D> Sfm3000<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Creates a new `Sfm3000` sensor instance.
    ///
    /// No bus traffic happens here; call [`Sfm3000::init`] to start measuring.
    ///
    /// # Arguments
    ///
    /// * `i2c`: The I2C bus for communication with the sensor.
    /// * `delay`: The delay provider.
    /// * `config`: The configuration for the sensor.
    pub fn new(i2c: I2C, delay: D, config: Config) -> Self {
        Self {
            i2c,
            delay,
            config,
            state: SensorState::Uninitialized,
        }
    }

    /// Releases the bus and the delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Returns the configuration the session was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the state the driver last put the sensor in.
    pub fn state(&self) -> SensorState {
        self.state
    }

    /// Starts continuous flow measurement.
    ///
    /// Must be called after power up and after every [`Sfm3000::reset`]
    /// before flow readings are meaningful. On failure the driver state is
    /// left unchanged and `init` should be retried.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write(Command::StartMeasurement).map_err(|e| {
            log::error!("Failed to start continuous measurement: {:?}", e);
            e
        })?;
        self.state = SensorState::Measuring;
        debug!("SFM3000 continuous measurement started.");
        Ok(())
    }

    /// Reads one flow sample and converts it with the given calibration.
    ///
    /// The read is issued whatever the driver state is. Before [`Sfm3000::init`]
    /// the sensor answers with stale data, which is converted like any other
    /// sample.
    ///
    /// # Arguments
    ///
    /// * `offset`: Raw count at zero flow.
    /// * `scale`: Raw counts per unit of flow.
    ///
    /// # Returns
    ///
    /// * `Ok(f32)` with the flow, negative for reverse flow.
    /// * `Err(Error::I2cRead)` if the bus read failed.
    /// * `Err(Error::CrcMismatch)` if CRC checking is enabled and the sample is corrupt.
    pub fn get_value(&mut self, offset: f32, scale: f32) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_raw()?;
        let flow = to_physical(raw, offset, scale);
        debug!("Flow sample {:#06X} -> {}", raw, flow);
        Ok(flow)
    }

    /// Reads one flow sample with the calibration from the configuration.
    pub fn read_flow(&mut self) -> Result<f32, Error<I2C::Error>> {
        let Calibration { offset, scale } = self.config.calibration;
        self.get_value(offset, scale)
    }

    /// Reads one raw flow sample, CRC checked when enabled.
    pub fn read_raw(&mut self) -> Result<u16, Error<I2C::Error>> {
        if self.state == SensorState::Uninitialized {
            debug!("Reading flow before continuous measurement was started");
        }
        let mut buffer = [0u8; FLOW_FRAME_SIZE];
        self.read(&mut buffer).map_err(|e| {
            log::error!("Failed to read flow sample: {:?}", e);
            e
        })?;
        frame::verify_flow_response(&buffer, self.config.crc_check)
    }

    /// Soft resets the sensor.
    ///
    /// The sensor leaves continuous measurement; [`Sfm3000::init`] has to be
    /// called again before reading the flow.
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write(Command::SoftReset).map_err(|e| {
            log::error!("Failed to soft reset sensor: {:?}", e);
            e
        })?;
        self.state = SensorState::Uninitialized;
        debug!("SFM3000 soft reset done.");
        Ok(())
    }

    /// Reads the 32-bit serial id of the sensor.
    ///
    /// Sends the command, waits for the sensor to prepare the reply and reads
    /// both halves. Does not touch the measurement state.
    ///
    /// # Returns
    ///
    /// * `Ok(u32)` with the serial id.
    /// * `Err(Error::I2cWrite)` or `Err(Error::I2cRead)` for bus failures.
    /// * `Err(Error::CrcMismatch)` if CRC checking is enabled and either half is corrupt.
    pub fn read_serial_id(&mut self) -> Result<u32, Error<I2C::Error>> {
        self.write(Command::ReadSerialId).map_err(|e| {
            log::error!("Failed to request serial id: {:?}", e);
            e
        })?;
        self.delay.delay_ms(SERIAL_ID_SETTLE_MS);

        let mut buffer = [0u8; SERIAL_ID_FRAME_SIZE];
        self.read(&mut buffer).map_err(|e| {
            log::error!("Failed to read serial id: {:?}", e);
            e
        })?;
        let id = frame::verify_serial_response(&buffer, self.config.crc_check)?;
        debug!("SFM3000 serial id: {:#010X}", id);
        Ok(id)
    }

    // Writes a 2-byte command frame to the sensor.
    fn write(&mut self, command: Command) -> Result<(), Error<I2C::Error>> {
        let frame = command.to_be_bytes();
        debug!("Executing command {:?}: {:02X?}", command, frame);
        self.i2c
            .write(self.config.address, &frame)
            .map_err(Error::I2cWrite)
    }

    // Fills the buffer with one reply frame from the sensor.
    fn read(&mut self, buffer: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .read(self.config.address, buffer)
            .map_err(Error::I2cRead)?;
        debug!("Received frame: {:02X?}", buffer);
        Ok(())
    }
}
