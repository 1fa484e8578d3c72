//! Async flavour of the sensor session, built on `embedded-hal-async`.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use log::debug;

use crate::{
    frame, to_physical, Calibration, Command, Config, Error, SensorState, FLOW_FRAME_SIZE,
    SERIAL_ID_FRAME_SIZE, SERIAL_ID_SETTLE_MS,
};

/// Represents an SFM3000 mass flow sensor driven through async I2C.
///
/// Behaves like [`crate::Sfm3000`], every bus access is awaited instead of
/// blocking.
pub struct Sfm3000Async<I2C, D> {
    i2c: I2C,
    delay: D,
    config: Config,
    state: SensorState,
}

impl<I2C, D> Sfm3000Async<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Creates a new `Sfm3000Async` sensor instance.
    ///
    /// No bus traffic happens here; call [`Sfm3000Async::init`] to start measuring.
    ///
    /// # Arguments
    ///
    /// * `i2c`: The async I2C bus for communication with the sensor.
    /// * `delay`: The async delay provider.
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
    /// On failure the driver state is left unchanged and `init` should be
    /// retried.
    pub async fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write(Command::StartMeasurement).await.map_err(|e| {
            log::error!("Failed to start continuous measurement: {:?}", e);
            e
        })?;
        self.state = SensorState::Measuring;
        debug!("SFM3000 continuous measurement started.");
        Ok(())
    }

    /// Reads one flow sample and converts it with the given calibration.
    ///
    /// The read is issued whatever the driver state is, exactly like
    /// [`crate::Sfm3000::get_value`].
    pub async fn get_value(&mut self, offset: f32, scale: f32) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_raw().await?;
        let flow = to_physical(raw, offset, scale);
        debug!("Flow sample {:#06X} -> {}", raw, flow);
        Ok(flow)
    }

    /// Reads one flow sample with the calibration from the configuration.
    pub async fn read_flow(&mut self) -> Result<f32, Error<I2C::Error>> {
        let Calibration { offset, scale } = self.config.calibration;
        self.get_value(offset, scale).await
    }

    /// Reads one raw flow sample, CRC checked when enabled.
    pub async fn read_raw(&mut self) -> Result<u16, Error<I2C::Error>> {
        if self.state == SensorState::Uninitialized {
            debug!("Reading flow before continuous measurement was started");
        }
        let mut buffer = [0u8; FLOW_FRAME_SIZE];
        self.read(&mut buffer).await.map_err(|e| {
            log::error!("Failed to read flow sample: {:?}", e);
            e
        })?;
        frame::verify_flow_response(&buffer, self.config.crc_check)
    }

    /// Soft resets the sensor. [`Sfm3000Async::init`] has to be called again
    /// before reading the flow.
    pub async fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write(Command::SoftReset).await.map_err(|e| {
            log::error!("Failed to soft reset sensor: {:?}", e);
            e
        })?;
        self.state = SensorState::Uninitialized;
        debug!("SFM3000 soft reset done.");
        Ok(())
    }

    /// Reads the 32-bit serial id of the sensor.
    ///
    /// Waits for the settling time between the command and the reply read.
    /// Does not touch the measurement state.
    pub async fn read_serial_id(&mut self) -> Result<u32, Error<I2C::Error>> {
        self.write(Command::ReadSerialId).await.map_err(|e| {
            log::error!("Failed to request serial id: {:?}", e);
            e
        })?;
        self.delay.delay_ms(SERIAL_ID_SETTLE_MS).await;

        let mut buffer = [0u8; SERIAL_ID_FRAME_SIZE];
        self.read(&mut buffer).await.map_err(|e| {
            log::error!("Failed to read serial id: {:?}", e);
            e
        })?;
        let id = frame::verify_serial_response(&buffer, self.config.crc_check)?;
        debug!("SFM3000 serial id: {:#010X}", id);
        Ok(id)
    }

    async fn write(&mut self, command: Command) -> Result<(), Error<I2C::Error>> {
        let bytes = command.to_be_bytes();
        debug!("Executing command {:?}: {:02X?}", command, bytes);
        self.i2c
            .write(self.config.address, &bytes)
            .await
            .map_err(Error::I2cWrite)
    }

    async fn read(&mut self, buffer: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .read(self.config.address, buffer)
            .await
            .map_err(Error::I2cRead)?;
        debug!("Received frame: {:02X?}", buffer);
        Ok(())
    }
}
