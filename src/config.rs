use crate::constants::DEFAULT_ADDRESS;
use crate::convert::Calibration;

/// Configuration settings for the SFM3000 sensor session.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    /// The 7-bit I2C address of the sensor.
    pub address: u8,
    /// Whether every response word is checked against its CRC byte.
    pub crc_check: bool,
    /// The calibration used by `read_flow`.
    pub calibration: Calibration,
}

impl Config {
    /// Creates a new `Config` for a sensor at the given address.
    ///
    /// CRC checking is enabled and the air calibration is selected.
    ///
    /// # Arguments
    ///
    /// * `address` - The 7-bit I2C address of the sensor.
    pub fn new(address: u8) -> Config {
        Config {
            address,
            ..Config::default()
        }
    }

    /// Sets the I2C address for the configuration.
    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Enables or disables CRC checking of the sensor replies.
    ///
    /// With checking disabled every decoded value is trusted as received.
    pub fn crc_check(mut self, enabled: bool) -> Self {
        self.crc_check = enabled;
        self
    }

    /// Sets the default calibration used by `read_flow`.
    pub fn calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }
}

/// Provides default configuration values for the SFM3000 sensor.
impl Default for Config {
    /// Returns the default configuration.
    ///
    /// The default configuration uses address `0x40`, CRC checking enabled
    /// and the datasheet calibration for air.
    fn default() -> Config {
        Config {
            address: DEFAULT_ADDRESS,
            crc_check: true,
            calibration: Calibration::AIR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_checks_crc_for_air() {
        let config = Config::default();
        assert_eq!(config.address, 0x40);
        assert!(config.crc_check);
        assert_eq!(config.calibration, Calibration::AIR);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = Config::new(0x41)
            .crc_check(false)
            .calibration(Calibration::new(32000.0, 142.8));
        assert_eq!(config.address, 0x41);
        assert!(!config.crc_check);
        assert_eq!(config.calibration.scale, 142.8);

        let moved = config.address(0x40);
        assert_eq!(moved.address, 0x40);
    }
}
