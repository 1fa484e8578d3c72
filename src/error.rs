/// Errors returned by the sensor session.
///
/// `E` is the error type of the underlying I2C implementation. Transport
/// errors are passed through untouched so the caller can decide whether to
/// retry the whole exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error<E = ()>
where
    E: core::fmt::Debug,
{
    /// Writing a command frame to the sensor failed.
    #[error("I2C write failed: {0:?}")]
    I2cWrite(E),

    /// Reading a response frame from the sensor failed.
    #[error("I2C read failed: {0:?}")]
    I2cRead(E),

    /// A word of the response did not match its trailing CRC byte.
    #[error("CRC mismatch: received {received:#04x}, calculated {calculated:#04x}")]
    CrcMismatch { received: u8, calculated: u8 },
}

impl<E: core::fmt::Debug> Error<E> {
    /// Returns `true` for failures raised by the I2C bus itself.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::I2cWrite(_) | Error::I2cRead(_))
    }
}
