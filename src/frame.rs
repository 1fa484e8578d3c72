//! Decoding of the fixed size replies sent by the sensor.

use log::warn;

use crate::constants::{FLOW_FRAME_SIZE, SERIAL_ID_FRAME_SIZE};
use crate::crc::word_crc;
use crate::error::Error;

/// Splits a flow reply into its big endian sample and trailing CRC byte.
pub fn decode_flow_response(frame: &[u8; FLOW_FRAME_SIZE]) -> (u16, u8) {
    (u16::from_be_bytes([frame[0], frame[1]]), frame[2])
}

/// Splits a serial id reply into the id and the CRC bytes of its two halves.
///
/// The id is built from bytes 0, 1, 3 and 4; bytes 2 and 5 are the CRCs.
pub fn decode_serial_response(frame: &[u8; SERIAL_ID_FRAME_SIZE]) -> (u32, u8, u8) {
    let id = u32::from_be_bytes([frame[0], frame[1], frame[3], frame[4]]);
    (id, frame[2], frame[5])
}

// Checks one word against the CRC byte that follows it.
fn verify_word<E: core::fmt::Debug>(hi: u8, lo: u8, received: u8) -> Result<(), Error<E>> {
    let calculated = word_crc(hi, lo);
    if calculated == received {
        Ok(())
    } else {
        warn!(
            "CRC mismatch on word {:02X}{:02X}: received {:02X}, calculated {:02X}",
            hi, lo, received, calculated
        );
        Err(Error::CrcMismatch {
            received,
            calculated,
        })
    }
}

/// Decodes a flow reply, validating its CRC when `check_crc` is set.
///
/// # Returns
///
/// * `Ok(u16)` with the raw sample.
/// * `Err(Error::CrcMismatch)` if the word does not match its CRC byte.
pub fn verify_flow_response<E: core::fmt::Debug>(
    frame: &[u8; FLOW_FRAME_SIZE],
    check_crc: bool,
) -> Result<u16, Error<E>> {
    let (raw, crc) = decode_flow_response(frame);
    if check_crc {
        verify_word(frame[0], frame[1], crc)?;
    }
    Ok(raw)
}

/// Decodes a serial id reply, validating both halves when `check_crc` is set.
///
/// # Returns
///
/// * `Ok(u32)` with the serial id.
/// * `Err(Error::CrcMismatch)` for the first half that fails its CRC.
pub fn verify_serial_response<E: core::fmt::Debug>(
    frame: &[u8; SERIAL_ID_FRAME_SIZE],
    check_crc: bool,
) -> Result<u32, Error<E>> {
    let (id, crc_hi, crc_lo) = decode_serial_response(frame);
    if check_crc {
        verify_word(frame[0], frame[1], crc_hi)?;
        verify_word(frame[3], frame[4], crc_lo)?;
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestError = Error<()>;

    #[test]
    fn flow_frame_is_big_endian() {
        assert_eq!(decode_flow_response(&[0x7D, 0x8C, 0xAB]), (0x7D8C, 0xAB));
    }

    #[test]
    fn serial_id_skips_crc_bytes() {
        let frame = [0xAA, 0xBB, 0x11, 0xCC, 0xDD, 0x22];
        assert_eq!(decode_serial_response(&frame), (0xAABB_CCDD, 0x11, 0x22));
    }

    #[test]
    fn flow_crc_checked_when_enabled() {
        let good = [0x7D, 0x00, word_crc(0x7D, 0x00)];
        assert_eq!(verify_flow_response::<()>(&good, true), Ok(0x7D00));

        let bad = [0x7D, 0x00, good[2] ^ 0x01];
        assert_eq!(
            verify_flow_response::<()>(&bad, true),
            Err(TestError::CrcMismatch {
                received: bad[2],
                calculated: good[2],
            })
        );
    }

    #[test]
    fn flow_crc_ignored_when_disabled() {
        let bad = [0x7D, 0x00, !word_crc(0x7D, 0x00)];
        assert_eq!(verify_flow_response::<()>(&bad, false), Ok(0x7D00));
    }

    #[test]
    fn serial_needs_both_halves() {
        let crc_hi = word_crc(0xAA, 0xBB);
        let crc_lo = word_crc(0xCC, 0xDD);
        let good = [0xAA, 0xBB, crc_hi, 0xCC, 0xDD, crc_lo];
        assert_eq!(verify_serial_response::<()>(&good, true), Ok(0xAABB_CCDD));

        let mut bad_lo = good;
        bad_lo[5] ^= 0xFF;
        assert!(matches!(
            verify_serial_response::<()>(&bad_lo, true),
            Err(TestError::CrcMismatch { calculated, .. }) if calculated == crc_lo
        ));

        let mut bad_hi = good;
        bad_hi[2] ^= 0xFF;
        assert!(matches!(
            verify_serial_response::<()>(&bad_hi, true),
            Err(TestError::CrcMismatch { calculated, .. }) if calculated == crc_hi
        ));

        assert_eq!(verify_serial_response::<()>(&bad_lo, false), Ok(0xAABB_CCDD));
    }
}
