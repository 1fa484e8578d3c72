use crate::constants::{CRC_INIT, CRC_POLYNOMIAL};

/// Folds one byte into a running CRC-8.
///
/// The algorithm is the plain bitwise CRC-8 with polynomial `0x31`, MSB
/// first, without input or output reflection.
///
/// # Arguments
///
/// * `data` - The byte to fold in.
/// * `crc_in` - The running CRC value.
///
/// # Returns
///
/// The updated CRC value.
pub fn crc8(data: u8, crc_in: u8) -> u8 {
    let mut crc = crc_in ^ data;
    for _ in 0..8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ CRC_POLYNOMIAL
        } else {
            crc << 1
        };
    }
    crc
}

/// Computes the CRC of a 16-bit word sent as two bytes, seeded with `0xFF`.
pub fn word_crc(in1: u8, in2: u8) -> u8 {
    crc8(in2, crc8(in1, CRC_INIT))
}

/// Checks a word against the CRC byte the sensor sent after it.
pub fn crc_check(in1: u8, in2: u8, expected: u8) -> bool {
    word_crc(in1, in2) == expected
}
