//! Two's complement decoding of raw sensor values.

use crate::error::Error;

/// Decodes a 24-bit big-endian two's complement value.
///
/// ```rust
/// use ppg_oximeter::decode::i24_be;
///
/// assert_eq!(i24_be([0x00, 0x01, 0x00]), 256);
/// assert_eq!(i24_be([0xff, 0xff, 0xfe]), -2);
/// ```
pub fn i24_be(bytes: [u8; 3]) -> i32 {
    i32::from_be_bytes([bytes[0], bytes[1], bytes[2], 0]) >> 8
}

/// Decodes a two's complement number written as a string of binary digits.
///
/// The width of the number is the length of the string, up to 64 digits.
///
/// ```rust
/// use ppg_oximeter::decode::twos_complement;
///
/// assert_eq!(twos_complement("0101"), Ok(5));
/// assert_eq!(twos_complement("1101"), Ok(-3));
/// ```
pub fn twos_complement(bits: &str) -> Result<i64, Error> {
    let width = bits.len();
    if width == 0 || width > 64 {
        return Err(Error::BitWidth(width));
    }

    let mut value: u64 = 0;
    for c in bits.chars() {
        let digit = c.to_digit(2).ok_or(Error::InvalidBinary(c))?;
        value = value << 1 | u64::from(digit);
    }

    // sign extend from the top digit
    let unused = 64 - width as u32;
    Ok(((value << unused) as i64) >> unused)
}
