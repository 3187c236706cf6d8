/// CRC-8 used by the SHT3x family to protect each pair of data bytes.
///
/// Polynomial `0x31` (x^8 + x^5 + x^4 + 1), initial value `0xFF`, no
/// reflection and no final XOR (SHT3x-DIS datasheet, section 4.12).
///
/// Running the CRC over two data bytes followed by their checksum byte
/// yields zero when the checksum matches.
#[must_use]
pub(crate) fn crc8(bytes: &[u8]) -> u8 {
    const POLYNOMIAL: u8 = 0x31;

    bytes.iter().fold(0xFF, |mut crc, byte| {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
        crc
    })
}

/// Check a `[data, data, checksum]` triple.
pub(crate) fn is_valid(triple: &[u8]) -> bool {
    crc8(triple) == 0
}

#[cfg(test)]
mod test {
    use super::{crc8, is_valid};

    #[test]
    #[allow(non_snake_case)]
    fn datasheet_BEEF() {
        assert_eq!(crc8(&[0xBE, 0xEF]), 0x92);
        assert!(is_valid(&[0xBE, 0xEF, 0x92]));
    }

    #[test]
    fn zero_word() {
        assert_eq!(crc8(&[0x00, 0x00]), 0x81);
        assert!(!is_valid(&[0x00, 0x00, 0x80]));
    }
}
