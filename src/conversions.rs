//! Raw sensor values to degrees Celsius and percent relative humidity.
//!
//! These functions are used by the `Measurement` types of each driver but
//! are provided here should you need to decode values captured elsewhere.
//!
//! The conversions in the root of this module work with and return `f32`s.
//! If you prefer fixed-point numbers, use the `fixed` feature and the
//! [`fixed_point`] submodule.

/// Full scale of the AHT10 20-bit fields.
pub const AHT10_FULL_SCALE: u32 = 1 << 20;

/// Convert an MCP9801 temperature register word (as returned by an SMBus
/// word read) to degrees Celsius.
///
/// The low byte is the integer part; the top nibble of the word holds the
/// fraction in 1/16 °C steps. The word is treated as unsigned, so readings
/// below 0 °C are not represented correctly. See
/// [`mcp9801_word_to_signed_celsius`].
pub fn mcp9801_word_to_celsius(word: u16) -> f32 {
    let integer: f32 = (word & 0xFF).into();
    let sixteenths: f32 = (word >> 12).into();
    integer + sixteenths / 16.0
}

/// Convert an MCP9801 temperature register word to degrees Celsius,
/// interpreting the register as a two's-complement value.
///
/// The register holds the integer part in its first byte (the low byte of
/// the SMBus word) and the fraction in the upper bits of its second byte.
pub fn mcp9801_word_to_signed_celsius(word: u16) -> f32 {
    let register = i16::from_be_bytes(word.to_le_bytes());
    f32::from(register >> 4) / 16.0
}

/// Split an AHT10 data block into its 20-bit `(humidity, temperature)`
/// fields.
///
/// Byte 0 is the status byte. Humidity occupies bytes 1 and 2 plus the high
/// nibble of byte 3; temperature occupies the low nibble of byte 3 and
/// bytes 4 and 5.
pub fn aht10_unpack(block: [u8; 6]) -> (u32, u32) {
    let [_, b1, b2, b3, b4, b5] = block.map(u32::from);
    let humidity = (b1 << 12) | (b2 << 4) | (b3 >> 4);
    let temperature = ((b3 & 0x0F) << 16) | (b4 << 8) | b5;
    (humidity, temperature)
}

/// Convert a 20-bit AHT10 humidity field to percent relative humidity.
pub fn aht10_humidity_to_percent_rh(raw: u32) -> f32 {
    raw as f32 * 100.0 / AHT10_FULL_SCALE as f32
}

/// Convert a 20-bit AHT10 temperature field to degrees Celsius.
pub fn aht10_temperature_to_celsius(raw: u32) -> f32 {
    raw as f32 * 200.0 / AHT10_FULL_SCALE as f32 - 50.0
}

/// Convert a raw SHT30 temperature reading to degrees Celsius.
pub fn sht30_temperature_to_celsius(reading: u16) -> f32 {
    let s_t: f32 = reading.into();
    -45.0 + 175.0 * s_t / 65_535.0
}

/// Convert a raw SHT30 humidity reading to percent relative humidity.
pub fn sht30_humidity_to_percent_rh(reading: u16) -> f32 {
    let s_rh: f32 = reading.into();
    100.0 * s_rh / 65_535.0
}

/// Fixed-point numeric conversions from sensor readings.
///
/// The functions in this module are the same as those in the parent
/// `conversions` module, except that they return `I16F16` values.
/// The AHT10 fields are exactly representable as fractions with 20
/// fractional bits, so the scaling starts from an exact `U12F20`.
#[cfg(feature = "fixed")]
pub mod fixed_point {
    use fixed::types::{I16F16, U12F20, U16F16};

    /// Convert an MCP9801 temperature register word to degrees Celsius,
    /// with the same unsigned interpretation as
    /// [`super::mcp9801_word_to_celsius`].
    pub fn mcp9801_word_to_celsius(word: u16) -> I16F16 {
        I16F16::from_num(word & 0xFF) + I16F16::from_num(word >> 12) / 16
    }

    /// Convert a 20-bit AHT10 humidity field to percent relative humidity.
    pub fn aht10_humidity_to_percent_rh(raw: u32) -> I16F16 {
        let fraction = U12F20::from_bits(raw & 0xF_FFFF);
        I16F16::from_num(100) * I16F16::from_num(fraction)
    }

    /// Convert a 20-bit AHT10 temperature field to degrees Celsius.
    pub fn aht10_temperature_to_celsius(raw: u32) -> I16F16 {
        let fraction = U12F20::from_bits(raw & 0xF_FFFF);
        I16F16::from_num(200) * I16F16::from_num(fraction) - I16F16::from_num(50)
    }

    /// Convert a raw SHT30 temperature reading to degrees Celsius.
    pub fn sht30_temperature_to_celsius(reading: u16) -> I16F16 {
        // Convert u16 reading into a fraction 0..=1
        let fraction: U16F16 = U16F16::from_num(reading) / U16F16::from_num(u16::MAX);
        I16F16::from_num(-45) + I16F16::from_num(175) * I16F16::from_num(fraction)
    }

    /// Convert a raw SHT30 humidity reading to percent relative humidity.
    pub fn sht30_humidity_to_percent_rh(reading: u16) -> I16F16 {
        let fraction: U16F16 = U16F16::from_num(reading) / U16F16::from_num(u16::MAX);
        I16F16::from_num(100) * I16F16::from_num(fraction)
    }

    #[cfg(test)]
    mod test {
        use super::*;

        fn close(value: I16F16, expected: f32) -> bool {
            (value.to_num::<f32>() - expected).abs() < 0.01
        }

        #[test]
        fn matches_float_conversions() {
            assert!(close(mcp9801_word_to_celsius(0x1980), 128.0625));
            assert!(close(aht10_humidity_to_percent_rh(0x666D5), 40.0105));
            assert!(close(aht10_temperature_to_celsius(0xC635D), 104.8517));
            assert!(close(sht30_temperature_to_celsius(0x666D), 25.0187));
            assert!(close(sht30_humidity_to_percent_rh(0x5C63), 36.0891));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "{actual} is not close to {expected}"
        );
    }

    #[test]
    fn mcp9801_whole_degrees() {
        // The integer part sits in the low byte of the SMBus word.
        assert_eq!(mcp9801_word_to_celsius(0x0019), 25.0);
        // 0x1900 carries no integer part, only 1/16 in the top nibble.
        assert_eq!(mcp9801_word_to_celsius(0x1900), 0.0625);
    }

    #[test]
    fn mcp9801_fraction_comes_from_top_nibble() {
        // Low byte 0x80 is the integer part, top nibble 0x1 is 1/16.
        assert_eq!(mcp9801_word_to_celsius(0x1980), 128.0625);
        assert_eq!(mcp9801_word_to_celsius(0x8019), 25.5);
    }

    #[test]
    fn mcp9801_unsigned_interpretation_of_sub_zero() {
        // -0.5 °C is 0xFF 0x80 on the wire.
        assert_eq!(mcp9801_word_to_celsius(0x80FF), 255.5);
        assert_eq!(mcp9801_word_to_signed_celsius(0x80FF), -0.5);
        assert_eq!(mcp9801_word_to_signed_celsius(0x8019), 25.5);
        assert_eq!(mcp9801_word_to_signed_celsius(0x00E7), -25.0);
    }

    #[test]
    fn aht10_reference_block() {
        let (humidity, temperature) = aht10_unpack([0x1C, 0x66, 0x6D, 0x5C, 0x63, 0x5D]);
        assert_eq!(humidity, 0x666D5);
        assert_eq!(temperature, 0xC635D);
        assert_close(aht10_humidity_to_percent_rh(humidity), 40.0105);
        assert_close(aht10_temperature_to_celsius(temperature), 104.8517);
    }

    #[test]
    fn aht10_fields_repack_exactly() {
        fn pack(status: u8, humidity: u32, temperature: u32) -> [u8; 6] {
            [
                status,
                (humidity >> 12) as u8,
                (humidity >> 4) as u8,
                ((humidity & 0x0F) << 4 | (temperature >> 16)) as u8,
                (temperature >> 8) as u8,
                temperature as u8,
            ]
        }

        let blocks = [
            [0x1C, 0x66, 0x6D, 0x5C, 0x63, 0x5D],
            [0x18, 0x00, 0x00, 0x00, 0x00, 0x00],
            [0x1C, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
            [0x98, 0x5A, 0xA5, 0x3C, 0xC3, 0x81],
        ];
        for block in blocks {
            let (humidity, temperature) = aht10_unpack(block);
            assert!(humidity < AHT10_FULL_SCALE && temperature < AHT10_FULL_SCALE);
            assert_eq!(pack(block[0], humidity, temperature), block);
        }
    }

    #[test]
    fn aht10_range_ends() {
        assert_eq!(aht10_temperature_to_celsius(0), -50.0);
        assert_eq!(aht10_humidity_to_percent_rh(0), 0.0);
        assert_close(aht10_temperature_to_celsius(AHT10_FULL_SCALE - 1), 150.0);
        assert_close(aht10_humidity_to_percent_rh(AHT10_FULL_SCALE - 1), 100.0);
    }

    #[test]
    fn sht30_reference_readings() {
        let t = sht30_temperature_to_celsius(0x666D);
        let h = sht30_humidity_to_percent_rh(0x5C63);
        assert_close(t, 25.0187);
        assert_close(h, 36.0891);
        assert_eq!(format!("{t:.2}"), "25.02");
        assert_eq!(format!("{h:.1}"), "36.1");
    }

    #[test]
    fn sht30_range_ends() {
        assert_eq!(sht30_temperature_to_celsius(0), -45.0);
        assert_eq!(sht30_temperature_to_celsius(u16::MAX), 130.0);
        assert_eq!(sht30_humidity_to_percent_rh(u16::MAX), 100.0);
    }
}
