//! Sensirion SHT30 temperature and humidity sensor, single-shot mode.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;

use crate::conversions;
use crate::crc;
use crate::error::{CrcFailureReason, Error};
use crate::transport::Transport;

pub const DEFAULT_ADDRESS: SevenBitAddress = 0x44;
/// Address with the ADDR pin pulled high.
pub const ALTERNATE_ADDRESS: SevenBitAddress = 0x45;

const DATA_REGISTER: u8 = 0x00;

/// Wait between the measurement command and the data read when clock
/// stretching is off. The slowest (high repeatability) conversion takes at
/// most 15.5ms.
pub const SETTLE_MS: u32 = 20;

/// Measurement repeatability, selected by the second command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Repeatability {
    #[default]
    High,
    Medium,
    Low,
}

/// How the sensor signals that the conversion has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasureMode {
    /// Wait a fixed settle delay before reading.
    #[default]
    FixedDelay,
    /// Read straight away; the sensor holds SCL low until data is ready.
    /// Needs a bus master that supports clock stretching.
    ClockStretching,
}

impl MeasureMode {
    /// Two-byte single-shot measurement command (SHT3x-DIS datasheet,
    /// table 9).
    pub fn command(&self, repeatability: Repeatability) -> [u8; 2] {
        use MeasureMode::{ClockStretching, FixedDelay};
        use Repeatability::{High, Low, Medium};

        match (self, repeatability) {
            (ClockStretching, High) => [0x2C, 0x06],
            (ClockStretching, Medium) => [0x2C, 0x0D],
            (ClockStretching, Low) => [0x2C, 0x10],
            (FixedDelay, High) => [0x24, 0x00],
            (FixedDelay, Medium) => [0x24, 0x0B],
            (FixedDelay, Low) => [0x24, 0x16],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub repeatability: Repeatability,
    pub mode: MeasureMode,
    pub settle_ms: u32,
    pub should_validate_crc: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repeatability: Repeatability::High,
            mode: MeasureMode::FixedDelay,
            settle_ms: SETTLE_MS,
            should_validate_crc: false,
        }
    }
}

/// The 6 bytes read from the sensor: two data bytes and a CRC byte for
/// temperature, then the same for humidity.
pub(crate) struct Unvalidated([u8; 6]);

impl Unvalidated {
    pub(crate) fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// The data bytes `[t0, t1, h0, h1]` after checking both CRC bytes.
    pub(crate) fn try_get_bytes<I>(self) -> Result<[u8; 4], Error<I>>
    where
        I: embedded_hal::i2c::Error,
    {
        let bytes = self.0;
        if !crc::is_valid(&bytes[0..3]) {
            return Err(Error::CrcValidationFailed(CrcFailureReason::TemperatureBytes));
        }
        if !crc::is_valid(&bytes[3..6]) {
            return Err(Error::CrcValidationFailed(CrcFailureReason::HumidityBytes));
        }
        Ok(self.get_bytes_unchecked())
    }

    /// The data bytes `[t0, t1, h0, h1]`, ignoring the CRC bytes.
    pub(crate) fn get_bytes_unchecked(&self) -> [u8; 4] {
        let [t0, t1, _, h0, h1, _] = self.0;
        [t0, t1, h0, h1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    pub raw_temperature_reading: u16,
    pub raw_humidity_reading: u16,
}

impl Measurement {
    fn from_data_bytes([t0, t1, h0, h1]: [u8; 4]) -> Self {
        Self {
            raw_temperature_reading: u16::from_be_bytes([t0, t1]),
            raw_humidity_reading: u16::from_be_bytes([h0, h1]),
        }
    }

    pub fn celsius(&self) -> f32 {
        conversions::sht30_temperature_to_celsius(self.raw_temperature_reading)
    }

    pub fn humidity(&self) -> f32 {
        conversions::sht30_humidity_to_percent_rh(self.raw_humidity_reading)
    }

    #[cfg(feature = "fixed")]
    pub fn celsius_fixed_point(&self) -> fixed::types::I16F16 {
        conversions::fixed_point::sht30_temperature_to_celsius(self.raw_temperature_reading)
    }

    #[cfg(feature = "fixed")]
    pub fn humidity_fixed_point(&self) -> fixed::types::I16F16 {
        conversions::fixed_point::sht30_humidity_to_percent_rh(self.raw_humidity_reading)
    }
}

pub struct Sht30<T: Transport> {
    transport: T,
    pub config: Config,
}

impl<T: Transport> Sht30<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn destroy(self) -> T {
        self.transport
    }

    /// Measure temperature and humidity with the settings provided upon
    /// construction of the sensor struct.
    pub fn measure(&mut self, mut delay: impl DelayNs) -> Result<Measurement, Error<T::Error>> {
        let [command, argument] = self.config.mode.command(self.config.repeatability);
        self.transport
            .write_byte_data(command, argument)
            .map_err(Error::MeasureSend)?;

        if self.config.mode == MeasureMode::FixedDelay {
            delay.delay_ms(self.config.settle_ms);
        }

        let block: [u8; 6] = self
            .transport
            .read_block_data(DATA_REGISTER)
            .map_err(Error::BlockRead)?;
        log::debug!("SHT30 block {block:02x?}");

        let data = Unvalidated::new(block);
        let bytes = if self.config.should_validate_crc {
            data.try_get_bytes()?
        } else {
            data.get_bytes_unchecked()
        };
        Ok(Measurement::from_data_bytes(bytes))
    }
}
