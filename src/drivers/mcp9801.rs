//! Microchip MCP9801 ambient temperature sensor.
//!
//! One acquisition checks the configuration register, fixes the ADC
//! resolution if needed, and reads the temperature register as a word.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;

use crate::conversions;
use crate::error::Error;
use crate::transport::Transport;

pub const DEFAULT_ADDRESS: SevenBitAddress = 0x4F;

const TEMPERATURE_REGISTER: u8 = 0x00;
const CONFIG_REGISTER: u8 = 0x01;

/// Time for the first conversion after the resolution changes. A 12-bit
/// conversion takes up to 240ms (datasheet table 1-1).
pub const SETTLE_MS: u32 = 330;

/// ADC resolution, selected by bits 5 and 6 of the configuration register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 0.5°C
    Bits9,
    /// 0.25°C
    Bits10,
    /// 0.125°C
    Bits11,
    /// 0.0625°C
    Bits12,
}

impl Resolution {
    /// Configuration register value selecting this resolution, with every
    /// other option (shutdown, comparator, fault queue, one-shot) cleared.
    pub fn config_byte(&self) -> u8 {
        match self {
            Resolution::Bits9 => 0x00,
            Resolution::Bits10 => 0x20,
            Resolution::Bits11 => 0x40,
            Resolution::Bits12 => 0x60,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub resolution: Resolution,
    pub settle_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: Resolution::Bits12,
            settle_ms: SETTLE_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Temperature register as returned by an SMBus word read.
    pub raw_word: u16,
}

impl Measurement {
    pub fn celsius(&self) -> f32 {
        conversions::mcp9801_word_to_celsius(self.raw_word)
    }

    /// Two's-complement interpretation of the register, correct below 0°C.
    pub fn signed_celsius(&self) -> f32 {
        conversions::mcp9801_word_to_signed_celsius(self.raw_word)
    }

    #[cfg(feature = "fixed")]
    pub fn celsius_fixed_point(&self) -> fixed::types::I16F16 {
        conversions::fixed_point::mcp9801_word_to_celsius(self.raw_word)
    }
}

pub struct Mcp9801<T: Transport> {
    transport: T,
    pub config: Config,
}

impl<T: Transport> Mcp9801<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn destroy(self) -> T {
        self.transport
    }

    /// Read the configuration register.
    pub fn read_config(&mut self) -> Result<u8, Error<T::Error>> {
        self.transport
            .read_byte_data(CONFIG_REGISTER)
            .map_err(Error::RegisterRead)
    }

    /// Make sure the configured resolution is active, then read the
    /// temperature register.
    pub fn measure(&mut self, mut delay: impl DelayNs) -> Result<Measurement, Error<T::Error>> {
        let wanted = self.config.resolution.config_byte();
        let current = self.read_config()?;

        if current != wanted {
            log::warn!("Wrong config 0x{current:02x}. Setting it to 0x{wanted:02x}");
            if let Err(e) = self.transport.write_byte_data(CONFIG_REGISTER, wanted) {
                log::warn!("config write failed: {:?}", e);
            }
            delay.delay_ms(self.config.settle_ms);
        }

        let raw_word = self
            .transport
            .read_word_data(TEMPERATURE_REGISTER)
            .map_err(Error::RegisterRead)?;
        log::debug!("MCP9801 raw=0x{raw_word:04x}");

        Ok(Measurement { raw_word })
    }
}
