use embedded_hal::i2c::SevenBitAddress;

use crate::drivers;

/// The sensor chips this crate can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipKind {
    /// Microchip MCP9801 temperature sensor.
    Mcp9801,
    /// Aosong AHT10 temperature and humidity sensor.
    Aht10,
    /// Sensirion SHT30 temperature and humidity sensor.
    Sht30,
}

impl ChipKind {
    pub const ALL: [ChipKind; 3] = [ChipKind::Mcp9801, ChipKind::Aht10, ChipKind::Sht30];

    /// Bus address the chip answers on with its address pins at their
    /// default level.
    pub fn default_address(&self) -> SevenBitAddress {
        match self {
            ChipKind::Mcp9801 => drivers::mcp9801::DEFAULT_ADDRESS,
            ChipKind::Aht10 => drivers::aht10::DEFAULT_ADDRESS,
            ChipKind::Sht30 => drivers::sht30::DEFAULT_ADDRESS,
        }
    }

    /// Quantities a successful acquisition from this chip produces.
    pub fn capability(&self) -> Capability {
        match self {
            ChipKind::Mcp9801 => Capability::TEMPERATURE,
            ChipKind::Aht10 | ChipKind::Sht30 => Capability::TEMPERATURE | Capability::HUMIDITY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChipKind::Mcp9801 => "MCP9801",
            ChipKind::Aht10 => "AHT10",
            ChipKind::Sht30 => "SHT30",
        }
    }
}

impl core::fmt::Display for ChipKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// Physical quantities present in a [`Reading`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capability: u8 {
        const TEMPERATURE = 1 << 0;
        const HUMIDITY    = 1 << 1;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Capability {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Capability({=u8:#04x})", self.bits())
    }
}

/// Raw integer values a reading was converted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawValue {
    /// MCP9801 temperature register word.
    Word(u16),
    /// AHT10 20-bit temperature and humidity fields.
    Packed20 { temperature: u32, humidity: u32 },
    /// SHT30 16-bit temperature and humidity readings.
    Linear16 { temperature: u16, humidity: u16 },
}

/// Normalized result of one acquisition.
///
/// The capability bit for a quantity is set exactly when that quantity is
/// present with a finite value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    temperature: Option<f32>,
    humidity: Option<f32>,
    capability: Capability,
    raw: RawValue,
}

impl Reading {
    /// Build a reading, dropping any value that is not finite.
    pub fn new(temperature: Option<f32>, humidity: Option<f32>, raw: RawValue) -> Self {
        let temperature = temperature.filter(|t| t.is_finite());
        let humidity = humidity.filter(|h| h.is_finite());

        let mut capability = Capability::empty();
        capability.set(Capability::TEMPERATURE, temperature.is_some());
        capability.set(Capability::HUMIDITY, humidity.is_some());

        Self {
            temperature,
            humidity,
            capability,
            raw,
        }
    }

    /// Temperature in degrees Celsius.
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Relative humidity in percent.
    pub fn humidity(&self) -> Option<f32> {
        self.humidity
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn raw(&self) -> RawValue {
        self.raw
    }
}
