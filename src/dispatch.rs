//! Chip selection and normalization of driver results into a [`Reading`].

use embedded_hal::delay::DelayNs;

use crate::drivers::{Aht10, Mcp9801, Sht30, aht10, mcp9801, sht30};
use crate::error::Error;
use crate::transport::Transport;
use crate::types::{ChipKind, RawValue, Reading};

/// Settings for every driver. Only the entry for the selected chip is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub mcp9801: mcp9801::Config,
    pub aht10: aht10::Config,
    pub sht30: sht30::Config,
}

impl From<mcp9801::Measurement> for Reading {
    fn from(m: mcp9801::Measurement) -> Self {
        Reading::new(Some(m.celsius()), None, RawValue::Word(m.raw_word))
    }
}

impl From<aht10::Measurement> for Reading {
    fn from(m: aht10::Measurement) -> Self {
        Reading::new(
            Some(m.celsius()),
            Some(m.humidity()),
            RawValue::Packed20 {
                temperature: m.raw_temperature,
                humidity: m.raw_humidity,
            },
        )
    }
}

impl From<sht30::Measurement> for Reading {
    fn from(m: sht30::Measurement) -> Self {
        Reading::new(
            Some(m.celsius()),
            Some(m.humidity()),
            RawValue::Linear16 {
                temperature: m.raw_temperature_reading,
                humidity: m.raw_humidity_reading,
            },
        )
    }
}

/// Run one acquisition cycle on `chip`.
///
/// `transport` must already be bound to the chip's address. Only the
/// selected driver touches the bus, and driver errors are returned as they
/// are. Nothing is retried at this level.
pub fn acquire<T, D>(
    chip: ChipKind,
    transport: &mut T,
    delay: &mut D,
    config: &Config,
) -> Result<Reading, Error<T::Error>>
where
    T: Transport,
    D: DelayNs,
{
    log::debug!("acquiring from {chip}");
    let reading = match chip {
        ChipKind::Mcp9801 => Mcp9801::new(transport, config.mcp9801)
            .measure(delay)
            .map(Reading::from),
        ChipKind::Aht10 => Aht10::new(transport, config.aht10)
            .measure(delay)
            .map(Reading::from),
        ChipKind::Sht30 => Sht30::new(transport, config.sht30)
            .measure(delay)
            .map(Reading::from),
    };

    match &reading {
        Ok(r) => log::debug!("{chip}: {r:?}"),
        Err(e) => log::debug!("{chip}: {e}"),
    }
    reading
}
