//! Text rendering of a reading for each output mode.

use ambient_sense::{ChipKind, RawValue, Reading};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `Temp=` and, when measured, `Humi=` lines.
    Full,
    /// Temperature only, number alone.
    BareTemperature,
    /// Humidity only, number alone.
    BareHumidity,
}

pub fn raw_line(raw: RawValue) -> String {
    match raw {
        RawValue::Word(word) => format!("Raw=0x{word:04x}"),
        RawValue::Packed20 {
            temperature,
            humidity,
        } => format!("Raw=T:0x{temperature:05x} H:0x{humidity:05x}"),
        RawValue::Linear16 {
            temperature,
            humidity,
        } => format!("Raw=T:0x{temperature:04x} H:0x{humidity:04x}"),
    }
}

/// Render `reading` in `mode`. Returns `None` if the reading lacks the
/// quantity the mode asks for.
pub fn render(chip: ChipKind, reading: &Reading, mode: Mode, degrees: &str) -> Option<String> {
    match mode {
        Mode::Full => {
            let temperature = reading.temperature()?;
            let precision = match chip {
                ChipKind::Mcp9801 => 1,
                ChipKind::Aht10 | ChipKind::Sht30 => 2,
            };
            let mut text = format!("Temp={temperature:.precision$}{degrees}");
            if let Some(humidity) = reading.humidity() {
                text.push_str(&format!("\nHumi={humidity:.1}%"));
            }
            Some(text)
        }
        Mode::BareTemperature => reading.temperature().map(|t| format!("{t:.2}")),
        Mode::BareHumidity => reading.humidity().map(|h| format!("{h:.1}")),
    }
}
