use std::process::ExitCode;

use ambient_sense::drivers::{aht10, mcp9801, sht30};
use ambient_sense::transport::Bus;
use ambient_sense::{Capability, ChipKind, acquire};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use linux_embedded_hal::{Delay, I2cdev};

mod degree;
mod output;

use output::Mode;

const USAGE_ERROR: u8 = 1;

// ----------------------------------------------------------------------------
// Command-line Interface

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Chip {
    Mcp9801,
    Aht10,
    Sht30,
}

impl From<Chip> for ChipKind {
    fn from(chip: Chip) -> Self {
        match chip {
            Chip::Mcp9801 => ChipKind::Mcp9801,
            Chip::Aht10 => ChipKind::Aht10,
            Chip::Sht30 => ChipKind::Sht30,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Resolution {
    #[value(name = "9")]
    Bits9,
    #[value(name = "10")]
    Bits10,
    #[value(name = "11")]
    Bits11,
    #[value(name = "12")]
    Bits12,
}

impl From<Resolution> for mcp9801::Resolution {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Bits9 => mcp9801::Resolution::Bits9,
            Resolution::Bits10 => mcp9801::Resolution::Bits10,
            Resolution::Bits11 => mcp9801::Resolution::Bits11,
            Resolution::Bits12 => mcp9801::Resolution::Bits12,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Repeatability {
    High,
    Medium,
    Low,
}

impl From<Repeatability> for sht30::Repeatability {
    fn from(repeatability: Repeatability) -> Self {
        match repeatability {
            Repeatability::High => sht30::Repeatability::High,
            Repeatability::Medium => sht30::Repeatability::Medium,
            Repeatability::Low => sht30::Repeatability::Low,
        }
    }
}

/// Read temperature (and humidity, where the chip has it) from an I2C sensor.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Sensor chip to read.
    #[arg(short, long, value_enum)]
    chip: Chip,
    /// I2C bus number, opened as /dev/i2c-<BUS>.
    #[arg(long, default_value_t = 1)]
    bus: u8,
    /// Device address, if not the chip's default.
    #[arg(short, long, value_parser = parse_address)]
    address: Option<u8>,
    /// Print the temperature only, as a bare number.
    #[arg(short, long, conflicts_with = "humidity")]
    bare: bool,
    /// Print the humidity only, as a bare number.
    #[arg(short = 'H', long)]
    humidity: bool,
    /// Print the raw sensor values as well.
    #[arg(short, long)]
    raw: bool,
    /// AHT10: fail if the calibrate command cannot be sent.
    #[arg(long)]
    strict: bool,
    /// AHT10: soft-reset the sensor before calibrating.
    #[arg(long)]
    soft_reset: bool,
    /// MCP9801: ADC resolution in bits.
    #[arg(long, value_enum, default_value = "12")]
    resolution: Resolution,
    /// SHT30: measurement repeatability.
    #[arg(long, value_enum, default_value = "high")]
    repeatability: Repeatability,
    /// SHT30: use the clock-stretching measurement command.
    #[arg(long)]
    clock_stretch: bool,
    /// SHT30: validate the CRC bytes of the measurement.
    #[arg(long)]
    crc: bool,
    /// More log output (repeat for more).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.bare {
            Mode::BareTemperature
        } else if self.humidity {
            Mode::BareHumidity
        } else {
            Mode::Full
        }
    }

    fn config(&self) -> ambient_sense::Config {
        ambient_sense::Config {
            mcp9801: mcp9801::Config {
                resolution: self.resolution.into(),
                ..Default::default()
            },
            aht10: aht10::Config {
                soft_reset: self.soft_reset,
                strict: self.strict,
            },
            sht30: sht30::Config {
                repeatability: self.repeatability.into(),
                mode: if self.clock_stretch {
                    sht30::MeasureMode::ClockStretching
                } else {
                    sht30::MeasureMode::FixedDelay
                },
                should_validate_crc: self.crc,
                ..Default::default()
            },
        }
    }
}

fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address `{s}`: {e}"))
}

// ----------------------------------------------------------------------------
// Application

fn open_bus(bus: u8, address: u8) -> Result<Bus<I2cdev>> {
    let path = format!("/dev/i2c-{bus}");
    let i2c = I2cdev::new(&path).with_context(|| format!("cannot open {path}"))?;
    Bus::bind(i2c, address).map_err(|e| anyhow::anyhow!("{e}"))
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(USAGE_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_module("ambient", level)
        .filter_module("ambient_sense", level)
        .parse_default_env()
        .init();

    let chip = ChipKind::from(cli.chip);
    let mode = cli.mode();
    if mode == Mode::BareHumidity && !chip.capability().contains(Capability::HUMIDITY) {
        eprintln!("Error: {chip} does not measure humidity");
        return ExitCode::from(USAGE_ERROR);
    }

    let address = cli.address.unwrap_or_else(|| chip.default_address());
    let mut bus = match open_bus(cli.bus, address) {
        Ok(bus) => bus,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(USAGE_ERROR);
        }
    };

    let result = acquire(chip, &mut bus, &mut Delay, &cli.config());
    drop(bus);

    let reading = match result {
        Ok(reading) => reading,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    if cli.raw {
        println!("{}", output::raw_line(reading.raw()));
    }
    match output::render(chip, &reading, mode, degree::suffix()) {
        Some(text) => println!("{text}"),
        None => {
            log::error!("{chip} reading has no value for {mode:?}");
            return ExitCode::from(2);
        }
    }

    ExitCode::SUCCESS
}
