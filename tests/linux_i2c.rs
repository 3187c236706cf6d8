//! Smoke tests against real sensors on /dev/i2c-1.
//!
//! Run with `cargo test -- --ignored` on a board with the sensor attached.

use ambient_sense::transport::Bus;
use ambient_sense::{Capability, ChipKind, Config, acquire};
use embedded_hal_mock::eh1::delay::StdSleep;
use linux_embedded_hal::I2cdev;

fn read(chip: ChipKind) -> anyhow::Result<()> {
    let dev = I2cdev::new("/dev/i2c-1")?;
    let mut bus = Bus::bind(dev, chip.default_address()).map_err(|e| anyhow::anyhow!("{e}"))?;

    let reading = acquire(chip, &mut bus, &mut StdSleep::new(), &Config::default())
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("{chip}: {reading:?}");

    assert_eq!(reading.capability(), chip.capability());
    let celsius = reading.temperature().expect("temperature");
    assert!((-40.0..=85.0).contains(&celsius), "{celsius}");
    if reading.capability().contains(Capability::HUMIDITY) {
        let rh = reading.humidity().expect("humidity");
        assert!((0.0..=100.0).contains(&rh), "{rh}");
    }
    Ok(())
}

#[test]
#[ignore = "needs an MCP9801 on /dev/i2c-1"]
fn mcp9801() -> anyhow::Result<()> {
    read(ChipKind::Mcp9801)
}

#[test]
#[ignore = "needs an AHT10 on /dev/i2c-1"]
fn aht10() -> anyhow::Result<()> {
    read(ChipKind::Aht10)
}

#[test]
#[ignore = "needs an SHT30 on /dev/i2c-1"]
fn sht30() -> anyhow::Result<()> {
    read(ChipKind::Sht30)
}
