//! Aosong AHT10 temperature and humidity sensor.
//!
//! The AHT10 reports a status byte on any plain read. Bit 7 is set while the
//! chip is busy and bit 3 once its calibration coefficients are loaded.
//! An acquisition calibrates, triggers one measurement, waits for the busy
//! bit to clear, and reads six bytes: the status byte followed by two
//! packed 20-bit fields.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;

use crate::conversions;
use crate::error::Error;
use crate::poll::{PollBudget, PollOutcome, ProbeStatus};
use crate::transport::Transport;

pub const DEFAULT_ADDRESS: SevenBitAddress = 0x38;
/// Address with the ADR pin pulled high.
pub const ALTERNATE_ADDRESS: SevenBitAddress = 0x39;

const CMD_CALIBRATE: u8 = 0xE1;
const CMD_TRIGGER: u8 = 0xAC;
const CMD_SOFT_RESET: u8 = 0xBA;
const CALIBRATE_ARGS: [u8; 2] = [0x08, 0x00];
const TRIGGER_ARGS: [u8; 2] = [0x33, 0x00];
const DATA_REGISTER: u8 = 0x00;

const STATUS_BUSY: u8 = 0x80;
const STATUS_CALIBRATED: u8 = 0x08;

/// Fixed wait after a soft reset before polling starts.
pub const RESET_SETTLE_MS: u32 = 20;
pub const RESET_POLL: PollBudget = PollBudget::new(10, 20);
pub const CALIBRATE_POLL: PollBudget = PollBudget::new(10, 20);
pub const TRIGGER_POLL: PollBudget = PollBudget::new(20, 20);

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Issue a soft reset before calibrating.
    pub soft_reset: bool,
    /// Fail the acquisition if the calibrate command cannot be sent.
    /// Otherwise the failure is logged and the status check after
    /// calibration decides.
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// 20-bit humidity field.
    pub raw_humidity: u32,
    /// 20-bit temperature field.
    pub raw_temperature: u32,
}

impl Measurement {
    pub(crate) fn from_block(block: [u8; 6]) -> Self {
        let (raw_humidity, raw_temperature) = conversions::aht10_unpack(block);
        Self {
            raw_humidity,
            raw_temperature,
        }
    }

    pub fn celsius(&self) -> f32 {
        conversions::aht10_temperature_to_celsius(self.raw_temperature)
    }

    pub fn humidity(&self) -> f32 {
        conversions::aht10_humidity_to_percent_rh(self.raw_humidity)
    }

    #[cfg(feature = "fixed")]
    pub fn celsius_fixed_point(&self) -> fixed::types::I16F16 {
        conversions::fixed_point::aht10_temperature_to_celsius(self.raw_temperature)
    }

    #[cfg(feature = "fixed")]
    pub fn humidity_fixed_point(&self) -> fixed::types::I16F16 {
        conversions::fixed_point::aht10_humidity_to_percent_rh(self.raw_humidity)
    }
}

pub struct Aht10<T: Transport> {
    transport: T,
    pub config: Config,
}

impl<T: Transport> Aht10<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn destroy(self) -> T {
        self.transport
    }

    /// Read the status byte.
    pub fn status(&mut self) -> Result<u8, T::Error> {
        self.transport.read_byte()
    }

    fn probe(transport: &mut T) -> ProbeStatus {
        match transport.read_byte() {
            Ok(status) if status & STATUS_BUSY != 0 => ProbeStatus::Busy,
            Ok(_) => ProbeStatus::Ready,
            Err(_) => ProbeStatus::ProbeFailed,
        }
    }

    fn wait_ready(&mut self, delay: &mut impl DelayNs, budget: PollBudget) -> PollOutcome {
        let transport = &mut self.transport;
        budget.poll(delay, || Self::probe(transport))
    }

    pub fn soft_reset(&mut self, mut delay: impl DelayNs) -> Result<(), Error<T::Error>> {
        self.transport
            .write_byte(CMD_SOFT_RESET)
            .map_err(Error::ResetSend)?;
        delay.delay_ms(RESET_SETTLE_MS);

        match self.wait_ready(&mut delay, RESET_POLL) {
            PollOutcome::Ready => Ok(()),
            PollOutcome::TimedOut => Err(Error::ResetTimeout),
        }
    }

    /// Load the calibration coefficients and check the calibrated flag.
    pub fn calibrate(&mut self, mut delay: impl DelayNs) -> Result<(), Error<T::Error>> {
        if let Err(e) = self
            .transport
            .write_block_data(CMD_CALIBRATE, CALIBRATE_ARGS)
        {
            if self.config.strict {
                return Err(Error::CalibrateSend(e));
            }
            log::warn!("send calibrate cmd failed, continuing: {:?}", e);
        }

        if self.wait_ready(&mut delay, CALIBRATE_POLL) == PollOutcome::TimedOut {
            return Err(Error::CalibrateTimeout);
        }

        match self.status() {
            Ok(status) if status & STATUS_CALIBRATED != 0 => Ok(()),
            Ok(status) => {
                log::debug!("AHT10 status 0x{status:02x} after calibration");
                Err(Error::CalibrationFailed)
            }
            Err(e) => {
                log::debug!("AHT10 status unreadable after calibration: {:?}", e);
                Err(Error::CalibrationFailed)
            }
        }
    }

    /// Run the full acquisition sequence.
    pub fn measure(&mut self, mut delay: impl DelayNs) -> Result<Measurement, Error<T::Error>> {
        if self.config.soft_reset {
            self.soft_reset(&mut delay)?;
        }
        self.calibrate(&mut delay)?;

        self.transport
            .write_block_data(CMD_TRIGGER, TRIGGER_ARGS)
            .map_err(Error::TriggerSend)?;
        if self.wait_ready(&mut delay, TRIGGER_POLL) == PollOutcome::TimedOut {
            return Err(Error::TriggerTimeout);
        }

        let block: [u8; 6] = self
            .transport
            .read_block_data(DATA_REGISTER)
            .map_err(Error::BlockRead)?;
        log::debug!("AHT10 block {block:02x?}");

        Ok(Measurement::from_block(block))
    }
}
