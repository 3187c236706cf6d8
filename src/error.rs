/// Which pair of data bytes failed CRC validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CrcFailureReason {
    TemperatureBytes,
    HumidityBytes,
}

impl core::fmt::Display for CrcFailureReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CrcFailureReason::TemperatureBytes => write!(f, "temperature bytes"),
            CrcFailureReason::HumidityBytes => write!(f, "humidity bytes"),
        }
    }
}

/// Failure of one acquisition step.
///
/// Each variant names the step that failed. Variants carrying `I2cError`
/// wrap the bus error reported by the transport for that step. Every error
/// is terminal for the acquisition in progress.
#[derive(Debug)]
pub enum Error<I2cError>
where
    I2cError: embedded_hal::i2c::Error,
{
    /// The bus could not be bound to the given address.
    BusSetup(u8),
    /// MCP9801 configuration or temperature register read failed.
    RegisterRead(I2cError),
    /// AHT10 soft-reset command could not be sent.
    ResetSend(I2cError),
    /// AHT10 stayed busy after a soft reset.
    ResetTimeout,
    /// AHT10 calibrate command could not be sent (strict mode only).
    CalibrateSend(I2cError),
    /// AHT10 stayed busy after the calibrate command.
    CalibrateTimeout,
    /// AHT10 did not report itself as calibrated.
    CalibrationFailed,
    /// AHT10 trigger-measurement command could not be sent.
    TriggerSend(I2cError),
    /// AHT10 stayed busy after the trigger command.
    TriggerTimeout,
    /// The measurement data block could not be read.
    BlockRead(I2cError),
    /// SHT30 measurement command could not be sent.
    MeasureSend(I2cError),
    /// SHT30 data failed CRC validation (only checked when enabled).
    CrcValidationFailed(CrcFailureReason),
}

impl<I2cError> Error<I2cError>
where
    I2cError: embedded_hal::i2c::Error,
{
    /// Process exit code for this error: 1 for bus setup problems,
    /// 2 for failures during acquisition.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::BusSetup(_) => 1,
            _ => 2,
        }
    }

    /// The underlying bus error, if the step failed on a transport call.
    pub fn i2c_error(&self) -> Option<&I2cError> {
        match self {
            Error::RegisterRead(e)
            | Error::ResetSend(e)
            | Error::CalibrateSend(e)
            | Error::TriggerSend(e)
            | Error::BlockRead(e)
            | Error::MeasureSend(e) => Some(e),
            _ => None,
        }
    }
}

impl<I2cError> core::fmt::Display for Error<I2cError>
where
    I2cError: embedded_hal::i2c::Error,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BusSetup(address) => {
                write!(f, "cannot bind bus to address 0x{address:02x}")
            }
            Error::RegisterRead(e) => write!(f, "register read failed: {:?}", e.kind()),
            Error::ResetSend(e) => write!(f, "reset failed: {:?}", e.kind()),
            Error::ResetTimeout => write!(f, "reset busy timeout"),
            Error::CalibrateSend(e) => {
                write!(f, "send calibrate cmd failed: {:?}", e.kind())
            }
            Error::CalibrateTimeout => write!(f, "calibrate busy timeout"),
            Error::CalibrationFailed => write!(f, "calibration failed"),
            Error::TriggerSend(e) => write!(f, "send trigger cmd failed: {:?}", e.kind()),
            Error::TriggerTimeout => write!(f, "trigger busy timeout"),
            Error::BlockRead(e) => write!(f, "reading values failed: {:?}", e.kind()),
            Error::MeasureSend(e) => write!(f, "send measure cmd failed: {:?}", e.kind()),
            Error::CrcValidationFailed(location) => {
                write!(f, "CRC validation failed for {location}")
            }
        }
    }
}

impl<I> core::error::Error for Error<I> where I: embedded_hal::i2c::Error {}

#[cfg(test)]
mod test {
    use super::{CrcFailureReason, Error};
    use embedded_hal::i2c::ErrorKind;

    #[test]
    fn only_bus_setup_is_a_setup_error() {
        assert_eq!(Error::<ErrorKind>::BusSetup(0x80).exit_code(), 1);
        assert_eq!(Error::<ErrorKind>::CalibrationFailed.exit_code(), 2);
        assert_eq!(Error::BlockRead(ErrorKind::Other).exit_code(), 2);
    }

    #[test]
    fn transport_error_is_kept() {
        let e = Error::TriggerSend(ErrorKind::Other);
        assert_eq!(e.i2c_error(), Some(&ErrorKind::Other));
        assert_eq!(Error::<ErrorKind>::TriggerTimeout.i2c_error(), None);
    }

    #[test]
    fn crc_failure_names_the_byte_pair() {
        let e = Error::<ErrorKind>::CrcValidationFailed(CrcFailureReason::HumidityBytes);
        assert_eq!(e.to_string(), "CRC validation failed for humidity bytes");
        assert_eq!(e.exit_code(), 2);
        assert_eq!(e.i2c_error(), None);
    }
}
