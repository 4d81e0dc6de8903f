//! Error definitions for PCA9685 driver.

/// Closed set of outcome codes kept in the driver's sticky status slot.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Status {
    #[default]
    Ok,
    /// Channel index was not below the configured channel count.
    Channel,
    /// Register id passed to a mode accessor was neither MODE1 nor MODE2.
    Mode,
    /// Bus transaction failed (NACK, short read, arbitration loss, timeout).
    I2c,
}

impl Status {
    /// Single-byte code for compact logging: `0x00` OK, errors counting down from `0xFF`.
    pub fn code(self) -> u8 {
        match self {
            Status::Ok => 0x00,
            Status::Channel => 0xFF,
            Status::Mode => 0xFE,
            Status::I2c => 0xFD,
        }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug)]
pub enum Error<I2cError> {
    /// Underlying I2C transaction failed.
    I2c(I2cError),
    /// Channel index outside the configured channel count.
    Channel,
    /// Register is not one of the two mode registers.
    Mode,
}

impl<I2cError> Error<I2cError> {
    /// Status code recorded for this error.
    pub fn status(&self) -> Status {
        match self {
            Error::I2c(_) => Status::I2c,
            Error::Channel => Status::Channel,
            Error::Mode => Status::Mode,
        }
    }
}

impl<I2cError: core::fmt::Debug> core::fmt::Display for Error<I2cError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Error::Channel => write!(f, "channel index out of range"),
            Error::Mode => write!(f, "register is not a mode register"),
        }
    }
}
