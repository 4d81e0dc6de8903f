//! Data types for PCA9685 driver.

use crate::registers::{addr, Mode1Bits, Mode2Bits};

/// One of the three sub-call group addresses.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubCall {
    Sub1,
    Sub2,
    Sub3,
}

impl SubCall {
    /// MODE1 bit enabling this sub-call address.
    pub fn mode1_bit(self) -> Mode1Bits {
        match self {
            SubCall::Sub1 => Mode1Bits::SUB1,
            SubCall::Sub2 => Mode1Bits::SUB2,
            SubCall::Sub3 => Mode1Bits::SUB3,
        }
    }

    /// SUBADRn register.
    pub fn register(self) -> u8 {
        match self {
            SubCall::Sub1 => addr::SUBADR1,
            SubCall::Sub2 => addr::SUBADR2,
            SubCall::Sub3 => addr::SUBADR3,
        }
    }
}

/// Accepts `1..=3`; any other number is handed back unchanged.
impl TryFrom<u8> for SubCall {
    type Error = u8;

    fn try_from(nr: u8) -> Result<Self, Self::Error> {
        match nr {
            1 => Ok(SubCall::Sub1),
            2 => Ok(SubCall::Sub2),
            3 => Ok(SubCall::Sub3),
            other => Err(other),
        }
    }
}

/// When outputs latch new values (MODE2.OCH).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputChange {
    /// On I2C STOP (reset default).
    OnStop,
    /// On each byte ACK.
    OnAck,
}

/// Output stage structure (MODE2.OUTDRV).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputDriver {
    OpenDrain,
    TotemPole,
}

/// Output state while the OE pin is high (MODE2.OUTNE[1:0]).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputNotEnable {
    /// LEDn = 0.
    Low,
    /// LEDn = 1 with totem-pole outputs, high-impedance with open-drain.
    High,
    HighImpedance,
}

impl OutputNotEnable {
    pub(crate) fn bits(self) -> Mode2Bits {
        match self {
            OutputNotEnable::Low => Mode2Bits::empty(),
            OutputNotEnable::High => Mode2Bits::OUTNE0,
            OutputNotEnable::HighImpedance => Mode2Bits::OUTNE1,
        }
    }
}

/// Decoded MODE2.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OutputConfig {
    pub inverted: bool,
    pub change: OutputChange,
    pub driver: OutputDriver,
    pub not_enable: OutputNotEnable,
}

impl From<Mode2Bits> for OutputConfig {
    fn from(bits: Mode2Bits) -> Self {
        let not_enable = if bits.contains(Mode2Bits::OUTNE1) {
            OutputNotEnable::HighImpedance
        } else if bits.contains(Mode2Bits::OUTNE0) {
            OutputNotEnable::High
        } else {
            OutputNotEnable::Low
        };
        Self {
            inverted: bits.contains(Mode2Bits::INVRT),
            change: if bits.contains(Mode2Bits::OCH) {
                OutputChange::OnAck
            } else {
                OutputChange::OnStop
            },
            driver: if bits.contains(Mode2Bits::OUTDRV) {
                OutputDriver::TotemPole
            } else {
                OutputDriver::OpenDrain
            },
            not_enable,
        }
    }
}
