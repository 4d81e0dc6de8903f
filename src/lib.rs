//! PCA9685 Rust Driver
//!
//! `no_std` driver for the NXP PCA9685 16-channel, 12-bit PWM controller on I2C.
//! Blocking access goes through `embedded-hal` 1.0; the `async` feature adds
//! `embedded-hal-async` methods with an `_async` suffix, and `defmt` enables
//! formatting derives plus debug logging.
//!
//! ```no_run
//! # fn demo<I2C: embedded_hal::i2c::I2c>(i2c: I2C) -> Result<(), pca9685_rs::Error<I2C::Error>> {
//! use embedded_hal::digital::PinState;
//! use pca9685_rs::Pca9685;
//!
//! let mut pwm = Pca9685::new(i2c);
//! pwm.init_default()?;
//! pwm.set_frequency(50, 0)?;
//! pwm.set_pwm(0, 0, 307)?; // ~1.5 ms pulse at 50 Hz
//! pwm.digital_write(15, PinState::High)?;
//! # Ok(())
//! # }
//! ```

#![no_std]

mod fmt;

pub mod data_types;
pub mod driver;
pub mod error;
pub mod registers;

pub use data_types::{OutputChange, OutputConfig, OutputDriver, OutputNotEnable, SubCall};
pub use driver::Pca9685;
pub use error::{Error, Status};
pub use registers::{DEFAULT_I2C_ADDRESS, DEFAULT_MODE1, DEFAULT_MODE2};
