//! Driver for PCA9685.
//! Blocking I2C operations; the async flavour behind the `async` feature mirrors them with an `_async` suffix.
//!
//! Every public operation returns a `Result` and also records its outcome in a sticky
//! status slot that [`Pca9685::last_error`] reads and clears.

use embedded_hal::digital::PinState;

use crate::data_types::{OutputChange, OutputConfig, OutputDriver, OutputNotEnable, SubCall};
use crate::error::{Error, Status};
use crate::fmt::{debug, warning};
use crate::registers::{
    addr, address_to_reg, apply_prescale_offset, channel_register, clamp_frequency, decode_counters,
    encode_counters, encode_full, frequency_to_prescale, prescale_to_frequency, reg_to_address, update_bits,
    Mode1Bits, Mode2Bits, ALL_OFF, CHANNEL_COUNT, DEFAULT_FREQUENCY_HZ, DEFAULT_I2C_ADDRESS, DEFAULT_MODE1,
    DEFAULT_MODE2,
};

/// PCA9685 device handle.
pub struct Pca9685<I2C> {
    i2c: I2C,
    address: u8,
    channel_count: u8,
    frequency: u16,
    last_status: Status,
}

impl<I2C> Pca9685<I2C> {
    /// Create a new driver instance with the default I2C address (0x40).
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Create a new driver instance with a custom 7-bit I2C address. No bus traffic.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            channel_count: CHANNEL_COUNT,
            frequency: DEFAULT_FREQUENCY_HZ,
            last_status: Status::Ok,
        }
    }

    /// Restrict the usable channels to `0..count` (clamped to 1..=16).
    pub fn with_channel_count(mut self, count: u8) -> Self {
        self.channel_count = count.clamp(1, CHANNEL_COUNT);
        self
    }

    /// Return the 7-bit I2C address configured for this instance.
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn channel_count(&self) -> u8 {
        self.channel_count
    }

    /// Release the bus.
    pub fn free(self) -> I2C {
        self.i2c
    }

    /// Return the status of the last operation and reset it to [`Status::Ok`].
    pub fn last_error(&mut self) -> Status {
        core::mem::take(&mut self.last_status)
    }

    fn record<T, E>(&mut self, result: Result<T, Error<E>>) -> Result<T, Error<E>> {
        self.last_status = match &result {
            Ok(_) => Status::Ok,
            Err(e) => e.status(),
        };
        if let Err(Error::I2c(_)) = &result {
            warning!(
                "PCA9685 at {=u8:#x}: I2C transaction failed (status {=u8:#x})",
                self.address,
                self.last_status.code()
            );
        }
        result
    }

    /// Register of `channel`'s block, or `Error::Channel` (recorded) when out of range.
    fn channel_block<E>(&mut self, channel: u8) -> Result<u8, Error<E>> {
        match channel_register(channel) {
            Some(reg) if channel < self.channel_count => Ok(reg),
            _ => {
                warning!("channel {=u8} out of range (count {=u8})", channel, self.channel_count);
                self.record(Err(Error::Channel))
            }
        }
    }

    fn mode_register<E>(&mut self, reg: u8) -> Result<u8, Error<E>> {
        if reg == addr::MODE1 || reg == addr::MODE2 {
            Ok(reg)
        } else {
            warning!("register {=u8:#x} is not a mode register", reg);
            self.record(Err(Error::Mode))
        }
    }
}

impl<I2C> Pca9685<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Probe the device, then apply `mode1`/`mode2`. A missing ACK is returned as `Error::I2c`.
    pub fn init(&mut self, mode1: Mode1Bits, mode2: Mode2Bits) -> Result<(), Error<I2C::Error>> {
        self.probe()?;
        self.configure(mode1, mode2)
    }

    /// [`init`](Self::init) with auto-increment, all-call and totem-pole outputs.
    pub fn init_default(&mut self) -> Result<(), Error<I2C::Error>> {
        self.init(DEFAULT_MODE1, DEFAULT_MODE2)
    }

    /// Write both mode registers unconditionally.
    pub fn configure(&mut self, mode1: Mode1Bits, mode2: Mode2Bits) -> Result<(), Error<I2C::Error>> {
        self.last_status = Status::Ok;
        self.write_reg(addr::MODE1, mode1.bits())?;
        self.write_reg(addr::MODE2, mode2.bits())
    }

    /// Address-only transaction; `true` when the device acknowledged.
    pub fn is_connected(&mut self) -> bool {
        self.probe().is_ok()
    }

    fn probe(&mut self) -> Result<(), Error<I2C::Error>> {
        let result = self.i2c.write(self.address, &[]).map_err(Error::I2c);
        self.record(result)
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        let result = self.i2c.write(self.address, &[reg, value]).map_err(Error::I2c);
        self.record(result)
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        let result = self
            .i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Error::I2c);
        self.record(result)?;
        Ok(buf[0])
    }

    /// Read-modify-write of the `mask` bits; skips the write when nothing changes.
    fn update_reg(&mut self, reg: u8, mask: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        let cur = self.read_reg(reg)?;
        match update_bits(cur, mask, value) {
            Some(new) => self.write_reg(reg, new),
            None => Ok(()),
        }
    }

    fn write_block(&mut self, start_reg: u8, data: [u8; 4]) -> Result<(), Error<I2C::Error>> {
        let buf = [start_reg, data[0], data[1], data[2], data[3]];
        let result = self.i2c.write(self.address, &buf).map_err(Error::I2c);
        self.record(result)
    }

    fn read_block(&mut self, start_reg: u8) -> Result<[u8; 4], Error<I2C::Error>> {
        let mut buf = [0u8; 4];
        let result = self
            .i2c
            .write_read(self.address, &[start_reg], &mut buf)
            .map_err(Error::I2c);
        self.record(result)?;
        Ok(buf)
    }

    /// Write MODE1 or MODE2.
    pub fn write_mode(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        let reg = self.mode_register(reg)?;
        self.write_reg(reg, value)
    }

    /// Read MODE1 or MODE2.
    pub fn read_mode(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let reg = self.mode_register(reg)?;
        self.read_reg(reg)
    }

    /// Set a channel's on/off counters. Both are masked to 12 bits.
    pub fn set_pwm(&mut self, channel: u8, on: u16, off: u16) -> Result<(), Error<I2C::Error>> {
        let reg = self.channel_block(channel)?;
        self.write_block(reg, encode_counters(on, off))
    }

    /// Shorthand for `set_pwm(channel, 0, off)`.
    pub fn set_pwm_off(&mut self, channel: u8, off: u16) -> Result<(), Error<I2C::Error>> {
        self.set_pwm(channel, 0, off)
    }

    /// Read a channel's `(on, off)` registers, full bits included.
    pub fn get_pwm(&mut self, channel: u8) -> Result<(u16, u16), Error<I2C::Error>> {
        let reg = self.channel_block(channel)?;
        let block = self.read_block(reg)?;
        Ok(decode_counters(block))
    }

    /// Drive a channel fully on or fully off via the FULL_ON / FULL_OFF bits.
    pub fn digital_write(&mut self, channel: u8, level: PinState) -> Result<(), Error<I2C::Error>> {
        let reg = self.channel_block(channel)?;
        self.write_block(reg, encode_full(level == PinState::High))
    }

    /// Set the same on/off counters on every channel through the ALL_LED block.
    pub fn set_all_pwm(&mut self, on: u16, off: u16) -> Result<(), Error<I2C::Error>> {
        self.write_block(addr::ALL_LED_ON_L, encode_counters(on, off))
    }

    /// Force every output off with a single ALL_LED_OFF_H write.
    pub fn all_off(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_reg(addr::ALL_LED_OFF_H, ALL_OFF)
    }

    /// Set the PWM frequency for all channels.
    ///
    /// `freq` is clamped to 24..=1526 Hz; `offset` trims the computed pre-scale to
    /// compensate oscillator drift. The chip is put to sleep for the PRE_SCALE write
    /// and MODE1 is written back afterwards, also when the sleep or PRE_SCALE write failed.
    pub fn set_frequency(&mut self, freq: u16, offset: i8) -> Result<(), Error<I2C::Error>> {
        let freq = clamp_frequency(freq);
        let prescale = apply_prescale_offset(frequency_to_prescale(freq), offset);
        debug!("set_frequency: {=u16} Hz, prescale {=u8}", freq, prescale);

        let mode1 = self.read_reg(addr::MODE1)?;
        let sleep = (mode1 & !Mode1Bits::RESTART.bits()) | Mode1Bits::SLEEP.bits();
        // MODE1 goes back even when the sleep write failed; the byte may still have landed
        let written = match self.write_reg(addr::MODE1, sleep) {
            Ok(()) => self.write_reg(addr::PRE_SCALE, prescale),
            Err(e) => Err(e),
        };
        let restored = self.write_reg(addr::MODE1, mode1);
        self.record(written.and(restored))?;

        self.frequency = freq;
        Ok(())
    }

    /// Current PWM frequency, from the cache or recomputed from PRE_SCALE.
    pub fn get_frequency(&mut self, use_cache: bool) -> Result<u16, Error<I2C::Error>> {
        if use_cache {
            self.last_status = Status::Ok;
            return Ok(self.frequency);
        }
        let prescale = self.read_reg(addr::PRE_SCALE)?;
        self.frequency = prescale_to_frequency(prescale);
        Ok(self.frequency)
    }

    pub fn enable_sub_call(&mut self, sub: SubCall) -> Result<(), Error<I2C::Error>> {
        self.set_mode1_flag(sub.mode1_bit(), true)
    }

    pub fn disable_sub_call(&mut self, sub: SubCall) -> Result<(), Error<I2C::Error>> {
        self.set_mode1_flag(sub.mode1_bit(), false)
    }

    pub fn is_enabled_sub_call(&mut self, sub: SubCall) -> Result<bool, Error<I2C::Error>> {
        self.mode1_flag(sub.mode1_bit())
    }

    pub fn enable_all_call(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mode1_flag(Mode1Bits::ALLCALL, true)
    }

    pub fn disable_all_call(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mode1_flag(Mode1Bits::ALLCALL, false)
    }

    pub fn is_enabled_all_call(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.mode1_flag(Mode1Bits::ALLCALL)
    }

    /// Program a sub-call group address. The value is not checked against the device address.
    pub fn set_sub_call_address(&mut self, sub: SubCall, address: u8) -> Result<(), Error<I2C::Error>> {
        self.write_reg(sub.register(), address_to_reg(address))
    }

    pub fn sub_call_address(&mut self, sub: SubCall) -> Result<u8, Error<I2C::Error>> {
        Ok(reg_to_address(self.read_reg(sub.register())?))
    }

    pub fn set_all_call_address(&mut self, address: u8) -> Result<(), Error<I2C::Error>> {
        self.write_reg(addr::ALLCALLADR, address_to_reg(address))
    }

    pub fn all_call_address(&mut self) -> Result<u8, Error<I2C::Error>> {
        Ok(reg_to_address(self.read_reg(addr::ALLCALLADR)?))
    }

    /// Enter (`true`) or leave low-power sleep. Outputs stop while asleep.
    pub fn set_sleep(&mut self, sleep: bool) -> Result<(), Error<I2C::Error>> {
        self.set_mode1_flag(Mode1Bits::SLEEP, sleep)
    }

    pub fn is_sleeping(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.mode1_flag(Mode1Bits::SLEEP)
    }

    pub fn set_output_invert(&mut self, invert: bool) -> Result<(), Error<I2C::Error>> {
        let value = if invert { Mode2Bits::INVRT } else { Mode2Bits::empty() };
        self.update_reg(addr::MODE2, Mode2Bits::INVRT.bits(), value.bits())
    }

    pub fn set_output_change(&mut self, change: OutputChange) -> Result<(), Error<I2C::Error>> {
        let value = match change {
            OutputChange::OnStop => Mode2Bits::empty(),
            OutputChange::OnAck => Mode2Bits::OCH,
        };
        self.update_reg(addr::MODE2, Mode2Bits::OCH.bits(), value.bits())
    }

    pub fn set_output_driver(&mut self, driver: OutputDriver) -> Result<(), Error<I2C::Error>> {
        let value = match driver {
            OutputDriver::OpenDrain => Mode2Bits::empty(),
            OutputDriver::TotemPole => Mode2Bits::OUTDRV,
        };
        self.update_reg(addr::MODE2, Mode2Bits::OUTDRV.bits(), value.bits())
    }

    pub fn set_output_not_enable(&mut self, state: OutputNotEnable) -> Result<(), Error<I2C::Error>> {
        let mask = Mode2Bits::OUTNE1 | Mode2Bits::OUTNE0;
        self.update_reg(addr::MODE2, mask.bits(), state.bits().bits())
    }

    /// Decode MODE2.
    pub fn output_config(&mut self) -> Result<OutputConfig, Error<I2C::Error>> {
        let bits = Mode2Bits::from_bits_truncate(self.read_reg(addr::MODE2)?);
        Ok(OutputConfig::from(bits))
    }

    fn set_mode1_flag(&mut self, flag: Mode1Bits, enable: bool) -> Result<(), Error<I2C::Error>> {
        let value = if enable { flag.bits() } else { 0 };
        self.update_reg(addr::MODE1, flag.bits(), value)
    }

    fn mode1_flag(&mut self, flag: Mode1Bits) -> Result<bool, Error<I2C::Error>> {
        let mode1 = Mode1Bits::from_bits_retain(self.read_reg(addr::MODE1)?);
        Ok(mode1.contains(flag))
    }
}

#[cfg(feature = "async")]
impl<I2C> Pca9685<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Async version of [`init`](Self::init).
    pub async fn init_async(&mut self, mode1: Mode1Bits, mode2: Mode2Bits) -> Result<(), Error<I2C::Error>> {
        self.probe_async().await?;
        self.configure_async(mode1, mode2).await
    }

    pub async fn init_default_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.init_async(DEFAULT_MODE1, DEFAULT_MODE2).await
    }

    pub async fn configure_async(&mut self, mode1: Mode1Bits, mode2: Mode2Bits) -> Result<(), Error<I2C::Error>> {
        self.last_status = Status::Ok;
        self.write_reg_async(addr::MODE1, mode1.bits()).await?;
        self.write_reg_async(addr::MODE2, mode2.bits()).await
    }

    pub async fn is_connected_async(&mut self) -> bool {
        self.probe_async().await.is_ok()
    }

    async fn probe_async(&mut self) -> Result<(), Error<I2C::Error>> {
        let result = self.i2c.write(self.address, &[]).await.map_err(Error::I2c);
        self.record(result)
    }

    async fn write_reg_async(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        let result = self
            .i2c
            .write(self.address, &[reg, value])
            .await
            .map_err(Error::I2c);
        self.record(result)
    }

    async fn read_reg_async(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        let result = self
            .i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(Error::I2c);
        self.record(result)?;
        Ok(buf[0])
    }

    async fn update_reg_async(&mut self, reg: u8, mask: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        let cur = self.read_reg_async(reg).await?;
        match update_bits(cur, mask, value) {
            Some(new) => self.write_reg_async(reg, new).await,
            None => Ok(()),
        }
    }

    async fn write_block_async(&mut self, start_reg: u8, data: [u8; 4]) -> Result<(), Error<I2C::Error>> {
        let buf = [start_reg, data[0], data[1], data[2], data[3]];
        let result = self.i2c.write(self.address, &buf).await.map_err(Error::I2c);
        self.record(result)
    }

    async fn read_block_async(&mut self, start_reg: u8) -> Result<[u8; 4], Error<I2C::Error>> {
        let mut buf = [0u8; 4];
        let result = self
            .i2c
            .write_read(self.address, &[start_reg], &mut buf)
            .await
            .map_err(Error::I2c);
        self.record(result)?;
        Ok(buf)
    }

    pub async fn write_mode_async(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        let reg = self.mode_register(reg)?;
        self.write_reg_async(reg, value).await
    }

    pub async fn read_mode_async(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let reg = self.mode_register(reg)?;
        self.read_reg_async(reg).await
    }

    pub async fn set_pwm_async(&mut self, channel: u8, on: u16, off: u16) -> Result<(), Error<I2C::Error>> {
        let reg = self.channel_block(channel)?;
        self.write_block_async(reg, encode_counters(on, off)).await
    }

    pub async fn set_pwm_off_async(&mut self, channel: u8, off: u16) -> Result<(), Error<I2C::Error>> {
        self.set_pwm_async(channel, 0, off).await
    }

    pub async fn get_pwm_async(&mut self, channel: u8) -> Result<(u16, u16), Error<I2C::Error>> {
        let reg = self.channel_block(channel)?;
        let block = self.read_block_async(reg).await?;
        Ok(decode_counters(block))
    }

    pub async fn digital_write_async(&mut self, channel: u8, level: PinState) -> Result<(), Error<I2C::Error>> {
        let reg = self.channel_block(channel)?;
        self.write_block_async(reg, encode_full(level == PinState::High)).await
    }

    pub async fn set_all_pwm_async(&mut self, on: u16, off: u16) -> Result<(), Error<I2C::Error>> {
        self.write_block_async(addr::ALL_LED_ON_L, encode_counters(on, off)).await
    }

    pub async fn all_off_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_reg_async(addr::ALL_LED_OFF_H, ALL_OFF).await
    }

    pub async fn set_frequency_async(&mut self, freq: u16, offset: i8) -> Result<(), Error<I2C::Error>> {
        let freq = clamp_frequency(freq);
        let prescale = apply_prescale_offset(frequency_to_prescale(freq), offset);
        debug!("set_frequency: {=u16} Hz, prescale {=u8}", freq, prescale);

        let mode1 = self.read_reg_async(addr::MODE1).await?;
        let sleep = (mode1 & !Mode1Bits::RESTART.bits()) | Mode1Bits::SLEEP.bits();
        let written = match self.write_reg_async(addr::MODE1, sleep).await {
            Ok(()) => self.write_reg_async(addr::PRE_SCALE, prescale).await,
            Err(e) => Err(e),
        };
        let restored = self.write_reg_async(addr::MODE1, mode1).await;
        self.record(written.and(restored))?;

        self.frequency = freq;
        Ok(())
    }

    pub async fn get_frequency_async(&mut self, use_cache: bool) -> Result<u16, Error<I2C::Error>> {
        if use_cache {
            self.last_status = Status::Ok;
            return Ok(self.frequency);
        }
        let prescale = self.read_reg_async(addr::PRE_SCALE).await?;
        self.frequency = prescale_to_frequency(prescale);
        Ok(self.frequency)
    }

    pub async fn enable_sub_call_async(&mut self, sub: SubCall) -> Result<(), Error<I2C::Error>> {
        self.set_mode1_flag_async(sub.mode1_bit(), true).await
    }

    pub async fn disable_sub_call_async(&mut self, sub: SubCall) -> Result<(), Error<I2C::Error>> {
        self.set_mode1_flag_async(sub.mode1_bit(), false).await
    }

    pub async fn is_enabled_sub_call_async(&mut self, sub: SubCall) -> Result<bool, Error<I2C::Error>> {
        self.mode1_flag_async(sub.mode1_bit()).await
    }

    pub async fn enable_all_call_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mode1_flag_async(Mode1Bits::ALLCALL, true).await
    }

    pub async fn disable_all_call_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mode1_flag_async(Mode1Bits::ALLCALL, false).await
    }

    pub async fn is_enabled_all_call_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.mode1_flag_async(Mode1Bits::ALLCALL).await
    }

    pub async fn set_sub_call_address_async(&mut self, sub: SubCall, address: u8) -> Result<(), Error<I2C::Error>> {
        self.write_reg_async(sub.register(), address_to_reg(address)).await
    }

    pub async fn sub_call_address_async(&mut self, sub: SubCall) -> Result<u8, Error<I2C::Error>> {
        Ok(reg_to_address(self.read_reg_async(sub.register()).await?))
    }

    pub async fn set_all_call_address_async(&mut self, address: u8) -> Result<(), Error<I2C::Error>> {
        self.write_reg_async(addr::ALLCALLADR, address_to_reg(address)).await
    }

    pub async fn all_call_address_async(&mut self) -> Result<u8, Error<I2C::Error>> {
        Ok(reg_to_address(self.read_reg_async(addr::ALLCALLADR).await?))
    }

    pub async fn set_sleep_async(&mut self, sleep: bool) -> Result<(), Error<I2C::Error>> {
        self.set_mode1_flag_async(Mode1Bits::SLEEP, sleep).await
    }

    pub async fn is_sleeping_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.mode1_flag_async(Mode1Bits::SLEEP).await
    }

    pub async fn set_output_invert_async(&mut self, invert: bool) -> Result<(), Error<I2C::Error>> {
        let value = if invert { Mode2Bits::INVRT } else { Mode2Bits::empty() };
        self.update_reg_async(addr::MODE2, Mode2Bits::INVRT.bits(), value.bits()).await
    }

    pub async fn set_output_change_async(&mut self, change: OutputChange) -> Result<(), Error<I2C::Error>> {
        let value = match change {
            OutputChange::OnStop => Mode2Bits::empty(),
            OutputChange::OnAck => Mode2Bits::OCH,
        };
        self.update_reg_async(addr::MODE2, Mode2Bits::OCH.bits(), value.bits()).await
    }

    pub async fn set_output_driver_async(&mut self, driver: OutputDriver) -> Result<(), Error<I2C::Error>> {
        let value = match driver {
            OutputDriver::OpenDrain => Mode2Bits::empty(),
            OutputDriver::TotemPole => Mode2Bits::OUTDRV,
        };
        self.update_reg_async(addr::MODE2, Mode2Bits::OUTDRV.bits(), value.bits()).await
    }

    pub async fn set_output_not_enable_async(&mut self, state: OutputNotEnable) -> Result<(), Error<I2C::Error>> {
        let mask = Mode2Bits::OUTNE1 | Mode2Bits::OUTNE0;
        self.update_reg_async(addr::MODE2, mask.bits(), state.bits().bits()).await
    }

    pub async fn output_config_async(&mut self) -> Result<OutputConfig, Error<I2C::Error>> {
        let bits = Mode2Bits::from_bits_truncate(self.read_reg_async(addr::MODE2).await?);
        Ok(OutputConfig::from(bits))
    }

    async fn set_mode1_flag_async(&mut self, flag: Mode1Bits, enable: bool) -> Result<(), Error<I2C::Error>> {
        let value = if enable { flag.bits() } else { 0 };
        self.update_reg_async(addr::MODE1, flag.bits(), value).await
    }

    async fn mode1_flag_async(&mut self, flag: Mode1Bits) -> Result<bool, Error<I2C::Error>> {
        let mode1 = Mode1Bits::from_bits_retain(self.read_reg_async(addr::MODE1).await?);
        Ok(mode1.contains(flag))
    }
}
