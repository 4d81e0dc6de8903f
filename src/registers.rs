//! Register map and constants for PCA9685.
//! Values and limits are taken from the NXP datasheet (Rev. 4); encode/decode helpers are pure.

/// Default I2C address with all six address pins tied low.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x40;
/// Power-on all-call address (ALLCALLADR reset value 0xE0 >> 1).
pub const DEFAULT_ALL_CALL_ADDRESS: u8 = 0x70;

/// Number of PWM outputs on the chip.
pub const CHANNEL_COUNT: u8 = 16;

/// Register addresses.
pub mod addr {
    pub const MODE1: u8 = 0x00;
    pub const MODE2: u8 = 0x01;
    /// Sub-call addresses 1..3 live at 0x02..0x04.
    pub const SUBADR1: u8 = 0x02;
    pub const SUBADR2: u8 = 0x03;
    pub const SUBADR3: u8 = 0x04;
    pub const ALLCALLADR: u8 = 0x05;
    /// First register of the LED0 block (ON_L, ON_H, OFF_L, OFF_H); blocks are 4 apart.
    pub const LED0_ON_L: u8 = 0x06;
    /// ALL_LED block, same layout as a channel block.
    pub const ALL_LED_ON_L: u8 = 0xFA;
    pub const ALL_LED_OFF_H: u8 = 0xFD;
    /// Frequency divider, writable only while MODE1.SLEEP is set.
    pub const PRE_SCALE: u8 = 0xFE;
}

/// PWM counter resolution (ticks per period).
pub const PWM_STEPS: u32 = 4096;
/// Mask of the 12-bit on/off counters.
pub const COUNTER_MASK: u16 = 0x0FFF;
/// FULL_ON / FULL_OFF bit as seen in the combined 16-bit counter value.
pub const FULL_BIT: u16 = 0x1000;
/// Value for ALL_LED_OFF_H that forces every output off.
pub const ALL_OFF: u8 = 0x10;

/// Internal oscillator frequency.
pub const OSC_CLOCK_HZ: u32 = 25_000_000;
/// Supported output frequency range with the internal oscillator.
pub const FREQ_MIN_HZ: u16 = 24;
pub const FREQ_MAX_HZ: u16 = 1526;
/// Hardware forces PRE_SCALE to at least 3.
pub const PRESCALE_MIN: u8 = 3;
/// Frequency matching the power-on PRE_SCALE value (0x1E).
pub const DEFAULT_FREQUENCY_HZ: u16 = 200;

bitflags::bitflags! {
    /// MODE1 register bits (0x00).
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Mode1Bits: u8 {
        /// Bit 7: Restart enabled (reads 1 when PWM was running before SLEEP).
        const RESTART = 1 << 7;
        /// Bit 6: Use EXTCLK pin clock.
        const EXTCLK  = 1 << 6;
        /// Bit 5: Register auto-increment.
        const AI      = 1 << 5;
        /// Bit 4: Low power mode, oscillator off.
        const SLEEP   = 1 << 4;
        /// Bit 3: Respond to SUBADR1.
        const SUB1    = 1 << 3;
        /// Bit 2: Respond to SUBADR2.
        const SUB2    = 1 << 2;
        /// Bit 1: Respond to SUBADR3.
        const SUB3    = 1 << 1;
        /// Bit 0: Respond to ALLCALLADR.
        const ALLCALL = 1 << 0;
    }

    /// MODE2 register bits (0x01). Bits 7-5 reserved.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Mode2Bits: u8 {
        /// Bit 4: Invert output logic state.
        const INVRT  = 1 << 4;
        /// Bit 3: Outputs change on ACK (1) instead of STOP (0).
        const OCH    = 1 << 3;
        /// Bit 2: Totem-pole (1) instead of open-drain (0) outputs.
        const OUTDRV = 1 << 2;
        /// Bits 1-0: Output state while OE is high.
        const OUTNE1 = 1 << 1;
        const OUTNE0 = 1 << 0;
    }
}

/// MODE1 applied by `init_default`: auto-increment on, all-call on.
pub const DEFAULT_MODE1: Mode1Bits = Mode1Bits::AI.union(Mode1Bits::ALLCALL);
/// MODE2 applied by `init_default`: totem-pole outputs.
pub const DEFAULT_MODE2: Mode2Bits = Mode2Bits::OUTDRV;

/// First register of a channel's 4-register block; `None` for channels past the last output.
pub fn channel_register(channel: u8) -> Option<u8> {
    (channel < CHANNEL_COUNT).then(|| addr::LED0_ON_L + (channel << 2))
}

/// Encode an on/off counter pair into `[on_l, on_h, off_l, off_h]`.
/// Both counters are masked to 12 bits, so FULL_ON/FULL_OFF can never be set by accident.
pub fn encode_counters(on: u16, off: u16) -> [u8; 4] {
    encode_raw(on & COUNTER_MASK, off & COUNTER_MASK)
}

/// Encode a full-on (`true`) or full-off (`false`) state.
///
/// Full-off sets the OFF_H full bit, which the chip gives priority over any ON value.
pub fn encode_full(on: bool) -> [u8; 4] {
    if on {
        encode_raw(FULL_BIT, 0)
    } else {
        encode_raw(0, FULL_BIT)
    }
}

fn encode_raw(on: u16, off: u16) -> [u8; 4] {
    let on = on.to_le_bytes();
    let off = off.to_le_bytes();
    [on[0], on[1], off[0], off[1]]
}

/// Decode a 4-byte channel block into `(on, off)`, each `low + high * 256`.
pub fn decode_counters(bytes: [u8; 4]) -> (u16, u16) {
    (
        u16::from_le_bytes([bytes[0], bytes[1]]),
        u16::from_le_bytes([bytes[2], bytes[3]]),
    )
}

/// Clamp a requested frequency to the supported range.
pub fn clamp_frequency(freq: u16) -> u16 {
    freq.clamp(FREQ_MIN_HZ, FREQ_MAX_HZ)
}

/// `round(25 MHz / (4096 * freq)) - 1`, integer only. Clamps `freq` first.
pub fn frequency_to_prescale(freq: u16) -> u8 {
    let denom = PWM_STEPS * clamp_frequency(freq) as u32;
    let rounded = (OSC_CLOCK_HZ + denom / 2) / denom;
    // rounded is within 4..=255 for the clamped range
    (rounded - 1) as u8
}

/// Inverse of [`frequency_to_prescale`], rounded to the nearest hertz.
pub fn prescale_to_frequency(prescale: u8) -> u16 {
    let denom = PWM_STEPS * (prescale as u32 + 1);
    ((OSC_CLOCK_HZ + denom / 2) / denom) as u16
}

/// Apply a signed trim to a PRE_SCALE value, keeping it within `PRESCALE_MIN..=255`.
pub fn apply_prescale_offset(prescale: u8, offset: i8) -> u8 {
    let trimmed = prescale as i16 + offset as i16;
    trimmed.clamp(PRESCALE_MIN as i16, u8::MAX as i16) as u8
}

/// Replace the `mask` bits of `current` with those of `value`; `None` when nothing would change.
pub fn update_bits(current: u8, mask: u8, value: u8) -> Option<u8> {
    let next = (current & !mask) | (value & mask);
    (next != current).then_some(next)
}

/// Sub-call address registers hold the 7-bit address in bits 7:1.
pub fn address_to_reg(address: u8) -> u8 {
    address << 1
}

pub fn reg_to_address(value: u8) -> u8 {
    value >> 1
}
