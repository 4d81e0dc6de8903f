use embedded_hal::digital::PinState;
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use pca9685_rs::registers::DEFAULT_ALL_CALL_ADDRESS;
use pca9685_rs::{Error, OutputChange, OutputConfig, OutputDriver, OutputNotEnable, Pca9685, Status, SubCall};

const ADDR: u8 = 0x40;

#[test]
fn init_probes_then_writes_modes() {
    let expectations = [
        I2cTrans::write(ADDR, vec![]),
        I2cTrans::write(ADDR, vec![0x00, 0x21]),
        I2cTrans::write(ADDR, vec![0x01, 0x04]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.init_default().unwrap();
    assert_eq!(driver.last_error(), Status::Ok);
    driver.free().done();
}

#[test]
fn init_without_ack_stops_after_probe() {
    let expectations = [I2cTrans::write(0x41, vec![]).with_error(ErrorKind::Other)];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::with_address(mock, 0x41);
    assert!(matches!(driver.init_default(), Err(Error::I2c(_))));
    assert_eq!(driver.last_error(), Status::I2c);
    // consumed
    assert_eq!(driver.last_error(), Status::Ok);
    driver.free().done();
}

#[test]
fn is_connected_reports_ack() {
    let expectations = [
        I2cTrans::write(ADDR, vec![]),
        I2cTrans::write(ADDR, vec![]).with_error(ErrorKind::Other),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    assert!(driver.is_connected());
    assert!(!driver.is_connected());
    assert_eq!(driver.last_error(), Status::I2c);
    driver.free().done();
}

#[test]
fn set_pwm_writes_one_five_byte_block() {
    // channel 3 -> 0x06 + 3 * 4 = 0x12
    let expectations = [
        I2cTrans::write(ADDR, vec![0x12, 0x23, 0x01, 0xBC, 0x0A]),
        I2cTrans::write(ADDR, vec![0x06, 0x23, 0x01, 0xFF, 0x0F]),
        I2cTrans::write(ADDR, vec![0x42, 0x00, 0x00, 0x00, 0x08]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.set_pwm(3, 0x0123, 0x0ABC).unwrap();
    driver.set_pwm(0, 0xF123, 0x1FFF).unwrap();
    driver.set_pwm_off(15, 2048).unwrap();
    driver.free().done();
}

#[test]
fn invalid_channel_does_no_io() {
    let expectations: [I2cTrans; 0] = [];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock).with_channel_count(8);
    assert!(matches!(driver.set_pwm(8, 0, 100), Err(Error::Channel)));
    assert!(matches!(driver.get_pwm(16), Err(Error::Channel)));
    assert!(matches!(driver.digital_write(200, PinState::High), Err(Error::Channel)));
    assert!(matches!(driver.set_pwm_off(8, 1), Err(Error::Channel)));
    assert_eq!(driver.last_error(), Status::Channel);
    driver.free().done();
}

#[test]
fn get_pwm_decodes_block() {
    let expectations = [I2cTrans::write_read(ADDR, vec![0x0A], vec![0x34, 0x02, 0xFF, 0x0F])];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    assert_eq!(driver.get_pwm(1).unwrap(), (0x0234, 0x0FFF));
    driver.free().done();
}

#[test]
fn failed_read_leaves_values_untouched() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x06], vec![0x10, 0x00, 0x20, 0x00]),
        I2cTrans::write_read(ADDR, vec![0x06], vec![0; 4]).with_error(ErrorKind::Other),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    let (mut on, mut off) = driver.get_pwm(0).unwrap();
    match driver.get_pwm(0) {
        Ok(values) => (on, off) = values,
        Err(e) => assert_eq!(e.status(), Status::I2c),
    }
    assert_eq!((on, off), (0x0010, 0x0020));
    assert_eq!(driver.last_error(), Status::I2c);
    driver.free().done();
}

#[test]
fn digital_write_uses_full_bits() {
    let expectations = [
        I2cTrans::write(ADDR, vec![0x42, 0x00, 0x10, 0x00, 0x00]),
        I2cTrans::write(ADDR, vec![0x42, 0x00, 0x00, 0x00, 0x10]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.digital_write(15, PinState::High).unwrap();
    driver.digital_write(15, PinState::Low).unwrap();
    driver.free().done();
}

#[test]
fn all_channel_writes() {
    let expectations = [
        I2cTrans::write(ADDR, vec![0xFD, 0x10]),
        I2cTrans::write(ADDR, vec![0xFA, 0x00, 0x00, 0xFF, 0x0F]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.all_off().unwrap();
    driver.set_all_pwm(0, 4095).unwrap();
    driver.free().done();
}

#[test]
fn set_frequency_sleeps_writes_prescale_and_restores() {
    // MODE1 = AI | ALLCALL; 200 Hz -> prescale 30
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x21]),
        I2cTrans::write(ADDR, vec![0x00, 0x31]),
        I2cTrans::write(ADDR, vec![0xFE, 30]),
        I2cTrans::write(ADDR, vec![0x00, 0x21]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.set_frequency(200, 0).unwrap();
    assert_eq!(driver.get_frequency(true).unwrap(), 200);
    driver.free().done();
}

#[test]
fn set_frequency_masks_restart_while_sleeping() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0xA1]),
        I2cTrans::write(ADDR, vec![0x00, 0x31]),
        I2cTrans::write(ADDR, vec![0xFE, 32]),
        I2cTrans::write(ADDR, vec![0x00, 0xA1]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.set_frequency(200, 2).unwrap();
    driver.free().done();
}

#[test]
fn set_frequency_clamps() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x21]),
        I2cTrans::write(ADDR, vec![0x00, 0x31]),
        I2cTrans::write(ADDR, vec![0xFE, 253]),
        I2cTrans::write(ADDR, vec![0x00, 0x21]),
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x21]),
        I2cTrans::write(ADDR, vec![0x00, 0x31]),
        I2cTrans::write(ADDR, vec![0xFE, 3]),
        I2cTrans::write(ADDR, vec![0x00, 0x21]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.set_frequency(10, 0).unwrap();
    assert_eq!(driver.get_frequency(true).unwrap(), 24);
    driver.set_frequency(5_000, 0).unwrap();
    assert_eq!(driver.get_frequency(true).unwrap(), 1526);
    driver.free().done();
}

#[test]
fn failed_prescale_write_still_restores_mode1() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x21]),
        I2cTrans::write(ADDR, vec![0x00, 0x31]),
        I2cTrans::write(ADDR, vec![0xFE, 5]).with_error(ErrorKind::Other),
        I2cTrans::write(ADDR, vec![0x00, 0x21]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    assert!(matches!(driver.set_frequency(1000, 0), Err(Error::I2c(_))));
    assert_eq!(driver.last_error(), Status::I2c);
    // cache keeps the power-on value
    assert_eq!(driver.get_frequency(true).unwrap(), 200);
    driver.free().done();
}

#[test]
fn failed_sleep_write_still_restores_mode1() {
    // no PRE_SCALE write without sleep, but MODE1 is put back in case the sleep byte landed
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0xA1]),
        I2cTrans::write(ADDR, vec![0x00, 0x31]).with_error(ErrorKind::Other),
        I2cTrans::write(ADDR, vec![0x00, 0xA1]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    assert!(matches!(driver.set_frequency(50, 0), Err(Error::I2c(_))));
    assert_eq!(driver.last_error(), Status::I2c);
    assert_eq!(driver.get_frequency(true).unwrap(), 200);
    driver.free().done();
}

#[test]
fn get_frequency_reads_prescale_and_updates_cache() {
    let expectations = [I2cTrans::write_read(ADDR, vec![0xFE], vec![121])];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    assert_eq!(driver.get_frequency(false).unwrap(), 50);
    assert_eq!(driver.get_frequency(true).unwrap(), 50);
    driver.free().done();
}

#[test]
fn mode_accessors_reject_other_registers() {
    let expectations: [I2cTrans; 0] = [];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    assert!(matches!(driver.write_mode(0x02, 0x00), Err(Error::Mode)));
    assert!(matches!(driver.read_mode(0xFE), Err(Error::Mode)));
    assert_eq!(driver.last_error(), Status::Mode);
    driver.free().done();
}

#[test]
fn mode_accessors() {
    let expectations = [
        I2cTrans::write(ADDR, vec![0x01, 0x14]),
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x21]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.write_mode(0x01, 0x14).unwrap();
    assert_eq!(driver.read_mode(0x00).unwrap(), 0x21);
    driver.free().done();
}

#[test]
fn sub_call_enable_skips_redundant_write() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x21]),
        I2cTrans::write(ADDR, vec![0x00, 0x29]),
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x29]),
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x29]),
        I2cTrans::write(ADDR, vec![0x00, 0x21]),
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x25]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.enable_sub_call(SubCall::Sub1).unwrap();
    driver.enable_sub_call(SubCall::Sub1).unwrap();
    driver.disable_sub_call(SubCall::Sub1).unwrap();
    assert!(driver.is_enabled_sub_call(SubCall::Sub2).unwrap());
    driver.free().done();
}

#[test]
fn all_call_flag() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x21]),
        I2cTrans::write(ADDR, vec![0x00, 0x20]),
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x20]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.disable_all_call().unwrap();
    assert!(!driver.is_enabled_all_call().unwrap());
    driver.free().done();
}

#[test]
fn group_addresses() {
    let expectations = [
        I2cTrans::write(ADDR, vec![0x03, 0xE2]),
        I2cTrans::write_read(ADDR, vec![0x04], vec![0xE8]),
        I2cTrans::write(ADDR, vec![0x05, 0x80]),
        I2cTrans::write_read(ADDR, vec![0x05], vec![0xE0]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.set_sub_call_address(SubCall::Sub2, 0x71).unwrap();
    assert_eq!(driver.sub_call_address(SubCall::Sub3).unwrap(), 0x74);
    // colliding with the device address is the caller's business
    driver.set_all_call_address(ADDR).unwrap();
    assert_eq!(driver.all_call_address().unwrap(), DEFAULT_ALL_CALL_ADDRESS);
    driver.free().done();
}

#[test]
fn sleep_control() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x31]),
        I2cTrans::write(ADDR, vec![0x00, 0x21]),
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x21]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.set_sleep(false).unwrap();
    assert!(!driver.is_sleeping().unwrap());
    driver.free().done();
}

#[test]
fn output_configuration() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x01], vec![0x04]),
        I2cTrans::write(ADDR, vec![0x01, 0x06]),
        I2cTrans::write_read(ADDR, vec![0x01], vec![0x06]),
        I2cTrans::write(ADDR, vec![0x01, 0x16]),
        I2cTrans::write_read(ADDR, vec![0x01], vec![0x16]),
        I2cTrans::write(ADDR, vec![0x01, 0x1E]),
        I2cTrans::write_read(ADDR, vec![0x01], vec![0x1E]),
        I2cTrans::write(ADDR, vec![0x01, 0x1A]),
        I2cTrans::write_read(ADDR, vec![0x01], vec![0x1A]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Pca9685::new(mock);
    driver.set_output_not_enable(OutputNotEnable::HighImpedance).unwrap();
    driver.set_output_invert(true).unwrap();
    driver.set_output_change(OutputChange::OnAck).unwrap();
    driver.set_output_driver(OutputDriver::OpenDrain).unwrap();
    assert_eq!(
        driver.output_config().unwrap(),
        OutputConfig {
            inverted: true,
            change: OutputChange::OnAck,
            driver: OutputDriver::OpenDrain,
            not_enable: OutputNotEnable::HighImpedance,
        }
    );
    driver.free().done();
}
