//! FT6236 capacitive touch controller register addresses.
//!
//! Reference: FocalTech FT6x36 application note, register map for
//! point 1. The report layout matches the CST816D from `TD_STATUS` onward,
//! which is why both share [`crate::touch::parse_report`].

/// 7-bit I2C device address.
pub const FT6236_I2C_ADDR: u8 = 0x38;

/// Register 0x02: touch status, low nibble = number of touch points.
pub const REG_TD_STATUS: u8 = 0x02;
/// Register 0x03: point 1 X high nibble plus event flag.
pub const REG_P1_XH: u8 = 0x03;
/// Register 0x07: point 1 weight.
pub const REG_P1_WEIGHT: u8 = 0x07;

/// Read the raw six-byte point report starting at `TD_STATUS`.
///
/// # Errors
/// Returns Err if the I2C write-read fails.
pub fn ft6236_read_report<I>(i2c: &mut I) -> Result<[u8; crate::touch::REPORT_LEN], I::Error>
where
    I: embedded_hal::i2c::I2c,
{
    let mut report = [0u8; crate::touch::REPORT_LEN];
    i2c.write_read(FT6236_I2C_ADDR, &[REG_TD_STATUS], &mut report)?;
    Ok(report)
}
