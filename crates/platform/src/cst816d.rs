//! CST816D capacitive touch controller register addresses.
//!
//! The CST816D is the controller fitted to the ESP32-2424S012C round module.
//! It answers at a fixed 7-bit address and exposes the point report starting
//! at the finger-count register.

/// 7-bit I2C device address.
pub const CST816D_I2C_ADDR: u8 = 0x15;

/// Register 0x01: hardware gesture ID (unused, gestures are classified in software).
pub const REG_GESTURE: u8 = 0x01;
/// Register 0x02: number of touch points, first byte of the point report.
pub const REG_POINTS: u8 = 0x02;
/// Register 0x03: X high nibble plus event flags.
pub const REG_XH: u8 = 0x03;
/// Register 0x05: Y high nibble.
pub const REG_YH: u8 = 0x05;

/// Read the raw six-byte point report.
///
/// # Errors
/// Returns Err if the I2C write-read fails.
pub fn cst816d_read_report<I>(
    i2c: &mut I,
) -> Result<[u8; crate::touch::REPORT_LEN], I::Error>
where
    I: embedded_hal::i2c::I2c,
{
    let mut report = [0u8; crate::touch::REPORT_LEN];
    i2c.write_read(CST816D_I2C_ADDR, &[REG_POINTS], &mut report)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i2c_addr_matches_datasheet() {
        assert_eq!(CST816D_I2C_ADDR, 0x15);
    }

    #[test]
    fn point_report_follows_gesture_register() {
        assert_eq!(REG_POINTS, REG_GESTURE + 1);
        assert_eq!(REG_XH, REG_POINTS + 1);
        assert_eq!(REG_YH, REG_XH + 2);
    }
}
