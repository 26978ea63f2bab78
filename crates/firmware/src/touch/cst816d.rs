//! CST816D driver
//!
//! Reads the six-byte point report through
//! [`platform::cst816d::cst816d_read_report`]. The chip's own gesture
//! register is ignored; gestures are classified from the point stream.

use embedded_hal::i2c::I2c;
use platform::cst816d::cst816d_read_report;
use platform::touch::parse_report;
use platform::{RawTouch, TouchController, TouchError};

/// CST816D touch controller on a blocking I²C bus.
pub struct Cst816d<I> {
    i2c: I,
}

impl<I: I2c> Cst816d<I> {
    /// Wrap a bus with the chip at its fixed address.
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the bus.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> TouchController for Cst816d<I> {
    fn read_point(&mut self) -> Result<Option<RawTouch>, TouchError> {
        let report = cst816d_read_report(&mut self.i2c).map_err(|_| TouchError::Bus)?;
        Ok(parse_report(&report))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
    use platform::cst816d::{CST816D_I2C_ADDR, REG_POINTS};

    #[test]
    fn reads_one_point() {
        // One finger at (0x0A5, 0x0F0), event flags set in the high nibbles.
        let expectations = [Transaction::write_read(
            CST816D_I2C_ADDR,
            vec![REG_POINTS],
            vec![0x01, 0x80, 0xA5, 0x40, 0xF0, 0x12],
        )];
        let mut touch = Cst816d::new(I2cMock::new(&expectations));
        let point = touch.read_point().unwrap().unwrap();
        assert_eq!((point.x, point.y, point.weight), (0xA5, 0xF0, 0x12));
        touch.release().done();
    }

    #[test]
    fn no_finger_is_none() {
        let expectations = [Transaction::write_read(
            CST816D_I2C_ADDR,
            vec![REG_POINTS],
            vec![0x00, 0x00, 0x10, 0x00, 0x20, 0x00],
        )];
        let mut touch = Cst816d::new(I2cMock::new(&expectations));
        assert_eq!(touch.read_point(), Ok(None));
        touch.release().done();
    }

    #[test]
    fn bus_failure_maps_to_bus_error() {
        let expectations = [Transaction::write_read(
            CST816D_I2C_ADDR,
            vec![REG_POINTS],
            vec![0; 6],
        )
        .with_error(ErrorKind::Other)];
        let mut touch = Cst816d::new(I2cMock::new(&expectations));
        assert_eq!(touch.read_point(), Err(TouchError::Bus));
        touch.release().done();
    }
}
