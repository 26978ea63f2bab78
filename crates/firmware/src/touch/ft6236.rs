//! FT6236 driver
//!
//! Only touch point 1 is read; the panel is driven with a single finger.

use embedded_hal::i2c::I2c;
use platform::ft6236::ft6236_read_report;
use platform::touch::parse_report;
use platform::{RawTouch, TouchController, TouchError};

/// FT6236 touch controller on a blocking I²C bus.
pub struct Ft6236<I> {
    i2c: I,
}

impl<I: I2c> Ft6236<I> {
    /// Wrap a bus with the chip at its fixed address.
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the bus.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> TouchController for Ft6236<I> {
    fn read_point(&mut self) -> Result<Option<RawTouch>, TouchError> {
        let report = ft6236_read_report(&mut self.i2c).map_err(|_| TouchError::Bus)?;
        Ok(parse_report(&report))
    }
}
