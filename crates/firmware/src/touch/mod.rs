//! Touch controller drivers and start-up probing.
//!
//! The round module ships with one of two capacitive controllers. Which one
//! is fitted is found once at boot by [`probe`]; the returned
//! [`ProbedController`] then dispatches every read to the matching driver.
//!
//! | Controller | Address | Driver        |
//! |------------|---------|---------------|
//! | CST816D    | `0x15`  | [`Cst816d`]   |
//! | FT6236     | `0x38`  | [`Ft6236`]    |

pub mod cst816d;
pub mod ft6236;

pub use cst816d::Cst816d;
pub use ft6236::Ft6236;

use embedded_hal::i2c::I2c;
use platform::cst816d::CST816D_I2C_ADDR;
use platform::ft6236::FT6236_I2C_ADDR;
use platform::{RawTouch, TouchController, TouchError};

/// The controller found by [`probe`].
pub enum ProbedController<I> {
    /// CST816D at `0x15`.
    Cst816d(Cst816d<I>),
    /// FT6236 at `0x38`.
    Ft6236(Ft6236<I>),
}

impl<I: I2c> ProbedController<I> {
    /// Chip name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cst816d(_) => "CST816D",
            Self::Ft6236(_) => "FT6236",
        }
    }

    /// Release the bus.
    pub fn release(self) -> I {
        match self {
            Self::Cst816d(d) => d.release(),
            Self::Ft6236(d) => d.release(),
        }
    }
}

impl<I: I2c> TouchController for ProbedController<I> {
    fn read_point(&mut self) -> Result<Option<RawTouch>, TouchError> {
        match self {
            Self::Cst816d(d) => d.read_point(),
            Self::Ft6236(d) => d.read_point(),
        }
    }
}

/// Detect the fitted controller.
///
/// Addresses each candidate with an empty write, CST816D first; the first
/// one to acknowledge wins.
///
/// # Errors
///
/// [`TouchError::NotFound`] when neither address acknowledges.
pub fn probe<I: I2c>(mut i2c: I) -> Result<ProbedController<I>, TouchError> {
    if i2c.write(CST816D_I2C_ADDR, &[]).is_ok() {
        tracing::info!("touch controller: CST816D");
        return Ok(ProbedController::Cst816d(Cst816d::new(i2c)));
    }
    if i2c.write(FT6236_I2C_ADDR, &[]).is_ok() {
        tracing::info!("touch controller: FT6236");
        return Ok(ProbedController::Ft6236(Ft6236::new(i2c)));
    }
    tracing::warn!("no touch controller acknowledged");
    Err(TouchError::NotFound)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    #[test]
    fn cst816d_wins_when_both_answer() {
        let expectations = [Transaction::write(CST816D_I2C_ADDR, vec![])];
        let i2c = I2cMock::new(&expectations);
        let found = probe(i2c).unwrap();
        assert_eq!(found.name(), "CST816D");
        found.release().done();
    }

    #[test]
    fn falls_back_to_ft6236() {
        let expectations = [
            Transaction::write(CST816D_I2C_ADDR, vec![]).with_error(ErrorKind::Other),
            Transaction::write(FT6236_I2C_ADDR, vec![]),
        ];
        let i2c = I2cMock::new(&expectations);
        let found = probe(i2c).unwrap();
        assert_eq!(found.name(), "FT6236");
        found.release().done();
    }

    #[test]
    fn nothing_answers() {
        let expectations = [
            Transaction::write(CST816D_I2C_ADDR, vec![]).with_error(ErrorKind::Other),
            Transaction::write(FT6236_I2C_ADDR, vec![]).with_error(ErrorKind::Other),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut handle = i2c.clone();
        assert_eq!(probe(i2c).err(), Some(TouchError::NotFound));
        handle.done();
    }
}
