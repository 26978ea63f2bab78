//! Touch input abstraction
//!
//! Two layers:
//! - [`TouchController`]: a concrete capacitive controller chip, reporting
//!   raw points or bus errors.
//! - [`TouchSource`]: what the gesture classifier consumes, one
//!   [`TouchSample`] per control-loop tick. Bus failures are folded into
//!   invalid samples here, so the classifier never sees an error.

use thiserror::Error;

/// One hardware poll result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// X coordinate in panel pixels.
    pub x: i32,
    /// Y coordinate in panel pixels.
    pub y: i32,
    /// Contact weight as reported by the controller.
    pub pressure: i32,
    /// `false` when nothing is touching the panel (or the read failed).
    pub valid: bool,
}

impl TouchSample {
    /// Sample for "no finger on the panel".
    pub const RELEASED: Self = Self {
        x: 0,
        y: 0,
        pressure: 0,
        valid: false,
    };

    /// Valid sample at `(x, y)`.
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            pressure: 0,
            valid: true,
        }
    }
}

/// Source of raw touch samples, polled once per control-loop tick.
pub trait TouchSource {
    /// Read the current touch state. Never blocks, never fails.
    fn poll(&mut self) -> TouchSample;
}

/// A point reported by a touch controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawTouch {
    /// 12-bit X coordinate.
    pub x: u16,
    /// 12-bit Y coordinate.
    pub y: u16,
    /// Contact weight.
    pub weight: u8,
}

impl From<RawTouch> for TouchSample {
    fn from(raw: RawTouch) -> Self {
        Self {
            x: i32::from(raw.x),
            y: i32::from(raw.y),
            pressure: i32::from(raw.weight),
            valid: true,
        }
    }
}

/// Length of the point report both supported controllers return from their
/// status register: count, XH, XL, YH, YL, weight.
pub const REPORT_LEN: usize = 6;

/// Decode a point report.
///
/// Byte 0 carries the number of contacts in its low nibble. Coordinates are
/// 12 bits wide; the high nibble of the XH/YH bytes holds event flags and is
/// masked off. A contact reported at (0, 0) is treated as no touch.
pub fn parse_report(report: &[u8; REPORT_LEN]) -> Option<RawTouch> {
    let [status, xh, xl, yh, yl, weight] = *report;
    if status & 0x0F == 0 {
        return None;
    }
    let x = (u16::from(xh & 0x0F) << 8) | u16::from(xl);
    let y = (u16::from(yh & 0x0F) << 8) | u16::from(yl);
    if x == 0 && y == 0 {
        return None;
    }
    Some(RawTouch { x, y, weight })
}

/// Touch controller errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// No supported controller acknowledged its address.
    #[error("no touch controller found")]
    NotFound,
    /// The controller stopped answering or the transfer failed.
    #[error("touch bus error")]
    Bus,
}

/// Capacitive touch controller chip.
///
/// Implementations are selected once at start-up by address probing; after
/// that, reads go straight to the chosen driver.
pub trait TouchController {
    /// Read the current contact point, `None` when nothing is touching.
    ///
    /// # Errors
    ///
    /// Returns [`TouchError::Bus`] when the I2C transfer fails.
    fn read_point(&mut self) -> Result<Option<RawTouch>, TouchError>;
}

/// Adapts a [`TouchController`] into a [`TouchSource`].
pub struct TouchPanel<C> {
    controller: C,
    errors: u32,
}

impl<C: TouchController> TouchPanel<C> {
    /// Wrap a probed controller.
    pub fn new(controller: C) -> Self {
        Self {
            controller,
            errors: 0,
        }
    }

    /// Number of failed reads since construction.
    pub fn error_count(&self) -> u32 {
        self.errors
    }

    /// Release the controller.
    pub fn into_inner(self) -> C {
        self.controller
    }
}

impl<C: TouchController> TouchSource for TouchPanel<C> {
    fn poll(&mut self) -> TouchSample {
        match self.controller.read_point() {
            Ok(Some(raw)) => raw.into(),
            Ok(None) => TouchSample::RELEASED,
            Err(e) => {
                self.errors = self.errors.saturating_add(1);
                tracing::trace!(error = ?e, "touch read failed");
                TouchSample::RELEASED
            }
        }
    }
}

/// Touch source used when no controller answered the probe.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTouch;

impl TouchSource for NoTouch {
    fn poll(&mut self) -> TouchSample {
        TouchSample::RELEASED
    }
}
