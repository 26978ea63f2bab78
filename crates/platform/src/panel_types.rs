//! Panel domain newtypes for compile-time safety.
//!
//! These zero-cost abstractions prevent common errors:
//! - `Brightness`: backlight level clamped to 20–255, never fully dark
//! - `Progress`: print progress clamped to 0–100 %

use thiserror::Error;

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value {value} outside {min}..={max}")]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── Brightness ───────────────────────────────────────────────────────────────

/// Backlight level, clamped to `MIN..=MAX`.
///
/// The lower bound keeps the round panel readable: a swipe can dim the
/// backlight but never switch it off entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Brightness(u8);

impl Brightness {
    /// Dimmest allowed level.
    pub const MIN: u8 = 20;
    /// Brightest allowed level.
    pub const MAX: u8 = 255;
    /// Level applied at boot.
    pub const DEFAULT: Self = Self(200);

    /// Create a `Brightness`, clamping into `MIN..=MAX`.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.max(Self::MIN))
    }

    /// Create a `Brightness`, returning an error outside `MIN..=MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `level < MIN`.
    pub fn try_new(level: u8) -> Result<Self, OutOfRangeError> {
        if level < Self::MIN {
            Err(OutOfRangeError {
                value: u32::from(level),
                min: u32::from(Self::MIN),
                max: u32::from(Self::MAX),
            })
        } else {
            Ok(Self(level))
        }
    }

    /// One step brighter, saturating at `MAX`.
    #[must_use]
    pub fn step_up(self, step: u8) -> Self {
        Self::new(self.0.saturating_add(step))
    }

    /// One step dimmer, saturating at `MIN`.
    #[must_use]
    pub fn step_down(self, step: u8) -> Self {
        Self::new(self.0.saturating_sub(step))
    }

    /// Return the raw backlight level.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ── Progress ─────────────────────────────────────────────────────────────────

/// Print progress as a whole percentage, clamped to 0–100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Progress(u8);

impl Progress {
    /// Finished print.
    pub const COMPLETE: Self = Self(100);

    /// Create a `Progress`, clamping values above 100 to 100.
    #[must_use]
    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    /// Create a `Progress` from a `0.0..=1.0` fraction as reported by
    /// Moonraker's `display_status.progress`. Non-finite input maps to 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_fraction(fraction: f32) -> Self {
        if !fraction.is_finite() {
            return Self(0);
        }
        let pct = (fraction.clamp(0.0, 1.0) * 100.0) as u8;
        Self::new(pct)
    }

    /// Return the percentage (0–100).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn brightness_new_clamps_below_min() {
        assert_eq!(Brightness::new(0).get(), Brightness::MIN);
        assert_eq!(Brightness::new(19).get(), Brightness::MIN);
    }

    #[test]
    fn brightness_try_new_rejects_below_min() {
        let err = Brightness::try_new(5).unwrap_err();
        assert_eq!(err.value, 5);
        assert_eq!(err.min, 20);
        assert!(Brightness::try_new(20).is_ok());
    }

    #[test]
    fn brightness_steps_saturate_at_bounds() {
        let top = Brightness::new(240).step_up(25);
        assert_eq!(top.get(), 255);
        let bottom = Brightness::new(30).step_down(25);
        assert_eq!(bottom.get(), 20);
        assert_eq!(Brightness::DEFAULT.step_up(25).get(), 225);
    }

    #[test]
    fn progress_from_fraction() {
        assert_eq!(Progress::from_fraction(0.425).get(), 42);
        assert_eq!(Progress::from_fraction(1.7).get(), 100);
        assert_eq!(Progress::from_fraction(f32::NAN).get(), 0);
    }

    #[test]
    fn progress_new_clamps_over_100() {
        assert_eq!(Progress::new(150), Progress::COMPLETE);
    }
}
