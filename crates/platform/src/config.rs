//! Application configuration and constants
//!
//! This module defines the central configuration object handed to the panel
//! core. Raw values arrive from the configuration portal as signed integers;
//! [`PanelConfig::validate`] is the only place they are checked, so nothing
//! downstream ever sees a negative threshold or a zero-length interval.

use embassy_time::Duration;
use thiserror::Error;

/// The application name
pub const APP_NAME: &str = "Orbit Panel";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width and height of the round panel in pixels.
pub const SCREEN_SIZE: u32 = 240;

/// Radius of the visible area of the round panel.
pub const SCREEN_RADIUS: u32 = SCREEN_SIZE / 2;

/// Raw panel configuration as supplied by the user.
///
/// Field names follow the configuration portal's recognized options. Values
/// are signed so that bogus input can be reported instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Minimum start→end displacement (px) on the dominant axis for a swipe.
    pub swipe_threshold_px: i32,
    /// A release earlier than this after touch-down is a tap.
    pub tap_threshold_ms: i32,
    /// Per-sample movement (px) below which a touch is not considered moving.
    pub noise_threshold_px: i32,
    /// How long the numeric data view stays up on Idle/Printing.
    pub dwell_data_ms: i32,
    /// How long the decorative animation view stays up on Idle/Printing.
    pub dwell_animation_ms: i32,
    /// Duration of the circle-gesture overlay.
    pub circle_overlay_ms: i32,
    /// Backlight units added/removed per vertical swipe.
    pub brightness_step: i32,
    /// Duration of the transient brightness read-out.
    pub brightness_overlay_ms: i32,
    /// Fade duration of the ring drawn under a fresh touch.
    pub touch_feedback_ms: i32,
    /// Two taps released within this window form a double tap; `0` disables.
    pub double_tap_window_ms: i32,
    /// Minimum wall-clock interval between animation frames.
    pub animation_frame_ms: i32,
    /// Interval between printer status polls while the printer answers.
    pub status_poll_ms: i32,
    /// Upper bound for a single status poll.
    pub status_timeout_ms: i32,
    /// Longest retry delay after repeated poll failures.
    pub status_backoff_max_ms: i32,
    /// Touch-coordinate X of the panel center (quadrant origin).
    pub screen_center_x: i32,
    /// Touch-coordinate Y of the panel center (quadrant origin).
    pub screen_center_y: i32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 50,
            tap_threshold_ms: 500,
            noise_threshold_px: 5,
            dwell_data_ms: 10_000,
            dwell_animation_ms: 5_000,
            circle_overlay_ms: 3_000,
            brightness_step: 25,
            brightness_overlay_ms: 500,
            touch_feedback_ms: 300,
            double_tap_window_ms: 0,
            animation_frame_ms: 100,
            status_poll_ms: 2_000,
            status_timeout_ms: 3_000,
            status_backoff_max_ms: 30_000,
            screen_center_x: 120,
            screen_center_y: 120,
        }
    }
}

/// Reasons a [`PanelConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A threshold or interval that must be strictly positive was not.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Offending option name.
        field: &'static str,
        /// Value that was supplied.
        value: i32,
    },
    /// An option that may be zero was negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Offending option name.
        field: &'static str,
        /// Value that was supplied.
        value: i32,
    },
    /// An option exceeded the range its storage type allows.
    #[error("{field} is too large: {value}")]
    TooLarge {
        /// Offending option name.
        field: &'static str,
        /// Value that was supplied.
        value: i32,
    },
    /// Noise filtering would swallow every swipe.
    #[error("noise threshold {noise_px}px must be below swipe threshold {swipe_px}px")]
    NoiseAboveSwipe {
        /// Configured noise threshold.
        noise_px: i32,
        /// Configured swipe threshold.
        swipe_px: i32,
    },
    /// The backoff cap is shorter than the regular poll interval.
    #[error("status backoff cap {cap_ms}ms is below the poll interval {poll_ms}ms")]
    BackoffBelowInterval {
        /// Configured backoff cap.
        cap_ms: i32,
        /// Configured poll interval.
        poll_ms: i32,
    },
}

/// Validated configuration: unsigned thresholds and typed durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidConfig {
    /// See [`PanelConfig::swipe_threshold_px`].
    pub swipe_threshold_px: u16,
    /// See [`PanelConfig::tap_threshold_ms`].
    pub tap_threshold: Duration,
    /// See [`PanelConfig::noise_threshold_px`].
    pub noise_threshold_px: u16,
    /// See [`PanelConfig::dwell_data_ms`].
    pub dwell_data: Duration,
    /// See [`PanelConfig::dwell_animation_ms`].
    pub dwell_animation: Duration,
    /// See [`PanelConfig::circle_overlay_ms`].
    pub circle_overlay: Duration,
    /// See [`PanelConfig::brightness_step`].
    pub brightness_step: u8,
    /// See [`PanelConfig::brightness_overlay_ms`].
    pub brightness_overlay: Duration,
    /// See [`PanelConfig::touch_feedback_ms`].
    pub touch_feedback: Duration,
    /// `None` when double-tap detection is disabled.
    pub double_tap_window: Option<Duration>,
    /// See [`PanelConfig::animation_frame_ms`].
    pub animation_frame: Duration,
    /// See [`PanelConfig::status_poll_ms`].
    pub status_poll: Duration,
    /// See [`PanelConfig::status_timeout_ms`].
    pub status_timeout: Duration,
    /// See [`PanelConfig::status_backoff_max_ms`].
    pub status_backoff_max: Duration,
    /// Quadrant origin in touch coordinates.
    pub screen_center: (i32, i32),
}

impl Default for ValidConfig {
    fn default() -> Self {
        // The defaults are covered by `default_config_validates`; fall back to
        // hard-coded values rather than panicking should that ever regress.
        PanelConfig::default().validate().unwrap_or(Self {
            swipe_threshold_px: 50,
            tap_threshold: Duration::from_millis(500),
            noise_threshold_px: 5,
            dwell_data: Duration::from_millis(10_000),
            dwell_animation: Duration::from_millis(5_000),
            circle_overlay: Duration::from_millis(3_000),
            brightness_step: 25,
            brightness_overlay: Duration::from_millis(500),
            touch_feedback: Duration::from_millis(300),
            double_tap_window: None,
            animation_frame: Duration::from_millis(100),
            status_poll: Duration::from_millis(2_000),
            status_timeout: Duration::from_millis(3_000),
            status_backoff_max: Duration::from_millis(30_000),
            screen_center: (120, 120),
        })
    }
}

fn positive_ms(field: &'static str, value: i32) -> Result<Duration, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(Duration::from_millis(u64::from(value.unsigned_abs())))
}

fn positive_px(field: &'static str, value: i32) -> Result<u16, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    u16::try_from(value).map_err(|_| ConfigError::TooLarge { field, value })
}

impl PanelConfig {
    /// Check every option and convert to a [`ValidConfig`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, in field order.
    pub fn validate(&self) -> Result<ValidConfig, ConfigError> {
        let swipe_threshold_px = positive_px("swipe_threshold_px", self.swipe_threshold_px)?;
        let tap_threshold = positive_ms("tap_threshold_ms", self.tap_threshold_ms)?;
        let noise_threshold_px = positive_px("noise_threshold_px", self.noise_threshold_px)?;
        if noise_threshold_px >= swipe_threshold_px {
            return Err(ConfigError::NoiseAboveSwipe {
                noise_px: self.noise_threshold_px,
                swipe_px: self.swipe_threshold_px,
            });
        }

        let dwell_data = positive_ms("dwell_data_ms", self.dwell_data_ms)?;
        let dwell_animation = positive_ms("dwell_animation_ms", self.dwell_animation_ms)?;
        let circle_overlay = positive_ms("circle_overlay_ms", self.circle_overlay_ms)?;

        if self.brightness_step <= 0 {
            return Err(ConfigError::NotPositive {
                field: "brightness_step",
                value: self.brightness_step,
            });
        }
        let brightness_step =
            u8::try_from(self.brightness_step).map_err(|_| ConfigError::TooLarge {
                field: "brightness_step",
                value: self.brightness_step,
            })?;
        let brightness_overlay = positive_ms("brightness_overlay_ms", self.brightness_overlay_ms)?;
        let touch_feedback = positive_ms("touch_feedback_ms", self.touch_feedback_ms)?;

        let double_tap_window = match self.double_tap_window_ms {
            0 => None,
            v if v < 0 => {
                return Err(ConfigError::Negative {
                    field: "double_tap_window_ms",
                    value: v,
                })
            }
            v => Some(Duration::from_millis(u64::from(v.unsigned_abs()))),
        };

        let animation_frame = positive_ms("animation_frame_ms", self.animation_frame_ms)?;
        let status_poll = positive_ms("status_poll_ms", self.status_poll_ms)?;
        let status_timeout = positive_ms("status_timeout_ms", self.status_timeout_ms)?;
        let status_backoff_max = positive_ms("status_backoff_max_ms", self.status_backoff_max_ms)?;
        if status_backoff_max < status_poll {
            return Err(ConfigError::BackoffBelowInterval {
                cap_ms: self.status_backoff_max_ms,
                poll_ms: self.status_poll_ms,
            });
        }

        for (field, value) in [
            ("screen_center_x", self.screen_center_x),
            ("screen_center_y", self.screen_center_y),
        ] {
            if value < 0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(ValidConfig {
            swipe_threshold_px,
            tap_threshold,
            noise_threshold_px,
            dwell_data,
            dwell_animation,
            circle_overlay,
            brightness_step,
            brightness_overlay,
            touch_feedback,
            double_tap_window,
            animation_frame,
            status_poll,
            status_timeout,
            status_backoff_max,
            screen_center: (self.screen_center_x, self.screen_center_y),
        })
    }
}
