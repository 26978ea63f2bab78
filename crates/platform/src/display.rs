//! Display abstraction layer
//!
//! The [`Renderer`] is the only thing allowed to touch pixels. Scene code in
//! the `ui` crate issues primitive calls through it; the firmware backs it
//! with an `embedded-graphics` draw target.

use crate::panel_types::Brightness;
use embedded_graphics::{pixelcolor::Rgb565, prelude::Point};
use thiserror::Error;

/// Text sizes available on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// Captions and secondary data.
    Small,
    /// Labels and status lines.
    Medium,
    /// Headline numbers (progress, brightness read-out).
    Large,
}

/// Drawing primitives for the round panel.
///
/// Angles are in degrees, measured clockwise from the positive X axis, so
/// `-90.0` points at the top of the screen.
pub trait Renderer {
    /// Error type for drawing operations
    type Error: core::fmt::Debug;

    /// Fill the whole canvas with `color`.
    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error>;

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point, radius: u32, color: Rgb565)
        -> Result<(), Self::Error>;

    /// Draw a circle outline `width` pixels wide.
    fn stroke_circle(
        &mut self,
        center: Point,
        radius: u32,
        width: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    /// Draw a straight line.
    fn line(&mut self, from: Point, to: Point, width: u32, color: Rgb565)
        -> Result<(), Self::Error>;

    /// Draw an arc of `sweep_deg` degrees starting at `start_deg`.
    fn arc(
        &mut self,
        center: Point,
        radius: u32,
        start_deg: f32,
        sweep_deg: f32,
        width: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    /// Draw `text` horizontally and vertically centered on `anchor`.
    fn text(
        &mut self,
        text: &str,
        anchor: Point,
        size: TextSize,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    /// Set the backlight level.
    fn set_brightness(&mut self, level: Brightness) -> Result<(), Self::Error>;
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error
    #[error("Display communication error")]
    Communication,
    /// Backlight could not be adjusted
    #[error("Backlight control failed")]
    Backlight,
}
