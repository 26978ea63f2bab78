//! [`Renderer`] over an embedded-graphics draw target.

use core::fmt::Debug;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, StrokeAlignment};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use platform::{Brightness, Renderer, TextSize};

/// Draws presentation primitives onto `D`.
///
/// The backlight level is recorded here; on hardware the PWM channel reads it
/// back through [`GraphicsRenderer::brightness`] after each frame.
pub struct GraphicsRenderer<D> {
    target: D,
    brightness: Brightness,
}

impl<D> GraphicsRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap a draw target.
    pub fn new(target: D) -> Self {
        Self {
            target,
            brightness: Brightness::DEFAULT,
        }
    }

    /// Current backlight level.
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// The wrapped target.
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Mutable access to the wrapped target.
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Release the target.
    pub fn into_inner(self) -> D {
        self.target
    }
}

fn diameter(radius: u32) -> u32 {
    radius.saturating_mul(2).saturating_add(1)
}

fn font(size: TextSize) -> &'static embedded_graphics::mono_font::MonoFont<'static> {
    match size {
        TextSize::Small => &FONT_6X10,
        TextSize::Medium => &FONT_9X15,
        TextSize::Large => &FONT_10X20,
    }
}

impl<D> Renderer for GraphicsRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: Debug,
{
    type Error = D::Error;

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.target.clear(color)
    }

    fn fill_circle(&mut self, center: Point, radius: u32, color: Rgb565) -> Result<(), Self::Error> {
        Circle::with_center(center, diameter(radius))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: u32,
        width: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(color)
            .stroke_width(width)
            .stroke_alignment(StrokeAlignment::Center)
            .build();
        Circle::with_center(center, diameter(radius))
            .into_styled(style)
            .draw(&mut self.target)
    }

    fn line(&mut self, from: Point, to: Point, width: u32, color: Rgb565) -> Result<(), Self::Error> {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(&mut self.target)
    }

    fn arc(
        &mut self,
        center: Point,
        radius: u32,
        start_deg: f32,
        sweep_deg: f32,
        width: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(color)
            .stroke_width(width)
            .stroke_alignment(StrokeAlignment::Center)
            .build();
        Arc::with_center(center, diameter(radius), start_deg.deg(), sweep_deg.deg())
            .into_styled(style)
            .draw(&mut self.target)
    }

    fn text(
        &mut self,
        text: &str,
        anchor: Point,
        size: TextSize,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        let character_style = MonoTextStyle::new(font(size), color);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(text, anchor, character_style, text_style)
            .draw(&mut self.target)
            .map(|_| ())
    }

    fn set_brightness(&mut self, level: Brightness) -> Result<(), Self::Error> {
        tracing::debug!(level = level.get(), "backlight");
        self.brightness = level;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::large_stack_arrays)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    fn renderer() -> GraphicsRenderer<MockDisplay<Rgb565>> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        GraphicsRenderer::new(display)
    }

    #[test]
    fn fill_circle_covers_center() {
        let mut r = renderer();
        r.fill_circle(Point::new(20, 20), 5, Rgb565::RED).unwrap();
        assert_eq!(r.target().get_pixel(Point::new(20, 20)), Some(Rgb565::RED));
        assert_eq!(r.target().get_pixel(Point::new(20, 30)), None);
    }

    #[test]
    fn stroke_circle_leaves_center_empty() {
        let mut r = renderer();
        r.stroke_circle(Point::new(30, 30), 10, 2, Rgb565::GREEN).unwrap();
        assert_eq!(r.target().get_pixel(Point::new(30, 30)), None);
        assert_eq!(r.target().get_pixel(Point::new(30, 20)), Some(Rgb565::GREEN));
    }

    #[test]
    fn quarter_arc_from_vertical_stays_in_right_half() {
        let mut r = renderer();
        r.arc(Point::new(32, 32), 20, -90.0, 90.0, 2, Rgb565::BLUE).unwrap();
        let affected = r.target().affected_area();
        assert!(affected.size.width > 0);
        assert!(affected.top_left.x >= 30, "{affected:?}");
    }

    #[test]
    fn clear_fills_whole_target() {
        let mut r = renderer();
        r.clear(Rgb565::BLACK).unwrap();
        assert_eq!(r.target().get_pixel(Point::new(0, 0)), Some(Rgb565::BLACK));
        assert_eq!(r.target().get_pixel(Point::new(63, 63)), Some(Rgb565::BLACK));
    }

    #[test]
    fn text_is_drawn_around_anchor() {
        let mut r = renderer();
        r.text("88", Point::new(32, 32), TextSize::Small, Rgb565::WHITE).unwrap();
        let affected = r.target().affected_area();
        assert!(affected.size.width > 0);
        assert!(affected.top_left.x < 32 && affected.top_left.x + affected.size.width as i32 > 32);
    }

    #[test]
    fn brightness_is_recorded() {
        let mut r = renderer();
        r.set_brightness(Brightness::new(90)).unwrap();
        assert_eq!(r.brightness(), Brightness::new(90));
    }
}
