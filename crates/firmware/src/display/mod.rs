//! Display output for the round 240×240 GC9A01 panel.
//!
//! The panel itself is any `embedded_graphics` [`DrawTarget`] with RGB565
//! pixels: the SPI panel driver on hardware, a simulator framebuffer on the
//! desktop. [`GraphicsRenderer`] turns the presentation core's primitive
//! calls into embedded-graphics drawing on that target.
//!
//! [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget

pub mod graphics;

pub use graphics::GraphicsRenderer;

/// Display width in pixels.
pub const DISPLAY_WIDTH: u32 = platform::config::SCREEN_SIZE;

/// Display height in pixels.
pub const DISPLAY_HEIGHT: u32 = platform::config::SCREEN_SIZE;
