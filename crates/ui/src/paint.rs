//! Scene painting: turns a [`Scene`] into primitive [`Renderer`] calls.
//!
//! Pure layout code: every input (scene, snapshot, frame, palette) is passed
//! in, so painting the same scene twice produces the same calls.

#![allow(clippy::arithmetic_side_effects)]

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, RgbColor};
use heapless::String;
use platform::config::{APP_NAME, APP_VERSION};
use platform::{PrinterSnapshot, Renderer, TextSize, ThemeColors};

use crate::animation::{self, EYE_SIZE, EYE_SPACING, RING_RADIUS, RING_START_DEG};
use crate::presentation::Scene;
use crate::screen::{Screen, ViewMode};

/// Panel center in display coordinates.
pub const CENTER: Point = Point::new(120, 120);

/// File names longer than this are shortened.
pub const FILE_NAME_MAX: usize = 20;
const FILE_NAME_KEEP: usize = 17;

/// Bytes needed for [`FILE_NAME_MAX`] characters of up to four UTF-8 bytes.
pub const FILE_NAME_BYTES: usize = FILE_NAME_MAX * 4;

/// Scale a color towards black; `level` 255 keeps it unchanged.
pub fn dim(color: Rgb565, level: u8) -> Rgb565 {
    let scale = |c: u8| -> u8 {
        let scaled = u16::from(c).saturating_mul(u16::from(level)) / 255;
        u8::try_from(scaled).unwrap_or(u8::MAX)
    };
    Rgb565::new(scale(color.r()), scale(color.g()), scale(color.b()))
}

/// Format seconds as `Xh Ym`, `Xm Ys` or `Xs`.
pub fn format_duration(seconds: u32) -> String<16> {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    let mut s = String::new();
    let _ = if hours > 0 {
        write!(s, "{hours}h {minutes}m")
    } else if minutes > 0 {
        write!(s, "{minutes}m {secs}s")
    } else {
        write!(s, "{secs}s")
    };
    s
}

/// Format a temperature as `actual/target`, or `actual` with the heater off.
pub fn format_temperature(actual: f32, target: f32) -> String<16> {
    let mut s = String::new();
    let _ = if target > 0.0 {
        write!(s, "{actual:.0}/{target:.0}")
    } else {
        write!(s, "{actual:.0}")
    };
    s
}

/// Shorten file names over [`FILE_NAME_MAX`] characters to 17 characters
/// plus `...`.
pub fn truncate_file_name(name: &str) -> String<FILE_NAME_BYTES> {
    let mut s = String::new();
    if name.chars().count() <= FILE_NAME_MAX {
        let _ = s.push_str(name);
        return s;
    }
    for ch in name.chars().take(FILE_NAME_KEEP) {
        let _ = s.push(ch);
    }
    let _ = s.push_str("...");
    s
}

fn point(p: (i32, i32)) -> Point {
    Point::new(p.0, p.1)
}

fn offset(dx: i32, dy: i32) -> Point {
    CENTER + Point::new(dx, dy)
}

/// Paint `scene`. `snapshot` is the last known printer status; screens that
/// need data fall back to zeros without one.
pub fn paint_scene<R: Renderer>(
    r: &mut R,
    scene: &Scene,
    snapshot: Option<&PrinterSnapshot>,
    colors: &ThemeColors,
) -> Result<(), R::Error> {
    let fallback = PrinterSnapshot::default();
    let snap = snapshot.unwrap_or(&fallback);
    match *scene {
        Scene::Screen { screen, view, frame } => match (screen, view) {
            (Screen::Boot, _) => boot(r, colors),
            (Screen::Connecting, _) => message(r, colors, colors.text, "Connecting", "to WiFi..."),
            (Screen::Connected, _) => connected(r, colors),
            (Screen::WifiError, _) => message(r, colors, colors.error, "WiFi Error", "Check config"),
            (Screen::KlipperError, _) => klipper_offline(r, colors),
            (Screen::Idle, ViewMode::DataView) => idle_data(r, snap, colors),
            (Screen::Idle, ViewMode::AnimationView) => idle_animation(r, snap, frame, colors),
            (Screen::Printing, ViewMode::DataView) => printing_data(r, snap, colors),
            (Screen::Printing, ViewMode::AnimationView) => {
                printing_animation(r, snap, frame, colors)
            }
            (Screen::Paused, _) => paused(r, snap, colors),
            (Screen::Complete, _) => complete(r, snap, colors),
            (Screen::Error, _) => error(r, colors),
        },
        Scene::BrightnessOverlay(level) => {
            let pct = u32::from(level.get()).saturating_mul(100) / 255;
            let mut s: String<8> = String::new();
            let _ = write!(s, "{pct}%");
            r.text("Brightness", offset(0, -40), TextSize::Medium, colors.secondary)?;
            r.text(&s, CENTER, TextSize::Large, colors.text)?;
            let sweep = 360.0 * f32::from(level.get()) / 255.0;
            r.arc(CENTER, 100, RING_START_DEG, sweep, 6, colors.accent)
        }
        Scene::CircleOverlay { elapsed } => circle_overlay(r, elapsed, colors),
    }
}

/// Draw the touch-feedback ring at `center` with `intensity` (255 = fresh).
pub fn paint_feedback_ring<R: Renderer>(
    r: &mut R,
    center: (i32, i32),
    intensity: u8,
    colors: &ThemeColors,
) -> Result<(), R::Error> {
    // The ring grows as it fades.
    let radius = 10 + u32::from(255 - intensity) / 25;
    r.stroke_circle(point(center), radius, 2, dim(colors.accent, intensity))
}

fn boot<R: Renderer>(r: &mut R, c: &ThemeColors) -> Result<(), R::Error> {
    let mut version: String<16> = String::new();
    let _ = write!(version, "v{APP_VERSION}");
    r.text(APP_NAME, offset(0, -40), TextSize::Large, c.accent)?;
    r.text(&version, offset(0, 20), TextSize::Small, c.secondary)?;
    r.stroke_circle(offset(0, 60), 10, 2, c.accent)
}

fn message<R: Renderer>(
    r: &mut R,
    c: &ThemeColors,
    color: Rgb565,
    title: &str,
    detail: &str,
) -> Result<(), R::Error> {
    r.text(title, offset(0, -20), TextSize::Medium, color)?;
    r.text(detail, offset(0, 10), TextSize::Small, c.secondary)?;
    r.stroke_circle(offset(0, 50), 12, 2, color)
}

fn connected<R: Renderer>(r: &mut R, c: &ThemeColors) -> Result<(), R::Error> {
    r.text("Connected!", offset(0, -10), TextSize::Medium, c.success)?;
    check_mark(r, offset(0, 40), c.success)
}

fn klipper_offline<R: Renderer>(r: &mut R, c: &ThemeColors) -> Result<(), R::Error> {
    r.text("Klipper", offset(0, -30), TextSize::Medium, c.error)?;
    r.text("Offline", CENTER, TextSize::Medium, c.error)?;
    r.text("Reconnecting...", offset(0, 30), TextSize::Small, c.secondary)
}

fn check_mark<R: Renderer>(r: &mut R, at: Point, color: Rgb565) -> Result<(), R::Error> {
    r.line(at + Point::new(-15, 0), at + Point::new(-5, 10), 4, color)?;
    r.line(at + Point::new(-5, 10), at + Point::new(15, -10), 4, color)
}

fn cross<R: Renderer>(r: &mut R, at: Point, color: Rgb565) -> Result<(), R::Error> {
    r.stroke_circle(at, 20, 3, color)?;
    r.line(at + Point::new(-10, -10), at + Point::new(10, 10), 3, color)?;
    r.line(at + Point::new(10, -10), at + Point::new(-10, 10), 3, color)
}

fn temperatures<R: Renderer>(
    r: &mut R,
    snap: &PrinterSnapshot,
    at: Point,
    color: Rgb565,
) -> Result<(), R::Error> {
    let mut s: String<32> = String::new();
    let _ = write!(s, "E:{:.0} B:{:.0}", snap.hotend_temp, snap.bed_temp);
    r.text(&s, at, TextSize::Small, color)
}

fn progress_ring<R: Renderer>(
    r: &mut R,
    snap: &PrinterSnapshot,
    track: Rgb565,
    fill: Rgb565,
) -> Result<(), R::Error> {
    r.stroke_circle(CENTER, RING_RADIUS, 8, track)?;
    let sweep = animation::ring_sweep_deg(snap.progress);
    if sweep > 0.0 {
        r.arc(CENTER, RING_RADIUS, RING_START_DEG, sweep, 8, fill)?;
    }
    Ok(())
}

fn percent<R: Renderer>(
    r: &mut R,
    snap: &PrinterSnapshot,
    at: Point,
    size: TextSize,
    color: Rgb565,
) -> Result<(), R::Error> {
    let mut s: String<8> = String::new();
    let _ = write!(s, "{}%", snap.progress.get());
    r.text(&s, at, size, color)
}

fn idle_data<R: Renderer>(r: &mut R, snap: &PrinterSnapshot, c: &ThemeColors) -> Result<(), R::Error> {
    r.text("Ready", offset(0, -30), TextSize::Large, c.text)?;
    let hotend = format_temperature(snap.hotend_temp, snap.hotend_target);
    let bed = format_temperature(snap.bed_temp, snap.bed_target);
    let mut line: String<40> = String::new();
    let _ = write!(line, "E:{hotend} B:{bed}");
    r.text(&line, offset(0, 10), TextSize::Small, c.warning)?;
    if let (Some(t), Some(h)) = (snap.chamber_temp, snap.chamber_humidity) {
        let mut env: String<24> = String::new();
        let _ = write!(env, "{t:.0}C {h:.0}%");
        r.text(&env, offset(0, 30), TextSize::Small, c.secondary)?;
    }
    Ok(())
}

fn idle_animation<R: Renderer>(
    r: &mut R,
    snap: &PrinterSnapshot,
    frame: u32,
    c: &ThemeColors,
) -> Result<(), R::Error> {
    let blinking = animation::is_blinking(frame);
    let pupil = point(animation::idle_pupil_offset(frame));
    let eye_radius = EYE_SIZE.unsigned_abs();

    for dx in [-EYE_SPACING, EYE_SPACING] {
        let eye = offset(dx, 0);
        if blinking {
            r.fill_circle(eye, eye_radius, c.bg)?;
            r.line(eye + Point::new(-EYE_SIZE, 0), eye + Point::new(EYE_SIZE, 0), 4, c.text)?;
            continue;
        }
        let glow = animation::eye_glow(frame);
        r.stroke_circle(eye, eye_radius + 7, 2, dim(c.accent, glow))?;
        r.fill_circle(eye, eye_radius, c.text)?;
        r.fill_circle(eye + pupil, eye_radius / 2, c.accent)?;
        r.fill_circle(eye + pupil, eye_radius / 3, Rgb565::BLACK)?;
        r.fill_circle(eye + pupil + Point::new(-6, -6), 4, Rgb565::WHITE)?;
    }

    if !blinking {
        let breath = animation::background_breath(frame);
        r.stroke_circle(CENTER, 115, 4, dim(c.secondary, breath))?;
        let corner = dim(c.highlight, animation::idle_corner_pulse(frame));
        for (x, y) in [(20, 20), (220, 20), (20, 220), (220, 220)] {
            r.fill_circle(Point::new(x, y), 3, corner)?;
        }
    }
    let glow = animation::idle_ring_glow(frame);
    r.stroke_circle(CENTER, 118, 1, dim(c.accent, glow))?;
    temperatures(r, snap, offset(0, 90), c.secondary)
}

fn printing_data<R: Renderer>(
    r: &mut R,
    snap: &PrinterSnapshot,
    c: &ThemeColors,
) -> Result<(), R::Error> {
    progress_ring(r, snap, c.dimmed, c.accent)?;
    percent(r, snap, offset(0, -10), TextSize::Large, c.text)?;
    temperatures(r, snap, offset(0, 25), c.warning)?;
    if snap.time_left_s > 0 {
        r.text(&format_duration(snap.time_left_s), offset(0, 45), TextSize::Small, c.secondary)?;
    }
    if !snap.file_name.is_empty() {
        let name = truncate_file_name(&snap.file_name);
        r.text(&name, offset(0, 70), TextSize::Small, c.accent)?;
    }
    let mut z: String<16> = String::new();
    let _ = write!(z, "Z:{:.2}", snap.pos_z);
    r.text(&z, offset(0, 90), TextSize::Small, c.secondary)
}

fn printing_animation<R: Renderer>(
    r: &mut R,
    snap: &PrinterSnapshot,
    frame: u32,
    c: &ThemeColors,
) -> Result<(), R::Error> {
    r.clear(c.bg)?;
    progress_ring(r, snap, c.dimmed, c.accent)?;
    for (i, deg) in animation::particle_angles(frame).into_iter().enumerate() {
        let p = animation::polar((CENTER.x, CENTER.y), RING_RADIUS + 15, deg);
        let size = if i % 2 == 0 { 3 } else { 4 };
        r.fill_circle(point(p), size, c.highlight)?;
    }
    percent(r, snap, CENTER, TextSize::Large, c.text)?;

    let title_y = 25 + animation::title_wave_offset(frame);
    r.text(
        animation::printing_title(frame),
        Point::new(CENTER.x, title_y),
        TextSize::Medium,
        c.accent,
    )?;

    let pulse = dim(c.secondary, animation::temperature_pulse(frame));
    temperatures(r, snap, Point::new(CENTER.x, 215), pulse)?;

    let corner = dim(c.highlight, animation::printing_corner_pulse(frame));
    r.fill_circle(Point::new(15, 15), 3, corner)?;
    r.fill_circle(Point::new(225, 15), 3, corner)
}

fn paused<R: Renderer>(r: &mut R, snap: &PrinterSnapshot, c: &ThemeColors) -> Result<(), R::Error> {
    progress_ring(r, snap, c.dimmed, c.warning)?;
    r.text("PAUSED", offset(0, -10), TextSize::Medium, c.warning)?;
    percent(r, snap, offset(0, 20), TextSize::Medium, c.text)?;
    temperatures(r, snap, offset(0, 50), c.warning)
}

fn complete<R: Renderer>(r: &mut R, snap: &PrinterSnapshot, c: &ThemeColors) -> Result<(), R::Error> {
    check_mark(r, offset(0, -20), c.success)?;
    r.text("COMPLETE", offset(0, 30), TextSize::Medium, c.success)?;
    r.text(&format_duration(snap.print_time_s), offset(0, 60), TextSize::Small, c.secondary)
}

fn error<R: Renderer>(r: &mut R, c: &ThemeColors) -> Result<(), R::Error> {
    cross(r, offset(0, -20), c.error)?;
    r.text("ERROR", offset(0, 30), TextSize::Medium, c.error)?;
    r.text("Check printer", offset(0, 60), TextSize::Small, c.secondary)
}

fn circle_overlay<R: Renderer>(
    r: &mut R,
    elapsed: embassy_time::Duration,
    c: &ThemeColors,
) -> Result<(), R::Error> {
    let angle = animation::circle_overlay_angle(elapsed);
    let rings = [(100, c.accent), (80, c.highlight), (60, c.success), (40, c.warning)];
    let mut dir = 1.0;
    for (radius, color) in rings {
        r.stroke_circle(CENTER, radius, 1, dim(color, 60))?;
        r.arc(CENTER, radius, angle * dir, 90.0, 5, color)?;
        dir = -dir;
    }
    r.text("Wheee!", CENTER, TextSize::Medium, c.text)
}
