//! Animation scheduler and frame parameters.
//!
//! [`AnimationScheduler`] owns the monotonically increasing frame counter and
//! advances it at most once per frame interval of wall-clock time, however
//! fast the control loop ticks.
//!
//! Everything else here is a pure function of the frame counter (and, where
//! stated, a snapshot field). Identical inputs always give identical outputs,
//! so an animation interrupted by an overlay resumes exactly where it was.

use core::f32::consts::{PI, TAU};
use embassy_time::{Duration, Instant};
use libm::{cosf, sinf};
use platform::Progress;

/// Frame-counter owner. Advances at most once per `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationScheduler {
    frame: u32,
    interval: Duration,
    last_advance: Option<Instant>,
}

impl AnimationScheduler {
    /// Create a scheduler that advances at most once per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            frame: 0,
            interval,
            last_advance: None,
        }
    }

    /// Current frame counter.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Advance the counter if at least one interval elapsed since the last
    /// advance. Returns `true` when the frame changed.
    ///
    /// The first call only arms the scheduler.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_advance else {
            self.last_advance = Some(now);
            return false;
        };
        if now.saturating_duration_since(last) < self.interval {
            return false;
        }
        self.frame = self.frame.wrapping_add(1);
        self.last_advance = Some(now);
        true
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

// ── Idle: rolling eyes ─────────────────────────────────────────────────────

/// Eye radius in pixels.
pub const EYE_SIZE: i32 = 40;
/// Horizontal distance of each eye from the panel center.
pub const EYE_SPACING: i32 = 60;

/// Position within the 360-frame eye loop, `0.0..1.0`.
#[allow(clippy::cast_precision_loss)]
fn eye_loop_phase(frame: u32) -> f32 {
    (frame % 360) as f32 / 360.0
}

#[allow(clippy::cast_precision_loss)]
fn wave(frame: u32, rate: f32) -> f32 {
    sinf(frame as f32 * rate)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn level(base: f32, amplitude: f32, s: f32) -> u8 {
    (base + amplitude * s).clamp(0.0, 255.0) as u8
}

/// Pupil offset from the eye center for `frame`.
///
/// The pupil travels an eased loop once every 360 frames while its distance
/// from the center breathes between 2 and 12 pixels.
#[allow(clippy::cast_possible_truncation)]
pub fn idle_pupil_offset(frame: u32) -> (i32, i32) {
    let t = eye_loop_phase(frame);
    let eased = (sinf(t * TAU - PI / 2.0) + 1.0) / 2.0;
    let radius = 7.0 + 5.0 * sinf(t * TAU);
    let x = radius * cosf(eased * TAU);
    let y = radius * sinf(eased * TAU);
    (x as i32, y as i32)
}

/// `true` while the eyes are closed.
pub fn is_blinking(frame: u32) -> bool {
    frame % 150 < 10 || frame % 230 < 6
}

/// Brightness of the glow around the eyes.
pub fn eye_glow(frame: u32) -> u8 {
    level(40.0, 30.0, wave(frame, 0.015))
}

/// Brightness of the breathing outer ring.
pub fn background_breath(frame: u32) -> u8 {
    level(30.0, 25.0, wave(frame, 0.012))
}

/// Brightness of the pulsing corner dots on the idle screen.
pub fn idle_corner_pulse(frame: u32) -> u8 {
    level(100.0, 100.0, wave(frame, 0.01))
}

/// Brightness of the ambient edge ring on the idle screen.
pub fn idle_ring_glow(frame: u32) -> u8 {
    level(30.0, 20.0, wave(frame, 0.2))
}

// ── Printing ───────────────────────────────────────────────────────────────

/// Radius of the progress ring.
pub const RING_RADIUS: u32 = 80;
/// Number of particles orbiting the progress ring.
pub const PARTICLE_COUNT: usize = 6;

/// Start angle of the progress ring (top of the panel).
pub const RING_START_DEG: f32 = -90.0;

/// End angle of the progress ring: `-90° + 360° × progress / 100`.
pub fn ring_end_deg(progress: Progress) -> f32 {
    RING_START_DEG + ring_sweep_deg(progress)
}

/// Sweep of the progress ring in degrees.
pub fn ring_sweep_deg(progress: Progress) -> f32 {
    360.0 * f32::from(progress.get()) / 100.0
}

/// Number of trailing dots after "PRINTING" (0..=3 rotating).
#[allow(clippy::cast_possible_truncation)]
pub fn ellipsis_phase(frame: u32) -> u8 {
    ((frame / 2) % 4) as u8
}

/// Title text for an ellipsis phase.
pub fn printing_title(frame: u32) -> &'static str {
    match ellipsis_phase(frame) {
        0 => "PRINTING.",
        1 => "PRINTING..",
        2 => "PRINTING...",
        _ => "PRINTING",
    }
}

/// Vertical wobble of the title text in pixels (±3).
#[allow(clippy::cast_possible_truncation)]
pub fn title_wave_offset(frame: u32) -> i32 {
    (3.0 * wave(frame, 0.5)) as i32
}

/// Brightness of the temperature read-out under the ring.
pub fn temperature_pulse(frame: u32) -> u8 {
    level(200.0, 55.0, wave(frame, 0.3))
}

/// Brightness of the activity dots in the top corners.
pub fn printing_corner_pulse(frame: u32) -> u8 {
    level(100.0, 100.0, wave(frame, 0.4))
}

/// Angles (degrees) of the particles orbiting the progress ring.
pub fn particle_angles(frame: u32) -> [f32; PARTICLE_COUNT] {
    #[allow(clippy::cast_precision_loss)]
    let base = ((frame % 120).wrapping_mul(3)) as f32;
    let mut angles = [0.0; PARTICLE_COUNT];
    let mut offset = 0.0;
    for a in &mut angles {
        *a = base + offset;
        offset += 60.0;
    }
    angles
}

/// Point at `radius` from `center` in direction `deg`.
#[allow(clippy::cast_possible_truncation)]
pub fn polar(center: (i32, i32), radius: u32, deg: f32) -> (i32, i32) {
    let rad = deg * PI / 180.0;
    #[allow(clippy::cast_precision_loss)]
    let r = radius as f32;
    (
        center.0.saturating_add((r * cosf(rad)) as i32),
        center.1.saturating_add((r * sinf(rad)) as i32),
    )
}

// ── Circle overlay ─────────────────────────────────────────────────────────

/// Rotation of the circle-gesture overlay, one revolution per second.
#[allow(clippy::cast_precision_loss)]
pub fn circle_overlay_angle(elapsed: Duration) -> f32 {
    (elapsed.as_millis() % 1000) as f32 * 0.36
}

// ── Touch feedback ─────────────────────────────────────────────────────────

/// Remaining intensity (255 → 0) of the touch-feedback ring after `elapsed`
/// of a `duration`-long fade. `None` once the fade is over.
#[allow(clippy::cast_possible_truncation)]
pub fn feedback_fade(elapsed: Duration, duration: Duration) -> Option<u8> {
    let total = duration.as_millis();
    let done = elapsed.as_millis();
    if total == 0 || done >= total {
        return None;
    }
    let left = total.saturating_sub(done).saturating_mul(255).checked_div(total)?;
    Some(left as u8)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::cast_possible_truncation)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_rate_limits() {
        let mut s = AnimationScheduler::new(Duration::from_millis(100));
        assert!(!s.tick(Instant::from_millis(0)));
        assert!(!s.tick(Instant::from_millis(10)));
        assert!(!s.tick(Instant::from_millis(99)));
        assert!(s.tick(Instant::from_millis(100)));
        assert_eq!(s.frame(), 1);
        assert!(!s.tick(Instant::from_millis(150)));
        // A long stall advances by one frame only.
        assert!(s.tick(Instant::from_millis(1_000)));
        assert_eq!(s.frame(), 2);
    }

    #[test]
    fn test_pupil_offset_is_pure() {
        let first = idle_pupil_offset(237);
        for f in 0..500 {
            let _ = idle_pupil_offset(f);
        }
        assert_eq!(idle_pupil_offset(237), first);
    }

    #[test]
    fn test_pupil_stays_inside_eye() {
        for f in 0..360 {
            let (x, y) = idle_pupil_offset(f);
            assert!(x.abs() <= 12 && y.abs() <= 12, "frame {f}: ({x}, {y})");
        }
    }

    #[test]
    fn test_blink_windows() {
        assert!(is_blinking(0));
        assert!(is_blinking(9));
        assert!(!is_blinking(10));
        assert!(is_blinking(230));
        assert!(is_blinking(235));
        assert!(!is_blinking(236));
        assert!(is_blinking(300));
    }

    #[test]
    fn test_ring_angles() {
        assert_eq!(ring_end_deg(Progress::new(0)), -90.0);
        assert_eq!(ring_end_deg(Progress::new(50)), 90.0);
        assert_eq!(ring_end_deg(Progress::COMPLETE), 270.0);
    }

    #[test]
    fn test_ellipsis_rotates_every_two_frames() {
        let phases: [u8; 8] = core::array::from_fn(|i| ellipsis_phase(i as u32));
        assert_eq!(phases, [0, 0, 1, 1, 2, 2, 3, 3]);
        assert_eq!(printing_title(4), "PRINTING...");
        assert_eq!(printing_title(6), "PRINTING");
    }

    #[test]
    fn test_particles_are_evenly_spaced() {
        let a = particle_angles(17);
        for pair in a.windows(2) {
            assert!((pair[1] - pair[0] - 60.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_pulses_stay_in_range() {
        for f in (0..10_000).step_by(7) {
            assert!((10..=70).contains(&eye_glow(f)));
            assert!((5..=55).contains(&background_breath(f)));
            assert!(temperature_pulse(f) >= 145);
            assert!(title_wave_offset(f).abs() <= 3);
        }
    }

    #[test]
    fn test_feedback_fades_out() {
        let d = Duration::from_millis(300);
        assert_eq!(feedback_fade(Duration::from_millis(0), d), Some(255));
        let mid = feedback_fade(Duration::from_millis(150), d).unwrap();
        assert!((126..=128).contains(&mid));
        assert_eq!(feedback_fade(Duration::from_millis(300), d), None);
    }

    #[test]
    fn test_polar_points() {
        assert_eq!(polar((120, 120), 80, 0.0), (200, 120));
        let (x, y) = polar((120, 120), 80, -90.0);
        assert_eq!(x, 120);
        assert_eq!(y, 40);
    }
}
