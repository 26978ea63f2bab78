//! Gesture classifier: turns the raw touch-sample stream into discrete
//! gesture events.
//!
//! # State machine
//!
//! ```text
//!   Idle ──valid──▶ Down ──valid──▶ Tracking ──invalid──▶ (classify) ──▶ Idle
//!    ▲                │                                                  │
//!    └────────────────┴──────────────invalid─────────────────────────────┘
//! ```
//!
//! Each touch session ends in exactly one terminal event (`Tap`, `DoubleTap`,
//! a swipe, `Circle` or `Up`). The terminal event is latched and handed out
//! once by [`GestureClassifier::take_event`]; `Down` and `Move` are only
//! returned from [`GestureClassifier::update`] for immediate feedback.
//!
//! Classification priority on release is fixed: Circle > Swipe > Tap > Up.

use embassy_time::{Duration, Instant};
use platform::{TouchSample, ValidConfig};

/// Touch events produced by the classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEvent {
    /// Nothing happened.
    #[default]
    None,
    /// A finger touched down (informational).
    Down,
    /// The finger moved more than the noise threshold (informational).
    Move,
    /// Released without a recognizable gesture.
    Up,
    /// Short touch.
    Tap,
    /// Second tap released within the double-tap window.
    DoubleTap,
    /// Swipe towards the top of the panel.
    SwipeUp,
    /// Swipe towards the bottom of the panel.
    SwipeDown,
    /// Swipe towards the left edge.
    SwipeLeft,
    /// Swipe towards the right edge.
    SwipeRight,
    /// Path visited all four quadrants around the panel center.
    Circle,
}

impl TouchEvent {
    /// `true` for events that end a touch session.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::None | Self::Down | Self::Move)
    }
}

/// Run-time tunable classification thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureThresholds {
    /// Minimum start→end displacement on the dominant axis for a swipe.
    pub swipe_px: u32,
    /// Per-sample movement at or below which no `Move` is reported.
    pub noise_px: u32,
    /// Sessions shorter than this classify as taps.
    pub tap_duration: Duration,
    /// Window for pairing two taps into a double tap; `None` disables it.
    pub double_tap_window: Option<Duration>,
    /// Quadrant origin.
    pub center: (i32, i32),
}

impl From<&ValidConfig> for GestureThresholds {
    fn from(cfg: &ValidConfig) -> Self {
        Self {
            swipe_px: u32::from(cfg.swipe_threshold_px),
            noise_px: u32::from(cfg.noise_threshold_px),
            tap_duration: cfg.tap_threshold,
            double_tap_window: cfg.double_tap_window,
            center: cfg.screen_center,
        }
    }
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self::from(&ValidConfig::default())
    }
}

/// Bit for every quadrant set.
pub const ALL_QUADRANTS: u8 = 0b1111;

/// Quadrant of `point` relative to `center`.
///
/// Screen Y grows downwards, so Q0 is top-right, Q1 top-left, Q2 bottom-left
/// and Q3 bottom-right. Points on an axis belong to the non-negative side.
pub fn quadrant(point: (i32, i32), center: (i32, i32)) -> u8 {
    let rel_x = point.0.saturating_sub(center.0);
    let rel_y = point.1.saturating_sub(center.1);
    match (rel_x >= 0, rel_y >= 0) {
        (true, false) => 0,
        (false, false) => 1,
        (false, true) => 2,
        (true, true) => 3,
    }
}

/// Bookkeeping for one touch, from touch-down until release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureSession {
    /// First valid point of the session.
    pub start_point: (i32, i32),
    /// Time of touch-down.
    pub start_time: Instant,
    /// Most recent valid point.
    pub last_point: (i32, i32),
    /// Visited quadrants, bit `n` = Qn.
    pub quadrant_mask: u8,
}

impl GestureSession {
    fn begin(point: (i32, i32), now: Instant, center: (i32, i32)) -> Self {
        Self {
            start_point: point,
            start_time: now,
            last_point: point,
            quadrant_mask: 1 << quadrant(point, center),
        }
    }

    /// Net displacement from touch-down to the latest point.
    pub fn displacement(&self) -> (i32, i32) {
        (
            self.last_point.0.saturating_sub(self.start_point.0),
            self.last_point.1.saturating_sub(self.start_point.1),
        )
    }
}

/// Classifies one touch session at a time from raw samples.
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    session: Option<GestureSession>,
    pending: TouchEvent,
    last_tap_release: Option<Instant>,
}

impl GestureClassifier {
    /// Create a classifier with the given thresholds.
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            session: None,
            pending: TouchEvent::None,
            last_tap_release: None,
        }
    }

    /// Replace the thresholds. Takes effect from the next sample.
    pub fn set_thresholds(&mut self, thresholds: GestureThresholds) {
        self.thresholds = thresholds;
    }

    /// Current thresholds.
    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// The session in progress, if a finger is down.
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Feed one sample taken at `now`.
    ///
    /// Returns the event this sample produced: `Down`/`Move` while touching,
    /// the terminal gesture on release, otherwise `None`. A terminal gesture
    /// is also latched for [`GestureClassifier::take_event`].
    pub fn update(&mut self, sample: TouchSample, now: Instant) -> TouchEvent {
        if !sample.valid {
            let Some(session) = self.session.take() else {
                return TouchEvent::None;
            };
            let event = self.classify(&session, now);
            tracing::debug!(?event, "gesture classified");
            self.pending = event;
            return event;
        }

        let point = (sample.x, sample.y);
        let center = self.thresholds.center;
        if let Some(session) = self.session.as_mut() {
            let dx = point.0.saturating_sub(session.last_point.0).unsigned_abs();
            let dy = point.1.saturating_sub(session.last_point.1).unsigned_abs();
            session.quadrant_mask |= 1 << quadrant(point, center);
            session.last_point = point;
            return if dx.max(dy) > self.thresholds.noise_px {
                TouchEvent::Move
            } else {
                TouchEvent::None
            };
        }

        self.session = Some(GestureSession::begin(point, now, center));
        TouchEvent::Down
    }

    /// Read and clear the latched terminal event.
    pub fn take_event(&mut self) -> TouchEvent {
        core::mem::take(&mut self.pending)
    }

    fn classify(&mut self, session: &GestureSession, released: Instant) -> TouchEvent {
        if session.quadrant_mask & ALL_QUADRANTS == ALL_QUADRANTS {
            return TouchEvent::Circle;
        }

        let (dx, dy) = session.displacement();
        let (adx, ady) = (dx.unsigned_abs(), dy.unsigned_abs());
        if adx.max(ady) > self.thresholds.swipe_px {
            return if ady > adx {
                if dy < 0 {
                    TouchEvent::SwipeUp
                } else {
                    TouchEvent::SwipeDown
                }
            } else if dx < 0 {
                TouchEvent::SwipeLeft
            } else {
                TouchEvent::SwipeRight
            };
        }

        if released.saturating_duration_since(session.start_time) < self.thresholds.tap_duration {
            return self.tap_or_double(released);
        }

        TouchEvent::Up
    }

    fn tap_or_double(&mut self, released: Instant) -> TouchEvent {
        let Some(window) = self.thresholds.double_tap_window else {
            return TouchEvent::Tap;
        };
        match self.last_tap_release.take() {
            Some(prev) if released.saturating_duration_since(prev) <= window => TouchEvent::DoubleTap,
            _ => {
                self.last_tap_release = Some(released);
                TouchEvent::Tap
            }
        }
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    fn ms(t: u64) -> Instant {
        Instant::from_millis(t)
    }

    /// Feed `path` at 10 ms spacing starting at `t0`, release at `release`.
    fn run(c: &mut GestureClassifier, path: &[(i32, i32)], t0: u64, release: u64) -> TouchEvent {
        let mut t = t0;
        for &(x, y) in path {
            c.update(TouchSample::at(x, y), ms(t));
            t += 10;
        }
        c.update(TouchSample::RELEASED, ms(release))
    }

    #[test]
    fn test_no_release_means_no_event() {
        let mut c = GestureClassifier::default();
        c.update(TouchSample::at(100, 100), ms(0));
        c.update(TouchSample::at(170, 100), ms(50));
        assert_eq!(c.take_event(), TouchEvent::None);
    }

    #[test]
    fn test_swipe_right_is_one_shot() {
        let mut c = GestureClassifier::default();
        assert_eq!(c.update(TouchSample::at(100, 100), ms(0)), TouchEvent::Down);
        c.update(TouchSample::at(130, 100), ms(50));
        c.update(TouchSample::at(160, 100), ms(90));
        c.update(TouchSample::RELEASED, ms(100));
        assert_eq!(c.take_event(), TouchEvent::SwipeRight);
        assert_eq!(c.take_event(), TouchEvent::None);
    }

    #[test]
    fn test_swipe_directions() {
        let mut c = GestureClassifier::default();
        run(&mut c, &[(160, 100), (100, 100)], 0, 100);
        assert_eq!(c.take_event(), TouchEvent::SwipeLeft);
        run(&mut c, &[(150, 150), (150, 80)], 1000, 1100);
        assert_eq!(c.take_event(), TouchEvent::SwipeUp);
        run(&mut c, &[(150, 130), (150, 200)], 2000, 2100);
        assert_eq!(c.take_event(), TouchEvent::SwipeDown);
    }

    #[test]
    fn test_short_touch_is_tap() {
        let mut c = GestureClassifier::default();
        run(&mut c, &[(150, 150), (153, 152)], 0, 40);
        assert_eq!(c.take_event(), TouchEvent::Tap);
    }

    #[test]
    fn test_long_still_touch_is_up() {
        let mut c = GestureClassifier::default();
        run(&mut c, &[(150, 150), (151, 150)], 0, 800);
        assert_eq!(c.take_event(), TouchEvent::Up);
    }

    #[test]
    fn test_circle_beats_swipe() {
        let mut c = GestureClassifier::default();
        // Q0 → Q1 → Q2 → Q3 and ending far to the right of the start.
        let path = [(130, 60), (60, 60), (60, 180), (180, 180), (200, 130)];
        run(&mut c, &path, 0, 200);
        assert_eq!(c.take_event(), TouchEvent::Circle);
    }

    #[test]
    fn test_quadrant_boundaries() {
        let center = (120, 120);
        assert_eq!(quadrant((120, 119), center), 0);
        assert_eq!(quadrant((119, 119), center), 1);
        assert_eq!(quadrant((119, 120), center), 2);
        assert_eq!(quadrant((120, 120), center), 3);
    }

    #[test]
    fn test_noise_does_not_move() {
        let mut c = GestureClassifier::default();
        c.update(TouchSample::at(100, 100), ms(0));
        assert_eq!(c.update(TouchSample::at(105, 95), ms(10)), TouchEvent::None);
        assert_eq!(c.update(TouchSample::at(112, 95), ms(20)), TouchEvent::Move);
    }

    #[test]
    fn test_new_session_resets_quadrants() {
        let mut c = GestureClassifier::default();
        run(&mut c, &[(130, 60), (60, 60), (60, 180)], 0, 700);
        let _ = c.take_event();
        c.update(TouchSample::at(180, 180), ms(1000));
        assert_eq!(c.session().map(|s| s.quadrant_mask), Some(0b1000));
    }

    #[test]
    fn test_double_tap_when_enabled() {
        let mut c = GestureClassifier::new(GestureThresholds {
            double_tap_window: Some(Duration::from_millis(300)),
            ..GestureThresholds::default()
        });
        run(&mut c, &[(150, 150)], 0, 50);
        assert_eq!(c.take_event(), TouchEvent::Tap);
        run(&mut c, &[(150, 150)], 200, 250);
        assert_eq!(c.take_event(), TouchEvent::DoubleTap);
        // A third tap starts a new pair.
        run(&mut c, &[(150, 150)], 300, 350);
        assert_eq!(c.take_event(), TouchEvent::Tap);
    }

    #[test]
    fn test_double_tap_disabled_by_default() {
        let mut c = GestureClassifier::default();
        run(&mut c, &[(150, 150)], 0, 50);
        run(&mut c, &[(150, 150)], 100, 150);
        assert_eq!(c.take_event(), TouchEvent::Tap);
    }

    #[test]
    fn test_thresholds_are_runtime_configurable() {
        let mut c = GestureClassifier::default();
        c.set_thresholds(GestureThresholds {
            swipe_px: 100,
            ..GestureThresholds::default()
        });
        run(&mut c, &[(100, 100), (170, 100)], 0, 100);
        assert_eq!(c.take_event(), TouchEvent::Tap);
    }

    #[test]
    fn test_invalid_samples_never_produce_events() {
        let mut c = GestureClassifier::default();
        for t in 0..100 {
            assert_eq!(c.update(TouchSample::RELEASED, ms(t * 10)), TouchEvent::None);
        }
        assert_eq!(c.take_event(), TouchEvent::None);
    }
}
