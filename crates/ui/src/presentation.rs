//! Presentation state machine: decides which screen is shown and when it
//! is repainted.
//!
//! Three independent inputs drive it:
//! - printer snapshots ([`PresentationStateMachine::on_snapshot`]),
//! - classified gestures ([`PresentationStateMachine::on_gesture`]),
//! - the passage of time ([`PresentationStateMachine::tick`]): dwell
//!   cycling, overlay expiry, animation frames and touch-feedback fade.
//!
//! The machine never draws. Every entry point returns [`Effects`], a short
//! ordered list of side effects (clear, render a [`Scene`], change brightness,
//! change theme) that the caller applies. This keeps every decision testable
//! without a display attached.
//!
//! Overlays (brightness read-out, circle easter egg) are deadlines, not
//! sleeps: while one is up, gestures are ignored and snapshots are only
//! stored, and [`PresentationStateMachine::tick`] ends the overlay when its
//! deadline passes.

use embassy_time::{Duration, Instant};
use heapless::Vec;
use platform::{Brightness, PrinterSnapshot, ValidConfig};

use crate::animation::{feedback_fade, AnimationScheduler};
use crate::gesture::TouchEvent;
use crate::redraw::should_redraw;
use crate::screen::{Screen, ViewMode};

/// Direction of a theme change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThemeStep {
    /// `ThemeProvider::next_theme`
    Next,
    /// `ThemeProvider::previous_theme`
    Previous,
}

/// Something to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scene {
    /// A regular screen in the given view, using the last known snapshot.
    Screen {
        /// Screen to paint.
        screen: Screen,
        /// Data or animation half of the dwell cycle.
        view: ViewMode,
        /// Animation frame.
        frame: u32,
    },
    /// Large numeric brightness read-out.
    BrightnessOverlay(Brightness),
    /// Full-screen circle-gesture animation.
    CircleOverlay {
        /// Time since the overlay appeared.
        elapsed: Duration,
    },
}

/// One side effect requested by the state machine, applied in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Fill the canvas with the theme background.
    ClearCanvas,
    /// Paint a scene.
    Render(Scene),
    /// Apply a backlight level.
    SetBrightness(Brightness),
    /// Switch theme; subsequent renders use the new palette.
    CycleTheme(ThemeStep),
    /// Draw the fading ring under the last touch-down point.
    FeedbackRing {
        /// Touch-down point.
        center: (i32, i32),
        /// Remaining intensity, 255 = fresh.
        intensity: u8,
    },
}

/// Effects produced by one call.
pub type Effects = Vec<Effect, 8>;

/// Saved `(screen, view, override)` triple restored after the circle overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptSnapshot {
    /// Screen that was active.
    pub screen: Screen,
    /// View that was active.
    pub view: ViewMode,
    /// Whether manual override was set.
    pub manual_override: bool,
}

/// Transient overlay currently covering the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Brightness read-out, until the deadline.
    Brightness {
        /// When the overlay appeared.
        started: Instant,
        /// When the overlay goes away.
        until: Instant,
    },
    /// Circle-gesture animation.
    Circle {
        /// When the overlay appeared.
        started: Instant,
        /// When the overlay goes away.
        until: Instant,
    },
}

/// State owned exclusively by the [`PresentationStateMachine`].
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationState {
    /// The one active screen.
    pub current_screen: Screen,
    /// Suppresses automatic retargeting from printer state.
    pub manual_override: bool,
    /// Data or animation half of the dwell cycle.
    pub view_mode: ViewMode,
    /// When `view_mode` last changed (dwell timer origin).
    pub last_view_switch: Instant,
    /// Snapshot the current screen was last painted with.
    pub last_rendered_snapshot: Option<PrinterSnapshot>,
    /// Most recent snapshot received, rendered or not.
    pub last_snapshot: Option<PrinterSnapshot>,
    /// Triple to restore when the circle overlay ends.
    pub interrupt_snapshot: Option<InterruptSnapshot>,
    /// Overlay currently shown.
    pub overlay: Option<Overlay>,
    /// Touch-down time and point of the fading feedback ring.
    pub touch_feedback: Option<(Instant, (i32, i32))>,
    /// Backlight level.
    pub brightness: Brightness,
}

/// Timing and step settings the state machine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationTimings {
    /// Time the data view stays up.
    pub dwell_data: Duration,
    /// Time the animation view stays up.
    pub dwell_animation: Duration,
    /// Length of the circle overlay.
    pub circle_overlay: Duration,
    /// Length of the brightness overlay.
    pub brightness_overlay: Duration,
    /// Backlight units per vertical swipe.
    pub brightness_step: u8,
    /// Fade length of the touch-feedback ring.
    pub touch_feedback: Duration,
    /// Animation frame interval.
    pub animation_frame: Duration,
}

impl From<&ValidConfig> for PresentationTimings {
    fn from(cfg: &ValidConfig) -> Self {
        Self {
            dwell_data: cfg.dwell_data,
            dwell_animation: cfg.dwell_animation,
            circle_overlay: cfg.circle_overlay,
            brightness_overlay: cfg.brightness_overlay,
            brightness_step: cfg.brightness_step,
            touch_feedback: cfg.touch_feedback,
            animation_frame: cfg.animation_frame,
        }
    }
}

impl Default for PresentationTimings {
    fn default() -> Self {
        Self::from(&ValidConfig::default())
    }
}

fn later(t: Instant, d: Duration) -> Instant {
    t.checked_add(d).unwrap_or(Instant::MAX)
}

fn push(effects: &mut Effects, effect: Effect) {
    // Every entry point emits at most four effects.
    let _ = effects.push(effect);
}

/// The presentation core.
pub struct PresentationStateMachine {
    state: PresentationState,
    timings: PresentationTimings,
    animation: AnimationScheduler,
}

impl PresentationStateMachine {
    /// Start on the boot screen at `now`.
    pub fn new(timings: PresentationTimings, now: Instant) -> Self {
        Self {
            state: PresentationState {
                current_screen: Screen::Boot,
                manual_override: false,
                view_mode: ViewMode::DataView,
                last_view_switch: now,
                last_rendered_snapshot: None,
                last_snapshot: None,
                interrupt_snapshot: None,
                overlay: None,
                touch_feedback: None,
                brightness: Brightness::DEFAULT,
            },
            timings,
            animation: AnimationScheduler::new(timings.animation_frame),
        }
    }

    /// Read-only view of the state.
    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Active screen.
    pub fn current_screen(&self) -> Screen {
        self.state.current_screen
    }

    /// Active view mode.
    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    /// `true` while automatic retargeting is suppressed.
    pub fn manual_override(&self) -> bool {
        self.state.manual_override
    }

    /// Current animation frame.
    pub fn frame(&self) -> u32 {
        self.animation.frame()
    }

    /// Last known printer snapshot.
    pub fn snapshot(&self) -> Option<&PrinterSnapshot> {
        self.state.last_snapshot.as_ref()
    }

    /// `true` while an overlay covers the screen.
    pub fn overlay_active(&self) -> bool {
        self.state.overlay.is_some()
    }

    fn scene(&self) -> Scene {
        Scene::Screen {
            screen: self.state.current_screen,
            view: self.state.view_mode,
            frame: self.animation.frame(),
        }
    }

    fn repaint(&mut self, effects: &mut Effects) {
        push(effects, Effect::ClearCanvas);
        push(effects, Effect::Render(self.scene()));
        self.state
            .last_rendered_snapshot
            .clone_from(&self.state.last_snapshot);
    }

    /// Switch screen: reset view and dwell timer, clear and paint.
    fn retarget(&mut self, screen: Screen, now: Instant) -> Effects {
        tracing::debug!(from = ?self.state.current_screen, to = ?screen, "screen changed");
        self.state.current_screen = screen;
        self.state.view_mode = ViewMode::DataView;
        self.state.last_view_switch = now;
        let mut effects = Effects::new();
        self.repaint(&mut effects);
        effects
    }

    // ── Startup screens ──────────────────────────────────────────────────

    /// Show the boot splash.
    pub fn show_boot(&mut self, now: Instant) -> Effects {
        self.retarget(Screen::Boot, now)
    }

    /// Show the "connecting" screen.
    pub fn show_connecting(&mut self, now: Instant) -> Effects {
        self.retarget(Screen::Connecting, now)
    }

    /// Show the "connected" confirmation.
    pub fn show_connected(&mut self, now: Instant) -> Effects {
        self.retarget(Screen::Connected, now)
    }

    /// Show the Wi-Fi error screen. No-op if already shown.
    pub fn show_wifi_error(&mut self, now: Instant) -> Effects {
        if self.state.current_screen == Screen::WifiError {
            return Effects::new();
        }
        self.retarget(Screen::WifiError, now)
    }

    /// Show the Klipper-offline screen. No-op if already shown.
    pub fn show_klipper_error(&mut self, now: Instant) -> Effects {
        if self.state.current_screen == Screen::KlipperError {
            return Effects::new();
        }
        self.retarget(Screen::KlipperError, now)
    }

    // ── Snapshots ────────────────────────────────────────────────────────

    /// Deliver a printer snapshot.
    pub fn on_snapshot(&mut self, snapshot: PrinterSnapshot, now: Instant) -> Effects {
        let connected = snapshot.connected;
        let state = snapshot.state;
        let redraw = should_redraw(self.state.last_rendered_snapshot.as_ref(), &snapshot);
        self.state.last_snapshot = Some(snapshot);

        if self.state.overlay.is_some() {
            return Effects::new();
        }

        if !connected {
            if self.state.current_screen != Screen::KlipperError {
                tracing::warn!("printer offline");
            }
            return self.show_klipper_error(now);
        }

        let current = self.state.current_screen;
        let target = Screen::for_printer_state(state);

        // Leaving a startup or offline screen always follows the printer.
        if !is_status_screen(current) {
            return self.retarget(target.unwrap_or(Screen::Idle), now);
        }

        if !self.state.manual_override {
            if let Some(target) = target.filter(|t| *t != current) {
                return self.retarget(target, now);
            }
        }

        let mut effects = Effects::new();
        if redraw {
            self.repaint(&mut effects);
        }
        effects
    }

    // ── Gestures ─────────────────────────────────────────────────────────

    /// Start the touch-feedback ring at `point`. Ignored under an overlay.
    pub fn on_touch_down(&mut self, point: (i32, i32), now: Instant) {
        if self.state.overlay.is_none() {
            self.state.touch_feedback = Some((now, point));
        }
    }

    /// Deliver a classified gesture.
    pub fn on_gesture(&mut self, event: TouchEvent, now: Instant) -> Effects {
        let mut effects = Effects::new();
        if self.state.overlay.is_some() {
            return effects;
        }

        match event {
            TouchEvent::Tap => {
                self.state.manual_override = false;
                push(&mut effects, Effect::CycleTheme(ThemeStep::Next));
                self.repaint(&mut effects);
            }
            TouchEvent::DoubleTap => {
                // The first tap of the pair already stepped forward.
                self.state.manual_override = false;
                push(&mut effects, Effect::CycleTheme(ThemeStep::Previous));
                push(&mut effects, Effect::CycleTheme(ThemeStep::Previous));
                self.repaint(&mut effects);
            }
            TouchEvent::SwipeLeft | TouchEvent::SwipeRight => {
                self.state.manual_override = true;
                let current = self.state.current_screen;
                let next = if event == TouchEvent::SwipeLeft {
                    current.ring_next()
                } else {
                    current.ring_previous()
                };
                return self.retarget(next, now);
            }
            TouchEvent::SwipeUp | TouchEvent::SwipeDown => {
                let step = self.timings.brightness_step;
                let level = if event == TouchEvent::SwipeUp {
                    self.state.brightness.step_up(step)
                } else {
                    self.state.brightness.step_down(step)
                };
                tracing::debug!(level = level.get(), "brightness");
                self.state.brightness = level;
                self.state.overlay = Some(Overlay::Brightness {
                    started: now,
                    until: later(now, self.timings.brightness_overlay),
                });
                self.state.touch_feedback = None;
                push(&mut effects, Effect::SetBrightness(level));
                push(&mut effects, Effect::ClearCanvas);
                push(&mut effects, Effect::Render(Scene::BrightnessOverlay(level)));
            }
            TouchEvent::Circle => {
                self.state.interrupt_snapshot = Some(InterruptSnapshot {
                    screen: self.state.current_screen,
                    view: self.state.view_mode,
                    manual_override: self.state.manual_override,
                });
                self.state.overlay = Some(Overlay::Circle {
                    started: now,
                    until: later(now, self.timings.circle_overlay),
                });
                self.state.touch_feedback = None;
                push(&mut effects, Effect::ClearCanvas);
                push(
                    &mut effects,
                    Effect::Render(Scene::CircleOverlay {
                        elapsed: Duration::from_ticks(0),
                    }),
                );
            }
            TouchEvent::None | TouchEvent::Down | TouchEvent::Move | TouchEvent::Up => {}
        }
        effects
    }

    // ── Time ─────────────────────────────────────────────────────────────

    /// Advance timers to `now`.
    pub fn tick(&mut self, now: Instant) -> Effects {
        let new_frame = self.animation.tick(now);
        let mut effects = Effects::new();

        match self.state.overlay {
            Some(Overlay::Brightness { started, until }) => {
                if now >= until {
                    self.state.overlay = None;
                    self.resume_dwell(started, now);
                    tracing::debug!("brightness overlay ended");
                    self.repaint(&mut effects);
                }
                return effects;
            }
            Some(Overlay::Circle { started, until }) => {
                if now >= until {
                    self.end_circle_overlay(started, now);
                    self.repaint(&mut effects);
                } else if new_frame {
                    push(
                        &mut effects,
                        Effect::Render(Scene::CircleOverlay {
                            elapsed: now.saturating_duration_since(started),
                        }),
                    );
                }
                return effects;
            }
            None => {}
        }

        if self.state.current_screen.has_dwell_cycle() {
            let dwell = match self.state.view_mode {
                ViewMode::DataView => self.timings.dwell_data,
                ViewMode::AnimationView => self.timings.dwell_animation,
            };
            if now.saturating_duration_since(self.state.last_view_switch) >= dwell {
                self.state.view_mode = self.state.view_mode.flipped();
                self.state.last_view_switch = now;
                tracing::debug!(view = ?self.state.view_mode, "view flipped");
                self.repaint(&mut effects);
            } else if new_frame && self.state.view_mode == ViewMode::AnimationView {
                push(&mut effects, Effect::Render(self.scene()));
            }
        }

        if let Some((started, center)) = self.state.touch_feedback {
            match feedback_fade(now.saturating_duration_since(started), self.timings.touch_feedback) {
                Some(intensity) if new_frame => {
                    push(&mut effects, Effect::FeedbackRing { center, intensity });
                }
                Some(_) => {}
                None => {
                    self.state.touch_feedback = None;
                    // A frame drawn over the ring may not cover all of it.
                    if !effects.contains(&Effect::ClearCanvas) {
                        effects.clear();
                        self.repaint(&mut effects);
                    }
                }
            }
        }

        effects
    }

    /// The interrupted view keeps whatever dwell time it had left when an
    /// overlay appeared at `started`.
    fn resume_dwell(&mut self, started: Instant, now: Instant) {
        let paused = now.saturating_duration_since(started);
        self.state.last_view_switch = later(self.state.last_view_switch, paused);
    }

    fn end_circle_overlay(&mut self, started: Instant, now: Instant) {
        self.state.overlay = None;
        if let Some(saved) = self.state.interrupt_snapshot.take() {
            self.state.current_screen = saved.screen;
            self.state.view_mode = saved.view;
            self.state.manual_override = saved.manual_override;
        }
        self.resume_dwell(started, now);
        tracing::debug!(screen = ?self.state.current_screen, "circle overlay ended");
    }
}

/// Screens that reflect printer state, as opposed to startup/offline screens.
fn is_status_screen(screen: Screen) -> bool {
    matches!(
        screen,
        Screen::Idle | Screen::Printing | Screen::Paused | Screen::Complete | Screen::Error
    )
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;
    use platform::PrinterState;

    fn ms(t: u64) -> Instant {
        Instant::from_millis(t)
    }

    fn machine() -> PresentationStateMachine {
        PresentationStateMachine::new(PresentationTimings::default(), ms(0))
    }

    fn snap(state: PrinterState) -> PrinterSnapshot {
        PrinterSnapshot::with_state(state)
    }

    #[test]
    fn test_starts_on_boot() {
        let m = machine();
        assert_eq!(m.current_screen(), Screen::Boot);
        assert_eq!(m.view_mode(), ViewMode::DataView);
    }

    #[test]
    fn test_first_snapshot_leaves_startup_screen() {
        let mut m = machine();
        let fx = m.on_snapshot(snap(PrinterState::Printing), ms(10));
        assert_eq!(m.current_screen(), Screen::Printing);
        assert_eq!(fx[0], Effect::ClearCanvas);
    }

    #[test]
    fn test_auto_retarget_resets_view() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Idle), ms(0));
        m.tick(ms(10_000));
        assert_eq!(m.view_mode(), ViewMode::AnimationView);
        m.on_snapshot(snap(PrinterState::Printing), ms(10_100));
        assert_eq!(m.current_screen(), Screen::Printing);
        assert_eq!(m.view_mode(), ViewMode::DataView);
    }

    #[test]
    fn test_unchanged_snapshot_is_suppressed() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Idle), ms(0));
        assert!(m.on_snapshot(snap(PrinterState::Idle), ms(2_000)).is_empty());
    }

    #[test]
    fn test_manual_override_blocks_retarget_until_tap() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Complete), ms(0));
        m.on_gesture(TouchEvent::SwipeLeft, ms(100));
        assert_eq!(m.current_screen(), Screen::Idle);
        assert!(m.manual_override());

        m.on_snapshot(snap(PrinterState::Printing), ms(2_000));
        assert_eq!(m.current_screen(), Screen::Idle);

        let fx = m.on_gesture(TouchEvent::Tap, ms(2_100));
        assert!(!m.manual_override());
        assert_eq!(fx[0], Effect::CycleTheme(ThemeStep::Next));

        // Same snapshot again: retargets even though nothing changed.
        m.on_snapshot(snap(PrinterState::Printing), ms(4_000));
        assert_eq!(m.current_screen(), Screen::Printing);
    }

    #[test]
    fn test_swipes_walk_the_ring() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Idle), ms(0));
        m.on_gesture(TouchEvent::SwipeLeft, ms(10));
        assert_eq!(m.current_screen(), Screen::Printing);
        m.on_gesture(TouchEvent::SwipeRight, ms(20));
        m.on_gesture(TouchEvent::SwipeRight, ms(30));
        assert_eq!(m.current_screen(), Screen::Complete);
    }

    #[test]
    fn test_brightness_overlay_restores_screen() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Printing), ms(0));
        let fx = m.on_gesture(TouchEvent::SwipeUp, ms(100));
        let level = Brightness::new(225);
        assert_eq!(fx[0], Effect::SetBrightness(level));
        assert_eq!(fx[2], Effect::Render(Scene::BrightnessOverlay(level)));
        assert!(m.overlay_active());

        assert!(m.tick(ms(599)).is_empty());
        let fx = m.tick(ms(600));
        assert!(!m.overlay_active());
        assert!(matches!(
            fx[1],
            Effect::Render(Scene::Screen {
                screen: Screen::Printing,
                ..
            })
        ));
    }

    #[test]
    fn test_brightness_clamps_at_floor() {
        let mut m = machine();
        let mut t = 0;
        for _ in 0..12 {
            m.on_gesture(TouchEvent::SwipeDown, ms(t));
            t += 1_000;
            m.tick(ms(t));
        }
        assert_eq!(m.state().brightness.get(), Brightness::MIN);
    }

    #[test]
    fn test_gestures_ignored_during_overlay() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Idle), ms(0));
        m.on_gesture(TouchEvent::Circle, ms(100));
        assert!(m.on_gesture(TouchEvent::SwipeLeft, ms(200)).is_empty());
        assert_eq!(m.state().interrupt_snapshot.unwrap().screen, Screen::Idle);
    }

    #[test]
    fn test_snapshots_stored_but_not_applied_during_overlay() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Idle), ms(0));
        m.on_gesture(TouchEvent::Circle, ms(100));
        assert!(m.on_snapshot(snap(PrinterState::Printing), ms(500)).is_empty());
        assert_eq!(m.snapshot().unwrap().state, PrinterState::Printing);

        m.tick(ms(3_100));
        assert_eq!(m.current_screen(), Screen::Idle);
        // The next poll applies the stored state.
        m.on_snapshot(snap(PrinterState::Printing), ms(4_000));
        assert_eq!(m.current_screen(), Screen::Printing);
    }

    #[test]
    fn test_circle_restores_exact_triple() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Printing), ms(0));
        m.on_gesture(TouchEvent::SwipeLeft, ms(10));
        m.on_gesture(TouchEvent::SwipeRight, ms(20));
        assert_eq!(m.current_screen(), Screen::Printing);
        m.tick(ms(10_020));
        assert_eq!(m.view_mode(), ViewMode::AnimationView);

        m.on_gesture(TouchEvent::Circle, ms(11_000));
        m.tick(ms(12_000));
        assert!(m.overlay_active());
        m.tick(ms(14_000));

        assert!(!m.overlay_active());
        assert_eq!(m.current_screen(), Screen::Printing);
        assert_eq!(m.view_mode(), ViewMode::AnimationView);
        assert!(m.manual_override());
        assert_eq!(m.state().interrupt_snapshot, None);
    }

    #[test]
    fn test_circle_overlay_keeps_remaining_dwell() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Idle), ms(0));
        m.on_gesture(TouchEvent::Circle, ms(4_000));
        m.tick(ms(7_000));
        // 4 s of data view were used before the overlay; 6 s remain.
        m.tick(ms(12_999));
        assert_eq!(m.view_mode(), ViewMode::DataView);
        m.tick(ms(13_000));
        assert_eq!(m.view_mode(), ViewMode::AnimationView);
    }

    #[test]
    fn test_brightness_overlay_keeps_remaining_dwell() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Idle), ms(0));
        m.on_gesture(TouchEvent::SwipeUp, ms(4_000));
        m.tick(ms(4_500));
        assert!(!m.overlay_active());
        // The 500 ms read-out does not count towards the 10 s data view.
        m.tick(ms(10_499));
        assert_eq!(m.view_mode(), ViewMode::DataView);
        m.tick(ms(10_500));
        assert_eq!(m.view_mode(), ViewMode::AnimationView);
    }

    #[test]
    fn test_dwell_cycle_alternates() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Idle), ms(0));
        assert!(m.tick(ms(9_999)).iter().all(|e| !matches!(e, Effect::ClearCanvas)));
        let fx = m.tick(ms(10_000));
        assert_eq!(m.view_mode(), ViewMode::AnimationView);
        assert_eq!(fx[0], Effect::ClearCanvas);
        m.tick(ms(15_000));
        assert_eq!(m.view_mode(), ViewMode::DataView);
    }

    #[test]
    fn test_no_dwell_on_paused() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Paused), ms(0));
        m.tick(ms(60_000));
        assert_eq!(m.view_mode(), ViewMode::DataView);
    }

    #[test]
    fn test_offline_preserves_override() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Idle), ms(0));
        m.on_gesture(TouchEvent::SwipeLeft, ms(10));
        m.on_snapshot(PrinterSnapshot::offline(), ms(2_000));
        assert_eq!(m.current_screen(), Screen::KlipperError);
        assert!(m.manual_override());
        assert!(m.on_snapshot(PrinterSnapshot::offline(), ms(4_000)).is_empty());

        m.on_snapshot(snap(PrinterState::Paused), ms(6_000));
        assert_eq!(m.current_screen(), Screen::Paused);
        assert!(m.manual_override());
    }

    #[test]
    fn test_error_screens_are_idempotent() {
        let mut m = machine();
        assert!(!m.show_wifi_error(ms(0)).is_empty());
        assert!(m.show_wifi_error(ms(10)).is_empty());
        assert!(!m.show_klipper_error(ms(20)).is_empty());
        assert!(m.show_klipper_error(ms(30)).is_empty());
        assert!(!m.show_connecting(ms(40)).is_empty());
        assert!(!m.show_connecting(ms(50)).is_empty());
    }

    #[test]
    fn test_touch_feedback_fades_and_repaints() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Paused), ms(0));
        m.tick(ms(0));
        m.on_touch_down((50, 60), ms(1_000));
        let fx = m.tick(ms(1_100));
        assert!(matches!(
            fx[0],
            Effect::FeedbackRing {
                center: (50, 60),
                ..
            }
        ));
        let fx = m.tick(ms(1_300));
        assert_eq!(fx[0], Effect::ClearCanvas);
        assert_eq!(m.state().touch_feedback, None);
    }

    #[test]
    fn test_feedback_expiry_clears_over_animation_frame() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Idle), ms(0));
        m.tick(ms(0));
        m.tick(ms(10_000));
        assert_eq!(m.view_mode(), ViewMode::AnimationView);

        m.on_touch_down((50, 60), ms(10_050));
        let fx = m.tick(ms(10_100));
        assert!(fx.iter().any(|e| matches!(e, Effect::FeedbackRing { .. })));
        m.tick(ms(10_200));
        m.tick(ms(10_300));

        // The ring runs out on a tick that also has a new animation frame.
        let fx = m.tick(ms(10_400));
        assert_eq!(m.state().touch_feedback, None);
        assert_eq!(fx.as_slice(), [Effect::ClearCanvas, Effect::Render(m.scene())]);
    }

    #[test]
    fn test_double_tap_cycles_back() {
        let mut m = machine();
        m.on_snapshot(snap(PrinterState::Idle), ms(0));
        assert_eq!(m.on_gesture(TouchEvent::Tap, ms(10))[0], Effect::CycleTheme(ThemeStep::Next));
        let fx = m.on_gesture(TouchEvent::DoubleTap, ms(200));
        let steps: std::vec::Vec<_> = fx
            .iter()
            .filter(|e| matches!(e, Effect::CycleTheme(_)))
            .collect();
        assert_eq!(
            steps,
            [
                &Effect::CycleTheme(ThemeStep::Previous),
                &Effect::CycleTheme(ThemeStep::Previous)
            ]
        );
        assert_eq!(fx.last(), Some(&Effect::Render(m.scene())));
    }
}
