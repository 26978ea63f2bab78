//! The panel control loop.
//!
//! Owns the gesture classifier and presentation state machine and the
//! collaborators they talk to. One call to [`ControlLoop::tick`] is one pass
//! of the main loop:
//!
//! 1. poll the touch source and feed the classifier
//! 2. read the one-shot gesture event
//! 3. deliver a printer snapshot, if one arrived
//! 4. deliver the gesture
//! 5. advance timers and animation
//! 6. apply the resulting effects to the theme provider and renderer
//!
//! Nothing here blocks. Snapshots arrive from the status task through a
//! channel that the caller drains without waiting.

use embassy_time::Instant;
use embedded_graphics::prelude::Point;
use platform::{PrinterSnapshot, Renderer, ThemeProvider, TouchSource, ValidConfig};
use ui::{
    paint_feedback_ring, paint_scene, Effect, Effects, GestureClassifier, GestureThresholds,
    PresentationStateMachine, PresentationTimings, Screen, ThemeStep, TouchEvent, TouchZones,
};

/// The main loop of the panel.
pub struct ControlLoop<T, R, P> {
    touch: T,
    renderer: R,
    themes: P,
    classifier: GestureClassifier,
    machine: PresentationStateMachine,
    zones: TouchZones,
    touched_zone: Option<u8>,
}

impl<T, R, P> ControlLoop<T, R, P>
where
    T: TouchSource,
    R: Renderer,
    P: ThemeProvider,
{
    /// Assemble the loop. The panel starts on the boot screen; call
    /// [`ControlLoop::start`] to paint it.
    pub fn new(config: &ValidConfig, touch: T, renderer: R, themes: P, now: Instant) -> Self {
        Self {
            touch,
            renderer,
            themes,
            classifier: GestureClassifier::new(GestureThresholds::from(config)),
            machine: PresentationStateMachine::new(PresentationTimings::from(config), now),
            zones: TouchZones::new(),
            touched_zone: None,
        }
    }

    /// Apply the initial backlight level and paint the boot screen.
    pub fn start(&mut self, now: Instant) -> Result<(), R::Error> {
        self.renderer.set_brightness(self.machine.state().brightness)?;
        let effects = self.machine.show_boot(now);
        self.apply(&effects)
    }

    /// Show "Connecting to WiFi...".
    pub fn show_connecting(&mut self, now: Instant) -> Result<(), R::Error> {
        let effects = self.machine.show_connecting(now);
        self.apply(&effects)
    }

    /// Show "Connected!".
    pub fn show_connected(&mut self, now: Instant) -> Result<(), R::Error> {
        let effects = self.machine.show_connected(now);
        self.apply(&effects)
    }

    /// Show the WiFi error screen.
    pub fn show_wifi_error(&mut self, now: Instant) -> Result<(), R::Error> {
        let effects = self.machine.show_wifi_error(now);
        self.apply(&effects)
    }

    /// Replace the gesture thresholds, e.g. after the configuration changed.
    pub fn reconfigure(&mut self, config: &ValidConfig) {
        self.classifier.set_thresholds(GestureThresholds::from(config));
    }

    /// Run one pass of the loop at `now`.
    ///
    /// Returns the gesture delivered during this pass (`TouchEvent::None`
    /// when the finger is still down or nothing happened).
    pub fn tick(
        &mut self,
        now: Instant,
        snapshot: Option<PrinterSnapshot>,
    ) -> Result<TouchEvent, R::Error> {
        let sample = self.touch.poll();
        if self.classifier.update(sample, now) == TouchEvent::Down {
            self.machine.on_touch_down((sample.x, sample.y), now);
            self.touched_zone = self.zones.hit(Point::new(sample.x, sample.y));
            if let Some(zone) = self.touched_zone {
                tracing::debug!(zone, "touch down in zone");
            }
        }
        let gesture = self.classifier.take_event();

        if let Some(snapshot) = snapshot {
            let effects = self.machine.on_snapshot(snapshot, now);
            self.apply(&effects)?;
        }

        if gesture != TouchEvent::None {
            let before = self.machine.current_screen();
            let effects = self.machine.on_gesture(gesture, now);
            self.apply(&effects)?;
            let after = self.machine.current_screen();
            if before != after {
                tracing::info!(?gesture, from = ?before, to = ?after, "screen changed by gesture");
            }
        }

        let effects = self.machine.tick(now);
        self.apply(&effects)?;
        Ok(gesture)
    }

    fn apply(&mut self, effects: &Effects) -> Result<(), R::Error> {
        for effect in effects {
            match *effect {
                Effect::ClearCanvas => self.renderer.clear(self.themes.colors().bg)?,
                Effect::Render(scene) => {
                    let colors = self.themes.colors();
                    paint_scene(&mut self.renderer, &scene, self.machine.snapshot(), &colors)?;
                }
                Effect::SetBrightness(level) => self.renderer.set_brightness(level)?,
                Effect::CycleTheme(ThemeStep::Next) => {
                    self.themes.next_theme();
                }
                Effect::CycleTheme(ThemeStep::Previous) => {
                    self.themes.previous_theme();
                }
                Effect::FeedbackRing { center, intensity } => {
                    let colors = self.themes.colors();
                    paint_feedback_ring(&mut self.renderer, center, intensity, &colors)?;
                }
            }
        }
        Ok(())
    }

    /// Hit-test zones checked on every touch-down.
    pub fn zones_mut(&mut self) -> &mut TouchZones {
        &mut self.zones
    }

    /// Zone under the most recent touch-down, if any.
    pub fn touched_zone(&self) -> Option<u8> {
        self.touched_zone
    }

    /// The presentation state machine.
    pub fn machine(&self) -> &PresentationStateMachine {
        &self.machine
    }

    /// Screen currently shown.
    pub fn current_screen(&self) -> Screen {
        self.machine.current_screen()
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The theme provider.
    pub fn themes(&self) -> &P {
        &self.themes
    }

    /// The touch source.
    pub fn touch_mut(&mut self) -> &mut T {
        &mut self.touch
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::mocks::{MockRenderer, MockTouch};
    use platform::{PrinterState, Theme, ThemeCycle};

    fn control() -> ControlLoop<MockTouch, MockRenderer, ThemeCycle> {
        ControlLoop::new(
            &ValidConfig::default(),
            MockTouch::new(),
            MockRenderer::new(),
            ThemeCycle::new(Theme::Dark),
            Instant::from_millis(0),
        )
    }

    #[test]
    fn start_paints_boot_and_sets_backlight() {
        let mut c = control();
        c.start(Instant::from_millis(0)).unwrap();
        assert_eq!(c.current_screen(), Screen::Boot);
        assert_eq!(c.renderer().clear_count(), 1);
        assert!(c.renderer().brightness().is_some());
    }

    #[test]
    fn tap_cycles_theme() {
        let mut c = control();
        c.tick(Instant::from_millis(0), Some(PrinterSnapshot::with_state(PrinterState::Idle)))
            .unwrap();
        c.touch_mut().stroke(&[(40, 200)]).unwrap();
        assert_eq!(c.tick(Instant::from_millis(10), None).unwrap(), TouchEvent::None);
        assert_eq!(c.tick(Instant::from_millis(60), None).unwrap(), TouchEvent::Tap);
        assert_eq!(c.themes().current(), Theme::Light);
    }

    #[test]
    fn render_failure_propagates() {
        let mut c = control();
        c.renderer_mut().fail_after(0);
        assert!(c.start(Instant::from_millis(0)).is_err());
    }
}
