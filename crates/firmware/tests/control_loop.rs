//! Control-loop integration tests: scripted touch and status in, painted
//! primitives out, with the real presentation core in between.
#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use embassy_time::Instant;
use firmware::ControlLoop;
use platform::mocks::{DrawCall, MockRenderer, MockStatus, MockTouch};
use platform::{
    PanelConfig, PrinterSnapshot, PrinterState, Progress, StatusSource, Theme, ThemeCycle, ValidConfig,
};
use ui::{Screen, TouchEvent, ViewMode};

type Panel = ControlLoop<MockTouch, MockRenderer, ThemeCycle>;

fn panel_with(config: &ValidConfig) -> Panel {
    ControlLoop::new(
        config,
        MockTouch::new(),
        MockRenderer::new(),
        ThemeCycle::new(Theme::Dark),
        Instant::from_millis(0),
    )
}

fn panel() -> Panel {
    panel_with(&ValidConfig::default())
}

fn printing(progress: u8) -> PrinterSnapshot {
    PrinterSnapshot {
        hotend_temp: 210.0,
        hotend_target: 215.0,
        bed_temp: 60.0,
        bed_target: 60.0,
        progress: Progress::new(progress),
        ..PrinterSnapshot::with_state(PrinterState::Printing)
    }
}

/// Run `n` passes 20 ms apart starting at `*t`, returning every gesture seen.
fn run(p: &mut Panel, t: &mut u64, n: usize) -> Vec<TouchEvent> {
    let mut gestures = Vec::new();
    for _ in 0..n {
        let g = p.tick(Instant::from_millis(*t), None).unwrap();
        if g != TouchEvent::None {
            gestures.push(g);
        }
        *t += 20;
    }
    gestures
}

#[test]
fn startup_sequence_paints_each_screen() {
    let mut p = panel();
    p.start(Instant::from_millis(0)).unwrap();
    p.show_connecting(Instant::from_millis(1_000)).unwrap();
    assert!(p.renderer().drew_text("Connecting"));
    p.show_connected(Instant::from_millis(2_000)).unwrap();
    assert!(p.renderer().drew_text("Connected!"));
    p.show_wifi_error(Instant::from_millis(3_000)).unwrap();
    assert!(p.renderer().drew_text("WiFi Error"));
    assert_eq!(p.current_screen(), Screen::WifiError);

    // Repeating the error screen does not repaint it.
    let clears = p.renderer().clear_count();
    p.show_wifi_error(Instant::from_millis(3_100)).unwrap();
    assert_eq!(p.renderer().clear_count(), clears);
}

#[test]
fn printer_state_drives_screen_without_override() {
    let mut p = panel();
    let mut t = 0;
    p.tick(Instant::from_millis(t), Some(printing(1))).unwrap();
    assert_eq!(p.current_screen(), Screen::Printing);

    t += 2_000;
    p.tick(Instant::from_millis(t), Some(PrinterSnapshot::with_state(PrinterState::Paused)))
        .unwrap();
    assert_eq!(p.current_screen(), Screen::Paused);

    t += 2_000;
    p.tick(Instant::from_millis(t), Some(PrinterSnapshot::with_state(PrinterState::Complete)))
        .unwrap();
    assert_eq!(p.current_screen(), Screen::Complete);
    assert!(p.renderer().drew_text("COMPLETE"));
}

#[test]
fn small_temperature_jitter_does_not_repaint() {
    let mut p = panel();
    p.tick(Instant::from_millis(0), Some(printing(30))).unwrap();
    let clears = p.renderer().clear_count();

    let jitter = PrinterSnapshot {
        hotend_temp: 210.4,
        ..printing(30)
    };
    p.tick(Instant::from_millis(2_000), Some(jitter)).unwrap();
    assert_eq!(p.renderer().clear_count(), clears);

    p.tick(Instant::from_millis(4_000), Some(printing(31))).unwrap();
    assert_eq!(p.renderer().clear_count(), clears + 1);
    assert!(p.renderer().drew_text("31%"));
}

#[test]
fn swipes_walk_the_ring_in_both_directions() {
    let mut p = panel();
    let mut t = 0;
    p.tick(Instant::from_millis(t), Some(PrinterSnapshot::with_state(PrinterState::Idle)))
        .unwrap();
    t += 20;

    let mut seen = Vec::new();
    for _ in 0..4 {
        p.touch_mut().stroke(&[(200, 120), (150, 120), (100, 120)]).unwrap();
        let g = run(&mut p, &mut t, 4);
        assert_eq!(g, [TouchEvent::SwipeLeft]);
        seen.push(p.current_screen());
    }
    assert_eq!(
        seen,
        [Screen::Printing, Screen::Paused, Screen::Complete, Screen::Idle]
    );

    p.touch_mut().stroke(&[(40, 120), (90, 120), (140, 120)]).unwrap();
    assert_eq!(run(&mut p, &mut t, 4), [TouchEvent::SwipeRight]);
    assert_eq!(p.current_screen(), Screen::Complete);
    assert!(p.machine().manual_override());
}

#[test]
fn brightness_swipes_clamp_at_bounds() {
    let mut p = panel();
    let mut t = 0;
    p.start(Instant::from_millis(t)).unwrap();
    p.tick(Instant::from_millis(t), Some(PrinterSnapshot::with_state(PrinterState::Idle)))
        .unwrap();
    t += 20;

    for _ in 0..12 {
        p.touch_mut().stroke(&[(40, 200), (40, 150), (40, 100)]).unwrap();
        // Swipe plus enough passes for the overlay to time out.
        run(&mut p, &mut t, 40);
    }
    assert_eq!(p.renderer().brightness().unwrap().get(), 255);
    assert!(!p.machine().overlay_active());

    for _ in 0..12 {
        p.touch_mut().stroke(&[(40, 100), (40, 150), (40, 200)]).unwrap();
        run(&mut p, &mut t, 40);
    }
    assert_eq!(p.renderer().brightness().unwrap().get(), 20);
}

#[test]
fn gestures_during_circle_overlay_are_ignored() {
    let mut p = panel();
    let mut t = 0;
    p.tick(Instant::from_millis(t), Some(printing(40))).unwrap();
    t += 20;

    p.touch_mut()
        .stroke(&[(180, 60), (60, 60), (60, 180), (180, 180)])
        .unwrap();
    assert_eq!(run(&mut p, &mut t, 5), [TouchEvent::Circle]);
    assert!(p.machine().overlay_active());

    // A swipe inside the overlay is classified but has no effect.
    p.touch_mut().stroke(&[(200, 120), (150, 120), (100, 120)]).unwrap();
    assert_eq!(run(&mut p, &mut t, 4), [TouchEvent::SwipeLeft]);
    assert_eq!(p.current_screen(), Screen::Printing);
    assert!(!p.machine().manual_override());

    run(&mut p, &mut t, 160);
    assert!(!p.machine().overlay_active());
    assert_eq!(p.current_screen(), Screen::Printing);
    assert_eq!(p.machine().view_mode(), ViewMode::DataView);
}

#[test]
fn offline_then_reconnect_resumes_from_printer_state() {
    let mut p = panel();
    p.tick(Instant::from_millis(0), Some(printing(10))).unwrap();

    // Take manual control, then lose the printer.
    p.touch_mut().stroke(&[(200, 120), (150, 120), (100, 120)]).unwrap();
    let mut t = 20;
    run(&mut p, &mut t, 4);
    assert_eq!(p.current_screen(), Screen::Paused);

    p.tick(Instant::from_millis(t), Some(PrinterSnapshot::offline())).unwrap();
    assert_eq!(p.current_screen(), Screen::KlipperError);
    assert!(p.machine().manual_override());

    t += 2_000;
    p.tick(Instant::from_millis(t), Some(printing(12))).unwrap();
    assert_eq!(p.current_screen(), Screen::Printing);
}

#[test]
fn double_tap_steps_theme_back_when_enabled() {
    let config = PanelConfig {
        double_tap_window_ms: 300,
        ..PanelConfig::default()
    }
    .validate()
    .unwrap();
    let mut p = panel_with(&config);
    let mut t = 0;
    p.tick(Instant::from_millis(t), Some(PrinterSnapshot::with_state(PrinterState::Idle)))
        .unwrap();
    t += 20;

    p.touch_mut().stroke(&[(120, 200)]).unwrap();
    assert_eq!(run(&mut p, &mut t, 3), [TouchEvent::Tap]);
    assert_eq!(p.themes().current(), Theme::Light);

    p.touch_mut().stroke(&[(120, 200)]).unwrap();
    assert_eq!(run(&mut p, &mut t, 3), [TouchEvent::DoubleTap]);
    // Net effect of the pair is one step back from where the user started.
    assert_eq!(p.themes().current(), Theme::Dark.previous());
    assert_eq!(p.themes().current(), Theme::Minimal);
}

#[test]
fn double_tap_outside_the_window_is_two_taps() {
    let config = PanelConfig {
        double_tap_window_ms: 300,
        ..PanelConfig::default()
    }
    .validate()
    .unwrap();
    let mut p = panel_with(&config);
    let mut t = 0;
    p.tick(Instant::from_millis(t), Some(PrinterSnapshot::with_state(PrinterState::Idle)))
        .unwrap();
    t += 20;

    p.touch_mut().stroke(&[(120, 200)]).unwrap();
    assert_eq!(run(&mut p, &mut t, 3), [TouchEvent::Tap]);
    t += 1_000;
    p.touch_mut().stroke(&[(120, 200)]).unwrap();
    assert_eq!(run(&mut p, &mut t, 3), [TouchEvent::Tap]);
    assert_eq!(p.themes().current(), Theme::Neon);
}

#[test]
fn animation_view_repaints_on_new_frames() {
    let mut p = panel();
    let mut t = 0;
    p.tick(Instant::from_millis(t), Some(printing(50))).unwrap();
    t += 20;
    // Dwell in the data view, then into the animation view.
    run(&mut p, &mut t, 505);
    assert_eq!(p.machine().view_mode(), ViewMode::AnimationView);

    p.renderer_mut().reset();
    run(&mut p, &mut t, 10);
    let arcs = p
        .renderer()
        .calls()
        .iter()
        .filter(|c| matches!(c, DrawCall::Arc { .. }))
        .count();
    assert!(arcs >= 1, "progress ring repainted on animation frames");
    assert!(p.renderer().drew_text("50%"));
}

#[tokio::test]
async fn status_source_feeds_the_loop() {
    let mut status = MockStatus::new();
    status.push(PrinterSnapshot::with_state(PrinterState::Idle)).unwrap();
    status.push(printing(5)).unwrap();

    let mut p = panel();
    let mut t = 0;
    for _ in 0..3 {
        let snapshot = status.poll().await;
        p.tick(Instant::from_millis(t), Some(snapshot)).unwrap();
        t += 2_000;
    }
    assert_eq!(status.poll_count(), 3);
    // Script exhausted: the mock reports the printer offline.
    assert_eq!(p.current_screen(), Screen::KlipperError);
}

#[test]
fn touch_down_reports_the_zone_under_the_finger() {
    use embedded_graphics::prelude::{Point, Size};
    use embedded_graphics::primitives::Rectangle;

    let mut p = panel();
    p.zones_mut()
        .add(1, Rectangle::new(Point::new(0, 0), Size::new(120, 240)))
        .unwrap();
    p.zones_mut()
        .add(2, Rectangle::new(Point::new(120, 0), Size::new(120, 240)))
        .unwrap();
    let mut t = 0;
    p.tick(Instant::from_millis(t), Some(PrinterSnapshot::with_state(PrinterState::Idle)))
        .unwrap();
    t += 20;
    assert_eq!(p.touched_zone(), None);

    p.touch_mut().stroke(&[(200, 120)]).unwrap();
    run(&mut p, &mut t, 3);
    assert_eq!(p.touched_zone(), Some(2));

    p.touch_mut().stroke(&[(40, 120)]).unwrap();
    run(&mut p, &mut t, 3);
    assert_eq!(p.touched_zone(), Some(1));

    p.zones_mut().clear();
    p.touch_mut().stroke(&[(40, 120)]).unwrap();
    run(&mut p, &mut t, 3);
    assert_eq!(p.touched_zone(), None);
}
