//! Type system enforcement tests for panel domain newtypes.
//! These newtypes keep backlight and progress values inside their valid ranges.
#![allow(clippy::unwrap_used)]

// ── Brightness ───────────────────────────────────────────────────────────────

#[test]
fn brightness_new_clamps_to_floor() {
    use platform::Brightness;
    assert_eq!(Brightness::new(0).get(), 20, "Brightness::new(0) should clamp to 20");
}

#[test]
fn brightness_new_allows_full() {
    use platform::Brightness;
    assert_eq!(Brightness::new(255).get(), 255);
}

#[test]
fn brightness_try_new_rejects_below_floor() {
    use platform::Brightness;
    assert!(Brightness::try_new(0).is_err());
    assert!(Brightness::try_new(19).is_err());
}

#[test]
fn brightness_try_new_accepts_valid_range() {
    use platform::Brightness;
    assert!(Brightness::try_new(20).is_ok());
    assert!(Brightness::try_new(128).is_ok());
    assert!(Brightness::try_new(255).is_ok());
}

#[test]
fn brightness_default_is_boot_level() {
    use platform::Brightness;
    assert_eq!(Brightness::default().get(), 200);
}

#[test]
fn brightness_error_reports_bounds() {
    use platform::Brightness;
    let err = Brightness::try_new(3).unwrap_err();
    assert_eq!((err.value, err.min, err.max), (3, 20, 255));
    assert_eq!(err.to_string(), "value 3 outside 20..=255");
}

// ── Progress ─────────────────────────────────────────────────────────────────

#[test]
fn progress_default_is_zero() {
    use platform::Progress;
    assert_eq!(Progress::default().get(), 0);
}

#[test]
fn progress_from_fraction_rounds_down() {
    use platform::Progress;
    assert_eq!(Progress::from_fraction(0.999).get(), 99);
    assert_eq!(Progress::from_fraction(1.0), Progress::COMPLETE);
}

#[test]
fn progress_from_negative_fraction_is_zero() {
    use platform::Progress;
    assert_eq!(Progress::from_fraction(-0.5).get(), 0);
    assert_eq!(Progress::from_fraction(f32::NEG_INFINITY).get(), 0);
}
