//! Redraw suppression: decides whether a new snapshot is worth repainting.
//!
//! Outside a screen or view change, repainting on every poll would flood the
//! SPI bus and make the panel flicker. A snapshot only triggers a redraw when
//! something visible moved by a meaningful amount.

use platform::PrinterSnapshot;

/// Temperature change (°C) that is large enough to show.
pub const TEMP_EPSILON: f32 = 1.0;

/// `true` if `next` differs visibly from the last rendered snapshot.
///
/// With nothing rendered yet, always redraw.
pub fn should_redraw(last_rendered: Option<&PrinterSnapshot>, next: &PrinterSnapshot) -> bool {
    let Some(prev) = last_rendered else {
        return true;
    };
    libm::fabsf(prev.hotend_temp - next.hotend_temp) > TEMP_EPSILON
        || libm::fabsf(prev.bed_temp - next.bed_temp) > TEMP_EPSILON
        || prev.progress != next.progress
        || prev.state != next.state
        || prev.connected != next.connected
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::{PrinterState, Progress};

    fn printing(hotend: f32, progress: u8) -> PrinterSnapshot {
        PrinterSnapshot {
            hotend_temp: hotend,
            bed_temp: 60.0,
            progress: Progress::new(progress),
            ..PrinterSnapshot::with_state(PrinterState::Printing)
        }
    }

    #[test]
    fn test_first_snapshot_always_redraws() {
        assert!(should_redraw(None, &printing(210.0, 10)));
    }

    #[test]
    fn test_small_temperature_drift_is_ignored() {
        assert!(!should_redraw(Some(&printing(210.0, 10)), &printing(210.4, 10)));
    }

    #[test]
    fn test_progress_step_redraws() {
        assert!(should_redraw(Some(&printing(210.0, 10)), &printing(210.0, 11)));
    }

    #[test]
    fn test_large_bed_change_redraws() {
        let prev = printing(210.0, 10);
        let next = PrinterSnapshot {
            bed_temp: 58.5,
            ..prev.clone()
        };
        assert!(should_redraw(Some(&prev), &next));
    }

    #[test]
    fn test_state_change_redraws() {
        let prev = printing(210.0, 10);
        let next = PrinterSnapshot {
            state: PrinterState::Paused,
            ..prev.clone()
        };
        assert!(should_redraw(Some(&prev), &next));
    }
}
