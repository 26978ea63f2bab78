//! Deterministic stand-in printer.
//!
//! Cycles idle → printing (progress rising 5 % per poll) → complete → idle
//! with plausible temperatures, so the panel can be exercised without a
//! Moonraker host. Optionally drops every n-th poll to exercise the offline
//! path.

use platform::{PrinterSnapshot, PrinterState, Progress, StatusSource};

const IDLE_POLLS: u32 = 3;
const PRINT_POLLS: u32 = 21;
const COMPLETE_POLLS: u32 = 3;
const CYCLE: u32 = IDLE_POLLS + PRINT_POLLS + COMPLETE_POLLS;

/// Seconds of print time one poll stands for.
const SECONDS_PER_POLL: u32 = 180;

/// Scripted [`StatusSource`].
#[derive(Debug, Clone, Default)]
pub struct SimulatedPrinter {
    polls: u32,
    dropout_every: Option<u32>,
}

impl SimulatedPrinter {
    /// Printer that always answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the printer offline on every `n`-th poll (`n >= 2`).
    pub fn with_dropout(n: u32) -> Self {
        Self {
            polls: 0,
            dropout_every: Some(n.max(2)),
        }
    }

    /// Number of polls answered so far.
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Snapshot for poll number `n`, ignoring dropouts.
    pub fn snapshot_at(n: u32) -> PrinterSnapshot {
        let phase = n % CYCLE;
        if phase < IDLE_POLLS {
            return PrinterSnapshot {
                hotend_temp: 24.0,
                bed_temp: 23.0,
                ..PrinterSnapshot::with_state(PrinterState::Standby)
            };
        }

        let step = phase.saturating_sub(IDLE_POLLS);
        if step < PRINT_POLLS {
            let percent = u8::try_from(step.saturating_mul(5)).unwrap_or(100);
            let mut snap = PrinterSnapshot {
                hotend_temp: 214.0 + (step % 3) as f32,
                hotend_target: 215.0,
                bed_temp: 60.0,
                bed_target: 60.0,
                progress: Progress::new(percent),
                print_time_s: step.saturating_mul(SECONDS_PER_POLL),
                time_left_s: PRINT_POLLS
                    .saturating_sub(step)
                    .saturating_mul(SECONDS_PER_POLL),
                pos_z: step as f32 * 0.4,
                chamber_temp: Some(31.0),
                chamber_humidity: Some(38.0),
                ..PrinterSnapshot::with_state(PrinterState::Printing)
            };
            snap.set_file_name("orbit_calibration_cube.gcode");
            return snap;
        }

        let mut snap = PrinterSnapshot {
            hotend_temp: 120.0,
            bed_temp: 55.0,
            progress: Progress::COMPLETE,
            print_time_s: PRINT_POLLS.saturating_mul(SECONDS_PER_POLL),
            ..PrinterSnapshot::with_state(PrinterState::Complete)
        };
        snap.set_file_name("orbit_calibration_cube.gcode");
        snap
    }
}

impl StatusSource for SimulatedPrinter {
    async fn poll(&mut self) -> PrinterSnapshot {
        let n = self.polls;
        self.polls = self.polls.wrapping_add(1);
        let dropped = self
            .dropout_every
            .is_some_and(|every| n.checked_rem(every) == Some(every.saturating_sub(1)));
        if dropped {
            return PrinterSnapshot::offline();
        }
        Self::snapshot_at(n)
    }
}
