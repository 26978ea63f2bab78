//! Printer status abstraction
//!
//! A [`PrinterSnapshot`] is an immutable point-in-time read of the printer,
//! produced by a [`StatusSource`]. Sources never fail: a poll that errors or
//! times out is reported as [`PrinterSnapshot::offline`].

use crate::panel_types::Progress;

/// Maximum stored length of the current file name.
pub const FILE_NAME_CAPACITY: usize = 64;

/// Printer state as reported by Klipper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrinterState {
    /// State string not recognized or not yet known.
    #[default]
    Unknown,
    /// Ready and not printing.
    Idle,
    /// Motors off, waiting.
    Standby,
    /// A print job is running.
    Printing,
    /// A print job is paused.
    Paused,
    /// The last print job finished.
    Complete,
    /// Klipper reported an error.
    Error,
}

impl PrinterState {
    /// Parse a Moonraker `print_stats.state` string.
    ///
    /// Moonraker reports a ready printer as `"ready"`; anything unrecognized
    /// maps to [`PrinterState::Unknown`].
    pub fn from_moonraker(state: &str) -> Self {
        match state {
            "standby" => Self::Standby,
            "ready" => Self::Idle,
            "printing" => Self::Printing,
            "paused" => Self::Paused,
            "complete" => Self::Complete,
            "error" => Self::Error,
            _ => Self::Unknown,
        }
    }
}

/// Point-in-time printer status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrinterSnapshot {
    /// `false` when the last poll failed or timed out.
    pub connected: bool,
    /// Current printer state.
    pub state: PrinterState,
    /// Hotend temperature in °C.
    pub hotend_temp: f32,
    /// Hotend target in °C, `0.0` when heater is off.
    pub hotend_target: f32,
    /// Bed temperature in °C.
    pub bed_temp: f32,
    /// Bed target in °C, `0.0` when heater is off.
    pub bed_target: f32,
    /// Print progress.
    pub progress: Progress,
    /// File being printed (truncated to [`FILE_NAME_CAPACITY`] bytes).
    pub file_name: heapless::String<FILE_NAME_CAPACITY>,
    /// Elapsed print time in seconds.
    pub print_time_s: u32,
    /// Estimated remaining time in seconds.
    pub time_left_s: u32,
    /// Toolhead Z position in mm.
    pub pos_z: f32,
    /// Chamber temperature in °C, if a sensor is fitted.
    pub chamber_temp: Option<f32>,
    /// Chamber relative humidity in %, if a sensor is fitted.
    pub chamber_humidity: Option<f32>,
}

impl PrinterSnapshot {
    /// Snapshot reported when the printer could not be reached.
    pub fn offline() -> Self {
        Self::default()
    }

    /// Connected snapshot in `state` with every other field zeroed.
    pub fn with_state(state: PrinterState) -> Self {
        Self {
            connected: true,
            state,
            ..Self::default()
        }
    }

    /// Replace the file name, truncating on a character boundary if it does
    /// not fit.
    pub fn set_file_name(&mut self, name: &str) {
        self.file_name.clear();
        for ch in name.chars() {
            if self.file_name.push(ch).is_err() {
                break;
            }
        }
    }
}

/// Printer status collaborator.
///
/// Implementations bound each poll by their own timeout and report failure
/// as a snapshot with `connected == false` instead of an error.
pub trait StatusSource {
    /// Fetch the current printer status.
    fn poll(&mut self) -> impl core::future::Future<Output = PrinterSnapshot>;
}
