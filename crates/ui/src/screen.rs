//! Screen identifier enum: every top-level screen the panel can display,
//! plus the navigation ring that swipe gestures move through.

use platform::PrinterState;

/// Every top-level screen of the panel. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Splash shown at power-on.
    Boot,
    /// Waiting for Wi-Fi / Moonraker.
    Connecting,
    /// Brief confirmation once the printer answered.
    Connected,
    /// Printer ready, not printing.
    Idle,
    /// Print running.
    Printing,
    /// Print paused.
    Paused,
    /// Print finished.
    Complete,
    /// Klipper reported an error.
    Error,
    /// Wi-Fi could not be joined.
    WifiError,
    /// Moonraker unreachable.
    KlipperError,
}

/// The fixed ring that `SwipeLeft` / `SwipeRight` cycle through.
pub const NAV_RING: [Screen; 4] = [Screen::Idle, Screen::Printing, Screen::Paused, Screen::Complete];

impl Screen {
    /// Screen a printer state retargets to, if any.
    ///
    /// `Unknown` keeps whatever is currently shown.
    pub fn for_printer_state(state: PrinterState) -> Option<Self> {
        match state {
            PrinterState::Idle | PrinterState::Standby => Some(Self::Idle),
            PrinterState::Printing => Some(Self::Printing),
            PrinterState::Paused => Some(Self::Paused),
            PrinterState::Complete => Some(Self::Complete),
            PrinterState::Error => Some(Self::Error),
            PrinterState::Unknown => None,
        }
    }

    /// `true` for the screens that alternate data and animation views.
    pub fn has_dwell_cycle(self) -> bool {
        matches!(self, Self::Idle | Self::Printing)
    }

    fn ring_position(self) -> Option<usize> {
        NAV_RING.iter().position(|s| *s == self)
    }

    /// Next screen on the navigation ring, wrapping. Screens outside the ring
    /// enter it at its first entry.
    #[must_use]
    pub fn ring_next(self) -> Self {
        let next = match self.ring_position() {
            Some(i) => i.wrapping_add(1) % NAV_RING.len(),
            None => 0,
        };
        NAV_RING.get(next).copied().unwrap_or(Self::Idle)
    }

    /// Previous screen on the navigation ring, wrapping. Screens outside the
    /// ring enter it at its last entry.
    #[must_use]
    pub fn ring_previous(self) -> Self {
        let len = NAV_RING.len();
        let prev = match self.ring_position() {
            Some(i) => i.wrapping_add(len).wrapping_sub(1) % len,
            None => len.wrapping_sub(1),
        };
        NAV_RING.get(prev).copied().unwrap_or(Self::Complete)
    }
}

/// Which half of the dwell cycle is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewMode {
    /// Numeric / status overlay.
    #[default]
    DataView,
    /// Full-screen decorative animation.
    AnimationView,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::DataView => Self::AnimationView,
            Self::AnimationView => Self::DataView,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printer_states_map_to_screens() {
        assert_eq!(Screen::for_printer_state(PrinterState::Idle), Some(Screen::Idle));
        assert_eq!(Screen::for_printer_state(PrinterState::Standby), Some(Screen::Idle));
        assert_eq!(
            Screen::for_printer_state(PrinterState::Printing),
            Some(Screen::Printing)
        );
        assert_eq!(Screen::for_printer_state(PrinterState::Paused), Some(Screen::Paused));
        assert_eq!(
            Screen::for_printer_state(PrinterState::Complete),
            Some(Screen::Complete)
        );
        assert_eq!(Screen::for_printer_state(PrinterState::Error), Some(Screen::Error));
        assert_eq!(Screen::for_printer_state(PrinterState::Unknown), None);
    }

    #[test]
    fn test_ring_wraps_forward() {
        assert_eq!(Screen::Idle.ring_next(), Screen::Printing);
        assert_eq!(Screen::Complete.ring_next(), Screen::Idle);
    }

    #[test]
    fn test_ring_wraps_backward() {
        assert_eq!(Screen::Idle.ring_previous(), Screen::Complete);
        assert_eq!(Screen::Paused.ring_previous(), Screen::Printing);
    }

    #[test]
    fn test_off_ring_screens_enter_at_ends() {
        assert_eq!(Screen::KlipperError.ring_next(), Screen::Idle);
        assert_eq!(Screen::Error.ring_previous(), Screen::Complete);
        assert_eq!(Screen::Boot.ring_next(), Screen::Idle);
    }

    #[test]
    fn test_only_idle_and_printing_dwell() {
        assert!(Screen::Idle.has_dwell_cycle());
        assert!(Screen::Printing.has_dwell_cycle());
        assert!(!Screen::Paused.has_dwell_cycle());
        assert!(!Screen::KlipperError.has_dwell_cycle());
    }

    #[test]
    fn test_view_mode_flip() {
        assert_eq!(ViewMode::DataView.flipped(), ViewMode::AnimationView);
        assert_eq!(ViewMode::AnimationView.flipped(), ViewMode::DataView);
    }
}
