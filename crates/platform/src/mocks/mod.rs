//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use crate::*;
use embedded_graphics::{pixelcolor::Rgb565, prelude::Point};

/// Maximum length of a recorded text call.
pub const MOCK_TEXT_CAPACITY: usize = 96;

/// One recorded [`Renderer`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// `clear`
    Clear(Rgb565),
    /// `fill_circle`
    FillCircle {
        /// Circle center.
        center: Point,
        /// Radius in pixels.
        radius: u32,
        /// Fill color.
        color: Rgb565,
    },
    /// `stroke_circle`
    StrokeCircle {
        /// Circle center.
        center: Point,
        /// Radius in pixels.
        radius: u32,
        /// Stroke color.
        color: Rgb565,
    },
    /// `line`
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        color: Rgb565,
    },
    /// `arc`
    Arc {
        /// Arc center.
        center: Point,
        /// Radius in pixels.
        radius: u32,
        /// Start angle in degrees.
        start_deg: f32,
        /// Sweep in degrees.
        sweep_deg: f32,
        /// Stroke color.
        color: Rgb565,
    },
    /// `text` (truncated to [`MOCK_TEXT_CAPACITY`])
    Text {
        /// Rendered string.
        text: heapless::String<MOCK_TEXT_CAPACITY>,
        /// Center anchor.
        anchor: Point,
        /// Text size.
        size: TextSize,
        /// Text color.
        color: Rgb565,
    },
    /// `set_brightness`
    Brightness(Brightness),
}

/// Mock renderer that records every primitive call.
pub struct MockRenderer {
    calls: heapless::Vec<DrawCall, 256>,
    brightness: Option<Brightness>,
    fail_after: Option<usize>,
}

impl MockRenderer {
    /// Create new mock renderer
    pub fn new() -> Self {
        Self {
            calls: heapless::Vec::new(),
            brightness: None,
            fail_after: None,
        }
    }

    /// Make every call fail once `n` further calls have succeeded.
    pub fn fail_after(&mut self, n: usize) {
        self.fail_after = Some(n);
    }

    /// Recorded calls, oldest first. Calls beyond capacity are dropped.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Texts drawn since the last [`MockRenderer::reset`].
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// `true` if some drawn text equals `needle`.
    pub fn drew_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    /// Number of `clear` calls.
    pub fn clear_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Clear(_)))
            .count()
    }

    /// Last brightness set, if any.
    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    /// Forget recorded calls.
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: DrawCall) -> Result<(), DisplayError> {
        if let Some(n) = self.fail_after.as_mut() {
            if *n == 0 {
                return Err(DisplayError::Communication);
            }
            *n = n.saturating_sub(1);
        }
        let _ = self.calls.push(call);
        Ok(())
    }
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for MockRenderer {
    type Error = DisplayError;

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.record(DrawCall::Clear(color))
    }

    fn fill_circle(&mut self, center: Point, radius: u32, color: Rgb565) -> Result<(), Self::Error> {
        self.record(DrawCall::FillCircle {
            center,
            radius,
            color,
        })
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: u32,
        _width: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.record(DrawCall::StrokeCircle {
            center,
            radius,
            color,
        })
    }

    fn line(&mut self, from: Point, to: Point, _width: u32, color: Rgb565) -> Result<(), Self::Error> {
        self.record(DrawCall::Line { from, to, color })
    }

    fn arc(
        &mut self,
        center: Point,
        radius: u32,
        start_deg: f32,
        sweep_deg: f32,
        _width: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.record(DrawCall::Arc {
            center,
            radius,
            start_deg,
            sweep_deg,
            color,
        })
    }

    fn text(
        &mut self,
        text: &str,
        anchor: Point,
        size: TextSize,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        let mut recorded = heapless::String::new();
        for ch in text.chars() {
            if recorded.push(ch).is_err() {
                break;
            }
        }
        self.record(DrawCall::Text {
            text: recorded,
            anchor,
            size,
            color,
        })
    }

    fn set_brightness(&mut self, level: Brightness) -> Result<(), Self::Error> {
        self.record(DrawCall::Brightness(level))?;
        self.brightness = Some(level);
        Ok(())
    }
}

/// Mock touch source replaying a scripted sample stream.
pub struct MockTouch {
    samples: heapless::Deque<TouchSample, 128>,
}

impl MockTouch {
    /// Create new mock touch source
    pub fn new() -> Self {
        Self {
            samples: heapless::Deque::new(),
        }
    }

    /// Queue one sample.
    pub fn push(&mut self, sample: TouchSample) -> Result<(), TouchSample> {
        self.samples.push_back(sample)
    }

    /// Queue a contact at each point of `path`, followed by a release.
    pub fn stroke(&mut self, path: &[(i32, i32)]) -> Result<(), TouchSample> {
        for &(x, y) in path {
            self.push(TouchSample::at(x, y))?;
        }
        self.push(TouchSample::RELEASED)
    }

    /// Samples still queued.
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl Default for MockTouch {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchSource for MockTouch {
    fn poll(&mut self) -> TouchSample {
        self.samples.pop_front().unwrap_or(TouchSample::RELEASED)
    }
}

/// Mock status source replaying scripted snapshots.
///
/// Once the script runs dry every poll reports the printer offline.
pub struct MockStatus {
    snapshots: heapless::Deque<PrinterSnapshot, 16>,
    polls: usize,
}

impl MockStatus {
    /// Create new mock status source
    pub fn new() -> Self {
        Self {
            snapshots: heapless::Deque::new(),
            polls: 0,
        }
    }

    /// Queue one snapshot.
    pub fn push(&mut self, snapshot: PrinterSnapshot) -> Result<(), PrinterSnapshot> {
        self.snapshots.push_back(snapshot)
    }

    /// Number of completed polls.
    pub fn poll_count(&self) -> usize {
        self.polls
    }
}

impl Default for MockStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSource for MockStatus {
    async fn poll(&mut self) -> PrinterSnapshot {
        self.polls = self.polls.saturating_add(1);
        self.snapshots
            .pop_front()
            .unwrap_or_else(PrinterSnapshot::offline)
    }
}
