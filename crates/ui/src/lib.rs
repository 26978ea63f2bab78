//! Presentation core for the Orbit round-display printer panel.
//!
//! Turns raw touch samples and printer snapshots into paint instructions:
//!
//! - [`gesture`]: per-stroke gesture classification
//! - [`presentation`]: the screen / view / overlay state machine
//! - [`animation`]: frame scheduler and pure frame-parameter functions
//! - [`paint`]: scene layouts drawn through [`platform::Renderer`]
//!
//! This crate is `no_std` by default and never allocates.
//! Nothing here sleeps or reads a clock: every entry point takes `now`.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod animation;
pub mod gesture;
pub mod paint;
pub mod presentation;
pub mod redraw;
pub mod screen;
pub mod zones;

pub use animation::AnimationScheduler;
pub use gesture::{GestureClassifier, GestureThresholds, TouchEvent};
pub use paint::{paint_feedback_ring, paint_scene};
pub use presentation::{
    Effect, Effects, Overlay, PresentationState, PresentationStateMachine, PresentationTimings,
    Scene, ThemeStep,
};
pub use screen::{Screen, ViewMode};
pub use zones::TouchZones;
