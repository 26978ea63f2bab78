//! Collaborator seams for the Orbit round-display printer panel
//!
//! This crate provides trait-based abstractions for everything the
//! presentation core talks to, enabling development and testing without
//! a panel attached.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: control loop, drivers, emulator)
//!         ↓
//! Presentation core (ui crate: gestures, state machine, animation)
//!         ↓
//! Platform seams (this crate - traits, config, domain types)
//! ```
//!
//! # Collaborators
//!
//! - [`TouchSource`] / [`TouchController`] - raw touch samples
//! - [`StatusSource`] - printer status snapshots
//! - [`ThemeProvider`] - color palettes
//! - [`Renderer`] - drawing primitives
//!
//! # Features
//!
//! - `std`: Enable the [`mocks`] module outside of this crate's tests
//! - `serde`: (De)serialize [`PanelConfig`] and enums
//! - `defmt`: Enable defmt formatting of domain types
//!
//! # Example
//!
//! ```no_run
//! use platform::{PanelConfig, TouchSource};
//!
//! fn example<T: TouchSource>(touch: &mut T) {
//!     let config = PanelConfig::default().validate().unwrap();
//!     let sample = touch.poll();
//!     let _ = (config, sample);
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this crate:
#![allow(clippy::doc_markdown)] // register names and chip part numbers in doc comments
#![allow(clippy::must_use_candidate)] // accessors - callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // single-owner control loop, Send bounds not needed

pub mod config;
pub mod cst816d;
pub mod display;
pub mod ft6236;
pub mod panel_types;
pub mod status;
pub mod theme;
pub mod touch;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main collaborator traits
pub use display::{DisplayError, Renderer, TextSize};
pub use status::{PrinterSnapshot, PrinterState, StatusSource};
pub use theme::{Theme, ThemeColors, ThemeCycle, ThemeProvider};
pub use touch::{
    NoTouch, RawTouch, TouchController, TouchError, TouchPanel, TouchSample, TouchSource,
};

// Re-export configuration and domain types
pub use config::{ConfigError, PanelConfig, ValidConfig};
pub use panel_types::{Brightness, OutOfRangeError, Progress};
