//! Orbit Panel firmware
//!
//! Round-display status panel for Klipper 3D printers: a 240×240 touch
//! screen that shows printer state, cycles decorative animations and reacts
//! to taps, swipes and circle gestures.
//!
//! # Architecture
//!
//! This firmware follows a layered architecture:
//!
//! ```text
//! Application Layer (control loop, status task, emulator binary)
//!         ↓
//! Presentation core (ui crate)
//!         ↓
//! Collaborator seams (platform crate)
//!         ↓
//! Drivers (touch controllers, embedded-graphics draw target)
//! ```
//!
//! # Features
//!
//! - `emulator` - Build the desktop emulator (tokio, simulator framebuffer)
//! - `std` - Enable standard library (for emulator and testing)
//! - `defmt` - defmt formatting of platform/ui types on hardware builds
//!
//! # Examples
//!
//! ## Emulator Target
//!
//! ```bash
//! cargo run -p firmware --bin panel-emulator --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
#![allow(async_fn_in_trait)]
// Pedantic lints too noisy for firmware application code:
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

pub mod control;
pub mod display;
pub mod simulated;
pub mod status;
pub mod touch;

// Re-export key types
pub use control::ControlLoop;
pub use display::{GraphicsRenderer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use simulated::SimulatedPrinter;
pub use status::PollSchedule;
pub use touch::{probe, ProbedController};

#[cfg(feature = "emulator")]
pub use status::{run_status_task, StatusTaskConfig};
