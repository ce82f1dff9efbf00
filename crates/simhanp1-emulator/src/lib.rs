//! Periodic two-phase telegram emission loop.
//!
//! The emulator forever alternates between two payload files, writing one,
//! pausing one interval, writing the other, pausing again. It runs until a
//! shared stop flag is raised or an optional cycle bound is reached.

mod emulator;
mod error;

pub use emulator::{CycleStats, Emulator, EmulatorConfig, DEFAULT_INTERVAL};
pub use error::{EmulatorError, Result};
