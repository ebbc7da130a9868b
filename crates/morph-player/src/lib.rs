//! Morph Player - frame-driven simulation context
//!
//! `Simulation` owns the particle field, camera, probe, clock and mode
//! state, and advances all of them once per host frame. Rendering and
//! window handling stay with the host.

mod mode;
mod simulation;

pub use mode::{Mode, ModeController, SETTLE_SECONDS};
pub use simulation::{Frame, Simulation};
