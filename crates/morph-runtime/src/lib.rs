//! Morph Runtime - Frame loop infrastructure
//!
//! Provides the per-frame building blocks the simulation driver reads:
//! - `Clock` - pausable elapsed/delta time source
//! - `PointerState` / `InputSnapshot` - pointer and wheel input tracking
//! - `ScaleSlider` - stepped model-scale control

mod clock;
mod input;
mod slider;

pub use clock::{Clock, MAX_DELTA};
pub use input::{InputSnapshot, PointerState, Viewport};
pub use slider::ScaleSlider;
