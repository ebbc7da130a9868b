//! Animation primitives for Morph
//!
//! One-shot tweens used for camera moves and the particle settle animation:
//! - `Easing` - power-family easing curves
//! - `Timeline` - start time, duration and easing, sampled per frame
//! - `Tween` - a timeline plus start/end values of any `Lerp` type

pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::{Lerp, Timeline, Tween, TweenStep};
