//! Morph Particles - the morphing point-cloud simulation
//!
//! Provides:
//! - `SampleSet` - immutable surface anchors from an external mesh sampler
//! - `ParticleField` - per-tick spring/repulsion integrator over N particles
//! - `ShellRng` / `RandomSource` - seedable randomness for shell targets
//! - `PointStyle` - appearance data packed for GPU upload

pub mod field;
pub mod rand;
pub mod sample;
pub mod style;

pub use field::{
    blend_progress, repulsion_force, repulsion_strength, ParticleField, DAMPING, NO_INTERACTION,
    REPULSION_RADIUS, REPULSION_STRENGTH, SPRING,
};
pub use rand::{RandomSource, ShellRng, ShellShape};
pub use sample::SampleSet;
pub use style::{PointStyle, PointStyleUniform};
