//! Morph Core - Foundational types for the Morph point-cloud viewer
//!
//! This crate provides the types every other Morph crate depends on:
//! - `Vec3`, `Vec2`, `Aabb`, `Color` - Spatial and appearance types
//! - `MorphConfig` - TOML configuration with clamping
//! - Error types and Result alias

mod config;
mod error;
mod types;

pub use config::{
    CameraConfig, InteractionConfig, MorphConfig, MotionConfig, ParticleConfig, ScaleConfig,
};
pub use error::{MorphError, Result};
pub use types::{Aabb, Color, Vec2, Vec3};
