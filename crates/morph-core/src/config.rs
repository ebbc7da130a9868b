//! Viewer configuration, loaded from TOML
//!
//! Every key is optional; anything missing falls back to the defaults of the
//! stock viewer. Out-of-range values are clamped by [`MorphConfig::sanitized`]
//! rather than rejected.
//!
//! ```toml
//! [particles]
//! count = 50000
//! seed = 3735928559
//! color = "#00bcd4"
//! point_size = 0.1
//!
//! [motion]
//! animation_speed = 0.35
//!
//! [scale]
//! value = 1.0
//! min = 0.1
//! max = 3.0
//! step = 0.1
//!
//! [camera]
//! fov = 75.0
//! position = [0.0, 5.0, 40.0]
//! auto_rotate_speed = 0.5
//!
//! [interaction]
//! plane_size = 200.0
//! track_camera = false
//! ```

use crate::error::Result;
use crate::types::{Color, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    pub particles: ParticleConfig,
    pub motion: MotionConfig,
    pub scale: ScaleConfig,
    pub camera: CameraConfig,
    pub interaction: InteractionConfig,
}

/// Particle count, shell generation and point appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of particles (and surface samples)
    pub count: usize,
    /// Seed for shell-target generation
    pub seed: u32,
    pub color: Color,
    /// Rendered point size in world units
    pub point_size: f32,
    /// Inner radius of the shell scatter
    pub shell_radius_min: f32,
    /// Outer radius of the shell scatter (exclusive)
    pub shell_radius_max: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50_000,
            seed: 0xDEAD_BEEF,
            color: Color::CYAN,
            point_size: 0.1,
            shell_radius_min: 30.0,
            shell_radius_max: 60.0,
        }
    }
}

/// Morph animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Multiplier on the surface/shell oscillation frequency
    pub animation_speed: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            animation_speed: 0.35,
        }
    }
}

/// Model scale slider: current value and its bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            value: 1.0,
            min: 0.1,
            max: 3.0,
            step: 0.1,
        }
    }
}

/// Perspective camera and orbit controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera position
    pub position: Vec3,
    /// Orbit auto-rotation speed (2 = one turn every 30 s)
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 2000.0,
            position: Vec3::new(0.0, 5.0, 40.0),
            auto_rotate_speed: 0.5,
            min_distance: 5.0,
            max_distance: 200.0,
        }
    }
}

/// Pointer interaction plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Edge length of the square interaction plane
    pub plane_size: f32,
    /// Re-aim the plane at the camera every tick instead of only at startup
    pub track_camera: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            plane_size: 200.0,
            track_camera: false,
        }
    }
}

impl MorphConfig {
    /// Parse from a TOML string. The result is sanitized.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        Ok(config.sanitized())
    }

    /// Load and sanitize a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Clamp every value into its usable range
    pub fn sanitized(mut self) -> Self {
        let p = &mut self.particles;
        p.count = p.count.max(1);
        p.point_size = p.point_size.max(0.0);
        p.shell_radius_min = p.shell_radius_min.max(0.0);
        if p.shell_radius_max < p.shell_radius_min {
            p.shell_radius_max = p.shell_radius_min;
        }

        self.motion.animation_speed = self.motion.animation_speed.max(0.0);

        let s = &mut self.scale;
        if s.step <= 0.0 || !s.step.is_finite() {
            s.step = ScaleConfig::default().step;
        }
        s.min = s.min.max(s.step);
        if s.max < s.min {
            s.max = s.min;
        }
        s.value = s.value.clamp(s.min, s.max);

        let c = &mut self.camera;
        c.fov = c.fov.clamp(1.0, 179.0);
        c.near = c.near.max(1e-4);
        if c.far <= c.near {
            c.far = c.near * 2.0;
        }
        c.min_distance = c.min_distance.max(0.0);
        if c.max_distance < c.min_distance {
            c.max_distance = c.min_distance;
        }

        self.interaction.plane_size = self.interaction.plane_size.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let config = MorphConfig::default();
        assert_eq!(config.particles.count, 50_000);
        assert!((config.motion.animation_speed - 0.35).abs() < 1e-6);
        assert_eq!(config.camera.position, Vec3::new(0.0, 5.0, 40.0));
        assert_eq!(config.particles.color, Color::CYAN);
        assert_eq!(config.clone().sanitized(), config);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r##"
[particles]
count = 3
color = "#ffc107"

[motion]
animation_speed = 1.5
"##;
        let config = MorphConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.particles.count, 3);
        assert_eq!(config.particles.color, Color::AMBER);
        assert!((config.motion.animation_speed - 1.5).abs() < 1e-6);
        // Untouched sections keep their defaults
        assert_eq!(config.scale, ScaleConfig::default());
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let toml_str = r#"
[particles]
count = 0
point_size = -1.0

[scale]
value = 10.0
min = 0.5
max = 2.0

[camera]
fov = 500.0
"#;
        let config = MorphConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.particles.count, 1);
        assert_eq!(config.particles.point_size, 0.0);
        assert_eq!(config.scale.value, 2.0);
        assert_eq!(config.camera.fov, 179.0);
    }

    #[test]
    fn invalid_color_is_an_error() {
        let toml_str = "[particles]\ncolor = \"teal\"\n";
        assert!(MorphConfig::from_toml_str(toml_str).is_err());
    }

    #[test]
    fn toml_round_trip() {
        let config = MorphConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = MorphConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.particles.color, config.particles.color);
        assert_eq!(parsed.scale, config.scale);
    }
}
