//! Point appearance handed to the renderer alongside the position buffer

use bytemuck::{Pod, Zeroable};
use morph_core::{Color, ParticleConfig};

/// How the point cloud is drawn. Changing it never touches the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub color: Color,
    /// Point size in world units
    pub size: f32,
    /// Uniform model scale
    pub scale: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: Color::CYAN,
            size: 0.1,
            scale: 1.0,
        }
    }
}

impl PointStyle {
    pub fn from_config(config: &ParticleConfig, scale: f32) -> Self {
        Self {
            color: config.color,
            size: config.point_size,
            scale,
        }
    }

    pub fn to_uniform(&self) -> PointStyleUniform {
        PointStyleUniform {
            color: self.color.to_array(),
            size_scale: [self.size, self.scale, 0.0, 0.0],
        }
    }
}

/// GPU uniform data - matches a WGSL `PointStyle` struct.
/// 32 bytes, 16-byte aligned (2 rows of vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PointStyleUniform {
    /// Color with alpha
    pub color: [f32; 4],
    /// x = point size, y = model scale, zw = padding
    pub size_scale: [f32; 4],
}
