//! Animated / Viewer mode switching

use morph_animation::{Easing, Timeline};
use morph_camera::Camera;
use morph_core::{MorphError, Vec3};
use morph_particles::ParticleField;
use std::fmt;
use std::str::FromStr;

/// Length of the settle tween that carries particles onto the surface
pub const SETTLE_SECONDS: f64 = 2.0;

/// Display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Particles breathe between surface and shell and react to the pointer
    #[default]
    Animated,
    /// Particles rest on the surface; the wheel scales the model
    Viewer,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Animated => "animated",
            Mode::Viewer => "viewer",
        })
    }
}

impl FromStr for Mode {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "animated" | "animation" => Ok(Mode::Animated),
            "viewer" => Ok(Mode::Viewer),
            _ => Err(MorphError::UnknownMode(s.to_string())),
        }
    }
}

/// Per-particle move from captured start positions onto the surface
struct SettleTween {
    start: Vec<Vec3>,
    timeline: Timeline,
}

/// Owns the active mode and the transition into it
#[derive(Default)]
pub struct ModeController {
    mode: Mode,
    settle: Option<SettleTween>,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the settle tween is running
    pub fn is_transitioning(&self) -> bool {
        self.settle.is_some()
    }

    /// Switch to `mode` at frame time `now` and run its entry effects.
    /// Requesting the active mode runs them again.
    pub fn enter(&mut self, mode: Mode, field: &mut ParticleField, camera: &mut Camera, now: f64) {
        if self.settle.take().is_some() {
            log::debug!("Settle tween cancelled");
        }

        match mode {
            Mode::Viewer => {
                self.settle = Some(SettleTween {
                    start: field.positions().to_vec(),
                    timeline: Timeline::new(now, SETTLE_SECONDS, Easing::STRONG),
                });
                camera.auto_rotate = false;
            }
            Mode::Animated => {
                field.reset_velocities();
                camera.auto_rotate = true;
            }
        }

        if mode != self.mode {
            log::info!("Mode: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Sample the settle tween at `now`. Returns true on the tick it completes.
    pub fn step(&mut self, field: &mut ParticleField, now: f64) -> bool {
        let Some(settle) = &self.settle else {
            return false;
        };
        if settle.timeline.is_finished(now) {
            field.snap_to_surface();
            self.settle = None;
            return true;
        }
        field.blend_to_surface(&settle.start, settle.timeline.progress(now));
        false
    }
}
