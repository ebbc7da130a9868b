//! Camera placement from model bounds and smooth camera transitions

use crate::camera::Camera;
use morph_animation::{Easing, Timeline, Tween};
use morph_core::{MorphError, Vec3};
use std::fmt;
use std::str::FromStr;

/// Extra room around the model when framing
pub const FRAMING_MARGIN: f32 = 1.2;

/// Length of a camera transition in seconds
pub const TRANSITION_SECONDS: f64 = 1.0;

/// Distance at which a model of size `max_extent` fills the vertical field
/// of view, plus [`FRAMING_MARGIN`]
pub fn framing_distance(max_extent: f32, fov_radians: f32) -> f32 {
    (max_extent / 2.0 / (fov_radians / 2.0).tan()).abs() * FRAMING_MARGIN
}

/// Fixed viewpoints around the world origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedView {
    Front,
    Side,
    Top,
    Bottom,
}

impl NamedView {
    pub const ALL: [NamedView; 4] = [
        NamedView::Front,
        NamedView::Side,
        NamedView::Top,
        NamedView::Bottom,
    ];

    /// Unit direction from the origin to the camera
    pub fn axis(self) -> Vec3 {
        match self {
            NamedView::Front => Vec3::Z,
            NamedView::Side => Vec3::X,
            NamedView::Top => Vec3::UP,
            NamedView::Bottom => -Vec3::UP,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NamedView::Front => "front",
            NamedView::Side => "side",
            NamedView::Top => "top",
            NamedView::Bottom => "bottom",
        }
    }
}

impl fmt::Display for NamedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedView {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        NamedView::ALL
            .into_iter()
            .find(|v| v.name() == lower)
            .ok_or_else(|| MorphError::UnknownView(s.to_string()))
    }
}

/// Where the camera should go and what it should look at afterwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransitionPlan {
    pub destination: Vec3,
    /// Orbit target set exactly when the transition completes
    pub look_target: Vec3,
    pub duration: f64,
    pub easing: Easing,
}

impl CameraTransitionPlan {
    fn new(destination: Vec3, look_target: Vec3) -> Self {
        Self {
            destination,
            look_target,
            duration: TRANSITION_SECONDS,
            easing: Easing::SMOOTH,
        }
    }
}

/// Plan that frames a model of size `max_extent` centered at `center`,
/// looking down -Z
pub fn frame_target(center: Vec3, max_extent: f32, fov_radians: f32) -> CameraTransitionPlan {
    let distance = framing_distance(max_extent, fov_radians);
    CameraTransitionPlan::new(
        Vec3::new(center.x, center.y, center.z + distance),
        center,
    )
}

/// Plan for a named viewpoint. Named views orbit the world origin, not the
/// model center.
pub fn named_view(view: NamedView, max_extent: f32, fov_radians: f32) -> CameraTransitionPlan {
    let distance = framing_distance(max_extent, fov_radians);
    CameraTransitionPlan::new(view.axis() * distance, Vec3::ZERO)
}

struct ActiveTransition {
    position: Tween<Vec3>,
    look_target: Vec3,
}

/// Drives at most one camera transition at a time
#[derive(Default)]
pub struct CameraFramer {
    active: Option<ActiveTransition>,
}

impl CameraFramer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Destination of the in-flight transition, if any
    pub fn destination(&self) -> Option<Vec3> {
        self.active.as_ref().map(|a| *a.position.to())
    }

    /// Begin moving the camera along `plan`, starting at frame time `now`.
    /// Any transition already in flight is dropped.
    pub fn start(&mut self, plan: CameraTransitionPlan, camera: &Camera, now: f64) {
        if self.active.is_some() {
            log::debug!("Camera transition superseded");
        }
        self.active = Some(ActiveTransition {
            position: Tween::new(
                camera.position,
                plan.destination,
                Timeline::new(now, plan.duration, plan.easing),
            ),
            look_target: plan.look_target,
        });
    }

    pub fn frame_target(
        &mut self,
        camera: &Camera,
        center: Vec3,
        max_extent: f32,
        now: f64,
    ) -> CameraTransitionPlan {
        let plan = frame_target(center, max_extent, camera.fov_radians());
        self.start(plan, camera, now);
        plan
    }

    pub fn set_named_view(
        &mut self,
        camera: &Camera,
        view: NamedView,
        max_extent: f32,
        now: f64,
    ) -> CameraTransitionPlan {
        let plan = named_view(view, max_extent, camera.fov_radians());
        self.start(plan, camera, now);
        plan
    }

    /// Drop the in-flight transition without touching the camera
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Move the camera along the active transition. On completion the camera
    /// sits exactly on the destination and its orbit target snaps to the
    /// look target. Returns true on the tick the transition completes.
    pub fn update(&mut self, camera: &mut Camera, now: f64) -> bool {
        let Some(active) = &self.active else {
            return false;
        };
        let step = active.position.step(now);
        camera.position = step.value;
        if !step.finished {
            return false;
        }
        camera.target = active.look_target;
        camera.sync_orbit_from_position();
        self.active = None;
        true
    }
}
