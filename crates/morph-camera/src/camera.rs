//! Perspective orbit camera

use morph_core::{CameraConfig, Vec2, Vec3};
use std::f32::consts::TAU;

/// Pitch limit; keeps the view matrix away from the degenerate straight
/// up/down orientation
const PITCH_LIMIT: f32 = 1.56;

/// Half-line starting at `origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Position and look-target handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

/// A perspective camera orbiting a target point
pub struct Camera {
    /// Camera position
    pub position: Vec3,
    /// Target point the camera looks at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,

    // Orbit control state
    /// Distance from target
    pub distance: f32,
    /// Horizontal angle in radians
    pub yaw: f32,
    /// Vertical angle in radians
    pub pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    /// Spin around the target every control update
    pub auto_rotate: bool,
    /// 1.0 = one full turn per minute
    pub auto_rotate_speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self {
            position: config.position,
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov: config.fov,
            near: config.near,
            far: config.far,
            aspect: 16.0 / 9.0,
            distance: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            auto_rotate: true,
            auto_rotate_speed: config.auto_rotate_speed,
        };
        camera.sync_orbit_from_position();
        camera
    }

    /// Vertical field of view in radians
    pub fn fov_radians(&self) -> f32 {
        self.fov.to_radians()
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            target: self.target,
        }
    }

    /// Recompute yaw/pitch/distance from the current position and target.
    /// Used after the position was set directly (tweens, named views).
    pub fn sync_orbit_from_position(&mut self) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        self.distance = distance;
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
    }

    /// Update position based on orbit parameters
    pub fn update_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();

        self.position = Vec3::new(
            self.target.x + x,
            self.target.y + y,
            self.target.z + z,
        );
    }

    /// Per-tick orbit controls: pick up any direct position change, apply
    /// auto-rotation, enforce the distance and pitch limits.
    pub fn update_controls(&mut self, dt: f32) {
        self.sync_orbit_from_position();
        if self.auto_rotate {
            self.yaw += TAU / 60.0 * self.auto_rotate_speed * dt;
        }
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.update_orbit();
    }

    /// Turn around the target by `yaw` and tilt by `pitch` radians
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        self.sync_orbit_from_position();
        self.yaw += yaw;
        self.pitch = (self.pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_orbit();
    }

    /// Step toward the target by `amount`, within the distance limits
    pub fn zoom(&mut self, amount: f32) {
        self.sync_orbit_from_position();
        self.distance = (self.distance - amount).clamp(self.min_distance, self.max_distance);
        self.update_orbit();
    }

    /// Shift target and position together across the view plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.position).normalized();
        let right = forward.cross(&self.up).normalized();
        let screen_up = right.cross(&forward);
        let shift = right * dx + screen_up * dy;
        self.target = self.target + shift;
        self.position = self.position + shift;
    }

    /// Get the view matrix (4x4, column-major)
    pub fn view_matrix(&self) -> [[f32; 4]; 4] {
        let f = (self.target - self.position).normalized();
        let s = f.cross(&self.up).normalized();
        let u = s.cross(&f);

        [
            [s.x, u.x, -f.x, 0.0],
            [s.y, u.y, -f.y, 0.0],
            [s.z, u.z, -f.z, 0.0],
            [
                -s.dot(&self.position),
                -u.dot(&self.position),
                f.dot(&self.position),
                1.0,
            ],
        ]
    }

    /// Get the projection matrix (4x4, column-major, OpenGL depth range)
    pub fn projection_matrix(&self) -> [[f32; 4]; 4] {
        let f = 1.0 / (self.fov_radians() / 2.0).tan();
        let depth = self.far - self.near;

        [
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, -(self.far + self.near) / depth, -1.0],
            [0.0, 0.0, -(2.0 * self.far * self.near) / depth, 0.0],
        ]
    }

    /// Get combined view-projection matrix
    pub fn view_projection_matrix(&self) -> [[f32; 4]; 4] {
        mat4_mul(&self.projection_matrix(), &self.view_matrix())
    }

    /// Get inverse of the combined view-projection matrix (for unprojecting)
    pub fn inverse_view_projection_matrix(&self) -> [[f32; 4]; 4] {
        mat4_inverse(&self.view_projection_matrix())
    }

    /// World-space point for an NDC position at NDC depth `z`
    pub fn unproject(&self, ndc: Vec2, z: f32) -> Vec3 {
        let inv = self.inverse_view_projection_matrix();
        let [x, y, z, w] = mat4_mul_vec4(&inv, [ndc.x, ndc.y, z, 1.0]);
        if w.abs() < 1e-12 {
            return Vec3::new(x, y, z);
        }
        Vec3::new(x / w, y / w, z / w)
    }

    /// Ray from the camera through an NDC position
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let through = self.unproject(ndc, 0.5);
        Ray {
            origin: self.position,
            direction: (through - self.position).normalized(),
        }
    }
}

fn mat4_mul(a: &[[f32; 4]; 4], b: &[[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }
    result
}

fn mat4_mul_vec4(m: &[[f32; 4]; 4], v: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = (0..4).map(|col| m[col][row] * v[col]).sum();
    }
    out
}

/// Compute the inverse of a 4x4 column-major matrix using cofactor expansion
fn mat4_inverse(m: &[[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let s = |col: usize, row: usize| -> f32 { m[col][row] };

    let c00 = s(2,2)*s(3,3) - s(3,2)*s(2,3);
    let c02 = s(1,2)*s(3,3) - s(3,2)*s(1,3);
    let c03 = s(1,2)*s(2,3) - s(2,2)*s(1,3);

    let c04 = s(2,1)*s(3,3) - s(3,1)*s(2,3);
    let c06 = s(1,1)*s(3,3) - s(3,1)*s(1,3);
    let c07 = s(1,1)*s(2,3) - s(2,1)*s(1,3);

    let c08 = s(2,1)*s(3,2) - s(3,1)*s(2,2);
    let c10 = s(1,1)*s(3,2) - s(3,1)*s(1,2);
    let c11 = s(1,1)*s(2,2) - s(2,1)*s(1,2);

    let c12 = s(2,0)*s(3,3) - s(3,0)*s(2,3);
    let c14 = s(1,0)*s(3,3) - s(3,0)*s(1,3);
    let c15 = s(1,0)*s(2,3) - s(2,0)*s(1,3);

    let c16 = s(2,0)*s(3,2) - s(3,0)*s(2,2);
    let c18 = s(1,0)*s(3,2) - s(3,0)*s(1,2);
    let c19 = s(1,0)*s(2,2) - s(2,0)*s(1,2);

    let c20 = s(2,0)*s(3,1) - s(3,0)*s(2,1);
    let c22 = s(1,0)*s(3,1) - s(3,0)*s(1,1);
    let c23 = s(1,0)*s(2,1) - s(2,0)*s(1,1);

    let f0 = [c00, c00, c02, c03];
    let f1 = [c04, c04, c06, c07];
    let f2 = [c08, c08, c10, c11];
    let f3 = [c12, c12, c14, c15];
    let f4 = [c16, c16, c18, c19];
    let f5 = [c20, c20, c22, c23];

    let v0 = [s(1,0), s(0,0), s(0,0), s(0,0)];
    let v1 = [s(1,1), s(0,1), s(0,1), s(0,1)];
    let v2 = [s(1,2), s(0,2), s(0,2), s(0,2)];
    let v3 = [s(1,3), s(0,3), s(0,3), s(0,3)];

    let mut inv = [[0.0f32; 4]; 4];
    let sign_a = [1.0, -1.0, 1.0, -1.0];
    let sign_b = [-1.0, 1.0, -1.0, 1.0];

    for i in 0..4 {
        inv[0][i] = sign_a[i] * (v1[i]*f0[i] - v2[i]*f1[i] + v3[i]*f2[i]);
        inv[1][i] = sign_b[i] * (v0[i]*f0[i] - v2[i]*f3[i] + v3[i]*f4[i]);
        inv[2][i] = sign_a[i] * (v0[i]*f1[i] - v1[i]*f3[i] + v3[i]*f5[i]);
        inv[3][i] = sign_b[i] * (v0[i]*f2[i] - v1[i]*f4[i] + v2[i]*f5[i]);
    }

    let det = s(0,0)*inv[0][0] + s(1,0)*inv[0][1] + s(2,0)*inv[0][2] + s(3,0)*inv[0][3];

    if det.abs() < 1e-10 {
        return [[1.0,0.0,0.0,0.0],[0.0,1.0,0.0,0.0],[0.0,0.0,1.0,0.0],[0.0,0.0,0.0,1.0]];
    }

    let inv_det = 1.0 / det;
    for col in &mut inv {
        for val in col.iter_mut() {
            *val *= inv_det;
        }
    }
    inv
}
