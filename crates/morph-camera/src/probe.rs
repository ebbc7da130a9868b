//! Pointer-to-world projection against an invisible interaction plane

use crate::camera::{Camera, Ray};
use morph_core::{Vec2, Vec3};
use morph_particles::NO_INTERACTION;

/// A square plane through `center`, used only as a raycast target.
///
/// Only hits on the side facing the camera count. Hits outside the square
/// are misses.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionProbe {
    center: Vec3,
    normal: Vec3,
    right: Vec3,
    up: Vec3,
    half_extent: f32,
}

impl InteractionProbe {
    /// Plane of edge `size` through the origin, facing `camera_position`
    pub fn facing(camera_position: Vec3, size: f32) -> Self {
        let mut probe = Self {
            center: Vec3::ZERO,
            normal: Vec3::Z,
            right: Vec3::X,
            up: Vec3::UP,
            half_extent: size.max(0.0) / 2.0,
        };
        probe.reorient(camera_position);
        probe
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    /// Turn the plane so its front faces `toward`. A target at the plane
    /// center leaves the orientation unchanged.
    pub fn reorient(&mut self, toward: Vec3) {
        let normal = (toward - self.center).normalized();
        if normal == Vec3::ZERO {
            return;
        }
        let mut right = Vec3::UP.cross(&normal).normalized();
        if right == Vec3::ZERO {
            // Looking straight up or down the world Y axis
            right = Vec3::X;
        }
        self.normal = normal;
        self.right = right;
        self.up = normal.cross(&right);
    }

    /// Intersect a ray with the plane
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let denom = ray.direction.dot(&self.normal);
        // Parallel, or approaching from behind
        if denom >= -f32::EPSILON {
            return None;
        }
        let t = (self.center - ray.origin).dot(&self.normal) / denom;
        if t < 0.0 {
            return None;
        }
        let hit = ray.at(t);
        let local = hit - self.center;
        if local.dot(&self.right).abs() > self.half_extent
            || local.dot(&self.up).abs() > self.half_extent
        {
            return None;
        }
        Some(hit)
    }

    /// World point under the pointer, or `None` on a miss
    pub fn hit(&self, pointer_ndc: Vec2, camera: &Camera) -> Option<Vec3> {
        self.intersect(&camera.ray_from_ndc(pointer_ndc))
    }

    /// World point under the pointer, [`NO_INTERACTION`] when there is no
    /// pointer or the ray misses the plane
    pub fn project(&self, pointer_ndc: Option<Vec2>, camera: &Camera) -> Vec3 {
        pointer_ndc
            .and_then(|ndc| self.hit(ndc, camera))
            .unwrap_or(NO_INTERACTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(position: Vec3) -> Camera {
        let mut camera = Camera::default();
        camera.position = position;
        camera.target = Vec3::ZERO;
        camera.sync_orbit_from_position();
        camera
    }

    #[test]
    fn center_of_screen_hits_origin() {
        let camera = camera_at(Vec3::new(0.0, 0.0, 40.0));
        let probe = InteractionProbe::facing(camera.position, 200.0);
        let hit = probe.project(Some(Vec2::ZERO), &camera);
        assert!(hit.distance(&Vec3::ZERO) < 1e-2, "hit {hit:?}");
    }

    #[test]
    fn no_pointer_is_sentinel() {
        let camera = camera_at(Vec3::new(0.0, 0.0, 40.0));
        let probe = InteractionProbe::facing(camera.position, 200.0);
        assert_eq!(probe.project(None, &camera), NO_INTERACTION);
    }

    #[test]
    fn plane_faces_camera() {
        let probe = InteractionProbe::facing(Vec3::new(0.0, 5.0, 40.0), 200.0);
        assert!(probe.normal().distance(&Vec3::new(0.0, 5.0, 40.0).normalized()) < 1e-6);
        assert_eq!(probe.half_extent(), 100.0);
    }

    #[test]
    fn back_side_is_a_miss() {
        let probe = InteractionProbe::facing(Vec3::new(0.0, 0.0, 40.0), 200.0);
        let camera = camera_at(Vec3::new(0.0, 0.0, -40.0));
        assert_eq!(probe.project(Some(Vec2::ZERO), &camera), NO_INTERACTION);
    }

    #[test]
    fn outside_the_square_is_a_miss() {
        let probe = InteractionProbe::facing(Vec3::Z, 2.0);
        let ray = Ray {
            origin: Vec3::new(5.0, 0.0, 10.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        assert_eq!(probe.intersect(&ray), None);
        let ray = Ray {
            origin: Vec3::new(0.5, -0.5, 10.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let hit = probe.intersect(&ray).unwrap();
        assert!(hit.distance(&Vec3::new(0.5, -0.5, 0.0)) < 1e-6);
    }

    #[test]
    fn reorient_from_above_keeps_a_basis() {
        let mut probe = InteractionProbe::facing(Vec3::Z, 10.0);
        probe.reorient(Vec3::new(0.0, 20.0, 0.0));
        assert_eq!(probe.normal(), Vec3::UP);
        let ray = Ray {
            origin: Vec3::new(1.0, 10.0, 1.0),
            direction: Vec3::new(0.0, -1.0, 0.0),
        };
        assert!(probe.intersect(&ray).is_some());
    }
}
