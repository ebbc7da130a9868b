//! The particle field: per-tick spring/repulsion integrator over N particles
//!
//! Each particle is pulled toward a point that slides between its surface
//! anchor and its shell anchor, is pushed away from the pointer when close to
//! it, and is damped every tick. All particles share the same blend progress
//! so the field morphs in lockstep.

use crate::rand::{RandomSource, ShellShape};
use crate::sample::SampleSet;
use morph_core::{Aabb, MorphError, Result, Vec3};

/// Spring constant toward the blended target (per tick, not dt-scaled)
pub const SPRING: f32 = 0.01;
/// Per-tick velocity damping factor (not dt-scaled)
pub const DAMPING: f32 = 0.94;
/// Pointer repulsion reaches this far, in model units
pub const REPULSION_RADIUS: f32 = 5.0;
/// Repulsion magnitude at zero distance
pub const REPULSION_STRENGTH: f32 = 10.0;
/// Repulsion source meaning "no pointer". Far outside any model, so it never
/// lands within [`REPULSION_RADIUS`] of a particle.
pub const NO_INTERACTION: Vec3 = Vec3::new(-1000.0, -1000.0, -1000.0);

/// Blend factor between surface (0) and shell (1) at a given elapsed time
pub fn blend_progress(elapsed: f32, animation_speed: f32) -> f32 {
    ((elapsed * animation_speed).sin() + 1.0) / 2.0
}

/// Repulsion magnitude as a function of distance: 10 at contact, falling
/// linearly to 0 at the radius, 0 beyond.
pub fn repulsion_strength(distance: f32) -> f32 {
    if distance < REPULSION_RADIUS {
        (1.0 - distance / REPULSION_RADIUS) * REPULSION_STRENGTH
    } else {
        0.0
    }
}

/// Repulsion pushing `position` away from `source`.
///
/// Zero when the particle sits exactly on the source, where the direction is
/// undefined.
pub fn repulsion_force(position: Vec3, source: Vec3) -> Vec3 {
    let offset = position - source;
    let distance = offset.length();
    if distance >= REPULSION_RADIUS || distance == 0.0 {
        return Vec3::ZERO;
    }
    offset.normalized() * repulsion_strength(distance)
}

/// One integrator step for a single particle.
///
/// The spring term is added unscaled, repulsion is dt-scaled, then damping
/// applies. Changing this order changes the visible motion.
#[inline]
pub(crate) fn integrate(
    position: &mut Vec3,
    velocity: &mut Vec3,
    lerp_target: Vec3,
    repulsion: Vec3,
    dt: f32,
) {
    let target_force = (lerp_target - *position) * SPRING;
    *velocity += target_force;
    *velocity += repulsion * dt;
    *velocity *= DAMPING;
    *position += *velocity;
}

/// N particles stored as parallel arrays, index-aligned for the field's lifetime.
///
/// `positions` doubles as the render buffer: the renderer reads it after each
/// tick and re-uploads when [`ParticleField::take_dirty`] reports a change.
#[derive(Debug, Clone)]
pub struct ParticleField {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    surface_targets: Vec<Vec3>,
    shell_targets: Vec<Vec3>,
    animation_speed: f32,
    /// Uniform model scale applied by the renderer (anchors stay unscaled)
    scale: f32,
    dirty: bool,
}

impl ParticleField {
    /// Build one particle per sample. Particles start on their surface anchor
    /// at rest, so the model is visible on the first frame.
    pub fn new(
        samples: &SampleSet,
        shell: ShellShape,
        rng: &mut impl RandomSource,
    ) -> Result<Self> {
        if samples.is_empty() {
            return Err(MorphError::EmptySampleSet);
        }
        let surface_targets = samples.points().to_vec();
        let shell_targets: Vec<Vec3> = surface_targets.iter().map(|_| shell.sample(rng)).collect();
        let count = surface_targets.len();

        log::info!("Created particle field with {count} particle(s)");

        Ok(Self {
            positions: surface_targets.clone(),
            velocities: vec![Vec3::ZERO; count],
            surface_targets,
            shell_targets,
            animation_speed: 0.35,
            scale: 1.0,
            dirty: true,
        })
    }

    pub fn with_animation_speed(mut self, speed: f32) -> Self {
        self.set_animation_speed(speed);
        self
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; construction rejects empty sample sets
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions as raw bytes for a GPU vertex buffer (12 bytes per particle)
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn surface_targets(&self) -> &[Vec3] {
        &self.surface_targets
    }

    pub fn shell_targets(&self) -> &[Vec3] {
        &self.shell_targets
    }

    pub fn animation_speed(&self) -> f32 {
        self.animation_speed
    }

    /// Negative speeds are clamped to zero
    pub fn set_animation_speed(&mut self, speed: f32) {
        self.animation_speed = speed.max(0.0);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the uniform model scale. Non-positive or non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f32) {
        if scale > 0.0 && scale.is_finite() {
            self.scale = scale;
        } else {
            log::debug!("Ignoring invalid model scale {scale}");
        }
    }

    /// Whether positions changed since the last [`take_dirty`](Self::take_dirty)
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Report and clear the dirty flag. Renderers call this once per frame.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Bounds of the current positions in model space
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.positions).unwrap_or(Aabb {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        })
    }

    /// Bounds of the current positions after the model scale
    pub fn world_bounds(&self) -> Aabb {
        self.bounds().scaled(self.scale)
    }

    /// Advance every particle by one tick.
    ///
    /// `repulsion_source` is in model space; pass [`NO_INTERACTION`] when no
    /// pointer is over the model.
    pub fn advance(&mut self, dt: f32, elapsed: f32, repulsion_source: Vec3) {
        let progress = blend_progress(elapsed, self.animation_speed);

        let particles = self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(self.surface_targets.iter().zip(self.shell_targets.iter()));

        for ((position, velocity), (surface, shell)) in particles {
            let lerp_target = surface.lerp(shell, progress);
            let repulsion = repulsion_force(*position, repulsion_source);
            integrate(position, velocity, lerp_target, repulsion, dt);
        }

        self.dirty = true;
    }

    /// Zero every particle's velocity
    pub fn reset_velocities(&mut self) {
        self.velocities.fill(Vec3::ZERO);
    }

    /// Overwrite positions with `start[i]` blended toward the surface anchor by `t`.
    ///
    /// Used by one-shot tweens that bypass the integrator. `start` must hold
    /// one entry per particle; extra or missing entries are ignored.
    pub fn blend_to_surface(&mut self, start: &[Vec3], t: f32) {
        for ((position, from), surface) in self
            .positions
            .iter_mut()
            .zip(start)
            .zip(&self.surface_targets)
        {
            *position = from.lerp(surface, t);
        }
        self.dirty = true;
    }

    /// Place every particle exactly on its surface anchor
    pub fn snap_to_surface(&mut self) {
        self.positions.copy_from_slice(&self.surface_targets);
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand::tests::FixedSequence;
    use crate::rand::ShellRng;

    fn three_point_field() -> ParticleField {
        let samples = SampleSet::new(vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, -3.0),
        ])
        .unwrap();
        let mut rng = ShellRng::new(42);
        ParticleField::new(&samples, ShellShape::default(), &mut rng).unwrap()
    }

    fn assert_vec_close(a: Vec3, b: Vec3, tol: f32) {
        assert!(
            (a - b).length() <= tol,
            "expected {b:?}, got {a:?} (tolerance {tol})"
        );
    }

    #[test]
    fn construction_starts_on_surface_at_rest() {
        let field = three_point_field();
        assert_eq!(field.len(), 3);
        assert_eq!(field.positions(), field.surface_targets());
        assert!(field.velocities().iter().all(|v| *v == Vec3::ZERO));
        assert_eq!(field.shell_targets().len(), 3);
        for shell in field.shell_targets() {
            let r = shell.length();
            assert!(r >= 30.0 - 1e-3 && r < 60.0 + 1e-3);
        }
        assert!(field.is_dirty());
    }

    #[test]
    fn shell_targets_are_reproducible_with_seed() {
        let a = three_point_field();
        let b = three_point_field();
        assert_eq!(a.shell_targets(), b.shell_targets());
    }

    #[test]
    fn progress_endpoints_select_surface_and_shell() {
        use std::f32::consts::FRAC_PI_2;
        // sin(-π/2) = -1 → progress 0; sin(π/2) = 1 → progress 1
        assert!(blend_progress(-FRAC_PI_2, 1.0).abs() < 1e-6);
        assert!((blend_progress(FRAC_PI_2, 1.0) - 1.0).abs() < 1e-6);
        assert!((blend_progress(0.0, 0.35) - 0.5).abs() < 1e-6);

        let field = three_point_field();
        for (s, r) in field.surface_targets().iter().zip(field.shell_targets()) {
            assert_eq!(s.lerp(r, 0.0), *s);
            assert_eq!(s.lerp(r, 1.0), *r);
        }
    }

    #[test]
    fn repulsion_profile() {
        assert_eq!(repulsion_strength(0.0), 10.0);
        assert_eq!(repulsion_strength(5.0), 0.0);
        assert_eq!(repulsion_strength(7.5), 0.0);
        let mut last = repulsion_strength(0.0);
        for i in 1..50 {
            let s = repulsion_strength(i as f32 * 0.1);
            assert!(s < last, "strength must strictly decrease inside the radius");
            last = s;
        }

        let f = repulsion_force(Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO);
        assert_vec_close(f, Vec3::new(6.0, 0.0, 0.0), 1e-5);
        assert_eq!(repulsion_force(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn repulsion_at_source_is_zero_not_nan() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let f = repulsion_force(p, p);
        assert_eq!(f, Vec3::ZERO);
    }

    #[test]
    fn damping_decays_geometrically() {
        let initial = Vec3::new(3.0, -4.0, 0.0);
        let mut position = Vec3::new(1.0, 1.0, 1.0);
        let mut velocity = initial;
        let k = 25;
        for _ in 0..k {
            // target equals the current position → zero spring force
            let target = position;
            integrate(&mut position, &mut velocity, target, Vec3::ZERO, 1.0 / 60.0);
        }
        let expected = initial.length() * DAMPING.powi(k);
        assert!((velocity.length() - expected).abs() < 1e-4);
    }

    #[test]
    fn reset_velocities_zeroes_everything() {
        let mut field = three_point_field();
        for i in 0..10 {
            field.advance(1.0 / 60.0, i as f32 * 0.5, NO_INTERACTION);
        }
        assert!(field.velocities().iter().any(|v| *v != Vec3::ZERO));
        field.reset_velocities();
        assert!(field.velocities().iter().all(|v| *v == Vec3::ZERO));
        let positions = field.positions().to_vec();
        field.reset_velocities();
        assert!(field.velocities().iter().all(|v| *v == Vec3::ZERO));
        assert_eq!(field.positions(), &positions[..]);
    }

    #[test]
    fn first_tick_moves_toward_midpoint_without_repulsion() {
        let mut field = three_point_field();
        field.set_animation_speed(0.35);
        field.advance(1.0 / 60.0, 0.0, NO_INTERACTION);

        for i in 0..3 {
            let surface = field.surface_targets()[i];
            let shell = field.shell_targets()[i];
            let midpoint = surface.lerp(&shell, 0.5);
            // v = (mid - surface) * 0.01 * 0.94, position = surface + v
            let expected_velocity = (midpoint - surface) * (SPRING * DAMPING);
            assert_vec_close(field.velocities()[i], expected_velocity, 1e-5);
            assert_vec_close(field.positions()[i], surface + expected_velocity, 1e-5);
        }
    }

    #[test]
    fn nearby_pointer_pushes_particle_away() {
        let samples = SampleSet::new(vec![Vec3::ZERO]).unwrap();
        // shell target straight down the +X axis at radius 45
        let mut seq = FixedSequence::new(vec![0.5, 0.0, 0.5]);
        let mut field = ParticleField::new(&samples, ShellShape::default(), &mut seq).unwrap();

        let mut quiet = field.clone();
        // progress 0.5 at elapsed 0 → spring pulls toward +X
        quiet.advance(0.1, 0.0, NO_INTERACTION);
        field.advance(0.1, 0.0, Vec3::new(-1.0, 0.0, 0.0));

        let extra = field.velocities()[0] - quiet.velocities()[0];
        // repulsion 8 along +X, dt-scaled, then damped
        assert_vec_close(extra, Vec3::new(8.0 * 0.1 * DAMPING, 0.0, 0.0), 1e-5);
    }

    #[test]
    fn blend_and_snap_to_surface() {
        let mut field = three_point_field();
        let start: Vec<Vec3> = field.shell_targets().to_vec();
        field.blend_to_surface(&start, 0.0);
        assert_eq!(field.positions(), &start[..]);
        field.blend_to_surface(&start, 0.5);
        assert_vec_close(
            field.positions()[0],
            start[0].lerp(&field.surface_targets()[0], 0.5),
            1e-6,
        );
        field.snap_to_surface();
        assert_eq!(field.positions(), field.surface_targets());
    }

    #[test]
    fn dirty_flag_and_bytes() {
        let mut field = three_point_field();
        assert!(field.take_dirty());
        assert!(!field.take_dirty());
        field.advance(1.0 / 60.0, 0.0, NO_INTERACTION);
        assert!(field.take_dirty());
        assert_eq!(field.position_bytes().len(), 3 * 12);
    }

    #[test]
    fn scale_affects_world_bounds_only() {
        let mut field = three_point_field();
        let local = field.bounds();
        field.set_scale(2.0);
        assert_eq!(field.bounds(), local);
        assert_eq!(field.world_bounds().max_extent(), local.max_extent() * 2.0);
        field.set_scale(-1.0);
        assert_eq!(field.scale(), 2.0);
    }
}
