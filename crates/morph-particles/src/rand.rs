//! Lightweight xorshift32 PRNG and shell-scatter sampling

use morph_core::Vec3;
use std::f32::consts::PI;

/// Source of uniform floats in `[0, 1)`.
///
/// Particle initialization only draws through this trait, so tests can feed a
/// fixed sequence and get reproducible shell targets.
pub trait RandomSource {
    /// Returns a float in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Returns a float in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns an index in [0, len). `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }
}

/// Seedable xorshift32 generator
#[derive(Debug, Clone)]
pub struct ShellRng {
    state: u32,
}

impl ShellRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for ShellRng {
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit an f32 mantissa exactly, so the result never rounds up to 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Radius bounds of the spherical shell scatter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellShape {
    pub radius_min: f32,
    pub radius_max: f32,
}

impl Default for ShellShape {
    fn default() -> Self {
        Self {
            radius_min: 30.0,
            radius_max: 60.0,
        }
    }
}

impl ShellShape {
    /// One shell point: radius uniform in `[radius_min, radius_max)`, azimuth
    /// uniform in `[0, 2π)`, polar angle uniform in `[0, π)`.
    ///
    /// The polar angle is drawn uniformly, not its cosine, so points cluster
    /// toward the poles.
    pub fn sample(&self, rng: &mut impl RandomSource) -> Vec3 {
        let radius = rng.range(self.radius_min, self.radius_max);
        let phi = rng.next_f32() * PI * 2.0;
        let theta = rng.next_f32() * PI;
        Vec3::new(
            radius * theta.sin() * phi.cos(),
            radius * theta.sin() * phi.sin(),
            radius * theta.cos(),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed list of values, cycling when exhausted
    pub(crate) struct FixedSequence {
        values: Vec<f32>,
        cursor: usize,
    }

    impl FixedSequence {
        pub(crate) fn new(values: Vec<f32>) -> Self {
            Self { values, cursor: 0 }
        }
    }

    impl RandomSource for FixedSequence {
        fn next_f32(&mut self) -> f32 {
            let v = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            v
        }
    }

    #[test]
    fn rng_range_bounds() {
        let mut rng = ShellRng::new(42);
        for _ in 0..10_000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn rng_is_reproducible() {
        let mut a = ShellRng::new(7);
        let mut b = ShellRng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn zero_seed_is_not_stuck() {
        let mut rng = ShellRng::new(0);
        let first = rng.next_f32();
        let second = rng.next_f32();
        assert_ne!(first, second);
    }

    #[test]
    fn shell_points_within_radius_bounds() {
        let shape = ShellShape::default();
        let mut rng = ShellRng::new(123);
        for _ in 0..5_000 {
            let r = shape.sample(&mut rng).length();
            assert!(r >= 30.0 - 1e-3 && r < 60.0 + 1e-3, "radius {r} out of shell");
        }
    }

    #[test]
    fn shell_point_from_fixed_sequence() {
        // radius = 30 + 0.5 * 30 = 45, phi = 0, theta = π/2 → (45, 0, ~0)
        let mut seq = FixedSequence::new(vec![0.5, 0.0, 0.5]);
        let p = ShellShape::default().sample(&mut seq);
        assert!((p.x - 45.0).abs() < 1e-4);
        assert!(p.y.abs() < 1e-4);
        assert!(p.z.abs() < 1e-4);
    }

    #[test]
    fn index_stays_in_bounds() {
        let mut seq = FixedSequence::new(vec![0.0, 0.999_999_9]);
        assert_eq!(seq.index(4), 0);
        assert_eq!(seq.index(4), 3);
    }
}
