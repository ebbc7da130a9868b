//! Easing curves mapping linear progress in [0, 1] to eased progress

/// Easing curve.
///
/// The `Power*` variants follow the common "power N" naming: power 1 is
/// quadratic, power 2 cubic, power 3 quartic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    PowerIn(u8),
    PowerOut(u8),
    PowerInOut(u8),
}

impl Easing {
    /// Quadratic ease-in/ease-out, used for camera moves
    pub const SMOOTH: Self = Easing::PowerInOut(1);
    /// Quartic ease-in/ease-out, used for the particle settle tween
    pub const STRONG: Self = Easing::PowerInOut(3);

    /// Evaluate the curve. Input is clamped to [0, 1]; endpoints map exactly
    /// to 0 and 1.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::PowerIn(p) => t.powi(exponent(p)),
            Easing::PowerOut(p) => 1.0 - (1.0 - t).powi(exponent(p)),
            Easing::PowerInOut(p) => {
                let n = exponent(p);
                if t < 0.5 {
                    (2.0 * t).powi(n) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(n) / 2.0
                }
            }
        }
    }
}

fn exponent(power: u8) -> i32 {
    i32::from(power) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::PowerIn(1),
        Easing::PowerOut(1),
        Easing::PowerInOut(1),
        Easing::PowerIn(3),
        Easing::PowerOut(3),
        Easing::PowerInOut(3),
    ];

    #[test]
    fn endpoints_are_exact() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?} at 0");
            assert_eq!(e.apply(1.0), 1.0, "{e:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        for e in ALL {
            assert_eq!(e.apply(-3.0), 0.0);
            assert_eq!(e.apply(7.0), 1.0);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for e in ALL {
            let mut last = e.apply(0.0);
            for i in 1..=100 {
                let v = e.apply(i as f32 / 100.0);
                assert!(v >= last, "{e:?} decreased at step {i}");
                last = v;
            }
        }
    }

    #[test]
    fn in_out_is_symmetric_about_midpoint() {
        for e in [Easing::SMOOTH, Easing::STRONG] {
            assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
            for i in 0..=50 {
                let t = i as f32 / 100.0;
                let a = e.apply(t);
                let b = 1.0 - e.apply(1.0 - t);
                assert!((a - b).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn quartic_values() {
        // power3 in-out at 0.25: (0.5)^4 / 2
        assert!((Easing::STRONG.apply(0.25) - 0.03125).abs() < 1e-6);
        // quadratic ease-in at 0.5
        assert!((Easing::PowerIn(1).apply(0.5) - 0.25).abs() < 1e-6);
    }
}
