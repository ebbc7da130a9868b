//! Stepped model-scale control driven by the wheel or a host slider

use morph_core::ScaleConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSlider {
    value: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl Default for ScaleSlider {
    fn default() -> Self {
        Self::from_config(&ScaleConfig::default())
    }
}

impl ScaleSlider {
    /// Build from an already-sanitized config
    pub fn from_config(config: &ScaleConfig) -> Self {
        Self {
            value: config.value.clamp(config.min, config.max),
            min: config.min,
            max: config.max,
            step: config.step,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Set directly, clamped to the range. Returns true if the value changed.
    pub fn set(&mut self, value: f32) -> bool {
        if !value.is_finite() {
            log::debug!("Ignoring non-finite scale {value}");
            return false;
        }
        let clamped = value.clamp(self.min, self.max);
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }

    /// Apply wheel steps: each positive step grows by one `step`, each
    /// negative step shrinks, clamped to the range, then the result is
    /// snapped to a multiple of `step`. Returns true if the value changed.
    pub fn apply_wheel_steps(&mut self, steps: i32) -> bool {
        if steps == 0 {
            return false;
        }
        let mut value = self.value;
        for _ in 0..steps.unsigned_abs() {
            value = if steps > 0 {
                (value + self.step).min(self.max)
            } else {
                (value - self.step).max(self.min)
            };
        }
        if self.step > 0.0 {
            value = ((value / self.step).round() * self.step).clamp(self.min, self.max);
        }
        let changed = value != self.value;
        self.value = value;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider(value: f32) -> ScaleSlider {
        ScaleSlider::from_config(&ScaleConfig {
            value,
            min: 0.1,
            max: 3.0,
            step: 0.1,
        })
    }

    #[test]
    fn wheel_up_grows_by_step() {
        let mut s = slider(1.0);
        assert!(s.apply_wheel_steps(1));
        assert!((s.value() - 1.1).abs() < 1e-5);
        assert!(s.apply_wheel_steps(-2));
        assert!((s.value() - 0.9).abs() < 1e-5);
    }

    #[test]
    fn wheel_clamps_to_range() {
        let mut s = slider(2.95);
        s.apply_wheel_steps(5);
        assert!((s.value() - 3.0).abs() < 1e-5);
        let mut s = slider(0.1);
        s.apply_wheel_steps(-1);
        assert!((s.value() - 0.1).abs() < 1e-5);
    }

    #[test]
    fn result_is_snapped_to_step() {
        let mut s = slider(1.04);
        s.apply_wheel_steps(1);
        assert!((s.value() - 1.1).abs() < 1e-5);
    }

    #[test]
    fn zero_steps_is_noop() {
        let mut s = slider(1.23);
        assert!(!s.apply_wheel_steps(0));
        assert_eq!(s.value(), 1.23);
    }

    #[test]
    fn set_clamps() {
        let mut s = slider(1.0);
        assert!(s.set(10.0));
        assert_eq!(s.value(), 3.0);
        assert!(!s.set(f32::NAN));
        assert_eq!(s.value(), 3.0);
    }
}
