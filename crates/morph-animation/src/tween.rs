//! One-shot tweens: time-bounded interpolations sampled once per tick
//!
//! A [`Timeline`] only knows when it started, how long it runs and its
//! easing; callers sample it with the current frame time. [`Tween`] adds a
//! start and end value. Completion is reported through [`TweenStep::finished`]
//! so the owner decides what to run on completion and when to drop the tween.

use crate::easing::Easing;
use morph_core::Vec3;

/// Values that can be linearly interpolated
pub trait Lerp: Clone {
    fn lerp(&self, to: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        Vec3::lerp(self, to, t)
    }
}

/// Start time, duration and easing of a one-shot interpolation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    /// Frame time at which the tween starts, in seconds
    pub start: f64,
    /// Length in seconds
    pub duration: f64,
    pub easing: Easing,
}

impl Timeline {
    pub fn new(start: f64, duration: f64, easing: Easing) -> Self {
        Self {
            start,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// Linear progress in [0, 1]. A zero-length timeline is complete immediately.
    pub fn linear_progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Eased progress in [0, 1]
    pub fn progress(&self, now: f64) -> f32 {
        self.easing.apply(self.linear_progress(now))
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.start + self.duration
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Result of sampling a tween
#[derive(Debug, Clone, PartialEq)]
pub struct TweenStep<T> {
    pub value: T,
    /// True once the end time has been reached; `value` is then exactly the
    /// end value.
    pub finished: bool,
}

/// Interpolation from one value to another over a [`Timeline`]
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    timeline: Timeline,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, timeline: Timeline) -> Self {
        Self { from, to, timeline }
    }

    pub fn from(&self) -> &T {
        &self.from
    }

    pub fn to(&self) -> &T {
        &self.to
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Value at frame time `now`
    pub fn step(&self, now: f64) -> TweenStep<T> {
        if self.timeline.is_finished(now) {
            return TweenStep {
                value: self.to.clone(),
                finished: true,
            };
        }
        TweenStep {
            value: self.from.lerp(&self.to, self.timeline.progress(now)),
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_progress_clamps() {
        let tl = Timeline::new(10.0, 2.0, Easing::Linear);
        assert_eq!(tl.progress(9.0), 0.0);
        assert_eq!(tl.progress(10.0), 0.0);
        assert!((tl.progress(11.0) - 0.5).abs() < 1e-6);
        assert_eq!(tl.progress(12.0), 1.0);
        assert_eq!(tl.progress(50.0), 1.0);
        assert!(!tl.is_finished(11.9));
        assert!(tl.is_finished(12.0));
        assert_eq!(tl.end(), 12.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let tl = Timeline::new(1.0, 0.0, Easing::STRONG);
        assert_eq!(tl.progress(1.0), 1.0);
        assert!(tl.is_finished(1.0));
        let negative = Timeline::new(1.0, -5.0, Easing::Linear);
        assert_eq!(negative.duration, 0.0);
    }

    #[test]
    fn tween_samples_between_values() {
        let tween = Tween::new(
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, -10.0),
            Timeline::new(0.0, 1.0, Easing::Linear),
        );
        let mid = tween.step(0.5);
        assert!(!mid.finished);
        assert_eq!(mid.value, Vec3::new(5.0, 0.0, -5.0));
    }

    #[test]
    fn tween_finishes_exactly_on_target() {
        let to = Vec3::new(0.1, 0.2, 0.3);
        let tween = Tween::new(Vec3::new(7.0, 8.0, 9.0), to, Timeline::new(0.0, 1.0, Easing::SMOOTH));
        let end = tween.step(1.0);
        assert!(end.finished);
        assert_eq!(end.value, to);
        assert_eq!(tween.step(3.0).value, to);
    }

    #[test]
    fn scalar_tween() {
        let tween = Tween::new(2.0f32, 4.0, Timeline::new(0.0, 2.0, Easing::Linear));
        assert!((tween.step(1.0).value - 3.0).abs() < 1e-6);
    }
}
