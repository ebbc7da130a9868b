//! Pointer and wheel input, collected between ticks and read as a snapshot

use morph_core::Vec2;

/// Size of the tracked surface in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Pixel coordinates to normalized device coordinates, Y up.
    /// Pixels outside the viewport are clamped to its edge.
    pub fn to_ndc(&self, px: f32, py: f32) -> Vec2 {
        let px = px.clamp(0.0, self.width);
        let py = py.clamp(0.0, self.height);
        Vec2::new(
            (px / self.width) * 2.0 - 1.0,
            -(py / self.height) * 2.0 + 1.0,
        )
    }
}

/// Input as seen by one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Pointer in NDC, `None` when no pointer is over the surface
    pub pointer_ndc: Option<Vec2>,
    /// Net wheel steps since the last frame; positive grows
    pub wheel_steps: i32,
}

/// Accumulates pointer and wheel events between ticks
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    viewport: Viewport,
    /// Last pointer position in pixels
    pointer: Option<(f32, f32)>,
    wheel_steps: i32,
}

impl PointerState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Mouse move or touch move, in viewport pixels
    pub fn process_pointer_move(&mut self, px: f32, py: f32) {
        self.pointer = Some((px, py));
    }

    /// Pointer left the surface
    pub fn process_pointer_leave(&mut self) {
        self.pointer = None;
    }

    pub fn process_touch_end(&mut self) {
        self.process_pointer_leave();
    }

    /// Wheel event. Negative deltas (scroll up) grow, anything else shrinks.
    pub fn process_wheel(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.wheel_steps += 1;
        } else {
            self.wheel_steps -= 1;
        }
    }

    pub fn process_resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Immutable view of the input for the coming tick
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            pointer_ndc: self.pointer.map(|(x, y)| self.viewport.to_ndc(x, y)),
            wheel_steps: self.wheel_steps,
        }
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.wheel_steps = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners_and_center() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(400.0, 300.0), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn ndc_clamps_outside_pixels() {
        let vp = Viewport::new(100.0, 100.0);
        assert_eq!(vp.to_ndc(-50.0, 500.0), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn leave_clears_pointer() {
        let mut input = PointerState::new(Viewport::new(100.0, 100.0));
        assert_eq!(input.snapshot().pointer_ndc, None);
        input.process_pointer_move(50.0, 50.0);
        assert_eq!(input.snapshot().pointer_ndc, Some(Vec2::new(0.0, 0.0)));
        input.process_touch_end();
        assert_eq!(input.snapshot().pointer_ndc, None);
    }

    #[test]
    fn wheel_steps_reset_each_frame() {
        let mut input = PointerState::default();
        input.process_wheel(-120.0);
        input.process_wheel(-3.0);
        input.process_wheel(40.0);
        assert_eq!(input.snapshot().wheel_steps, 1);
        input.end_frame();
        assert_eq!(input.snapshot().wheel_steps, 0);
    }

    #[test]
    fn resize_changes_projection() {
        let mut input = PointerState::new(Viewport::new(100.0, 100.0));
        input.process_pointer_move(50.0, 50.0);
        input.process_resize(200.0, 100.0);
        assert_eq!(input.snapshot().pointer_ndc, Some(Vec2::new(-0.5, 0.0)));
        assert_eq!(input.viewport().aspect(), 2.0);
    }
}
