//! Per-tick driver that owns every piece of simulation state
//!
//! A host feeds one [`InputSnapshot`] and its frame timestamp per tick and
//! gets back a [`Frame`] borrowing the freshly written position buffer.
//! Tick order:
//! 1. pointer projection onto the interaction plane
//! 2. physics (Animated, not paused) or the settle tween and wheel scaling (Viewer)
//! 3. camera transition, then orbit controls
//! 4. the frame for the renderer

use crate::mode::{Mode, ModeController};
use morph_camera::{
    frame_target, named_view, Camera, CameraFramer, CameraPose, CameraTransitionPlan,
    InteractionProbe, NamedView,
};
use morph_core::{Color, MorphConfig, Result, Vec3};
use morph_particles::{ParticleField, PointStyle, SampleSet, ShellRng, ShellShape, NO_INTERACTION};
use morph_runtime::{Clock, InputSnapshot, ScaleSlider, MAX_DELTA};

/// What the renderer needs after a tick
#[derive(Debug)]
pub struct Frame<'a> {
    /// Model-space positions; apply `style.scale` as the model transform
    pub positions: &'a [Vec3],
    /// Same buffer as raw bytes for upload
    pub position_bytes: &'a [u8],
    /// Positions changed since the previous frame
    pub dirty: bool,
    pub pose: CameraPose,
    pub view_projection: [[f32; 4]; 4],
    pub style: PointStyle,
    pub mode: Mode,
    /// World-space pointer hit, or the no-interaction sentinel
    pub interaction: Vec3,
}

pub struct Simulation {
    field: ParticleField,
    camera: Camera,
    probe: InteractionProbe,
    framer: CameraFramer,
    clock: Clock,
    slider: ScaleSlider,
    modes: ModeController,
    style: PointStyle,
    track_camera: bool,
    interaction: Vec3,
    /// Host time of the latest tick
    now: Option<f64>,
    /// Camera move requested before the first tick
    queued_plan: Option<CameraTransitionPlan>,
    /// Mode switch requested before the first tick
    queued_mode: Option<Mode>,
}

impl Simulation {
    /// Build the field from `samples` (recentered on the origin) and place
    /// the camera. The camera starts moving to frame the model on the first
    /// tick.
    ///
    /// Camera moves and mode switches requested before the first tick are
    /// queued and start at that tick's timestamp.
    pub fn new(config: MorphConfig, samples: &SampleSet) -> Result<Self> {
        let config = config.sanitized();
        let slider = ScaleSlider::from_config(&config.scale);

        let shell = ShellShape {
            radius_min: config.particles.shell_radius_min,
            radius_max: config.particles.shell_radius_max,
        };
        let mut rng = ShellRng::new(config.particles.seed);
        let mut field = ParticleField::new(&samples.centered(), shell, &mut rng)?
            .with_animation_speed(config.motion.animation_speed);
        field.set_scale(slider.value());

        let mut camera = Camera::from_config(&config.camera);
        let probe = InteractionProbe::facing(camera.position, config.interaction.plane_size);
        let bounds = field.world_bounds();
        let fit = frame_target(bounds.center(), bounds.max_extent(), camera.fov_radians());

        let mut modes = ModeController::new();
        modes.enter(Mode::Animated, &mut field, &mut camera, 0.0);

        Ok(Self {
            field,
            camera,
            probe,
            framer: CameraFramer::new(),
            clock: Clock::new(),
            slider,
            modes,
            style: PointStyle::from_config(&config.particles, slider.value()),
            track_camera: config.interaction.track_camera,
            interaction: NO_INTERACTION,
            now: None,
            queued_plan: Some(fit),
            queued_mode: None,
        })
    }

    /// Run one tick at host time `now` (seconds, monotonic)
    pub fn tick(&mut self, input: &InputSnapshot, now: f64) -> Frame<'_> {
        let frame_dt = match self.now {
            Some(prev) => (now - prev).clamp(0.0, MAX_DELTA) as f32,
            None => 0.0,
        };
        self.now = Some(now);
        let dt = self.clock.tick_at(now) as f32;

        if let Some(mode) = self.queued_mode.take() {
            self.modes.enter(mode, &mut self.field, &mut self.camera, now);
        }
        if let Some(plan) = self.queued_plan.take() {
            self.framer.start(plan, &self.camera, now);
        }

        // 1. Pointer
        if self.track_camera {
            self.probe.reorient(self.camera.position);
        }
        self.interaction = match self.modes.mode() {
            Mode::Animated => self.probe.project(input.pointer_ndc, &self.camera),
            Mode::Viewer => NO_INTERACTION,
        };

        // 2. Particles
        match self.modes.mode() {
            Mode::Animated => {
                if !self.clock.is_paused() {
                    let source = self.model_space(self.interaction);
                    self.field.advance(dt, self.clock.elapsed() as f32, source);
                }
            }
            Mode::Viewer => {
                self.modes.step(&mut self.field, now);
                if self.slider.apply_wheel_steps(input.wheel_steps) {
                    self.apply_scale();
                }
            }
        }

        // 3. Camera
        self.framer.update(&mut self.camera, now);
        self.camera.update_controls(frame_dt);

        // 4. Frame
        let dirty = self.field.take_dirty();
        Frame {
            positions: self.field.positions(),
            position_bytes: self.field.position_bytes(),
            dirty,
            pose: self.camera.pose(),
            view_projection: self.camera.view_projection_matrix(),
            style: self.style,
            mode: self.modes.mode(),
            interaction: self.interaction,
        }
    }

    /// World point to model space; the sentinel passes through untouched
    fn model_space(&self, world: Vec3) -> Vec3 {
        if world == NO_INTERACTION {
            return world;
        }
        world * (1.0 / self.field.scale())
    }

    fn apply_scale(&mut self) {
        let scale = self.slider.value();
        self.field.set_scale(scale);
        self.style.scale = scale;
        log::debug!("Model scale {scale:.2}");
        self.fit_view();
    }

    // --- Controls ---

    /// Returns true if the clock is now paused
    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.clock.toggle_pause();
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
        paused
    }

    /// Restart the breathing cycle from the surface side and resume
    pub fn reset_animation(&mut self) {
        self.clock.reset();
    }

    pub fn set_animation_speed(&mut self, speed: f32) {
        self.field.set_animation_speed(speed);
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    pub fn set_point_size(&mut self, size: f32) {
        self.style.size = size.max(0.0);
    }

    /// Set the model scale (clamped to the slider range) and refit the camera
    pub fn set_scale(&mut self, scale: f32) {
        if self.slider.set(scale) {
            self.apply_scale();
        }
    }

    /// Frame the whole model from the front
    pub fn fit_view(&mut self) -> CameraTransitionPlan {
        let bounds = self.field.world_bounds();
        match self.now {
            Some(now) => self.framer.frame_target(
                &self.camera,
                bounds.center(),
                bounds.max_extent(),
                now,
            ),
            None => self.queue_plan(frame_target(
                bounds.center(),
                bounds.max_extent(),
                self.camera.fov_radians(),
            )),
        }
    }

    pub fn set_view(&mut self, view: NamedView) -> CameraTransitionPlan {
        let max_extent = self.field.world_bounds().max_extent();
        match self.now {
            Some(now) => self
                .framer
                .set_named_view(&self.camera, view, max_extent, now),
            None => self.queue_plan(named_view(view, max_extent, self.camera.fov_radians())),
        }
    }

    fn queue_plan(&mut self, plan: CameraTransitionPlan) -> CameraTransitionPlan {
        if self.queued_plan.replace(plan).is_some() {
            log::debug!("Queued camera move superseded");
        }
        plan
    }

    pub fn set_mode(&mut self, mode: Mode) {
        match self.now {
            Some(now) => self.modes.enter(mode, &mut self.field, &mut self.camera, now),
            None => self.queued_mode = Some(mode),
        }
    }

    // --- Manual camera controls ---
    //
    // Free orbit, zoom and pan take over from any camera transition in flight.

    /// Rotate around the orbit target by `yaw` and `pitch` radians
    pub fn orbit_camera(&mut self, yaw: f32, pitch: f32) {
        self.take_camera();
        self.camera.orbit(yaw, pitch);
    }

    /// Move toward the orbit target by `amount` world units; negative moves away
    pub fn zoom_camera(&mut self, amount: f32) {
        self.take_camera();
        self.camera.zoom(amount);
    }

    /// Slide the orbit target and camera along the view plane
    pub fn pan_camera(&mut self, dx: f32, dy: f32) {
        self.take_camera();
        self.camera.pan(dx, dy);
    }

    fn take_camera(&mut self) {
        if self.framer.is_active() || self.queued_plan.is_some() {
            log::debug!("Camera transition cancelled by manual control");
        }
        self.framer.cancel();
        self.queued_plan = None;
    }

    /// Viewport size changed
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.camera.aspect = width / height;
        }
    }

    // --- Queries ---

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current mode, or the mode queued for the first tick
    pub fn mode(&self) -> Mode {
        self.queued_mode.unwrap_or_else(|| self.modes.mode())
    }

    pub fn is_transitioning(&self) -> bool {
        self.modes.is_transitioning()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn scale(&self) -> f32 {
        self.slider.value()
    }

    pub fn style(&self) -> PointStyle {
        self.style
    }

    pub fn camera_in_transition(&self) -> bool {
        self.framer.is_active() || self.queued_plan.is_some()
    }
}
