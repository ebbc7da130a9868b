//! Run command - headless simulation for a fixed number of ticks

use super::{load_config, load_samples};
use anyhow::{Context, Result};
use morph_camera::NamedView;
use morph_core::Vec3;
use morph_player::{Mode, Simulation};
use morph_runtime::{PointerState, Viewport};
use serde::Serialize;
use std::fs;

pub struct RunArgs {
    pub points: String,
    pub config: Option<String>,
    pub ticks: u32,
    pub fps: f64,
    pub viewport: (f32, f32),
    /// Pointer held at this pixel position for the whole run
    pub pointer: Option<(f32, f32)>,
    /// Switch to viewer mode at this tick
    pub viewer_at: Option<u32>,
    /// Move to a named view at the start
    pub view: Option<NamedView>,
    /// Wheel steps per tick while in viewer mode
    pub wheel: i32,
    /// Write final positions and camera pose as JSON
    pub output: Option<String>,
}

#[derive(Serialize)]
struct RunReport {
    ticks: u32,
    mode: String,
    elapsed: f64,
    scale: f32,
    camera_position: [f32; 3],
    camera_target: [f32; 3],
    mean_surface_distance: f32,
    max_speed: f32,
    positions: Vec<[f32; 3]>,
}

pub fn run(args: RunArgs) -> Result<()> {
    if args.fps <= 0.0 {
        anyhow::bail!("--fps must be positive, got {}", args.fps);
    }

    let config = load_config(args.config.as_deref())?;
    let samples = load_samples(&args.points, &config)?;
    let mut sim = Simulation::new(config, &samples).context("Failed to build simulation")?;

    let (width, height) = args.viewport;
    let mut input = PointerState::new(Viewport::new(width, height));
    sim.resize(width, height);
    if let Some((px, py)) = args.pointer {
        input.process_pointer_move(px, py);
    }

    let step = 1.0 / args.fps;
    let mut pointer_hits = 0u32;
    for tick in 0..args.ticks {
        if args.viewer_at == Some(tick) {
            sim.set_mode(Mode::Viewer);
        }
        if tick == 0 {
            if let Some(view) = args.view {
                sim.set_view(view);
            }
        }
        if sim.mode() == Mode::Viewer {
            for _ in 0..args.wheel.unsigned_abs() {
                input.process_wheel(if args.wheel > 0 { -1.0 } else { 1.0 });
            }
        }

        let frame = sim.tick(&input.snapshot(), tick as f64 * step);
        if frame.interaction != morph_particles::NO_INTERACTION {
            pointer_hits += 1;
        }
        input.end_frame();
    }

    let field = sim.field();
    let mean_surface_distance = if field.is_empty() {
        0.0
    } else {
        field
            .positions()
            .iter()
            .zip(field.surface_targets())
            .map(|(p, s)| p.distance(s))
            .sum::<f32>()
            / field.len() as f32
    };
    let max_speed = field
        .velocities()
        .iter()
        .map(Vec3::length)
        .fold(0.0f32, f32::max);
    let pose = sim.camera().pose();

    println!("Particles:        {}", field.len());
    println!("Ticks:            {} at {} fps", args.ticks, args.fps);
    println!("Mode:             {}", sim.mode());
    println!("Elapsed:          {:.3} s", sim.elapsed());
    println!("Scale:            {:.2}", sim.scale());
    println!("Pointer hits:     {}", pointer_hits);
    println!("Mean to surface:  {:.4}", mean_surface_distance);
    println!("Max speed:        {:.4}", max_speed);
    println!(
        "Camera:           ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2})",
        pose.position.x, pose.position.y, pose.position.z, pose.target.x, pose.target.y, pose.target.z
    );

    if let Some(path) = &args.output {
        let report = RunReport {
            ticks: args.ticks,
            mode: sim.mode().to_string(),
            elapsed: sim.elapsed(),
            scale: sim.scale(),
            camera_position: pose.position.to_array(),
            camera_target: pose.target.to_array(),
            mean_surface_distance,
            max_speed,
            positions: field.positions().iter().map(Vec3::to_array).collect(),
        };
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("Failed to write '{}'", path))?;
        println!("Wrote {}", path);
    }

    Ok(())
}
