//! Morph CLI - headless driver for the point-cloud morph viewer

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{frame, init, run};
use morph_camera::NamedView;

#[derive(Parser)]
#[command(name = "morph")]
#[command(about = "Point cloud that breathes between a scanned surface and a shell", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Output path
        #[arg(default_value = "morph.toml")]
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Run the simulation headless and print statistics
    Run {
        /// Point file (OBJ vertices or one x y z triple per line)
        points: String,

        /// Path to config file
        #[arg(long)]
        config: Option<String>,

        /// Number of ticks to simulate
        #[arg(long, default_value = "600")]
        ticks: u32,

        /// Simulated frames per second
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Viewport size in pixels (WIDTHxHEIGHT)
        #[arg(long, default_value = "1280x720", value_parser = parse_size)]
        viewport: (f32, f32),

        /// Pointer position in viewport pixels (comma-separated x,y)
        #[arg(long, value_parser = parse_pair)]
        pointer: Option<(f32, f32)>,

        /// Switch to viewer mode at this tick
        #[arg(long)]
        viewer_at: Option<u32>,

        /// Start with a named view (front, side, top, bottom)
        #[arg(long, value_parser = parse_view)]
        view: Option<NamedView>,

        /// Wheel steps per tick in viewer mode (positive grows)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        wheel: i32,

        /// Write final positions and camera pose to a JSON file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the camera placement for a view
    Frame {
        /// Point file (OBJ vertices or one x y z triple per line)
        points: String,

        /// Named view (front, side, top, bottom); frames the model center when omitted
        #[arg(long, value_parser = parse_view)]
        view: Option<NamedView>,

        /// Path to config file
        #[arg(long)]
        config: Option<String>,

        /// Model scale
        #[arg(long)]
        scale: Option<f32>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn parse_view(s: &str) -> Result<NamedView, String> {
    s.parse().map_err(|e: morph_core::MorphError| e.to_string())
}

fn parse_pair(s: &str) -> Result<(f32, f32), String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected 2 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    Ok((x, y))
}

fn parse_size(s: &str) -> Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w: f32 = w.trim().parse().map_err(|e| format!("invalid width: {}", e))?;
    let h: f32 = h.trim().parse().map_err(|e| format!("invalid height: {}", e))?;
    if w <= 0.0 || h <= 0.0 {
        return Err(format!("viewport must be positive, got {}x{}", w, h));
    }
    Ok((w, h))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => init::run(&path, force),
        Commands::Run {
            points,
            config,
            ticks,
            fps,
            viewport,
            pointer,
            viewer_at,
            view,
            wheel,
            output,
        } => run::run(run::RunArgs {
            points,
            config,
            ticks,
            fps,
            viewport,
            pointer,
            viewer_at,
            view,
            wheel,
            output,
        }),
        Commands::Frame {
            points,
            view,
            config,
            scale,
            format,
        } => frame::run(frame::FrameArgs {
            points,
            config,
            view,
            scale,
            format,
        }),
    }
}
