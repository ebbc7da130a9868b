//! Frame command - print where the camera goes for a view

use super::{load_config, load_samples};
use anyhow::Result;
use morph_camera::{frame_target, framing_distance, named_view, NamedView};

pub struct FrameArgs {
    pub points: String,
    pub config: Option<String>,
    /// `None` frames the model from the front around its center
    pub view: Option<NamedView>,
    /// Model scale; defaults to the configured value
    pub scale: Option<f32>,
    pub format: String,
}

pub fn run(args: FrameArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let samples = load_samples(&args.points, &config)?.centered();

    let scale = args
        .scale
        .unwrap_or(config.scale.value)
        .clamp(config.scale.min, config.scale.max);
    let bounds = samples.bounds().scaled(scale);
    let fov = config.camera.fov.to_radians();
    let max_extent = bounds.max_extent();

    let plan = match args.view {
        Some(view) => named_view(view, max_extent, fov),
        None => frame_target(bounds.center(), max_extent, fov),
    };
    let distance = framing_distance(max_extent, fov);
    let view_name = args.view.map_or("fit", NamedView::name);

    match args.format.as_str() {
        "json" => {
            let value = serde_json::json!({
                "view": view_name,
                "scale": scale,
                "max_extent": max_extent,
                "distance": distance,
                "destination": plan.destination.to_array(),
                "look_target": plan.look_target.to_array(),
                "duration": plan.duration,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        "text" => {
            let d = plan.destination;
            let t = plan.look_target;
            println!("View:        {}", view_name);
            println!("Scale:       {:.2}", scale);
            println!("Max extent:  {:.4}", max_extent);
            println!("Distance:    {:.4}", distance);
            println!("Destination: ({:.4}, {:.4}, {:.4})", d.x, d.y, d.z);
            println!("Look target: ({:.4}, {:.4}, {:.4})", t.x, t.y, t.z);
            println!("Duration:    {:.1} s", plan.duration);
        }
        other => anyhow::bail!("Unknown format '{}'. Use 'text' or 'json'.", other),
    }

    Ok(())
}
