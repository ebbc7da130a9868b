//! Config initialization command

use anyhow::{Context, Result};
use morph_core::MorphConfig;
use std::fs;
use std::path::Path;

pub fn run(path: &str, force: bool) -> Result<()> {
    let target = Path::new(path);

    if target.exists() && !force {
        anyhow::bail!("'{}' already exists (use --force to overwrite)", path);
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }

    let toml = MorphConfig::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;
    fs::write(target, toml).with_context(|| format!("Failed to write '{}'", path))?;

    println!("Wrote default config to {}", path);
    println!();
    println!("Next steps:");
    println!("  morph run <points.obj> --config {}", path);

    Ok(())
}
