//! CLI command implementations

pub mod frame;
pub mod init;
pub mod run;

use anyhow::{Context, Result};
use morph_core::MorphConfig;
use morph_particles::{SampleSet, ShellRng};

/// Config from `path`, or the defaults when no path is given
pub fn load_config(path: Option<&str>) -> Result<MorphConfig> {
    match path {
        Some(p) => MorphConfig::load(p).with_context(|| format!("Failed to load config '{}'", p)),
        None => Ok(MorphConfig::default()),
    }
}

/// Read a point file and draw `config.particles.count` anchors from it
pub fn load_samples(path: &str, config: &MorphConfig) -> Result<SampleSet> {
    let samples =
        SampleSet::load(path).with_context(|| format!("Failed to load samples '{}'", path))?;
    let count = config.particles.count;
    if samples.len() == count {
        return Ok(samples);
    }
    log::info!("Resampling {} point(s) to {} anchor(s)", samples.len(), count);
    let mut rng = ShellRng::new(config.particles.seed.wrapping_add(1));
    Ok(samples.resample(count, &mut rng))
}
