//! `fishpics run` – both stages back to back.

use anyhow::Result;
use fishpics_core::config::FishpicsConfig;

use super::{run_fetch, run_normalize};

pub fn run_pipeline(cfg: &FishpicsConfig) -> Result<()> {
    run_fetch(&cfg.fetch)?;
    run_normalize(&cfg.normalize, &cfg.fetch.output_dir)?;
    Ok(())
}
