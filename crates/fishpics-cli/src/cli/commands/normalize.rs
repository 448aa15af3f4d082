//! `fishpics normalize` – square and resize downloaded photos.

use anyhow::Result;
use fishpics_core::config::NormalizeConfig;
use fishpics_core::pipeline::{self, NormalizeEvent};
use std::path::Path;

/// One console line per file; skipped files carry the reason.
pub fn run_normalize(cfg: &NormalizeConfig, raw_dir: &Path) -> Result<()> {
    let report = pipeline::normalize_all(cfg, raw_dir, |event| match event {
        NormalizeEvent::FileNormalized { name } => println!("{name}"),
        NormalizeEvent::FileSkipped { name, error } => println!("{name}: skipped ({error})"),
    })?;

    if report.normalized == 0 && report.skipped == 0 {
        println!(
            "No files in [{}, {}] under {}.",
            cfg.min_fam,
            cfg.max_fam,
            raw_dir.display()
        );
    } else {
        println!(
            "Normalized {} file(s) into {}, skipped {}.",
            report.normalized,
            cfg.resized_dir.display(),
            report.skipped
        );
    }
    Ok(())
}
