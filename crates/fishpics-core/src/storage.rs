//! Output directories and raw file writes.
//!
//! Two flat directories on persistent storage are the only shared state in
//! the pipeline. Raw bodies are written whole and overwritten on re-runs;
//! nothing here ever deletes.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Creates `dir` (and missing parents) if absent. An already-existing
/// directory is not an error; any other failure aborts startup.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))
}

/// Writes `data` to `path` in one go, truncating any existing file of the
/// same name.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("failed to create file: {}", path.display()))?;
    file.write_all(data)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(())
}
