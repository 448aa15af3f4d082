//! The two batch loops: fetch everything, then normalize a filtered subset.
//!
//! The loops are independent; the filesystem is the only thing connecting
//! them. Both run strictly sequentially and report progress outward through
//! a caller-supplied callback so the CLI owns all printing.

use crate::catalog;
use crate::config::{FetchConfig, NormalizeConfig};
use crate::fetcher;
use crate::naming::FamilyCode;
use crate::normalize::{self, NormalizeError};
use crate::storage;
use anyhow::{Context, Result};
use std::path::Path;

/// Progress notifications from the fetch loop.
pub enum FetchEvent<'a> {
    /// A family's index page has been listed; `count` downloads follow.
    FamilyListed { code: FamilyCode, count: usize },
    /// One image has been downloaded and written.
    ImageFetched { code: FamilyCode, name: &'a str },
    /// All of a family's images are on disk.
    FamilyDone { code: FamilyCode },
}

/// Progress notifications from the normalize loop.
pub enum NormalizeEvent<'a> {
    /// One file was normalized into the resized directory.
    FileNormalized { name: &'a str },
    /// One file could not be normalized and was skipped.
    FileSkipped {
        name: &'a str,
        error: &'a NormalizeError,
    },
}

/// Totals from a completed fetch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchReport {
    pub families: u32,
    pub images: u64,
}

/// Totals from a completed normalize run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeReport {
    pub normalized: u64,
    pub skipped: u64,
}

/// Walks family codes `0..max_page`, listing each index page and downloading
/// every referenced image into the raw output directory.
///
/// Sequential throughout: no request is issued before the previous one
/// completed. Any network failure aborts the run — no retry, no checkpoint —
/// and files already written stay on disk. Re-running re-downloads and
/// overwrites everything.
pub fn fetch_all(
    cfg: &FetchConfig,
    mut on_event: impl FnMut(FetchEvent<'_>),
) -> Result<FetchReport> {
    storage::ensure_dir(&cfg.output_dir)?;

    let mut report = FetchReport::default();
    for code in (0..cfg.max_page).map(FamilyCode) {
        let names = catalog::list_family(cfg, code)
            .with_context(|| format!("listing family {code} failed"))?;
        tracing::info!(family = %code, images = names.len(), "family listed");
        on_event(FetchEvent::FamilyListed {
            code,
            count: names.len(),
        });

        for name in &names {
            fetcher::fetch_image(cfg, code, name)
                .with_context(|| format!("fetching {name} for family {code} failed"))?;
            on_event(FetchEvent::ImageFetched {
                code,
                name: name.as_str(),
            });
            report.images += 1;
        }

        on_event(FetchEvent::FamilyDone { code });
        report.families += 1;
    }

    tracing::info!(
        families = report.families,
        images = report.images,
        "fetch run complete"
    );
    Ok(report)
}

/// Lists `raw_dir`, keeps the filenames lexically within
/// `[min_fam, max_fam]`, and normalizes each survivor into the resized
/// directory under the same filename.
///
/// The range check compares whole filenames against the bounds as strings —
/// `350_x.jpg` is admitted by the bound pair `("349", "370")` while
/// `370_x.jpg` is not. Per-file failures are reported and skipped; only
/// directory-level problems abort. Files are processed in sorted name order.
pub fn normalize_all(
    cfg: &NormalizeConfig,
    raw_dir: &Path,
    mut on_event: impl FnMut(NormalizeEvent<'_>),
) -> Result<NormalizeReport> {
    storage::ensure_dir(&cfg.resized_dir)?;

    let mut names = list_filenames(raw_dir)?;
    names.sort();

    let mut report = NormalizeReport::default();
    for name in &names {
        if name.as_str() < cfg.min_fam.as_str() || name.as_str() > cfg.max_fam.as_str() {
            continue;
        }
        let src = raw_dir.join(name);
        let dest = cfg.resized_dir.join(name);
        match normalize::normalize_file(&src, &dest, cfg.square_mode, cfg.output_shape) {
            Ok(()) => {
                tracing::debug!(name = name.as_str(), "normalized");
                on_event(NormalizeEvent::FileNormalized {
                    name: name.as_str(),
                });
                report.normalized += 1;
            }
            Err(err) => {
                tracing::warn!(name = name.as_str(), error = %err, "skipping file");
                on_event(NormalizeEvent::FileSkipped {
                    name: name.as_str(),
                    error: &err,
                });
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        normalized = report.normalized,
        skipped = report.skipped,
        "normalize run complete"
    );
    Ok(report)
}

fn list_filenames(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list directory: {}", dir.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SquareMode;
    use image::RgbImage;
    use std::path::PathBuf;

    fn test_config(resized_dir: PathBuf) -> NormalizeConfig {
        NormalizeConfig {
            min_fam: "349".to_string(),
            max_fam: "370".to_string(),
            output_shape: (8, 8),
            square_mode: SquareMode::Pad,
            resized_dir,
        }
    }

    #[test]
    fn normalize_all_filters_lexically_and_isolates_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        let resized = dir.path().join("resized");
        std::fs::create_dir(&raw).unwrap();

        // In range, decodable.
        RgbImage::new(4, 2).save(raw.join("350_x.png")).unwrap();
        RgbImage::new(2, 4).save(raw.join("360_x.png")).unwrap();
        // In range, not an image: skipped, not fatal.
        std::fs::write(raw.join("355_bad.png"), b"<html>gone</html>").unwrap();
        // Out of range either side: never touched.
        std::fs::write(raw.join("340_x.png"), b"not an image").unwrap();
        std::fs::write(raw.join("400_x.png"), b"not an image").unwrap();
        // Lexical boundary artifact: "370_x.png" > "370", excluded.
        std::fs::write(raw.join("370_x.png"), b"not an image").unwrap();

        let mut normalized = Vec::new();
        let mut skipped = Vec::new();
        let report = normalize_all(&test_config(resized.clone()), &raw, |event| match event {
            NormalizeEvent::FileNormalized { name } => normalized.push(name.to_string()),
            NormalizeEvent::FileSkipped { name, .. } => skipped.push(name.to_string()),
        })
        .unwrap();

        assert_eq!(normalized, vec!["350_x.png", "360_x.png"]);
        assert_eq!(skipped, vec!["355_bad.png"]);
        assert_eq!(
            report,
            NormalizeReport {
                normalized: 2,
                skipped: 1
            }
        );

        assert!(resized.join("350_x.png").exists());
        assert!(resized.join("360_x.png").exists());
        assert!(!resized.join("355_bad.png").exists());
        assert!(!resized.join("340_x.png").exists());
        assert!(!resized.join("370_x.png").exists());
        assert!(!resized.join("400_x.png").exists());
    }

    #[test]
    fn normalize_all_outputs_configured_shape() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        let resized = dir.path().join("resized");
        std::fs::create_dir(&raw).unwrap();
        RgbImage::new(20, 10).save(raw.join("350_fish.png")).unwrap();

        normalize_all(&test_config(resized.clone()), &raw, |_| {}).unwrap();

        let out = image::open(resized.join("350_fish.png")).unwrap();
        assert_eq!((out.width(), out.height()), (8, 8));
    }

    #[test]
    fn normalize_all_empty_directory_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        let resized = dir.path().join("resized");
        std::fs::create_dir(&raw).unwrap();

        let report = normalize_all(&test_config(resized), &raw, |_| {}).unwrap();
        assert_eq!(report, NormalizeReport::default());
    }

    #[test]
    fn normalize_all_missing_raw_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("nope");
        let resized = dir.path().join("resized");
        assert!(normalize_all(&test_config(resized), &raw, |_| {}).is_err());
    }
}
