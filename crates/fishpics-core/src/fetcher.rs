//! Species photo download.

use crate::config::FetchConfig;
use crate::http;
use crate::naming::{self, FamilyCode};
use crate::storage;
use anyhow::Result;
use std::path::PathBuf;

/// Downloads one species image and writes it under
/// `{output_dir}/{code}_{name}`, overwriting any previous copy.
///
/// The body is persisted verbatim, whatever the origin answered; a missing
/// species file arrives as an HTML error page and lands on disk like any
/// image, to be weeded out by the normalize stage's per-file decode check.
pub fn fetch_image(cfg: &FetchConfig, code: FamilyCode, image_name: &str) -> Result<PathBuf> {
    let url = naming::photo_url(&cfg.photo_base_url, image_name)?;
    let body = http::get(url.as_str(), &cfg.user_agent)?;
    let dest = cfg
        .output_dir
        .join(naming::local_filename(code, image_name));
    storage::write_file(&dest, &body)?;
    tracing::debug!(family = %code, name = image_name, bytes = body.len(), "image saved");
    Ok(dest)
}
