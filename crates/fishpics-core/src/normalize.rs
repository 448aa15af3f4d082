//! Square-and-resize normalization of downloaded photos.
//!
//! A photo is first made square (zero-padding the shorter axis by default,
//! or center-cropping), then resized to the configured output shape with
//! bilinear interpolation.

use crate::config::SquareMode;
use image::imageops::{self, FilterType};
use image::RgbImage;
use std::path::Path;

/// Per-file normalization failure. Decode failures are routine (the fetch
/// stage persists origin error pages verbatim); save failures are not.
/// Neither may abort the batch.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("decode failed: {0}")]
    Decode(#[source] image::ImageError),
    #[error("save failed: {0}")]
    Save(#[source] image::ImageError),
}

/// Zero-pads the shorter axis symmetrically so the image becomes square.
///
/// The pad amount is `|W - H| / 2` rows (or columns, for portrait input) on
/// each side. When the difference is odd the result is off square by one
/// pixel; the follow-up resize absorbs it.
pub fn pad_to_square(img: &RgbImage) -> RgbImage {
    let (w, h) = img.dimensions();
    if w == h {
        return img.clone();
    }
    if w > h {
        let pad = (w - h) / 2;
        let mut out = RgbImage::new(w, h + 2 * pad);
        imageops::replace(&mut out, img, 0, i64::from(pad));
        out
    } else {
        let pad = (h - w) / 2;
        let mut out = RgbImage::new(w + 2 * pad, h);
        imageops::replace(&mut out, img, i64::from(pad), 0);
        out
    }
}

/// Center-crops to the largest even square window: both axes are cut to
/// `2 * (min(W, H) / 2)` pixels around the image center.
pub fn crop_to_square(img: &RgbImage) -> RgbImage {
    let (w, h) = img.dimensions();
    let half = (w / 2).min(h / 2);
    let edge = 2 * half;
    imageops::crop_imm(img, w / 2 - half, h / 2 - half, edge, edge).to_image()
}

/// Squares `img` per `mode`, then resizes to `shape` (width, height) with
/// bilinear interpolation.
pub fn square_and_resize(img: &RgbImage, mode: SquareMode, shape: (u32, u32)) -> RgbImage {
    let square = match mode {
        SquareMode::Pad => pad_to_square(img),
        SquareMode::Crop => crop_to_square(img),
    };
    imageops::resize(&square, shape.0, shape.1, FilterType::Triangle)
}

/// Normalizes one file on disk: decode, square, resize, save under `dest`
/// (format chosen by the destination extension).
///
/// Both failure stages come back as [`NormalizeError`] so the batch loop can
/// skip the file and continue; nothing is written on failure.
pub fn normalize_file(
    src: &Path,
    dest: &Path,
    mode: SquareMode,
    shape: (u32, u32),
) -> Result<(), NormalizeError> {
    let img = image::open(src).map_err(NormalizeError::Decode)?.to_rgb8();
    let out = square_and_resize(&img, mode, shape);
    out.save(dest).map_err(NormalizeError::Save)?;
    Ok(())
}
