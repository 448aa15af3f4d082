//! Family codes, species image names, and the URLs and filenames derived
//! from them.
//!
//! The filename is the whole schema: a raw download is stored as
//! `{3-digit family code}_{species image name}`, and nothing else ties a file
//! back to its source page.

use anyhow::{Context, Result};
use std::fmt;
use url::Url;

/// Integer identifier of a taxonomic family.
///
/// Displays zero-padded to three digits, the form embedded in local
/// filenames; the unpadded decimal form goes into the index query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FamilyCode(pub u32);

impl fmt::Display for FamilyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl FamilyCode {
    /// Unpadded decimal form used in the index query string.
    pub fn query_value(&self) -> String {
        self.0.to_string()
    }
}

/// Derives the species image name from an index page `src` attribute.
///
/// The origin prefixes each `src` with a family tag that callers must
/// discard: the value is lowercased and everything up to and including the
/// first underscore is stripped. A value with no underscore is kept whole.
///
/// # Examples
///
/// - `species_image_name("FAM001_Species_Name.jpg")` → `"species_name.jpg"`
/// - `species_image_name("Plain.jpg")` → `"plain.jpg"`
pub fn species_image_name(src: &str) -> String {
    let lower = src.to_lowercase();
    match lower.find('_') {
        Some(i) => lower[i + 1..].to_string(),
        None => lower,
    }
}

/// Local filename for a raw download: zero-padded family code, underscore,
/// species image name.
pub fn local_filename(code: FamilyCode, image_name: &str) -> String {
    format!("{code}_{image_name}")
}

/// Index page URL for one family: `{base}?famcode={code}`.
pub fn index_url(base: &str, code: FamilyCode) -> Result<Url> {
    let mut url =
        Url::parse(base).with_context(|| format!("invalid index base URL: {base}"))?;
    url.query_pairs_mut()
        .append_pair("famcode", &code.query_value());
    Ok(url)
}

/// Photo URL for one species image: `{base}{name}`. The base must end with a
/// trailing slash or its last segment is replaced by the join.
pub fn photo_url(base: &str, image_name: &str) -> Result<Url> {
    let url = Url::parse(base).with_context(|| format!("invalid photo base URL: {base}"))?;
    url.join(image_name)
        .with_context(|| format!("invalid image name: {image_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_code_zero_pads_to_three_digits() {
        assert_eq!(FamilyCode(7).to_string(), "007");
        assert_eq!(FamilyCode(42).to_string(), "042");
        assert_eq!(FamilyCode(594).to_string(), "594");
    }

    #[test]
    fn family_code_query_value_is_unpadded() {
        assert_eq!(FamilyCode(7).query_value(), "7");
        assert_eq!(FamilyCode(594).query_value(), "594");
    }

    #[test]
    fn species_image_name_strips_prefix_and_lowercases() {
        assert_eq!(
            species_image_name("FAM001_Species_Name.jpg"),
            "species_name.jpg"
        );
        assert_eq!(species_image_name("ab123_Gadus_morhua.jpg"), "gadus_morhua.jpg");
    }

    #[test]
    fn species_image_name_without_underscore_kept_whole() {
        assert_eq!(species_image_name("Plain.jpg"), "plain.jpg");
    }

    #[test]
    fn species_image_name_trailing_underscore_yields_empty() {
        assert_eq!(species_image_name("weird_"), "");
    }

    #[test]
    fn local_filename_embeds_padded_code() {
        assert_eq!(local_filename(FamilyCode(7), "abc.jpg"), "007_abc.jpg");
        assert_eq!(
            local_filename(FamilyCode(349), "gadus_morhua.jpg"),
            "349_gadus_morhua.jpg"
        );
    }

    #[test]
    fn index_url_appends_famcode_query() {
        let url = index_url("https://example.com/photos/index.php", FamilyCode(7)).unwrap();
        assert_eq!(url.as_str(), "https://example.com/photos/index.php?famcode=7");
    }

    #[test]
    fn photo_url_joins_image_name() {
        let url = photo_url("http://cdn.example.com/images/species/", "gadus_morhua.jpg").unwrap();
        assert_eq!(
            url.as_str(),
            "http://cdn.example.com/images/species/gadus_morhua.jpg"
        );
    }

    #[test]
    fn photo_url_rejects_bad_base() {
        assert!(photo_url("not a url", "x.jpg").is_err());
    }
}
