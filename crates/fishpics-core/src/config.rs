use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// How the normalizer squares an image before resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareMode {
    /// Zero-pad the shorter axis symmetrically.
    #[default]
    Pad,
    /// Center-crop both axes to the largest even square.
    Crop,
}

/// Settings for the fetch stage (`[fetch]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Family-thumbnail index endpoint; the family code is appended as the
    /// `famcode` query parameter.
    pub index_base_url: String,
    /// Photo host prefix; the species image name is joined as a path segment,
    /// so the value must end with a trailing slash.
    pub photo_base_url: String,
    /// Browser User-Agent sent on every request. The origin serves different
    /// content to anonymous clients.
    pub user_agent: String,
    /// The fetch stage walks family codes `0..max_page`.
    pub max_page: u32,
    /// Flat directory receiving raw downloads.
    pub output_dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            index_base_url: "https://www.fishbase.us/photos/FamilyThumbnailsSummary.php"
                .to_string(),
            photo_base_url: "http://d1iraxgbwuhpbw.cloudfront.net/images/species/".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_5) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/50.0.2661.102 Safari/537.36"
                .to_string(),
            max_page: 595,
            output_dir: PathBuf::from("fish_pics"),
        }
    }
}

/// Settings for the normalize stage (`[normalize]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Lower lexical bound on raw filenames admitted to the normalize stage.
    pub min_fam: String,
    /// Upper lexical bound on raw filenames admitted to the normalize stage.
    /// Filenames are compared as whole strings, so `370_x.jpg` falls outside
    /// the bound `"370"`.
    pub max_fam: String,
    /// Output resolution as (width, height).
    pub output_shape: (u32, u32),
    /// Squaring strategy applied before the resize.
    pub square_mode: SquareMode,
    /// Flat directory receiving normalized copies.
    pub resized_dir: PathBuf,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            min_fam: "349".to_string(),
            max_fam: "370".to_string(),
            output_shape: (256, 256),
            square_mode: SquareMode::Pad,
            resized_dir: PathBuf::from("resized_fish_pics"),
        }
    }
}

/// Global configuration loaded from `~/.config/fishpics/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FishpicsConfig {
    pub fetch: FetchConfig,
    pub normalize: NormalizeConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fishpics")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FishpicsConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FishpicsConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FishpicsConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FishpicsConfig::default();
        assert_eq!(cfg.fetch.max_page, 595);
        assert_eq!(cfg.fetch.output_dir, PathBuf::from("fish_pics"));
        assert!(cfg.fetch.photo_base_url.ends_with('/'));
        assert_eq!(cfg.normalize.min_fam, "349");
        assert_eq!(cfg.normalize.max_fam, "370");
        assert_eq!(cfg.normalize.output_shape, (256, 256));
        assert_eq!(cfg.normalize.square_mode, SquareMode::Pad);
        assert_eq!(cfg.normalize.resized_dir, PathBuf::from("resized_fish_pics"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FishpicsConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FishpicsConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.fetch.max_page, cfg.fetch.max_page);
        assert_eq!(parsed.fetch.index_base_url, cfg.fetch.index_base_url);
        assert_eq!(parsed.normalize.min_fam, cfg.normalize.min_fam);
        assert_eq!(parsed.normalize.output_shape, cfg.normalize.output_shape);
    }

    #[test]
    fn config_toml_partial_file_gets_defaults() {
        let toml = r#"
            [fetch]
            max_page = 10

            [normalize]
            min_fam = "000"
        "#;
        let cfg: FishpicsConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.fetch.max_page, 10);
        assert_eq!(cfg.fetch.output_dir, PathBuf::from("fish_pics"));
        assert_eq!(cfg.normalize.min_fam, "000");
        assert_eq!(cfg.normalize.max_fam, "370");
    }

    #[test]
    fn config_toml_square_mode() {
        let toml = r#"
            [normalize]
            square_mode = "crop"
        "#;
        let cfg: FishpicsConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.normalize.square_mode, SquareMode::Crop);

        let toml_pad = r#"
            [normalize]
            square_mode = "pad"
        "#;
        let cfg_pad: FishpicsConfig = toml::from_str(toml_pad).unwrap();
        assert_eq!(cfg_pad.normalize.square_mode, SquareMode::Pad);
    }

    #[test]
    fn config_toml_custom_shape() {
        let toml = r#"
            [normalize]
            output_shape = [64, 64]
        "#;
        let cfg: FishpicsConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.normalize.output_shape, (64, 64));
    }
}
