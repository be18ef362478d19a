//! Theme configuration (tincture.toml)
//!
//! Thresholds and sizes that callers may want to tune. Every field has a
//! default, so an empty file (or no file at all) is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default share URL prefix; the token is appended to it
pub const SHARE_URL: &str = "https://theme.pranavpandey.com/share?theme=";

/// Tunable constants for resolution, codec and 2D code rendering
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Pixels per density-independent unit
    #[serde(default = "default_density")]
    pub density: f32,

    /// Corner radius (dp) from which 2D codes use rounded modules
    #[serde(default = "default_corner_round_dp")]
    pub corner_round_dp: u32,

    /// Corner radius (dp) from which 2D codes use circular modules
    #[serde(default = "default_corner_oval_dp")]
    pub corner_oval_dp: u32,

    /// Minimum contrast ratio of code colors against the code background
    #[serde(default = "default_code_contrast")]
    pub code_contrast: f64,

    /// Minimum contrast ratio of generated tints
    #[serde(default = "default_tint_contrast")]
    pub tint_contrast: f64,

    /// Longest token encoded with the highest error correction
    #[serde(default = "default_correction_high_max")]
    pub correction_high_max: usize,

    /// Longest token encoded with medium error correction
    #[serde(default = "default_correction_medium_max")]
    pub correction_medium_max: usize,

    /// Minimum side of a rendered code, in pixels
    #[serde(default = "default_canvas_size")]
    pub canvas_size: u32,

    /// Images larger than this are downsampled before scanning
    #[serde(default = "default_scan_size")]
    pub scan_size: u32,

    /// Quiet zone around a rendered code, in modules
    #[serde(default = "default_quiet_zone")]
    pub quiet_zone: u32,

    /// Overlay side as a fraction of the code side
    #[serde(default = "default_overlay_factor")]
    pub overlay_factor: f32,

    /// Shade factor used by dynamic color mutation
    #[serde(default = "default_mutation_factor")]
    pub mutation_factor: f32,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_density() -> f32 {
    1.0
}

fn default_corner_round_dp() -> u32 {
    8
}

fn default_corner_oval_dp() -> u32 {
    16
}

fn default_code_contrast() -> f64 {
    tincture_color::contrast::CODE_CONTRAST
}

fn default_tint_contrast() -> f64 {
    tincture_color::contrast::TINT_CONTRAST
}

fn default_correction_high_max() -> usize {
    75
}

fn default_correction_medium_max() -> usize {
    150
}

fn default_canvas_size() -> u32 {
    480
}

fn default_scan_size() -> u32 {
    480
}

fn default_quiet_zone() -> u32 {
    2
}

fn default_overlay_factor() -> f32 {
    0.2
}

fn default_mutation_factor() -> f32 {
    tincture_color::MUTATION_FACTOR
}

fn default_base_url() -> String {
    SHARE_URL.to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
            corner_round_dp: default_corner_round_dp(),
            corner_oval_dp: default_corner_oval_dp(),
            code_contrast: default_code_contrast(),
            tint_contrast: default_tint_contrast(),
            correction_high_max: default_correction_high_max(),
            correction_medium_max: default_correction_medium_max(),
            canvas_size: default_canvas_size(),
            scan_size: default_scan_size(),
            quiet_zone: default_quiet_zone(),
            overlay_factor: default_overlay_factor(),
            mutation_factor: default_mutation_factor(),
            base_url: default_base_url(),
        }
    }
}

impl ThemeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loaded theme config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Convert density-independent units to pixels
    pub fn dp_to_px(&self, dp: f32) -> f32 {
        dp * self.density
    }

    /// Convert pixels to whole density-independent units
    pub fn px_to_dp(&self, px: f32) -> i32 {
        if self.density <= 0.0 {
            return px.round() as i32;
        }
        (px / self.density).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ThemeConfig::from_toml("").unwrap();
        assert_eq!(config, ThemeConfig::default());
        assert_eq!(config.canvas_size, 480);
        assert_eq!(config.base_url, SHARE_URL);
    }

    #[test]
    fn test_partial_override() {
        let config = ThemeConfig::from_toml("density = 1.5\ncorner_oval_dp = 20\n").unwrap();
        assert_eq!(config.density, 1.5);
        assert_eq!(config.corner_oval_dp, 20);
        assert_eq!(config.corner_round_dp, 8);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ThemeConfig {
            quiet_zone: 4,
            ..ThemeConfig::default()
        };
        let toml = config.to_toml().unwrap();
        assert_eq!(ThemeConfig::from_toml(&toml).unwrap(), config);
    }

    #[test]
    fn test_unit_conversion() {
        let config = ThemeConfig {
            density: 1.5,
            ..ThemeConfig::default()
        };
        assert_eq!(config.px_to_dp(24.0), 16);
        assert_eq!(config.dp_to_px(16.0), 24.0);
    }
}
