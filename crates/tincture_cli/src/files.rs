//! Theme and image file handling

use anyhow::{Context, Result};
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};
use tincture_theme::codec::{EXTENSION, EXTENSION_IMAGE};
use tincture_theme::{file_name, ThemeCodec, ThemeConfig, ThemeRecord};

/// Load the theme configuration, or the defaults without a path
pub fn load_config(path: Option<&Path>) -> Result<ThemeConfig> {
    match path {
        Some(path) => ThemeConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ThemeConfig::default()),
    }
}

/// Read a theme file holding a short token, the long JSON form or a share URL
pub fn load_theme(path: &Path, codec: &ThemeCodec) -> Result<ThemeRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    codec
        .try_decode(content.trim())
        .with_context(|| format!("{} is not a valid theme", path.display()))
}

/// Decode a token or share URL, or the theme file it names
pub fn resolve_theme(input: &str, codec: &ThemeCodec) -> Result<ThemeRecord> {
    let path = Path::new(input);
    if path.is_file() {
        return load_theme(path, codec);
    }

    codec
        .try_decode(input)
        .context("Input is neither a theme file nor a valid token")
}

/// Write the shortened token as a theme file
pub fn save_theme(
    theme: &ThemeRecord,
    output: Option<PathBuf>,
    codec: &ThemeCodec,
) -> Result<PathBuf> {
    let path = output.unwrap_or_else(|| PathBuf::from(file_name(None, EXTENSION)));
    fs::write(&path, codec.to_short(theme))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let image =
        image::open(path).with_context(|| format!("Failed to open image {}", path.display()))?;
    Ok(image.to_rgba8())
}

/// Write a PNG image, naming it after the current time without a path
pub fn save_image(image: &RgbaImage, output: Option<PathBuf>) -> Result<PathBuf> {
    let path = output.unwrap_or_else(|| PathBuf::from(file_name(None, EXTENSION_IMAGE)));
    image
        .save_with_format(&path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
