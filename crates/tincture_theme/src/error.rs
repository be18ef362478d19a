//! Theme error types

use std::path::PathBuf;

use thiserror::Error;
use tincture_color::ParseColorError;

/// Errors from decoding a theme token
#[derive(Debug, Error)]
pub enum CodecError {
    /// Nothing to decode
    #[error("theme token is empty")]
    Empty,

    /// Token does not have a recognizable shape
    #[error("malformed theme token: {0}")]
    Malformed(String),

    /// A color field could not be parsed
    #[error("invalid color for `{key}`")]
    InvalidColor {
        key: &'static str,
        #[source]
        source: ParseColorError,
    },

    /// A numeric field is not an integer
    #[error("invalid number `{value}` for `{key}`")]
    InvalidNumber { key: &'static str, value: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors from loading a [`ThemeConfig`](crate::ThemeConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, CodecError>;
