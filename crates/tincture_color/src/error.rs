//! Color error types

use thiserror::Error;

/// Errors from parsing a color literal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Literal does not start with `#`
    #[error("color `{0}` must start with `#`")]
    MissingHash(String),

    /// Literal contains non-hex characters
    #[error("color `{0}` contains invalid hex digits")]
    InvalidDigits(String),

    /// Literal is neither `#RRGGBB` nor `#AARRGGBB`
    #[error("color `{literal}` has {len} digits, expected 6 or 8")]
    InvalidLength { literal: String, len: usize },
}
