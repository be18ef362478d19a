//! 2D code error types

use thiserror::Error;

/// Errors from rendering or scanning a 2D code
#[derive(Error, Debug)]
pub enum CodeError {
    /// The data does not fit a code at the selected error correction
    #[error("failed to encode code data: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("code data is empty")]
    EmptyData,

    #[error("unusable scan image: {0}")]
    Source(#[from] rxing::Exceptions),

    /// Every scan strategy failed
    #[error("no code found in image")]
    NotFound,
}

/// Result type for 2D code operations
pub type Result<T> = std::result::Result<T, CodeError>;
