//! Tincture 2D Codes
//!
//! Renders theme tokens as QR codes styled after the theme, and scans them
//! back out of captured images.
//!
//! # Overview
//!
//! - **[`CodeRenderer`]**: token -> themed raster. Module shape follows the
//!   theme's corner radius ([`CodeStyle`]), colors follow its palette with a
//!   minimum contrast enforced against the code background
//! - **[`CodeScanner`]**: raster -> token, trying four binarization
//!   strategies before giving up
//! - **[`Canvas`]**: the small CPU raster surface both sides draw on
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tincture_code::{CodeRenderer, CodeScanner};
//! use tincture_theme::ThemeRecord;
//!
//! let theme = ThemeRecord::new();
//! let image = CodeRenderer::default().render_theme(&theme, None).unwrap();
//! let token = CodeScanner::default().scan(&image);
//! ```
//!
//! Rendering and scanning both return `None` on failure; the `try_*` forms
//! report a [`CodeError`] instead.

pub mod error;
pub mod raster;
pub mod render;
pub mod scan;

pub use error::{CodeError, Result};
pub use raster::{Canvas, Circle, Paint, Rect};
pub use render::{
    error_correction, CodeColors, CodeLayout, CodeRenderer, CodeStyle, CodeTheme,
    FINDER_SIZE,
};
pub use scan::{Binarizer, CodeScanner, Luminance, Strategy, STRATEGIES};
