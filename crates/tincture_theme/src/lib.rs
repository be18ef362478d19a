//! Tincture Theme Records
//!
//! Themeable attributes, their resolution chain and the compact share codec.
//!
//! # Overview
//!
//! - **[`ThemeRecord`]**: colors, corner radius, opacity, font scale, contrast
//!   and the enumerated attributes, each of which may be left `Auto`
//! - **Capabilities**: [`DynamicTheme`] exposes the attribute groups a theme
//!   carries; consumers skip the groups it does not
//! - **[`ThemeCodec`]**: theme <-> short, URL-safe token
//! - **[`ThemeConfig`]**: tunable thresholds, loadable from TOML
//!
//! # Quick Start
//!
//! ```rust
//! use tincture_color::Color;
//! use tincture_theme::{ThemeCodec, ThemeRecord};
//!
//! let mut theme = ThemeRecord::new();
//! theme.set_background_color(Color(0xFF112233), true);
//!
//! let codec = ThemeCodec::default();
//! let token = codec.encode(&theme);
//! let decoded = codec.decode(&token);
//! assert_eq!(decoded.background_color(), Color(0xFF112233));
//! ```
//!
//! # Resolution
//!
//! Reading a color with `resolve == true` never yields `Auto`:
//!
//! ```rust
//! use tincture_color::{ColorRole, Resolvable};
//! use tincture_theme::{ColorAttributes, ThemeRecord};
//!
//! let theme = ThemeRecord::new();
//! assert_eq!(theme.color(ColorRole::TintPrimary, false, false), Resolvable::Auto);
//! assert!(theme.color(ColorRole::TintPrimary, true, false).is_value());
//! ```

pub mod capability;
pub mod codec;
pub mod config;
pub mod enums;
pub mod error;
pub mod keys;
pub mod record;

pub use capability::{
    BackgroundAwareAttributes, Capabilities, Capability, ColorAttributes, CornerAttributes,
    DynamicTheme, ElevationAttributes, FontAttributes, StyleAttributes, TranslucentAttributes,
    WidgetAttributes,
};
pub use codec::{file_name, format, ThemeCodec};
pub use config::ThemeConfig;
pub use enums::{BackgroundAware, Elevation, Style, ThemeType, Visibility};
pub use error::{CodecError, ConfigError, Result};
pub use keys::ThemeKey;
pub use record::ThemeRecord;
