//! Tincture Color Model
//!
//! Color primitives shared by the theme, codec and 2D code crates.
//!
//! # Overview
//!
//! - **[`Color`]**: 32-bit ARGB value with alpha, HSL and shade helpers
//! - **[`contrast`]**: WCAG contrast ratios, legible tints and text inverses
//! - **[`ColorRole`]**: The 18 semantic color roles a theme can carry
//! - **[`Resolvable`]**: A value that is either explicit or `Auto`
//! - **[`DynamicColors`]**: Seed colors plus their dark and light mutations
//!
//! # Quick Start
//!
//! ```rust
//! use tincture_color::{contrast, Color, ColorRole, DynamicColors};
//!
//! let indigo: Color = "#3F51B5".parse().unwrap();
//! let tint = contrast::tint_of(indigo);
//! assert!(contrast::contrast_ratio(tint, indigo) >= contrast::TINT_CONTRAST);
//!
//! let mut colors = DynamicColors::new();
//! colors.put(ColorRole::Primary, indigo);
//! assert_eq!(colors.get_original(ColorRole::Primary, Color::BLACK), indigo);
//! ```

pub mod color;
pub mod contrast;
pub mod error;
pub mod role;
pub mod store;
pub mod value;

pub use color::Color;
pub use error::ParseColorError;
pub use role::{ColorGroup, ColorRole};
pub use store::{
    ColorMap, ColorVariant, DynamicColors, ThemeContext, WallpaperPalette, MUTATION_FACTOR,
};
pub use value::Resolvable;
