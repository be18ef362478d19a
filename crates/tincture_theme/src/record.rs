//! Theme record and its resolution chain
//!
//! Every attribute of a [`ThemeRecord`] can be left `Auto`. Reading with
//! `resolve == true` walks a fixed chain until a concrete value is found:
//!
//! 1. the value stored on this record
//! 2. the fallback theme's resolved value (e.g. the host application's theme)
//! 3. a computed default derived from this record's other resolved values
//!
//! `inverse == true` swaps a role for its paired role (primary for dark
//! primary, text for inverse text) before the chain starts.

use std::sync::Arc;

use tincture_color::contrast::{ensure_contrast, inverse_of, is_dark, tint_with_contrast};
use tincture_color::{
    Color, ColorGroup, ColorMap, ColorRole, DynamicColors, Resolvable, ThemeContext,
};

use crate::capability::{
    BackgroundAwareAttributes, Capabilities, Capability, ColorAttributes, CornerAttributes,
    DynamicTheme, ElevationAttributes, FontAttributes, StyleAttributes, TranslucentAttributes,
    WidgetAttributes,
};
use crate::config::ThemeConfig;
use crate::enums::{BackgroundAware, Elevation, Style, ThemeType, Visibility};

/// Background of light themes without an explicit background
pub const BACKGROUND_LIGHT: Color = Color(0xFFF5F5F5);

/// Background of dark themes without an explicit background
pub const BACKGROUND_DARK: Color = Color(0xFF121212);

pub const PRIMARY: Color = Color(0xFF3F51B5);
pub const ACCENT: Color = Color(0xFFE91E63);
pub const ERROR: Color = Color(0xFFF44336);

pub const FONT_SCALE_MIN: u32 = 50;
pub const FONT_SCALE_MAX: u32 = 150;
pub const FONT_SCALE: u32 = 100;

/// Default corner radius in dp
pub const CORNER_RADIUS_DP: u32 = 2;
pub const CORNER_RADIUS_MAX_DP: u32 = 28;

pub const CONTRAST_MAX: u32 = 100;
pub const CONTRAST: u32 = 45;

/// Contrast level of themes rendered as 2D codes
pub const CONTRAST_CODE: u32 = 50;

pub const OPACITY: u8 = u8::MAX;

/// Blend of text primary toward the background for secondary text
const TEXT_SECONDARY_BLEND: f32 = 0.3;

/// Aggregate of every themeable attribute
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeRecord {
    theme_res: Option<String>,
    capabilities: Capabilities,
    colors: ColorMap,
    font_scale: Resolvable<u32>,
    corner_radius: Resolvable<u32>,
    background_aware: BackgroundAware,
    contrast: Resolvable<u32>,
    opacity: Resolvable<u8>,
    elevation: Elevation,
    style: Style,
    theme_type: ThemeType,
    header: Visibility,
    widget_id: Option<u32>,
    host: bool,
    inverse: bool,
    dark: Option<bool>,
    fallback: Option<Box<ThemeRecord>>,
    config: Arc<ThemeConfig>,
}

impl Default for ThemeRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRecord {
    /// Application theme with every attribute `Auto`
    pub fn new() -> Self {
        Self::with_config(ThemeConfig::default())
    }

    pub fn with_config(config: impl Into<Arc<ThemeConfig>>) -> Self {
        Self {
            theme_res: None,
            capabilities: Capabilities::app(),
            colors: ColorMap::default(),
            font_scale: Resolvable::Auto,
            corner_radius: Resolvable::Auto,
            background_aware: BackgroundAware::Auto,
            contrast: Resolvable::Auto,
            opacity: Resolvable::Auto,
            elevation: Elevation::Auto,
            style: Style::Auto,
            theme_type: ThemeType::Auto,
            header: Visibility::Auto,
            widget_id: None,
            host: false,
            inverse: false,
            dark: None,
            fallback: None,
            config: config.into(),
        }
    }

    /// Widget theme: carries every capability, including the header
    pub fn widget(widget_id: u32, config: impl Into<Arc<ThemeConfig>>) -> Self {
        let mut theme = Self::with_config(config);
        theme.capabilities = Capabilities::all();
        theme.widget_id = Some(widget_id);
        theme.theme_type = ThemeType::Widget;
        theme
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn shared_config(&self) -> Arc<ThemeConfig> {
        Arc::clone(&self.config)
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn set_capabilities(&mut self, capabilities: Capabilities) -> &mut Self {
        self.capabilities = capabilities;
        self
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn theme_res(&self) -> Option<&str> {
        self.theme_res.as_deref()
    }

    pub fn set_theme_res(&mut self, theme_res: impl Into<String>) -> &mut Self {
        self.theme_res = Some(theme_res.into());
        self
    }

    pub fn fallback(&self) -> Option<&ThemeRecord> {
        self.fallback.as_deref()
    }

    /// Theme consulted for values this record leaves `Auto`
    pub fn set_fallback(&mut self, fallback: Option<ThemeRecord>) -> &mut Self {
        self.fallback = fallback.map(Box::new);
        self
    }

    pub fn is_host(&self) -> bool {
        self.host
    }

    pub fn set_host(&mut self, host: bool) -> &mut Self {
        self.host = host;
        self
    }

    pub fn is_inverse_theme(&self) -> bool {
        self.inverse
    }

    pub fn set_inverse_theme(&mut self, inverse: bool) -> &mut Self {
        self.inverse = inverse;
        self
    }

    /// Force the theme dark or light; `None` infers it from type and background
    pub fn set_dark_theme(&mut self, dark: Option<bool>) -> &mut Self {
        self.dark = dark;
        self
    }

    /// Explicit darkness: the override, then the theme type
    fn dark_hint(&self) -> Option<bool> {
        self.dark.or_else(|| self.theme_type.is_dark())
    }

    pub fn is_dark_theme(&self) -> bool {
        self.dark_hint()
            .unwrap_or_else(|| is_dark(self.resolve_color(ColorRole::Background)))
    }

    /// `Auto` is stored as absence
    fn store_color(&mut self, role: ColorRole, color: Resolvable<Color>) {
        match color {
            Resolvable::Value(_) => {
                self.colors.insert(role, color);
            }
            Resolvable::Auto => {
                self.colors.remove(&role);
            }
        }
    }

    fn raw_color(&self, role: ColorRole) -> Resolvable<Color> {
        self.colors.get(&role).copied().unwrap_or_default()
    }

    /// Walk the resolution chain for `role` (no inverse swap)
    fn resolve_color(&self, role: ColorRole) -> Color {
        if let Resolvable::Value(color) = self.raw_color(role) {
            return color;
        }
        match &self.fallback {
            Some(fallback) => fallback.resolve_color(role),
            None => self.default_color(role),
        }
    }

    fn default_color(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Background => {
                if self.dark_hint().unwrap_or(false) {
                    BACKGROUND_DARK
                } else {
                    BACKGROUND_LIGHT
                }
            }
            ColorRole::Surface => {
                let background = self.resolve_color(ColorRole::Background);
                if is_dark(background) {
                    background.lighten(0.92)
                } else {
                    background.lighten(0.5)
                }
            }
            ColorRole::Primary => PRIMARY,
            ColorRole::Accent => ACCENT,
            ColorRole::Error => ERROR,
            ColorRole::PrimaryDark => self
                .resolve_color(ColorRole::Primary)
                .darken(self.config.mutation_factor),
            ColorRole::AccentDark => self
                .resolve_color(ColorRole::Accent)
                .darken(self.config.mutation_factor),
            ColorRole::TextPrimary => inverse_of(self.resolve_color(ColorRole::Background)),
            ColorRole::TextSecondary => {
                let background = self.resolve_color(ColorRole::Background).remove_alpha();
                self.resolve_color(ColorRole::TextPrimary)
                    .lerp(&background, TEXT_SECONDARY_BLEND)
            }
            derived => match derived.source() {
                Some(source) => self.derive_color(derived, self.resolve_color(source)),
                None => Color::TRANSPARENT,
            },
        }
    }

    /// Tint (or text inverse) for a derived role from its source color
    fn derive_color(&self, derived: ColorRole, source: Color) -> Color {
        if derived.is_text() {
            inverse_of(source)
        } else {
            tint_with_contrast(source, self.config.tint_contrast)
        }
    }

    /// Shared chain for scalar attributes
    fn resolve_value<T: Copy>(
        &self,
        resolve: bool,
        field: fn(&ThemeRecord) -> Resolvable<T>,
        default: fn(&ThemeRecord) -> T,
    ) -> Resolvable<T> {
        let raw = field(self);
        if !resolve {
            return raw;
        }
        Resolvable::Value(match raw {
            Resolvable::Value(value) => value,
            Resolvable::Auto => match &self.fallback {
                Some(fallback) => fallback
                    .resolve_value(true, field, default)
                    .unwrap_or_else(|| default(self)),
                None => default(self),
            },
        })
    }

    /// Generate tints and text inverses for every base role holding a color
    pub fn auto_generate_colors(&mut self, tint: bool, inverse: bool) -> &mut Self {
        for role in ColorRole::BASE {
            let (Some(derived), Resolvable::Value(color)) = (role.derived(), self.raw_color(role))
            else {
                continue;
            };
            if (role.is_text() && inverse) || (!role.is_text() && tint) {
                let value = self.derive_color(derived, color);
                self.store_color(derived, Resolvable::Value(value));
            }
        }
        tracing::debug!(
            "ThemeRecord::auto_generate_colors - tint={} inverse={}",
            tint,
            inverse
        );
        self
    }

    /// Copy the dynamic colors mutated for this theme onto its base roles.
    /// `Auto` entries are skipped so the chain keeps deriving them.
    pub fn apply_dynamic_colors(&mut self, colors: &DynamicColors) -> &mut Self {
        let updates: Vec<(ColorRole, Color)> = {
            let mutated = colors.mutated(&*self);
            ColorRole::ALL
                .into_iter()
                .filter_map(|role| match mutated.get(&role) {
                    Some(Resolvable::Value(color)) => Some((role, *color)),
                    _ => None,
                })
                .collect()
        };

        for (role, color) in updates {
            self.set_color(role, Resolvable::Value(color), true);
        }
        self
    }

    /// Resolved color, pushed to a legible contrast against the resolved
    /// background when background awareness is enabled
    pub fn background_aware_color(&self, role: ColorRole, inverse: bool) -> Color {
        let color = self.resolved_color(role, inverse);
        if role == ColorRole::Background
            || !BackgroundAwareAttributes::background_aware(self, true).is_enabled()
        {
            return color;
        }
        ensure_contrast(
            color,
            self.resolve_color(ColorRole::Background),
            self.config.tint_contrast,
        )
    }

    /// Resolved font scale as a multiplier (1.0 is 100%)
    pub fn font_scale_relative(&self) -> f32 {
        FontAttributes::font_scale(self, true).unwrap_or(FONT_SCALE) as f32 / 100.0
    }

    /// Resolved corner radius in density-independent units
    pub fn corner_size_dp(&self) -> f32 {
        let px = CornerAttributes::corner_radius(self, true).unwrap_or(0) as f32;
        if self.config.density > 0.0 {
            px / self.config.density
        } else {
            px
        }
    }

    /// Set the corner radius in density-independent units
    pub fn set_corner_radius_dp(&mut self, dp: Resolvable<u32>) -> &mut Self {
        let px = dp.map(|dp| self.config.dp_to_px(dp as f32).round() as u32);
        self.corner_radius = px;
        self
    }
}

macro_rules! color_accessors {
    (
        base { $($base:ident => $get:ident, $set:ident;)* }
        derived { $($derived:ident => $dget:ident, $dset:ident;)* }
    ) => {
        impl ThemeRecord {
            $(
                pub fn $get(&self) -> Color {
                    self.resolve_color(ColorRole::$base)
                }

                pub fn $set(
                    &mut self,
                    color: impl Into<Resolvable<Color>>,
                    generate: bool,
                ) -> &mut Self {
                    ColorAttributes::set_color(self, ColorRole::$base, color.into(), generate);
                    self
                }
            )*

            $(
                pub fn $dget(&self) -> Color {
                    self.resolve_color(ColorRole::$derived)
                }

                pub fn $dset(&mut self, color: impl Into<Resolvable<Color>>) -> &mut Self {
                    ColorAttributes::set_color(self, ColorRole::$derived, color.into(), false);
                    self
                }
            )*
        }
    };
}

color_accessors! {
    base {
        Background => background_color, set_background_color;
        Surface => surface_color, set_surface_color;
        Primary => primary_color, set_primary_color;
        PrimaryDark => primary_color_dark, set_primary_color_dark;
        Accent => accent_color, set_accent_color;
        AccentDark => accent_color_dark, set_accent_color_dark;
        Error => error_color, set_error_color;
        TextPrimary => text_primary_color, set_text_primary_color;
        TextSecondary => text_secondary_color, set_text_secondary_color;
    }
    derived {
        TintBackground => tint_background_color, set_tint_background_color;
        TintSurface => tint_surface_color, set_tint_surface_color;
        TintPrimary => tint_primary_color, set_tint_primary_color;
        TintPrimaryDark => tint_primary_color_dark, set_tint_primary_color_dark;
        TintAccent => tint_accent_color, set_tint_accent_color;
        TintAccentDark => tint_accent_color_dark, set_tint_accent_color_dark;
        TintError => tint_error_color, set_tint_error_color;
        TextPrimaryInverse => text_primary_color_inverse, set_text_primary_color_inverse;
        TextSecondaryInverse => text_secondary_color_inverse, set_text_secondary_color_inverse;
    }
}

impl ColorAttributes for ThemeRecord {
    fn supports_group(&self, group: ColorGroup) -> bool {
        self.capabilities.contains(Capability::from(group))
    }

    fn color(&self, role: ColorRole, resolve: bool, inverse: bool) -> Resolvable<Color> {
        if !resolve {
            return self.raw_color(role);
        }
        let role = if inverse {
            role.inverse_pair().unwrap_or(role)
        } else {
            role
        };
        Resolvable::Value(self.resolve_color(role))
    }

    fn set_color(&mut self, role: ColorRole, color: Resolvable<Color>, generate: bool) {
        let derived = role
            .derived()
            .filter(|_| generate)
            .map(|derived| (derived, color.map(|color| self.derive_color(derived, color))));

        self.store_color(role, color);
        if let Some((derived, value)) = derived {
            self.store_color(derived, value);
        }
    }
}

impl CornerAttributes for ThemeRecord {
    fn corner_radius(&self, resolve: bool) -> Resolvable<u32> {
        self.resolve_value(
            resolve,
            |theme| theme.corner_radius,
            |theme| theme.config.dp_to_px(CORNER_RADIUS_DP as f32).round() as u32,
        )
    }

    fn set_corner_radius(&mut self, px: Resolvable<u32>) {
        self.corner_radius = px;
    }
}

impl TranslucentAttributes for ThemeRecord {
    fn opacity(&self, resolve: bool) -> Resolvable<u8> {
        self.resolve_value(resolve, |theme| theme.opacity, |_| OPACITY)
    }

    fn set_opacity(&mut self, opacity: Resolvable<u8>) {
        self.opacity = opacity;
    }
}

fn toggle_value<T: Copy + Default + PartialEq>(value: T) -> Resolvable<T> {
    if value == T::default() {
        Resolvable::Auto
    } else {
        Resolvable::Value(value)
    }
}

impl BackgroundAwareAttributes for ThemeRecord {
    fn background_aware(&self, resolve: bool) -> BackgroundAware {
        self.resolve_value(
            resolve,
            |theme| toggle_value(theme.background_aware),
            |_| BackgroundAware::Enable,
        )
        .unwrap_or(BackgroundAware::Auto)
    }

    fn set_background_aware(&mut self, background_aware: BackgroundAware) {
        self.background_aware = background_aware;
    }

    fn contrast(&self, resolve: bool) -> Resolvable<u32> {
        self.resolve_value(resolve, |theme| theme.contrast, |_| CONTRAST)
    }

    fn set_contrast(&mut self, contrast: Resolvable<u32>) {
        self.contrast = contrast.map(|contrast| contrast.min(CONTRAST_MAX));
    }
}

impl StyleAttributes for ThemeRecord {
    fn style(&self, resolve: bool) -> Style {
        self.resolve_value(resolve, |theme| toggle_value(theme.style), |_| Style::Custom)
            .unwrap_or(Style::Auto)
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn theme_type(&self, resolve: bool) -> ThemeType {
        self.resolve_value(
            resolve,
            |theme| toggle_value(theme.theme_type),
            |theme| {
                if theme.is_dark_theme() {
                    ThemeType::Night
                } else {
                    ThemeType::Day
                }
            },
        )
        .unwrap_or(ThemeType::Auto)
    }

    fn set_theme_type(&mut self, theme_type: ThemeType) {
        self.theme_type = theme_type;
    }
}

impl FontAttributes for ThemeRecord {
    fn font_scale(&self, resolve: bool) -> Resolvable<u32> {
        self.resolve_value(resolve, |theme| theme.font_scale, |_| FONT_SCALE)
    }

    fn set_font_scale(&mut self, scale: Resolvable<u32>) {
        self.font_scale = scale.map(|scale| scale.clamp(FONT_SCALE_MIN, FONT_SCALE_MAX));
    }
}

impl ElevationAttributes for ThemeRecord {
    fn elevation(&self, resolve: bool) -> Elevation {
        self.resolve_value(
            resolve,
            |theme| toggle_value(theme.elevation),
            |_| Elevation::Enable,
        )
        .unwrap_or(Elevation::Auto)
    }

    fn set_elevation(&mut self, elevation: Elevation) {
        self.elevation = elevation;
    }
}

impl WidgetAttributes for ThemeRecord {
    fn widget_id(&self) -> Option<u32> {
        self.widget_id
    }

    fn header(&self, resolve: bool) -> Visibility {
        self.resolve_value(resolve, |theme| toggle_value(theme.header), |_| Visibility::Show)
            .unwrap_or(Visibility::Auto)
    }

    fn set_header(&mut self, header: Visibility) {
        self.header = header;
    }
}

impl DynamicTheme for ThemeRecord {
    fn as_corner(&self) -> Option<&dyn CornerAttributes> {
        self.supports(Capability::Corner)
            .then_some(self as &dyn CornerAttributes)
    }

    fn as_corner_mut(&mut self) -> Option<&mut dyn CornerAttributes> {
        if self.supports(Capability::Corner) {
            Some(self)
        } else {
            None
        }
    }

    fn as_translucent(&self) -> Option<&dyn TranslucentAttributes> {
        self.supports(Capability::Translucent)
            .then_some(self as &dyn TranslucentAttributes)
    }

    fn as_translucent_mut(&mut self) -> Option<&mut dyn TranslucentAttributes> {
        if self.supports(Capability::Translucent) {
            Some(self)
        } else {
            None
        }
    }

    fn as_background_aware(&self) -> Option<&dyn BackgroundAwareAttributes> {
        self.supports(Capability::BackgroundAware)
            .then_some(self as &dyn BackgroundAwareAttributes)
    }

    fn as_background_aware_mut(&mut self) -> Option<&mut dyn BackgroundAwareAttributes> {
        if self.supports(Capability::BackgroundAware) {
            Some(self)
        } else {
            None
        }
    }

    fn as_style(&self) -> Option<&dyn StyleAttributes> {
        self.supports(Capability::Style)
            .then_some(self as &dyn StyleAttributes)
    }

    fn as_style_mut(&mut self) -> Option<&mut dyn StyleAttributes> {
        if self.supports(Capability::Style) {
            Some(self)
        } else {
            None
        }
    }

    fn as_font(&self) -> Option<&dyn FontAttributes> {
        self.supports(Capability::Font)
            .then_some(self as &dyn FontAttributes)
    }

    fn as_font_mut(&mut self) -> Option<&mut dyn FontAttributes> {
        if self.supports(Capability::Font) {
            Some(self)
        } else {
            None
        }
    }

    fn as_elevation(&self) -> Option<&dyn ElevationAttributes> {
        self.supports(Capability::Elevation)
            .then_some(self as &dyn ElevationAttributes)
    }

    fn as_elevation_mut(&mut self) -> Option<&mut dyn ElevationAttributes> {
        if self.supports(Capability::Elevation) {
            Some(self)
        } else {
            None
        }
    }

    fn as_widget(&self) -> Option<&dyn WidgetAttributes> {
        self.supports(Capability::Widget)
            .then_some(self as &dyn WidgetAttributes)
    }

    fn as_widget_mut(&mut self) -> Option<&mut dyn WidgetAttributes> {
        if self.supports(Capability::Widget) {
            Some(self)
        } else {
            None
        }
    }
}

impl ThemeContext for ThemeRecord {
    fn background_color(&self) -> Color {
        self.resolve_color(ColorRole::Background)
    }

    fn primary_color(&self) -> Color {
        self.resolve_color(ColorRole::Primary)
    }

    fn accent_color(&self) -> Color {
        self.resolve_color(ColorRole::Accent)
    }

    fn is_dark_theme(&self) -> bool {
        ThemeRecord::is_dark_theme(self)
    }

    fn is_inverse_theme(&self) -> bool {
        self.inverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tincture_color::contrast::{contrast_ratio, NEAR_BLACK, NEAR_WHITE};

    #[test]
    fn test_raw_and_resolved() {
        let theme = ThemeRecord::new();
        assert_eq!(theme.color(ColorRole::Primary, false, false), Resolvable::Auto);
        assert_eq!(
            theme.color(ColorRole::Primary, true, false),
            Resolvable::Value(PRIMARY)
        );
        assert_eq!(theme.background_color(), BACKGROUND_LIGHT);
        assert!(!theme.is_dark_theme());
    }

    #[test]
    fn test_explicit_value_wins() {
        let mut theme = ThemeRecord::new();
        theme.set_primary_color(Color(0xFF009688), false);
        assert_eq!(theme.primary_color(), Color(0xFF009688));
        assert_eq!(
            theme.color(ColorRole::Primary, false, false),
            Resolvable::Value(Color(0xFF009688))
        );
    }

    #[test]
    fn test_inverse_swaps_to_pair() {
        let mut theme = ThemeRecord::new();
        theme
            .set_primary_color(Color(0xFF009688), false)
            .set_primary_color_dark(Color(0xFF00796B), false);

        assert_eq!(
            theme.resolved_color(ColorRole::Primary, true),
            Color(0xFF00796B)
        );
        assert_eq!(
            theme.resolved_color(ColorRole::PrimaryDark, true),
            Color(0xFF009688)
        );
        // Roles without a pair resolve to themselves.
        assert_eq!(
            theme.resolved_color(ColorRole::Background, true),
            theme.background_color()
        );
    }

    #[test]
    fn test_fallback_theme_is_consulted() {
        let mut host = ThemeRecord::new();
        host.set_accent_color(Color(0xFFFF9800), false)
            .set_corner_radius_dp(Resolvable::Value(12));

        let mut theme = ThemeRecord::new();
        theme.set_fallback(Some(host));

        assert_eq!(theme.accent_color(), Color(0xFFFF9800));
        assert_eq!(theme.corner_radius(true), Resolvable::Value(12));
        assert_eq!(theme.corner_radius(false), Resolvable::Auto);
        // Fallback resolves its own defaults too.
        assert_eq!(theme.primary_color(), PRIMARY);
    }

    #[test]
    fn test_dark_theme_defaults() {
        let mut theme = ThemeRecord::new();
        theme.set_theme_type(ThemeType::Night);
        assert!(theme.is_dark_theme());
        assert_eq!(theme.background_color(), BACKGROUND_DARK);
        assert_eq!(theme.text_primary_color(), NEAR_WHITE);
        assert_eq!(theme.text_primary_color_inverse(), NEAR_BLACK);

        theme.set_dark_theme(Some(false));
        assert_eq!(theme.background_color(), BACKGROUND_LIGHT);
    }

    #[test]
    fn test_darkness_follows_background() {
        let mut theme = ThemeRecord::new();
        theme.set_background_color(Color(0xFF263238), false);
        assert!(theme.is_dark_theme());
        assert!(is_dark(theme.surface_color()));
    }

    #[test]
    fn test_style_and_type_resolve() {
        let mut theme = ThemeRecord::new();
        assert_eq!(theme.style(false), Style::Auto);
        assert_eq!(theme.style(true), Style::Custom);
        assert_eq!(theme.theme_type(false), ThemeType::Auto);
        assert_eq!(theme.theme_type(true), ThemeType::Day);

        theme.set_background_color(Color(0xFF263238), false);
        assert_eq!(theme.theme_type(true), ThemeType::Night);

        let mut host = ThemeRecord::new();
        host.set_theme_type(ThemeType::App);
        theme.set_fallback(Some(host));
        assert_eq!(theme.theme_type(true), ThemeType::App);
        assert_eq!(theme.theme_type(false), ThemeType::Auto);

        theme.set_theme_type(ThemeType::Remote);
        assert_eq!(theme.theme_type(true), ThemeType::Remote);
    }

    #[test]
    fn test_generate_tint_on_set() {
        let mut theme = ThemeRecord::new();
        theme.set_primary_color(Color(0xFFFFEB3B), true);
        let tint = theme.color(ColorRole::TintPrimary, false, false);
        assert!(tint.is_value());
        assert!(contrast_ratio(theme.tint_primary_color(), Color(0xFFFFEB3B)) >= 4.5);

        theme.set_text_primary_color(Color::BLACK, true);
        assert_eq!(
            theme.color(ColorRole::TextPrimaryInverse, false, false),
            Resolvable::Value(NEAR_WHITE)
        );

        theme.set_accent_color(Color(0xFF00BCD4), false);
        assert!(theme.color(ColorRole::TintAccent, false, false).is_auto());
    }

    #[test]
    fn test_auto_generate_colors() {
        let mut theme = ThemeRecord::new();
        theme
            .set_background_color(Color::WHITE, false)
            .set_text_primary_color(Color::BLACK, false)
            .set_accent_color(Resolvable::Auto, false);

        theme.auto_generate_colors(true, false);
        assert!(theme.color(ColorRole::TintBackground, false, false).is_value());
        assert!(theme.color(ColorRole::TintAccent, false, false).is_auto());
        assert!(theme.color(ColorRole::TextPrimaryInverse, false, false).is_auto());

        theme.auto_generate_colors(false, true);
        assert!(theme.color(ColorRole::TextPrimaryInverse, false, false).is_value());
    }

    #[test]
    fn test_scalar_defaults() {
        let config = ThemeConfig {
            density: 2.0,
            ..ThemeConfig::default()
        };
        let mut theme = ThemeRecord::with_config(config);
        assert_eq!(theme.opacity(true), Resolvable::Value(OPACITY));
        assert_eq!(theme.font_scale(true), Resolvable::Value(FONT_SCALE));
        assert_eq!(theme.contrast(true), Resolvable::Value(CONTRAST));
        assert_eq!(theme.corner_radius(true), Resolvable::Value(4));
        assert_eq!(
            BackgroundAwareAttributes::background_aware(&theme, true),
            BackgroundAware::Enable
        );
        assert_eq!(
            BackgroundAwareAttributes::background_aware(&theme, false),
            BackgroundAware::Auto
        );
        assert_eq!(theme.header(true), Visibility::Show);

        theme.set_font_scale(Resolvable::Value(400));
        assert_eq!(theme.font_scale(false), Resolvable::Value(FONT_SCALE_MAX));
        assert_eq!(theme.font_scale_relative(), 1.5);

        theme.set_corner_radius_dp(Resolvable::Value(8));
        assert_eq!(theme.corner_radius(false), Resolvable::Value(16));
        assert_eq!(theme.corner_size_dp(), 8.0);
    }

    #[test]
    fn test_background_aware_color() {
        let mut theme = ThemeRecord::new();
        theme
            .set_background_color(Color::WHITE, false)
            .set_accent_color(Color(0xFFFFEB3B), false);

        let aware = theme.background_aware_color(ColorRole::Accent, false);
        assert!(contrast_ratio(aware, Color::WHITE) >= theme.config().tint_contrast);

        theme.set_background_aware(BackgroundAware::Disable);
        assert_eq!(
            theme.background_aware_color(ColorRole::Accent, false),
            Color(0xFFFFEB3B)
        );
    }

    #[test]
    fn test_apply_dynamic_colors() {
        let mut colors = DynamicColors::new();
        colors
            .put(ColorRole::Background, Color(0xFF808080))
            .put(ColorRole::Accent, Color(0xFF4CAF50));

        let mut theme = ThemeRecord::new();
        theme.set_dark_theme(Some(true));
        colors.mutate(&theme);
        theme.apply_dynamic_colors(&colors);

        assert_eq!(
            theme.background_color(),
            Color(0xFF808080).darken(tincture_color::MUTATION_FACTOR)
        );
        assert_eq!(theme.accent_color(), Color(0xFF4CAF50));
        assert!(theme.color(ColorRole::TintAccent, false, false).is_value());
        assert!(theme.color(ColorRole::Surface, false, false).is_auto());
    }

    #[test]
    fn test_capability_gating() {
        let theme = ThemeRecord::new();
        assert!(theme.as_corner().is_some());
        assert!(theme.as_widget().is_none());

        let widget = ThemeRecord::widget(7, ThemeConfig::default());
        assert_eq!(widget.as_widget().and_then(|w| w.widget_id()), Some(7));

        let mut bare = ThemeRecord::new();
        bare.set_capabilities(Capabilities::empty().with(Capability::Background));
        assert!(bare.supports_group(ColorGroup::Background));
        assert!(!bare.supports_group(ColorGroup::Primary));
        assert!(bare.as_corner_mut().is_none());
    }

    fn arb_color() -> impl Strategy<Value = Resolvable<Color>> {
        prop_oneof![
            Just(Resolvable::Auto),
            any::<u32>().prop_map(|argb| Resolvable::Value(Color(argb))),
        ]
    }

    fn arb_theme() -> impl Strategy<Value = ThemeRecord> {
        (
            proptest::collection::vec(arb_color(), ColorRole::ALL.len()),
            proptest::option::of(any::<bool>()),
        )
            .prop_map(|(colors, dark)| {
                let mut theme = ThemeRecord::new();
                for (role, color) in ColorRole::ALL.into_iter().zip(colors) {
                    theme.set_color(role, color, false);
                }
                theme.set_dark_theme(dark);
                theme
            })
    }

    proptest! {
        #[test]
        fn resolution_never_returns_auto(
            theme in arb_theme(),
            fallback in proptest::option::of(arb_theme()),
            inverse in any::<bool>(),
        ) {
            let mut theme = theme;
            theme.set_fallback(fallback);
            for role in ColorRole::ALL {
                prop_assert!(theme.color(role, true, inverse).is_value());
            }
            prop_assert!(theme.corner_radius(true).is_value());
            prop_assert!(theme.opacity(true).is_value());
            prop_assert!(theme.font_scale(true).is_value());
            prop_assert!(theme.contrast(true).is_value());
            prop_assert_ne!(BackgroundAwareAttributes::background_aware(&theme, true), BackgroundAware::Auto);
            prop_assert_ne!(ElevationAttributes::elevation(&theme, true), Elevation::Auto);
            prop_assert_ne!(StyleAttributes::style(&theme, true), Style::Auto);
            prop_assert_ne!(StyleAttributes::theme_type(&theme, true), ThemeType::Auto);
        }
    }
}
