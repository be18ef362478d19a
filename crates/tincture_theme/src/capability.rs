//! Capability traits
//!
//! A theme declares which attribute groups it carries. Consumers (the codec,
//! the 2D code renderer) ask for a group through [`DynamicTheme`] and skip it
//! entirely when the theme does not support it.

use tincture_color::{Color, ColorGroup, ColorRole, Resolvable};

use crate::enums::{BackgroundAware, Elevation, Style, ThemeType, Visibility};

/// Attribute groups a theme may support
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Capability {
    Background,
    Surface,
    Primary,
    Accent,
    Error,
    Text,
    Corner,
    BackgroundAware,
    Translucent,
    Style,
    Font,
    Elevation,
    Widget,
}

impl From<ColorGroup> for Capability {
    fn from(group: ColorGroup) -> Self {
        match group {
            ColorGroup::Background => Self::Background,
            ColorGroup::Surface => Self::Surface,
            ColorGroup::Primary => Self::Primary,
            ColorGroup::Accent => Self::Accent,
            ColorGroup::Error => Self::Error,
            ColorGroup::Text => Self::Text,
        }
    }
}

impl Capability {
    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of [`Capability`] values
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Capabilities(u16);

impl Default for Capabilities {
    fn default() -> Self {
        Self::app()
    }
}

impl Capabilities {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every capability, widget included
    pub const fn all() -> Self {
        Self((1 << 13) - 1)
    }

    /// Everything an application theme carries (no widget attributes)
    pub const fn app() -> Self {
        Self::all().without(Capability::Widget)
    }

    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    pub const fn without(self, capability: Capability) -> Self {
        Self(self.0 & !capability.bit())
    }

    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn insert(&mut self, capability: Capability) {
        *self = self.with(capability);
    }

    pub fn remove(&mut self, capability: Capability) {
        *self = self.without(capability);
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |caps, capability| caps.with(capability))
    }
}

/// Color roles with the `(resolve, inverse)` resolution contract
pub trait ColorAttributes {
    fn supports_group(&self, group: ColorGroup) -> bool;

    /// With `resolve == false` the stored value is returned as is (possibly
    /// `Auto`). With `resolve == true` the result is always a concrete color.
    fn color(&self, role: ColorRole, resolve: bool, inverse: bool) -> Resolvable<Color>;

    /// Store a color. With `generate`, the derived tint (or text inverse) of a
    /// base role is stored alongside it.
    fn set_color(&mut self, role: ColorRole, color: Resolvable<Color>, generate: bool);

    /// Concrete color for `role`
    fn resolved_color(&self, role: ColorRole, inverse: bool) -> Color {
        self.color(role, true, inverse).unwrap_or(Color::TRANSPARENT)
    }
}

pub trait CornerAttributes {
    /// Corner radius in pixels
    fn corner_radius(&self, resolve: bool) -> Resolvable<u32>;

    fn set_corner_radius(&mut self, px: Resolvable<u32>);
}

pub trait TranslucentAttributes {
    fn opacity(&self, resolve: bool) -> Resolvable<u8>;

    fn set_opacity(&mut self, opacity: Resolvable<u8>);
}

pub trait BackgroundAwareAttributes {
    fn background_aware(&self, resolve: bool) -> BackgroundAware;

    fn set_background_aware(&mut self, background_aware: BackgroundAware);

    /// Contrast level, 0 to 100
    fn contrast(&self, resolve: bool) -> Resolvable<u32>;

    fn set_contrast(&mut self, contrast: Resolvable<u32>);
}

pub trait StyleAttributes {
    fn style(&self, resolve: bool) -> Style;

    fn set_style(&mut self, style: Style);

    /// Resolved `Auto` follows the theme's darkness
    fn theme_type(&self, resolve: bool) -> ThemeType;

    fn set_theme_type(&mut self, theme_type: ThemeType);
}

pub trait FontAttributes {
    /// Font scale percentage, 50 to 150
    fn font_scale(&self, resolve: bool) -> Resolvable<u32>;

    fn set_font_scale(&mut self, scale: Resolvable<u32>);
}

pub trait ElevationAttributes {
    fn elevation(&self, resolve: bool) -> Elevation;

    fn set_elevation(&mut self, elevation: Elevation);
}

pub trait WidgetAttributes {
    fn widget_id(&self) -> Option<u32>;

    fn header(&self, resolve: bool) -> Visibility;

    fn set_header(&mut self, header: Visibility);
}

/// A theme with optional attribute groups
///
/// Each accessor returns `None` when the theme does not carry that group.
pub trait DynamicTheme: ColorAttributes {
    fn as_corner(&self) -> Option<&dyn CornerAttributes> {
        None
    }

    fn as_corner_mut(&mut self) -> Option<&mut dyn CornerAttributes> {
        None
    }

    fn as_translucent(&self) -> Option<&dyn TranslucentAttributes> {
        None
    }

    fn as_translucent_mut(&mut self) -> Option<&mut dyn TranslucentAttributes> {
        None
    }

    fn as_background_aware(&self) -> Option<&dyn BackgroundAwareAttributes> {
        None
    }

    fn as_background_aware_mut(&mut self) -> Option<&mut dyn BackgroundAwareAttributes> {
        None
    }

    fn as_style(&self) -> Option<&dyn StyleAttributes> {
        None
    }

    fn as_style_mut(&mut self) -> Option<&mut dyn StyleAttributes> {
        None
    }

    fn as_font(&self) -> Option<&dyn FontAttributes> {
        None
    }

    fn as_font_mut(&mut self) -> Option<&mut dyn FontAttributes> {
        None
    }

    fn as_elevation(&self) -> Option<&dyn ElevationAttributes> {
        None
    }

    fn as_elevation_mut(&mut self) -> Option<&mut dyn ElevationAttributes> {
        None
    }

    fn as_widget(&self) -> Option<&dyn WidgetAttributes> {
        None
    }

    fn as_widget_mut(&mut self) -> Option<&mut dyn WidgetAttributes> {
        None
    }
}
