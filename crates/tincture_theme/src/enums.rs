//! Enumerated theme attributes
//!
//! Every enum has an `Auto` variant that resolves through the fallback chain.
//! Unknown literals decode to `Auto` rather than failing.

use crate::keys::value;

macro_rules! toggle_enum {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
        pub enum $name {
            #[default]
            Auto,
            Disable,
            Enable,
        }

        impl $name {
            pub fn value(self) -> &'static str {
                match self {
                    Self::Auto => value::AUTO,
                    Self::Disable => value::DISABLE,
                    Self::Enable => value::ENABLE,
                }
            }

            pub fn from_value(literal: &str) -> Self {
                match value::expand(literal) {
                    Some(value::DISABLE) => Self::Disable,
                    Some(value::ENABLE) => Self::Enable,
                    _ => Self::Auto,
                }
            }

            pub fn is_enabled(self) -> bool {
                self == Self::Enable
            }
        }
    };
}

toggle_enum!(
    /// Whether colors are adjusted for contrast against the background
    BackgroundAware
);

toggle_enum!(
    /// Whether surfaces draw with elevation (shadows)
    Elevation
);

/// Theme style
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum Style {
    #[default]
    Auto,
    Custom,
}

impl Style {
    pub fn value(self) -> &'static str {
        match self {
            Self::Auto => value::AUTO,
            Self::Custom => value::CUSTOM,
        }
    }

    pub fn from_value(literal: &str) -> Self {
        match value::expand(literal) {
            Some(value::CUSTOM) => Self::Custom,
            _ => Self::Auto,
        }
    }
}

/// Theme type
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum ThemeType {
    /// The application's own theme
    App,
    #[default]
    Auto,
    Day,
    Night,
    Custom,
    /// Theme pushed by another process
    Remote,
    /// Theme of a home screen widget
    Widget,
}

impl ThemeType {
    /// Share literal; remote and widget themes are shared as `auto`
    pub fn value(self) -> &'static str {
        match self {
            Self::App => value::APP,
            Self::Day => value::DAY,
            Self::Night => value::NIGHT,
            Self::Custom => value::CUSTOM,
            Self::Auto | Self::Remote | Self::Widget => value::AUTO,
        }
    }

    pub fn from_value(literal: &str) -> Self {
        match value::expand(literal) {
            Some(value::APP) => Self::App,
            Some(value::DAY) => Self::Day,
            Some(value::NIGHT) => Self::Night,
            Some(value::CUSTOM) => Self::Custom,
            _ => Self::Auto,
        }
    }

    /// Explicit darkness implied by the type, if any
    pub fn is_dark(self) -> Option<bool> {
        match self {
            Self::Day => Some(false),
            Self::Night => Some(true),
            _ => None,
        }
    }
}

/// Visibility of an optional element (e.g. a widget header)
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum Visibility {
    #[default]
    Auto,
    Hide,
    Show,
}

impl Visibility {
    pub fn value(self) -> &'static str {
        match self {
            Self::Auto => value::AUTO,
            Self::Hide => value::HIDE,
            Self::Show => value::SHOW,
        }
    }

    pub fn from_value(literal: &str) -> Self {
        match value::expand(literal) {
            Some(value::HIDE) => Self::Hide,
            Some(value::SHOW) => Self::Show,
            _ => Self::Auto,
        }
    }

    pub fn is_visible(self) -> bool {
        self != Self::Hide
    }
}
