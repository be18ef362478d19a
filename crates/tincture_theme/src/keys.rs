//! Field names and literals of the share format, long and short

use tincture_color::ColorRole;

/// One field of the share format
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ThemeKey {
    Color(ColorRole),
    FontScale,
    CornerRadius,
    BackgroundAware,
    Opacity,
    Style,
    Type,
    Contrast,
    Elevation,
    Header,
}

impl ThemeKey {
    /// Every field, in serialization order
    pub const ALL: [ThemeKey; 27] = [
        ThemeKey::Color(ColorRole::Background),
        ThemeKey::Color(ColorRole::TintBackground),
        ThemeKey::Color(ColorRole::Surface),
        ThemeKey::Color(ColorRole::TintSurface),
        ThemeKey::Color(ColorRole::Primary),
        ThemeKey::Color(ColorRole::TintPrimary),
        ThemeKey::Color(ColorRole::PrimaryDark),
        ThemeKey::Color(ColorRole::TintPrimaryDark),
        ThemeKey::Color(ColorRole::Accent),
        ThemeKey::Color(ColorRole::TintAccent),
        ThemeKey::Color(ColorRole::AccentDark),
        ThemeKey::Color(ColorRole::TintAccentDark),
        ThemeKey::Color(ColorRole::Error),
        ThemeKey::Color(ColorRole::TintError),
        ThemeKey::Color(ColorRole::TextPrimary),
        ThemeKey::Color(ColorRole::TextPrimaryInverse),
        ThemeKey::Color(ColorRole::TextSecondary),
        ThemeKey::Color(ColorRole::TextSecondaryInverse),
        ThemeKey::FontScale,
        ThemeKey::CornerRadius,
        ThemeKey::BackgroundAware,
        ThemeKey::Opacity,
        ThemeKey::Style,
        ThemeKey::Type,
        ThemeKey::Contrast,
        ThemeKey::Elevation,
        ThemeKey::Header,
    ];

    /// Long (JSON) key
    pub fn name(self) -> &'static str {
        match self {
            Self::Color(role) => match role {
                ColorRole::Background => "backgroundColor",
                ColorRole::TintBackground => "tintBackgroundColor",
                ColorRole::Surface => "surfaceColor",
                ColorRole::TintSurface => "tintSurfaceColor",
                ColorRole::Primary => "primaryColor",
                ColorRole::TintPrimary => "tintPrimaryColor",
                ColorRole::PrimaryDark => "primaryColorDark",
                ColorRole::TintPrimaryDark => "tintPrimaryColorDark",
                ColorRole::Accent => "accentColor",
                ColorRole::TintAccent => "tintAccentColor",
                ColorRole::AccentDark => "accentColorDark",
                ColorRole::TintAccentDark => "tintAccentColorDark",
                ColorRole::Error => "errorColor",
                ColorRole::TintError => "tintErrorColor",
                ColorRole::TextPrimary => "textPrimaryColor",
                ColorRole::TextPrimaryInverse => "textPrimaryColorInverse",
                ColorRole::TextSecondary => "textSecondaryColor",
                ColorRole::TextSecondaryInverse => "textSecondaryColorInverse",
            },
            Self::FontScale => "fontScale",
            Self::CornerRadius => "cornerRadius",
            Self::BackgroundAware => "backgroundAware",
            Self::Opacity => "opacity",
            Self::Style => "style",
            Self::Type => "type",
            Self::Contrast => "contrast",
            Self::Elevation => "elevation",
            Self::Header => "header",
        }
    }

    /// Short (token) key. Dark and inverse variants append `Z` to their base code.
    pub fn short(self) -> &'static str {
        match self {
            Self::Color(role) => match role {
                ColorRole::Background => "0",
                ColorRole::TintBackground => "1",
                ColorRole::Surface => "2",
                ColorRole::TintSurface => "3",
                ColorRole::Primary => "4",
                ColorRole::TintPrimary => "5",
                ColorRole::PrimaryDark => "4Z",
                ColorRole::TintPrimaryDark => "7",
                ColorRole::Accent => "8",
                ColorRole::TintAccent => "9",
                ColorRole::AccentDark => "8Z",
                ColorRole::TintAccentDark => "11",
                ColorRole::Error => "21",
                ColorRole::TintError => "22",
                ColorRole::TextPrimary => "12",
                ColorRole::TextPrimaryInverse => "12Z",
                ColorRole::TextSecondary => "14",
                ColorRole::TextSecondaryInverse => "14Z",
            },
            Self::FontScale => "16",
            Self::CornerRadius => "17",
            Self::BackgroundAware => "18",
            Self::Header => "19",
            Self::Opacity => "20",
            Self::Style => "23",
            Self::Type => "24",
            Self::Contrast => "25",
            Self::Elevation => "26",
        }
    }

    /// Look up a key by its long, short or legacy spelling
    pub fn parse(key: &str) -> Option<ThemeKey> {
        match key {
            "5Z" => return Some(Self::Color(ColorRole::TintPrimaryDark)),
            "9Z" => return Some(Self::Color(ColorRole::TintAccentDark)),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|k| k.name() == key || k.short() == key)
    }
}

/// Value literals shared by the enum fields
pub mod value {
    pub const AUTO: &str = "auto";
    pub const APP: &str = "app";
    pub const DAY: &str = "day";
    pub const NIGHT: &str = "night";
    pub const CUSTOM: &str = "custom";
    pub const DISABLE: &str = "disable";
    pub const ENABLE: &str = "enable";
    pub const HIDE: &str = "hide";
    pub const SHOW: &str = "show";

    /// Long literal -> short code
    pub const SHORT: [(&str, &str); 9] = [
        (AUTO, "A"),
        (APP, "P"),
        (DAY, "L"),
        (NIGHT, "N"),
        (CUSTOM, "C"),
        (DISABLE, "D"),
        (ENABLE, "E"),
        (HIDE, "H"),
        (SHOW, "S"),
    ];

    /// Short code for a long literal, if it has one
    pub fn shorten(literal: &str) -> Option<&'static str> {
        SHORT
            .iter()
            .find(|(long, _)| *long == literal)
            .map(|(_, short)| *short)
    }

    /// Long literal for a long or short spelling
    pub fn expand(literal: &str) -> Option<&'static str> {
        SHORT
            .iter()
            .find(|(long, short)| *long == literal || *short == literal)
            .map(|(long, _)| *long)
    }

    pub fn is_auto(literal: &str) -> bool {
        expand(literal) == Some(AUTO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let names: HashSet<_> = ThemeKey::ALL.iter().map(|k| k.name()).collect();
        let shorts: HashSet<_> = ThemeKey::ALL.iter().map(|k| k.short()).collect();
        assert_eq!(names.len(), ThemeKey::ALL.len());
        assert_eq!(shorts.len(), ThemeKey::ALL.len());
    }

    #[test]
    fn test_parse_accepts_every_spelling() {
        for key in ThemeKey::ALL {
            assert_eq!(ThemeKey::parse(key.name()), Some(key));
            assert_eq!(ThemeKey::parse(key.short()), Some(key));
        }
        assert_eq!(
            ThemeKey::parse("5Z"),
            Some(ThemeKey::Color(ColorRole::TintPrimaryDark))
        );
        assert_eq!(
            ThemeKey::parse("9Z"),
            Some(ThemeKey::Color(ColorRole::TintAccentDark))
        );
        assert_eq!(ThemeKey::parse("themeRes"), None);
    }

    #[test]
    fn test_short_codes_avoid_separators() {
        for key in ThemeKey::ALL {
            assert!(!key.short().contains(['v', '-']));
        }
        for (_, short) in value::SHORT {
            assert!(!short.contains(['v', '-']));
        }
    }

    #[test]
    fn test_value_literals() {
        assert_eq!(value::shorten("night"), Some("N"));
        assert_eq!(value::expand("N"), Some("night"));
        assert_eq!(value::expand("enable"), Some("enable"));
        assert!(value::is_auto("A"));
        assert!(!value::is_auto("#FF000000"));
    }
}
