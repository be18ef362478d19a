//! Color roles a theme can carry

/// Semantic color role keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum ColorRole {
    // Background
    Background,
    TintBackground,

    // Surface
    Surface,
    TintSurface,

    // Brand colors
    Primary,
    TintPrimary,
    PrimaryDark,
    TintPrimaryDark,
    Accent,
    TintAccent,
    AccentDark,
    TintAccentDark,

    // Semantic colors
    Error,
    TintError,

    // Text colors
    TextPrimary,
    TextPrimaryInverse,
    TextSecondary,
    TextSecondaryInverse,
}

/// Capability groups of color roles
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorGroup {
    Background,
    Surface,
    Primary,
    Accent,
    Error,
    Text,
}

impl ColorRole {
    /// Every role, in canonical (serialization) order
    pub const ALL: [ColorRole; 18] = [
        ColorRole::Background,
        ColorRole::TintBackground,
        ColorRole::Surface,
        ColorRole::TintSurface,
        ColorRole::Primary,
        ColorRole::TintPrimary,
        ColorRole::PrimaryDark,
        ColorRole::TintPrimaryDark,
        ColorRole::Accent,
        ColorRole::TintAccent,
        ColorRole::AccentDark,
        ColorRole::TintAccentDark,
        ColorRole::Error,
        ColorRole::TintError,
        ColorRole::TextPrimary,
        ColorRole::TextPrimaryInverse,
        ColorRole::TextSecondary,
        ColorRole::TextSecondaryInverse,
    ];

    /// Roles that are set explicitly rather than derived
    pub const BASE: [ColorRole; 9] = [
        ColorRole::Background,
        ColorRole::Surface,
        ColorRole::Primary,
        ColorRole::PrimaryDark,
        ColorRole::Accent,
        ColorRole::AccentDark,
        ColorRole::Error,
        ColorRole::TextPrimary,
        ColorRole::TextSecondary,
    ];

    pub fn is_base(self) -> bool {
        self.derived().is_some()
    }

    /// The tint (or text inverse) role generated from this base role
    pub fn derived(self) -> Option<ColorRole> {
        match self {
            Self::Background => Some(Self::TintBackground),
            Self::Surface => Some(Self::TintSurface),
            Self::Primary => Some(Self::TintPrimary),
            Self::PrimaryDark => Some(Self::TintPrimaryDark),
            Self::Accent => Some(Self::TintAccent),
            Self::AccentDark => Some(Self::TintAccentDark),
            Self::Error => Some(Self::TintError),
            Self::TextPrimary => Some(Self::TextPrimaryInverse),
            Self::TextSecondary => Some(Self::TextSecondaryInverse),
            _ => None,
        }
    }

    /// The base role this tint (or text inverse) role is derived from
    pub fn source(self) -> Option<ColorRole> {
        match self {
            Self::TintBackground => Some(Self::Background),
            Self::TintSurface => Some(Self::Surface),
            Self::TintPrimary => Some(Self::Primary),
            Self::TintPrimaryDark => Some(Self::PrimaryDark),
            Self::TintAccent => Some(Self::Accent),
            Self::TintAccentDark => Some(Self::AccentDark),
            Self::TintError => Some(Self::Error),
            Self::TextPrimaryInverse => Some(Self::TextPrimary),
            Self::TextSecondaryInverse => Some(Self::TextSecondary),
            _ => None,
        }
    }

    /// Whether the derived role is a text inverse rather than a tint
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::TextPrimary
                | Self::TextPrimaryInverse
                | Self::TextSecondary
                | Self::TextSecondaryInverse
        )
    }

    /// The paired role used when a caller asks for the inverse value
    pub fn inverse_pair(self) -> Option<ColorRole> {
        match self {
            Self::Primary => Some(Self::PrimaryDark),
            Self::PrimaryDark => Some(Self::Primary),
            Self::TintPrimary => Some(Self::TintPrimaryDark),
            Self::TintPrimaryDark => Some(Self::TintPrimary),
            Self::Accent => Some(Self::AccentDark),
            Self::AccentDark => Some(Self::Accent),
            Self::TintAccent => Some(Self::TintAccentDark),
            Self::TintAccentDark => Some(Self::TintAccent),
            Self::TextPrimary => Some(Self::TextPrimaryInverse),
            Self::TextPrimaryInverse => Some(Self::TextPrimary),
            Self::TextSecondary => Some(Self::TextSecondaryInverse),
            Self::TextSecondaryInverse => Some(Self::TextSecondary),
            _ => None,
        }
    }

    pub fn group(self) -> ColorGroup {
        match self {
            Self::Background | Self::TintBackground => ColorGroup::Background,
            Self::Surface | Self::TintSurface => ColorGroup::Surface,
            Self::Primary | Self::TintPrimary | Self::PrimaryDark | Self::TintPrimaryDark => {
                ColorGroup::Primary
            }
            Self::Accent | Self::TintAccent | Self::AccentDark | Self::TintAccentDark => {
                ColorGroup::Accent
            }
            Self::Error | Self::TintError => ColorGroup::Error,
            Self::TextPrimary
            | Self::TextPrimaryInverse
            | Self::TextSecondary
            | Self::TextSecondaryInverse => ColorGroup::Text,
        }
    }
}

impl ColorGroup {
    pub const ALL: [ColorGroup; 6] = [
        ColorGroup::Background,
        ColorGroup::Surface,
        ColorGroup::Primary,
        ColorGroup::Accent,
        ColorGroup::Error,
        ColorGroup::Text,
    ];

    /// Roles belonging to this group, in canonical order
    pub fn roles(self) -> impl Iterator<Item = ColorRole> {
        ColorRole::ALL
            .into_iter()
            .filter(move |role| role.group() == self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_and_source_are_inverse() {
        for role in ColorRole::ALL {
            if let Some(derived) = role.derived() {
                assert_eq!(derived.source(), Some(role));
                assert!(!derived.is_base());
            }
        }
        assert_eq!(
            ColorRole::ALL.iter().filter(|r| r.is_base()).count(),
            ColorRole::BASE.len()
        );
    }

    #[test]
    fn test_inverse_pair_is_symmetric() {
        for role in ColorRole::ALL {
            if let Some(pair) = role.inverse_pair() {
                assert_eq!(pair.inverse_pair(), Some(role));
                assert_eq!(pair.group(), role.group());
            }
        }
        assert_eq!(ColorRole::Background.inverse_pair(), None);
    }

    #[test]
    fn test_groups_cover_all_roles() {
        let total: usize = ColorGroup::ALL.iter().map(|g| g.roles().count()).sum();
        assert_eq!(total, ColorRole::ALL.len());
        assert_eq!(ColorGroup::Primary.roles().count(), 4);
    }
}
