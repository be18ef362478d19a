//! Dynamic color store
//!
//! Holds the seed colors of a theme (explicitly set, or ingested from an
//! external wallpaper palette) together with two derived maps: the seeds
//! shifted for a dark context and for a light context. The derived maps are
//! only ever regenerated together by [`DynamicColors::mutate`].
//!
//! The store is single-writer: callers that share it across threads must
//! serialize access themselves.

use rustc_hash::FxHashMap;

use crate::color::Color;
use crate::role::ColorRole;
use crate::value::Resolvable;

/// Factor to generate shades of a color
pub const MUTATION_FACTOR: f32 = 0.8;

/// Color role -> value mapping
pub type ColorMap = FxHashMap<ColorRole, Resolvable<Color>>;

/// Which of the three maps to read
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorVariant {
    /// Explicit or ingested seed colors
    Original,
    /// Seeds mutated for a dark context
    Dark,
    /// Seeds mutated for a light context
    Light,
}

/// Theme state consulted by mutation and mutated-map selection
pub trait ThemeContext {
    /// Resolved background color
    fn background_color(&self) -> Color;

    /// Resolved primary color
    fn primary_color(&self) -> Color;

    /// Resolved accent color
    fn accent_color(&self) -> Color;

    fn is_dark_theme(&self) -> bool;

    fn is_inverse_theme(&self) -> bool;
}

/// Up to three swatches extracted from an external image (e.g. a wallpaper)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallpaperPalette {
    pub primary: Color,
    pub secondary: Option<Color>,
    pub tertiary: Option<Color>,
}

impl WallpaperPalette {
    pub fn new(primary: Color) -> Self {
        Self {
            primary,
            secondary: None,
            tertiary: None,
        }
    }

    pub fn secondary(mut self, color: Color) -> Self {
        self.secondary = Some(color);
        self
    }

    pub fn tertiary(mut self, color: Color) -> Self {
        self.tertiary = Some(color);
        self
    }
}

/// Original, dark-mutated and light-mutated colors keyed by role
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicColors {
    original: ColorMap,
    dark: ColorMap,
    light: ColorMap,
    factor: f32,
}

impl Default for DynamicColors {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicColors {
    /// Empty store using the default [`MUTATION_FACTOR`]
    pub fn new() -> Self {
        Self::with_factor(MUTATION_FACTOR)
    }

    /// Empty store with a custom shade factor (0.0 to 1.0)
    pub fn with_factor(factor: f32) -> Self {
        Self {
            original: ColorMap::default(),
            dark: ColorMap::default(),
            light: ColorMap::default(),
            factor: factor.clamp(0.0, 1.0),
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn original(&self) -> &ColorMap {
        &self.original
    }

    pub fn dark(&self) -> &ColorMap {
        &self.dark
    }

    pub fn light(&self) -> &ColorMap {
        &self.light
    }

    pub fn map(&self, variant: ColorVariant) -> &ColorMap {
        match variant {
            ColorVariant::Original => &self.original,
            ColorVariant::Dark => &self.dark,
            ColorVariant::Light => &self.light,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Concrete color for `role` in `colors`, or `fallback` when missing or auto
    pub fn get(colors: &ColorMap, role: ColorRole, fallback: Color) -> Color {
        colors
            .get(&role)
            .copied()
            .unwrap_or_default()
            .unwrap_or(fallback)
    }

    /// Concrete color for `role` in one of the maps
    pub fn get_variant(&self, variant: ColorVariant, role: ColorRole, fallback: Color) -> Color {
        Self::get(self.map(variant), role, fallback)
    }

    pub fn get_original(&self, role: ColorRole, fallback: Color) -> Color {
        Self::get(&self.original, role, fallback)
    }

    /// Store a seed color, replacing any previous value for `role`
    pub fn put(&mut self, role: ColorRole, color: impl Into<Resolvable<Color>>) -> &mut Self {
        self.original.insert(role, color.into());
        self
    }

    /// Atomically replace every map: all previous roles (original and mutated)
    /// are dropped before `colors` become the new seeds.
    pub fn replace_all(
        &mut self,
        colors: impl IntoIterator<Item = (ColorRole, Resolvable<Color>)>,
    ) -> &mut Self {
        let original: ColorMap = colors.into_iter().collect();
        self.original = original;
        self.dark = ColorMap::default();
        self.light = ColorMap::default();
        self
    }

    /// Replace the seeds with an external palette.
    ///
    /// Accent takes the primary swatch; Primary takes the secondary swatch and
    /// Background the tertiary one, both falling back to the primary swatch.
    pub fn ingest_palette(&mut self, palette: &WallpaperPalette) -> &mut Self {
        tracing::debug!("DynamicColors::ingest_palette - {:?}", palette);

        self.replace_all([
            (ColorRole::Accent, Resolvable::Value(palette.primary)),
            (
                ColorRole::Primary,
                Resolvable::Value(palette.secondary.unwrap_or(palette.primary)),
            ),
            (
                ColorRole::Background,
                Resolvable::Value(palette.tertiary.unwrap_or(palette.primary)),
            ),
        ])
    }

    /// Regenerate the dark and light maps from the seeds.
    ///
    /// Background and primary are shifted toward the target brightness while
    /// accent passes through unchanged. Primary and accent fall back to the
    /// background seed when they were never stored. Dependent roles are
    /// marked auto so they resolve in context.
    pub fn mutate(&mut self, theme: &impl ThemeContext) -> &mut Self {
        let background = self.get_original(ColorRole::Background, theme.background_color());
        let mut primary = self.get_original(ColorRole::Primary, theme.primary_color());
        let mut accent = self.get_original(ColorRole::Accent, theme.accent_color());

        if !self.original.contains_key(&ColorRole::Primary) {
            primary = background;
        }
        if !self.original.contains_key(&ColorRole::Accent) {
            accent = background;
        }

        let shade = |shift: fn(Color, f32) -> Color, factor: f32| -> ColorMap {
            [
                (ColorRole::Background, Resolvable::Value(shift(background, factor))),
                (ColorRole::Surface, Resolvable::Auto),
                (ColorRole::Primary, Resolvable::Value(shift(primary, factor))),
                (ColorRole::PrimaryDark, Resolvable::Auto),
                (ColorRole::Accent, Resolvable::Value(accent)),
                (ColorRole::AccentDark, Resolvable::Auto),
                (ColorRole::Error, Resolvable::Auto),
            ]
            .into_iter()
            .collect()
        };

        let dark = shade(Color::darken, self.factor);
        let light = shade(Color::lighten, self.factor);

        tracing::debug!(
            "DynamicColors::mutate - background={} primary={} accent={}",
            background,
            primary,
            accent
        );

        self.dark = dark;
        self.light = light;
        self
    }

    /// Mutated map for `theme`: dark for dark themes, light otherwise, with
    /// inverse themes flipping the choice
    pub fn mutated(&self, theme: &impl ThemeContext) -> &ColorMap {
        if theme.is_dark_theme() != theme.is_inverse_theme() {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn get_mutated(&self, role: ColorRole, fallback: Color, theme: &impl ThemeContext) -> Color {
        Self::get(self.mutated(theme), role, fallback)
    }

    /// Every distinct concrete color across the original, dark and light maps
    pub fn all_colors(&self) -> Vec<Color> {
        let mut colors = Vec::new();
        for map in [&self.original, &self.dark, &self.light] {
            for role in ColorRole::ALL {
                if let Some(Resolvable::Value(color)) = map.get(&role) {
                    if !colors.contains(color) {
                        colors.push(*color);
                    }
                }
            }
        }
        colors
    }

    /// Drop original and mutated colors
    pub fn clear(&mut self) {
        self.original.clear();
        self.dark.clear();
        self.light.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::relative_luminance;
    use pretty_assertions::assert_eq;

    struct Context {
        background: Color,
        primary: Color,
        accent: Color,
        dark: bool,
        inverse: bool,
    }

    impl Context {
        fn light() -> Self {
            Self {
                background: Color::WHITE,
                primary: Color(0xFF3F51B5),
                accent: Color(0xFFE91E63),
                dark: false,
                inverse: false,
            }
        }
    }

    impl ThemeContext for Context {
        fn background_color(&self) -> Color {
            self.background
        }

        fn primary_color(&self) -> Color {
            self.primary
        }

        fn accent_color(&self) -> Color {
            self.accent
        }

        fn is_dark_theme(&self) -> bool {
            self.dark
        }

        fn is_inverse_theme(&self) -> bool {
            self.inverse
        }
    }

    #[test]
    fn test_get_falls_back_on_auto_and_missing() {
        let mut colors = DynamicColors::new();
        colors.put(ColorRole::Primary, Resolvable::Auto);
        colors.put(ColorRole::Accent, Color(0xFF00FF00));

        assert_eq!(colors.get_original(ColorRole::Primary, Color::BLACK), Color::BLACK);
        assert_eq!(colors.get_original(ColorRole::Background, Color::BLACK), Color::BLACK);
        assert_eq!(colors.get_original(ColorRole::Accent, Color::BLACK), Color(0xFF00FF00));
    }

    #[test]
    fn test_put_is_last_write_wins() {
        let mut colors = DynamicColors::new();
        colors.put(ColorRole::Accent, Color(0xFF00FF00));
        colors.put(ColorRole::Accent, Color(0xFF0000FF));
        assert_eq!(colors.get_original(ColorRole::Accent, Color::BLACK), Color(0xFF0000FF));
    }

    #[test]
    fn test_replace_all_drops_stale_roles() {
        let mut colors = DynamicColors::new();
        colors.put(ColorRole::Error, Color(0xFFFF0000));
        colors.mutate(&Context::light());
        assert!(!colors.dark().is_empty());

        colors.replace_all([(ColorRole::Accent, Resolvable::Value(Color::WHITE))]);
        assert!(!colors.original().contains_key(&ColorRole::Error));
        assert!(colors.dark().is_empty());
        assert!(colors.light().is_empty());
    }

    #[test]
    fn test_ingest_palette() {
        let mut colors = DynamicColors::new();
        colors.put(ColorRole::Error, Color(0xFFFF0000));
        colors.ingest_palette(&WallpaperPalette::new(Color(0xFF112233)));

        assert_eq!(colors.original().len(), 3);
        assert_eq!(colors.get_original(ColorRole::Accent, Color::BLACK), Color(0xFF112233));
        assert_eq!(colors.get_original(ColorRole::Primary, Color::BLACK), Color(0xFF112233));
        assert_eq!(colors.get_original(ColorRole::Background, Color::BLACK), Color(0xFF112233));

        colors.ingest_palette(
            &WallpaperPalette::new(Color(0xFF112233))
                .secondary(Color(0xFF445566))
                .tertiary(Color(0xFF778899)),
        );
        assert_eq!(colors.get_original(ColorRole::Primary, Color::BLACK), Color(0xFF445566));
        assert_eq!(colors.get_original(ColorRole::Background, Color::BLACK), Color(0xFF778899));
    }

    #[test]
    fn test_mutate_white_background_without_seeds() {
        let mut colors = DynamicColors::new();
        colors.mutate(&Context::light());

        let dark_background = DynamicColors::get(colors.dark(), ColorRole::Background, Color::WHITE);
        assert!(relative_luminance(dark_background) < relative_luminance(Color::WHITE));

        let dark_accent = DynamicColors::get(colors.dark(), ColorRole::Accent, Color::BLACK);
        let light_accent = DynamicColors::get(colors.light(), ColorRole::Accent, Color::BLACK);
        assert_eq!(dark_accent, Color::WHITE);
        assert_eq!(light_accent, Color::WHITE);

        assert_eq!(colors.dark().get(&ColorRole::Surface), Some(&Resolvable::Auto));
        assert_eq!(colors.light().get(&ColorRole::Error), Some(&Resolvable::Auto));
    }

    #[test]
    fn test_mutate_keeps_accent_seed() {
        let mut colors = DynamicColors::new();
        colors
            .put(ColorRole::Background, Color(0xFF808080))
            .put(ColorRole::Primary, Color(0xFF3F51B5))
            .put(ColorRole::Accent, Color(0xFFE91E63));
        colors.mutate(&Context::light());

        assert_eq!(
            DynamicColors::get(colors.dark(), ColorRole::Accent, Color::BLACK),
            Color(0xFFE91E63)
        );
        assert_eq!(
            DynamicColors::get(colors.dark(), ColorRole::Primary, Color::BLACK),
            Color(0xFF3F51B5).darken(MUTATION_FACTOR)
        );
        assert_eq!(
            DynamicColors::get(colors.light(), ColorRole::Primary, Color::BLACK),
            Color(0xFF3F51B5).lighten(MUTATION_FACTOR)
        );
    }

    #[test]
    fn test_mutated_selection_flips_on_inverse() {
        let mut colors = DynamicColors::new();
        colors.put(ColorRole::Background, Color(0xFF808080));
        colors.mutate(&Context::light());

        let mut context = Context::light();
        assert_eq!(colors.mutated(&context), colors.light());
        context.inverse = true;
        assert_eq!(colors.mutated(&context), colors.dark());
        context.dark = true;
        assert_eq!(colors.mutated(&context), colors.light());
        context.inverse = false;
        assert_eq!(colors.mutated(&context), colors.dark());
    }

    #[test]
    fn test_all_colors_is_deduplicated() {
        let mut colors = DynamicColors::new();
        colors
            .put(ColorRole::Background, Color::WHITE)
            .put(ColorRole::Accent, Color::WHITE)
            .put(ColorRole::Primary, Resolvable::Auto);
        colors.mutate(&Context::light());

        let all = colors.all_colors();
        let mut deduped = all.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(all.len(), deduped.len());
        assert!(all.contains(&Color::WHITE));
        assert!(all.contains(&Color::WHITE.darken(MUTATION_FACTOR)));
    }

    #[test]
    fn test_clear() {
        let mut colors = DynamicColors::new();
        colors.put(ColorRole::Background, Color::WHITE);
        colors.mutate(&Context::light());
        colors.clear();
        assert!(colors.is_empty());
        assert!(colors.all_colors().is_empty());
    }
}
