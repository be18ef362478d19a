//! Themed 2D code rendering
//!
//! A theme token is encoded as a QR matrix and drawn with the theme's
//! colors and corner style. Colors are pushed to a legible contrast against
//! the code background before drawing, so any theme yields a scannable code.

use std::sync::Arc;

use image::RgbaImage;
use qrcode::{Color as Module, EcLevel, QrCode};
use tincture_color::{contrast, Color, ColorGroup, ColorRole};
use tincture_theme::{
    Capability, ColorAttributes, CornerAttributes, ThemeCodec, ThemeConfig, ThemeRecord,
    TranslucentAttributes,
};
use tracing::{debug, warn};

use crate::error::{CodeError, Result};
use crate::raster::{Canvas, Circle, Paint, Rect};

/// Modules on a side of a finder pattern
pub const FINDER_SIZE: usize = 7;

/// Module scale for round and oval styles
const SCALE_DOWN: f32 = 21.0 / 30.0;

/// Width of the code card stroke, in dp
const STROKE_DP: f32 = 1.0;

/// Shape of the modules and finder patterns
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum CodeStyle {
    #[default]
    Square,
    Round,
    Oval,
}

impl CodeStyle {
    /// Style matching a corner radius given in dp
    pub fn from_corner_dp(corner_dp: f32, config: &ThemeConfig) -> Self {
        if corner_dp < config.corner_round_dp as f32 {
            Self::Square
        } else if corner_dp < config.corner_oval_dp as f32 {
            Self::Round
        } else {
            Self::Oval
        }
    }

    fn module_scale(self) -> f32 {
        match self {
            Self::Square => 1.0,
            Self::Round | Self::Oval => SCALE_DOWN,
        }
    }
}

/// Error correction for `data`.
///
/// Short data gets the highest level; long data the lowest, so the module
/// count stays readable.
pub fn error_correction(data: &str, config: &ThemeConfig) -> EcLevel {
    let length = data.chars().count();
    if length <= config.correction_high_max {
        EcLevel::H
    } else if length <= config.correction_medium_max {
        EcLevel::M
    } else {
        EcLevel::L
    }
}

/// Source of a code's data, colors and shape
pub trait CodeTheme {
    /// Data encoded when no explicit data is given
    fn code_data(&self) -> String;

    fn code_background_color(&self) -> Color {
        Color::WHITE
    }

    /// Stroke around the code card, if any
    fn code_stroke_color(&self) -> Option<Color> {
        None
    }

    fn code_data_color(&self) -> Color {
        Color::BLACK
    }

    /// Inner square of the finder patterns
    fn code_finder_color(&self) -> Color {
        self.code_data_color()
    }

    /// Tint applied to an overlay image, if any
    fn code_overlay_color(&self) -> Option<Color> {
        None
    }

    /// Requested contrast of code colors against the background
    fn code_contrast_ratio(&self) -> f64 {
        contrast::CODE_CONTRAST
    }

    fn code_style(&self) -> CodeStyle {
        CodeStyle::Square
    }

    /// Corner radius of the code card, in pixels
    fn code_corner_radius(&self) -> f32 {
        0.0
    }

    fn code_opacity(&self) -> u8 {
        0xFF
    }
}

impl CodeTheme for ThemeRecord {
    fn code_data(&self) -> String {
        ThemeCodec::new(self.shared_config()).to_short(self)
    }

    fn code_background_color(&self) -> Color {
        if self.supports_group(ColorGroup::Background) {
            self.resolved_color(ColorRole::Background, false)
        } else {
            Color::WHITE
        }
    }

    fn code_stroke_color(&self) -> Option<Color> {
        self.supports_group(ColorGroup::Background)
            .then(|| contrast::tint_of(self.code_background_color()).remove_alpha())
    }

    fn code_data_color(&self) -> Color {
        if self.supports_group(ColorGroup::Primary) {
            self.resolved_color(ColorRole::Primary, false)
        } else {
            Color::BLACK
        }
    }

    fn code_finder_color(&self) -> Color {
        if self.supports_group(ColorGroup::Accent) {
            self.resolved_color(ColorRole::Accent, false)
        } else {
            self.code_data_color()
        }
    }

    fn code_overlay_color(&self) -> Option<Color> {
        self.supports_group(ColorGroup::Background)
            .then(|| self.resolved_color(ColorRole::TintBackground, false))
    }

    fn code_contrast_ratio(&self) -> f64 {
        self.config().code_contrast
    }

    fn code_style(&self) -> CodeStyle {
        if self.supports(Capability::Corner) {
            CodeStyle::from_corner_dp(self.corner_size_dp(), self.config())
        } else {
            CodeStyle::Square
        }
    }

    fn code_corner_radius(&self) -> f32 {
        if self.supports(Capability::Corner) {
            self.corner_radius(true).unwrap_or(0) as f32
        } else {
            0.0
        }
    }

    fn code_opacity(&self) -> u8 {
        if self.supports(Capability::Translucent) {
            self.opacity(true).unwrap_or(0xFF)
        } else {
            0xFF
        }
    }
}

/// Code colors after contrast adjustment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CodeColors {
    pub background: Color,
    pub stroke: Option<Color>,
    pub data: Color,
    pub finder_outer: Color,
    pub finder_inner: Color,
    pub overlay: Option<Color>,
}

impl CodeColors {
    /// Resolve `theme` colors, enforcing at least `min_contrast` against the
    /// background on every foreground color
    pub fn resolve(theme: &dyn CodeTheme, min_contrast: f64) -> Self {
        let ratio = theme.code_contrast_ratio().max(min_contrast);
        let background = theme.code_background_color().remove_alpha();
        let legible =
            |color: Color| contrast::ensure_contrast(color, background, ratio).remove_alpha();
        let data = legible(theme.code_data_color());

        Self {
            background,
            stroke: theme.code_stroke_color(),
            data,
            finder_outer: data,
            finder_inner: legible(theme.code_finder_color()),
            overlay: theme.code_overlay_color().map(legible),
        }
    }
}

/// Pixel geometry of a rendered code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeLayout {
    /// Side of the output image
    pub size: u32,
    /// Side of a single module
    pub module: u32,
    /// Offset of the first module from the image edge
    pub padding: u32,
    /// Modules on a side of the matrix
    pub modules: u32,
}

impl CodeLayout {
    /// Fit a matrix of `modules` in the configured canvas, growing the canvas
    /// when `corner` would clip the quiet zone
    pub fn new(modules: u32, corner: f32, config: &ThemeConfig) -> Self {
        let natural = modules + config.quiet_zone * 2;
        let mut size = config.canvas_size.max(natural);
        let module = (size / natural).max(1);

        let start = (size - natural * module) / 2;
        if corner > start as f32 {
            size += (corner - start as f32).ceil() as u32;
        }

        Self {
            size,
            module,
            padding: (size - modules * module) / 2,
            modules,
        }
    }

    /// Cell of the module at column `x`, row `y`
    pub fn cell(&self, x: u32, y: u32) -> Rect {
        Rect::square(
            (self.padding + x * self.module) as f32,
            (self.padding + y * self.module) as f32,
            self.module as f32,
        )
    }

    /// Top-left, top-right and bottom-left finder pattern origins
    pub fn finders(&self) -> [Rect; 3] {
        let far = self.modules - FINDER_SIZE as u32;
        let side = (FINDER_SIZE as u32 * self.module) as f32;
        [(0, 0), (far, 0), (0, far)].map(|(x, y)| {
            let cell = self.cell(x, y);
            Rect::square(cell.x, cell.y, side)
        })
    }
}

/// Renders themed 2D codes
#[derive(Clone, Debug, Default)]
pub struct CodeRenderer {
    config: Arc<ThemeConfig>,
}

impl CodeRenderer {
    pub fn new(config: impl Into<Arc<ThemeConfig>>) -> Self {
        Self {
            config: config.into(),
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Render the theme's own token
    pub fn render_theme(
        &self,
        theme: &ThemeRecord,
        overlay: Option<&RgbaImage>,
    ) -> Option<RgbaImage> {
        self.render(theme, &theme.code_data(), overlay)
    }

    /// Render `data`, or `None` if it cannot be encoded
    pub fn render(
        &self,
        theme: &dyn CodeTheme,
        data: &str,
        overlay: Option<&RgbaImage>,
    ) -> Option<RgbaImage> {
        match self.try_render(theme, data, overlay) {
            Ok(image) => Some(image),
            Err(err) => {
                warn!("Code not rendered: {}", err);
                None
            }
        }
    }

    pub fn try_render(
        &self,
        theme: &dyn CodeTheme,
        data: &str,
        overlay: Option<&RgbaImage>,
    ) -> Result<RgbaImage> {
        if data.is_empty() {
            return Err(CodeError::EmptyData);
        }

        let level = error_correction(data, &self.config);
        let code = QrCode::with_error_correction_level(data.as_bytes(), level)?;
        let modules = code.width();
        let matrix = code.to_colors();
        let is_dark = |x: usize, y: usize| matrix[y * modules + x] == Module::Dark;

        let colors = CodeColors::resolve(theme, self.config.code_contrast);
        let style = theme.code_style();
        let corner = theme.code_corner_radius();
        let layout = CodeLayout::new(modules as u32, corner, &self.config);
        debug!(
            "Rendering {}x{} code ({:?}, {:?}) on {}px",
            modules, modules, level, style, layout.size
        );

        let mut canvas = Canvas::new(layout.size, layout.size);
        let bounds = canvas.bounds();
        canvas.fill_round_rect(
            bounds,
            corner,
            Paint::Fill(colors.background.with_alpha(theme.code_opacity())),
        );
        if let Some(stroke) = colors.stroke {
            let width = self.config.dp_to_px(STROKE_DP).max(1.0);
            canvas.stroke_round_rect(bounds, corner, width, stroke);
        }

        let overlay_modules = match overlay {
            Some(_) => (modules as f32 * self.config.overlay_factor) as usize,
            None => 0,
        };
        let center = modules / 2;
        let half = overlay_modules / 2;
        let in_overlay = |x: usize, y: usize| {
            overlay.is_some() && x.abs_diff(center) <= half && y.abs_diff(center) <= half
        };

        let mut layer = Canvas::new(layout.size, layout.size);
        let module = layout.module as f32;
        let data_size = module * style.module_scale();
        let inset = (module - data_size) / 2.0;
        let data = Paint::Fill(colors.data);

        for y in 0..modules {
            for x in 0..modules {
                if !is_dark(x, y) || in_finder(x, y, modules) || in_overlay(x, y) {
                    continue;
                }

                let cell = layout.cell(x as u32, y as u32);
                match style {
                    CodeStyle::Square => layer.fill_rect(cell, data),
                    CodeStyle::Round => {
                        layer.fill_round_rect(cell.inset(inset), data_size / 4.0, data)
                    }
                    CodeStyle::Oval => {
                        let (cx, cy) = cell.center();
                        layer.fill_circle(Circle::new(cx, cy, data_size / 2.0), data)
                    }
                }
            }
        }

        let finder_corner = match style {
            CodeStyle::Round => corner.min(FINDER_SIZE as f32 * module / 2.0),
            _ => 0.0,
        };
        for finder in layout.finders() {
            draw_finder(&mut layer, finder, &colors, style, finder_corner);
        }
        canvas.draw_canvas(&layer);

        if let Some(overlay) = overlay {
            let side = (overlay_modules as u32 * layout.module) as f32;
            let origin = layout.size as f32 / 2.0 - side / 2.0;
            canvas.draw_image(overlay, Rect::square(origin, origin, side), colors.overlay);
        }

        Ok(canvas.into_image())
    }
}

/// Whether a module belongs to a finder pattern or its separator
fn in_finder(x: usize, y: usize, modules: usize) -> bool {
    let near = |v: usize| v <= FINDER_SIZE;
    let far = |v: usize| v + FINDER_SIZE + 1 >= modules;
    (near(x) && near(y)) || (far(x) && near(y)) || (near(x) && far(y))
}

/// Outer shape, a cleared ring, then the inner shape
fn draw_finder(canvas: &mut Canvas, outer: Rect, colors: &CodeColors, style: CodeStyle, corner: f32) {
    let side = outer.width;
    let ring = outer.inset(side / 7.0);
    let inner = outer.inset(side * 2.0 / 7.0);
    let parent = Paint::Fill(colors.finder_outer);
    let child = Paint::Fill(colors.finder_inner);

    match style {
        CodeStyle::Oval => {
            let (cx, cy) = outer.center();
            canvas.fill_circle(Circle::new(cx, cy, side / 2.0), parent);
            canvas.fill_circle(Circle::new(cx, cy, ring.width / 2.0), Paint::Clear);
            canvas.fill_circle(Circle::new(cx, cy, inner.width / 2.0), child);
        }
        CodeStyle::Round | CodeStyle::Square => {
            canvas.fill_round_rect(outer, corner, parent);
            canvas.fill_round_rect(ring, corner, Paint::Clear);
            canvas.fill_round_rect(inner, corner, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl CodeTheme for Plain {
        fn code_data(&self) -> String {
            "plain".to_string()
        }
    }

    #[test]
    fn test_style_thresholds() {
        let config = ThemeConfig::default();
        assert_eq!(CodeStyle::from_corner_dp(2.0, &config), CodeStyle::Square);
        assert_eq!(CodeStyle::from_corner_dp(8.0, &config), CodeStyle::Round);
        assert_eq!(CodeStyle::from_corner_dp(15.9, &config), CodeStyle::Round);
        assert_eq!(CodeStyle::from_corner_dp(16.0, &config), CodeStyle::Oval);
    }

    #[test]
    fn test_error_correction_bands() {
        let config = ThemeConfig::default();
        assert_eq!(error_correction(&"a".repeat(75), &config), EcLevel::H);
        assert_eq!(error_correction(&"a".repeat(76), &config), EcLevel::M);
        assert_eq!(error_correction(&"a".repeat(150), &config), EcLevel::M);
        assert_eq!(error_correction(&"a".repeat(151), &config), EcLevel::L);
    }

    #[test]
    fn test_layout_fits_canvas() {
        let config = ThemeConfig::default();
        let layout = CodeLayout::new(33, 0.0, &config);
        assert_eq!(layout.size, 480);
        assert_eq!(layout.module, 480 / 37);
        assert!(layout.padding >= config.quiet_zone * layout.module);
        assert!(layout.padding + 33 * layout.module <= layout.size);
    }

    #[test]
    fn test_layout_grows_for_corner() {
        let config = ThemeConfig::default();
        let plain = CodeLayout::new(33, 0.0, &config);
        let rounded = CodeLayout::new(33, 64.0, &config);
        assert!(rounded.size > plain.size);
        assert_eq!(rounded.module, plain.module);
    }

    #[test]
    fn test_finder_exclusion() {
        assert!(in_finder(0, 0, 25));
        assert!(in_finder(7, 7, 25));
        assert!(in_finder(24, 0, 25));
        assert!(in_finder(17, 7, 25));
        assert!(in_finder(0, 24, 25));
        assert!(!in_finder(24, 24, 25));
        assert!(!in_finder(12, 12, 25));
        assert!(!in_finder(8, 0, 25));
    }

    #[test]
    fn test_colors_are_made_legible() {
        struct Faint;
        impl CodeTheme for Faint {
            fn code_data(&self) -> String {
                String::new()
            }
            fn code_data_color(&self) -> Color {
                Color(0xFFF0F0F0)
            }
        }

        let colors = CodeColors::resolve(&Faint, 3.0);
        assert!(contrast::contrast_ratio(colors.data, colors.background) >= 3.0);
        assert_eq!(colors.finder_outer, colors.data);
        assert_eq!(colors.background, Color::WHITE);
    }

    #[test]
    fn test_empty_data() {
        let renderer = CodeRenderer::default();
        assert!(matches!(
            renderer.try_render(&Plain, "", None),
            Err(CodeError::EmptyData)
        ));
        assert!(renderer.render(&Plain, "", None).is_none());
    }

    #[test]
    fn test_capacity_overflow_yields_none() {
        let renderer = CodeRenderer::default();
        let data = "x".repeat(4000);
        assert!(matches!(
            renderer.try_render(&Plain, &data, None),
            Err(CodeError::Encode(_))
        ));
        assert!(renderer.render(&Plain, &data, None).is_none());
    }

    #[test]
    fn test_theme_defaults() {
        let theme = ThemeRecord::new();
        assert_eq!(theme.code_style(), CodeStyle::Square);
        assert_eq!(theme.code_background_color(), theme.background_color());
        assert_eq!(theme.code_data_color(), theme.primary_color());
        assert_eq!(theme.code_finder_color(), theme.accent_color());
        assert!(theme.code_stroke_color().is_some());
        assert!(!theme.code_data().is_empty());
    }
}
