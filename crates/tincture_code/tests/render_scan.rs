use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tincture_code::{CodeColors, CodeLayout, CodeRenderer, CodeScanner, CodeStyle, CodeTheme, FINDER_SIZE};
use tincture_color::{Color, ColorRole, Resolvable};
use tincture_theme::{
    ColorAttributes, FontAttributes, ThemeCodec, ThemeConfig, ThemeRecord, TranslucentAttributes,
};

const TOKEN_40: &str = "0vXFF112233-4vXFF3F51B5-8vXFFE91E63-20vA";

/// Dark modules of a finder-sized square at `(x, y)`, sampled at module
/// centers
fn finder_signature(image: &RgbaImage, x: u32, y: u32, module: u32) -> Vec<bool> {
    let side = FINDER_SIZE as u32;
    (0..side * side)
        .map(|i| {
            let (column, row) = (i % side, i / side);
            let pixel = image.get_pixel(
                x + column * module + module / 2,
                y + row * module + module / 2,
            );
            let [r, g, b, _] = pixel.0;
            (r as u32 + g as u32 + b as u32) / 3 < 128
        })
        .collect()
}

/// Dark border ring around a dark 3x3 center
fn finder_pattern() -> Vec<bool> {
    let side = FINDER_SIZE as u32;
    (0..side * side)
        .map(|i| {
            let (column, row) = (i % side, i / side);
            let border = column == 0 || row == 0 || column == side - 1 || row == side - 1;
            let center = (2..=4).contains(&column) && (2..=4).contains(&row);
            border || center
        })
        .collect()
}

fn renderer() -> CodeRenderer {
    CodeRenderer::new(ThemeConfig::default())
}

#[test]
fn square_code_has_three_finders() {
    assert_eq!(TOKEN_40.len(), 40);
    let mut theme = ThemeRecord::new();
    theme
        .set_background_color(Color::WHITE, true)
        .set_primary_color(Color::BLACK, true)
        .set_accent_color(Color::BLACK, true);
    assert_eq!(theme.code_style(), CodeStyle::Square);

    let image = renderer().try_render(&theme, TOKEN_40, None).unwrap();
    assert_eq!(image.width(), image.height());
    assert!(image.width() >= ThemeConfig::default().canvas_size);

    let modules = qrcode::QrCode::with_error_correction_level(TOKEN_40, qrcode::EcLevel::H)
        .unwrap()
        .width() as u32;
    let layout = CodeLayout::new(modules, 2.0, &ThemeConfig::default());
    assert_eq!(layout.size, image.width());

    let expected = finder_pattern();
    let far = layout.padding + (modules - FINDER_SIZE as u32) * layout.module;
    let near = layout.padding;
    assert_eq!(finder_signature(&image, near, near, layout.module), expected);
    assert_eq!(finder_signature(&image, far, near, layout.module), expected);
    assert_eq!(finder_signature(&image, near, far, layout.module), expected);
    assert_ne!(finder_signature(&image, far, far, layout.module), expected);
}

#[test]
fn render_then_scan_recovers_token() {
    let theme = ThemeRecord::new();
    let image = renderer().try_render(&theme, TOKEN_40, None).unwrap();
    assert_eq!(CodeScanner::default().scan(&image).as_deref(), Some(TOKEN_40));
}

#[test]
fn theme_code_decodes_to_same_theme() {
    let mut theme = ThemeRecord::new();
    theme
        .set_background_color(Color(0xFFFAFAFA), true)
        .set_primary_color(Color(0xFF1565C0), true)
        .set_accent_color(Color(0xFFAD1457), true);

    let image = renderer().render_theme(&theme, None).unwrap();
    let token = CodeScanner::default().try_scan(&image).unwrap();
    let decoded = ThemeCodec::default().try_decode(&token).unwrap();
    assert_eq!(decoded, theme);
}

#[test]
fn dark_theme_code_scans_inverted() {
    let mut theme = ThemeRecord::new();
    theme
        .set_background_color(Color(0xFF121212), true)
        .set_primary_color(Color(0xFFE0E0E0), true)
        .set_accent_color(Color(0xFFE0E0E0), true);

    let image = renderer().try_render(&theme, TOKEN_40, None).unwrap();
    assert_eq!(CodeScanner::default().scan(&image).as_deref(), Some(TOKEN_40));
}

#[test]
fn large_image_is_downsampled_before_scanning() {
    let theme = ThemeRecord::new();
    let config = ThemeConfig {
        canvas_size: 960,
        ..ThemeConfig::default()
    };
    let image = CodeRenderer::new(config)
        .try_render(&theme, TOKEN_40, None)
        .unwrap();
    assert!(image.width() >= 960);
    assert_eq!(CodeScanner::default().scan(&image).as_deref(), Some(TOKEN_40));
}

/// Theme with every color role set, so its token needs the lowest error
/// correction
fn full_theme() -> ThemeRecord {
    let mut theme = ThemeRecord::new();
    for (index, role) in ColorRole::ALL.into_iter().enumerate() {
        let rgb = (index as u32 + 1).wrapping_mul(0x0B1D2F) & 0x00FF_FFFF;
        theme.set_color(role, Resolvable::Value(Color(0xFF00_0000 | rgb)), false);
    }
    theme.set_background_color(Color(0xFFF5F5F5), false);
    theme.set_font_scale(Resolvable::Value(110));
    theme.set_opacity(Resolvable::Value(230));
    theme
}

fn styled(theme: &ThemeRecord, corner_dp: u32) -> ThemeRecord {
    let mut theme = theme.clone();
    theme.set_corner_radius_dp(Resolvable::Value(corner_dp));
    theme
}

fn icon() -> RgbaImage {
    RgbaImage::from_fn(24, 24, |x, y| {
        let alpha = if (4..20).contains(&x) && (4..20).contains(&y) { 255 } else { 0 };
        Rgba([0, 200, 0, alpha])
    })
}

#[test]
fn every_style_scans_back() {
    let config = ThemeConfig::default();
    let full = full_theme();
    let long_token = ThemeCodec::default().to_short(&full);
    assert!(long_token.len() > config.correction_medium_max);

    for (corner_dp, style) in [
        (2, CodeStyle::Square),
        (10, CodeStyle::Round),
        (24, CodeStyle::Oval),
    ] {
        for (base, token) in [(ThemeRecord::new(), TOKEN_40), (full.clone(), long_token.as_str())] {
            let theme = styled(&base, corner_dp);
            assert_eq!(theme.code_style(), style);

            for overlay in [None, Some(icon())] {
                let image = renderer().try_render(&theme, token, overlay.as_ref()).unwrap();
                assert_eq!(image.width(), image.height());
                assert_eq!(
                    CodeScanner::default().scan(&image).as_deref(),
                    Some(token),
                    "{:?} with overlay {}",
                    style,
                    overlay.is_some()
                );
            }
        }
    }
}

#[test]
fn rounded_styles_clip_card_corners() {
    for corner_dp in [10, 24] {
        let theme = styled(&ThemeRecord::new(), corner_dp);
        let image = renderer().try_render(&theme, TOKEN_40, None).unwrap();
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn any_token_renders_and_scans(
        token in "[0-9A-Za-z-]{1,120}",
        corner_dp in 0u32..=28,
    ) {
        let theme = styled(&ThemeRecord::new(), corner_dp);
        let image = renderer().try_render(&theme, &token, None).unwrap();
        prop_assert_eq!(CodeScanner::default().scan(&image), Some(token));
    }
}

#[test]
fn overlay_is_tinted_into_center() {
    let mut theme = ThemeRecord::new();
    theme.set_background_color(Color::WHITE, true);
    let icon = RgbaImage::from_pixel(16, 16, Rgba([0, 200, 0, 255]));

    let image = renderer()
        .try_render(&theme, TOKEN_40, Some(&icon))
        .unwrap();
    let center = image.width() / 2;
    let colors = CodeColors::resolve(&theme, ThemeConfig::default().code_contrast);
    assert_eq!(
        Color::from_rgba8(image.get_pixel(center, center).0),
        colors.overlay.unwrap()
    );
}
