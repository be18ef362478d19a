//! Contrast math for legible tints, text colors and code modules.
//!
//! Legibility is measured with the WCAG 2.1 contrast ratio on opaque sRGB
//! colors. Adjustments move HSL lightness only, so a tint keeps the hue of the
//! color it was derived from whenever a hue-preserving shade is legible.

use crate::color::Color;

/// Minimum contrast ratio for generated tint colors (WCAG AA normal text)
pub const TINT_CONTRAST: f64 = 4.5;

/// Minimum contrast ratio for 2D code colors against the code background
pub const CODE_CONTRAST: f64 = 3.0;

/// Text color used on dark surfaces
pub const NEAR_WHITE: Color = Color(0xFFFAFAFA);

/// Text color used on light surfaces
pub const NEAR_BLACK: Color = Color(0xFF212121);

fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG 2.1, in [0.0, 1.0]. Alpha is ignored.
pub fn relative_luminance(color: Color) -> f64 {
    let r = srgb_to_linear(color.red());
    let g = srgb_to_linear(color.green());
    let b = srgb_to_linear(color.blue());
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

/// WCAG 2.1 contrast ratio in [1.0, 21.0], independent of argument order
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether light content reads better than dark content on this color
pub fn is_dark(color: Color) -> bool {
    contrast_ratio(color, Color::WHITE) > contrast_ratio(color, Color::BLACK)
}

/// Adjust `fg` lightness until it reaches `min_ratio` against `bg`.
///
/// Searches toward whichever extreme (white or black) contrasts more with
/// `bg`; when no shade of `fg` qualifies the extreme itself is returned. The
/// alpha of `fg` is preserved.
pub fn ensure_contrast(fg: Color, bg: Color, min_ratio: f64) -> Color {
    let bg = bg.remove_alpha();
    let opaque = fg.remove_alpha();
    if contrast_ratio(opaque, bg) >= min_ratio {
        return fg;
    }

    let toward_light = contrast_ratio(Color::WHITE, bg) >= contrast_ratio(Color::BLACK, bg);
    let (h, s, l) = opaque.to_hsl();
    let (mut lo, mut hi) = if toward_light { (l, 1.0) } else { (0.0, l) };
    let mut best = if toward_light {
        Color::WHITE
    } else {
        Color::BLACK
    };

    for _ in 0..24 {
        let mid = (lo + hi) * 0.5;
        let candidate = Color::from_hsl(h, s, mid, 0xFF);
        if contrast_ratio(candidate, bg) >= min_ratio {
            best = candidate;
            // Stay as close to the original lightness as possible.
            if toward_light {
                hi = mid;
            } else {
                lo = mid;
            }
        } else if toward_light {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    best.with_alpha(fg.alpha())
}

/// Default tint for `color`: an opaque shade of the same hue that reads
/// against it with at least [`TINT_CONTRAST`].
pub fn tint_of(color: Color) -> Color {
    tint_with_contrast(color, TINT_CONTRAST)
}

/// Tint for `color` with a caller-chosen minimum contrast
pub fn tint_with_contrast(color: Color, min_ratio: f64) -> Color {
    let base = color.remove_alpha();
    ensure_contrast(base, base, min_ratio).remove_alpha()
}

/// Near-black or near-white text color, whichever is more legible on `color`
pub fn inverse_of(color: Color) -> Color {
    let color = color.remove_alpha();
    if contrast_ratio(NEAR_WHITE, color) >= contrast_ratio(NEAR_BLACK, color) {
        NEAR_WHITE
    } else {
        NEAR_BLACK
    }
}
