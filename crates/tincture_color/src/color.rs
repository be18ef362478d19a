//! ARGB color type and conversions

use std::fmt;
use std::str::FromStr;

use crate::error::ParseColorError;

/// 32-bit color packed as `0xAARRGGBB`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const TRANSPARENT: Color = Color(0x0000_0000);

    /// Create from a packed `0xAARRGGBB` value
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Create an opaque color from u8 components (0-255)
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb8(0xFF, r, g, b)
    }

    /// Create from u8 components (0-255)
    pub const fn from_argb8(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Packed `0xAARRGGBB` value
    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Set alpha and return new color
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | ((alpha as u32) << 24))
    }

    /// Same color at full opacity
    pub const fn remove_alpha(self) -> Self {
        self.with_alpha(0xFF)
    }

    /// Whether the color carries any transparency
    pub const fn is_translucent(self) -> bool {
        self.alpha() < 0xFF
    }

    /// Convert to u8 array [r, g, b, a]
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Create from u8 array [r, g, b, a]
    pub const fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::from_argb8(rgba[3], rgba[0], rgba[1], rgba[2])
    }

    /// Hue (degrees), saturation and lightness (0.0 to 1.0), ignoring alpha
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let r = self.red() as f32 / 255.0;
        let g = self.green() as f32 / 255.0;
        let b = self.blue() as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d == 0.0 {
            return (0.0, 0.0, l);
        }

        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        (h * 60.0, s, l)
    }

    /// Create from hue (degrees), saturation and lightness (0.0 to 1.0)
    pub fn from_hsl(h: f32, s: f32, l: f32, alpha: u8) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

        Self::from_argb8(alpha, channel(r), channel(g), channel(b))
    }

    /// Scale lightness down by `factor` (0.0 to 1.0), keeping hue and saturation
    pub fn darken(self, factor: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, l * factor.clamp(0.0, 1.0), self.alpha())
    }

    /// Move lightness toward white by `1.0 - factor`, keeping hue and saturation
    pub fn lighten(self, factor: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        let factor = factor.clamp(0.0, 1.0);
        Self::from_hsl(h, s, l + (1.0 - l) * (1.0 - factor), self.alpha())
    }

    /// Linear interpolation between two colors, per channel
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::from_argb8(
            mix(self.alpha(), other.alpha()),
            mix(self.red(), other.red()),
            mix(self.green(), other.green()),
            mix(self.blue(), other.blue()),
        )
    }

    /// `#AARRGGBB` string
    pub fn to_hex_string(self) -> String {
        format!("#{:08X}", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Parses `#RRGGBB` (opaque) or `#AARRGGBB`
impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError::MissingHash(s.to_string()))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigits(s.to_string()));
        }

        let opaque = match hex.len() {
            6 => true,
            8 => false,
            len => {
                return Err(ParseColorError::InvalidLength {
                    literal: s.to_string(),
                    len,
                })
            }
        };

        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ParseColorError::InvalidDigits(s.to_string()))?;
        Ok(if opaque { Self(0xFF00_0000 | value) } else { Self(value) })
    }
}
