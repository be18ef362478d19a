//! CPU raster surface
//!
//! Just enough 2D drawing for code rendering: rectangles, rounded rectangles
//! and circles with hard edges, plus image compositing. Pixels are covered
//! when their center falls inside a shape, which keeps module edges crisp
//! for the scanner.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tincture_color::Color;

/// A rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn square(x: f32, y: f32, side: f32) -> Self {
        Self::new(x, y, side, side)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrink every side by `amount`
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - amount * 2.0).max(0.0),
            (self.height - amount * 2.0).max(0.0),
        )
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Containment with every corner rounded by `radius`
    pub fn contains_rounded(&self, x: f32, y: f32, radius: f32) -> bool {
        if !self.contains(x, y) {
            return false;
        }

        let radius = radius.clamp(0.0, self.width.min(self.height) / 2.0);
        if radius <= 0.0 {
            return true;
        }

        let dx = (self.x + radius - x).max(x - (self.right() - radius)).max(0.0);
        let dy = (self.y + radius - y).max(y - (self.bottom() - radius)).max(0.0);
        dx * dx + dy * dy <= radius * radius
    }
}

/// A circle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

impl Circle {
    pub const fn new(cx: f32, cy: f32, radius: f32) -> Self {
        Self { cx, cy, radius }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(
            self.cx - self.radius,
            self.cy - self.radius,
            self.radius * 2.0,
        )
    }
}

/// How a shape writes the pixels it covers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    /// Source-over with the given color
    Fill(Color),
    /// Reset to fully transparent
    Clear,
}

impl Paint {
    fn apply(self, dst: Rgba<u8>) -> Rgba<u8> {
        match self {
            Paint::Fill(color) => blend(dst, color),
            Paint::Clear => Rgba([0; 4]),
        }
    }
}

/// An RGBA drawing surface
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Color at a pixel, or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width() && y < self.height())
            .then(|| Color::from_rgba8(self.image.get_pixel(x, y).0))
    }

    pub fn fill(&mut self, paint: Paint) {
        for pixel in self.image.pixels_mut() {
            *pixel = paint.apply(*pixel);
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.fill_shape(rect, paint, |x, y| rect.contains(x, y));
    }

    pub fn fill_round_rect(&mut self, rect: Rect, radius: f32, paint: Paint) {
        self.fill_shape(rect, paint, |x, y| rect.contains_rounded(x, y, radius));
    }

    pub fn fill_circle(&mut self, circle: Circle, paint: Paint) {
        self.fill_shape(circle.bounds(), paint, |x, y| circle.contains(x, y));
    }

    /// Ring of `width` along the inside edge of a rounded rectangle
    pub fn stroke_round_rect(&mut self, rect: Rect, radius: f32, width: f32, color: Color) {
        let inner = rect.inset(width);
        let inner_radius = (radius - width).max(0.0);
        self.fill_shape(rect, Paint::Fill(color), |x, y| {
            rect.contains_rounded(x, y, radius) && !inner.contains_rounded(x, y, inner_radius)
        });
    }

    /// Composite a surface of the same size over this one
    pub fn draw_canvas(&mut self, layer: &Canvas) {
        for (dst, src) in self.image.pixels_mut().zip(layer.image.pixels()) {
            *dst = blend(*dst, Color::from_rgba8(src.0));
        }
    }

    /// Composite `image` scaled into `rect`.
    ///
    /// With a tint, every source pixel takes the tint color and keeps its own
    /// coverage (source-atop of the tint onto the image).
    pub fn draw_image(&mut self, image: &RgbaImage, rect: Rect, tint: Option<Color>) {
        let width = rect.width.round().max(1.0) as u32;
        let height = rect.height.round().max(1.0) as u32;
        let scaled = if (width, height) == image.dimensions() {
            image.clone()
        } else {
            imageops::resize(image, width, height, FilterType::Triangle)
        };

        let left = rect.x.round() as i64;
        let top = rect.y.round() as i64;
        for (x, y, pixel) in scaled.enumerate_pixels() {
            let (tx, ty) = (left + x as i64, top + y as i64);
            if tx < 0 || ty < 0 || tx >= self.width() as i64 || ty >= self.height() as i64 {
                continue;
            }

            let source = Color::from_rgba8(pixel.0);
            let source = match tint {
                Some(tint) => {
                    let alpha = source.alpha() as u32 * tint.alpha() as u32 / 255;
                    tint.with_alpha(alpha as u8)
                }
                None => source,
            };

            let dst = self.image.get_pixel_mut(tx as u32, ty as u32);
            *dst = blend(*dst, source);
        }
    }

    fn fill_shape(&mut self, bounds: Rect, paint: Paint, contains: impl Fn(f32, f32) -> bool) {
        let x0 = bounds.x.floor().max(0.0) as u32;
        let y0 = bounds.y.floor().max(0.0) as u32;
        let x1 = (bounds.right().ceil().max(0.0) as u32).min(self.width());
        let y1 = (bounds.bottom().ceil().max(0.0) as u32).min(self.height());

        for y in y0..y1 {
            for x in x0..x1 {
                if contains(x as f32 + 0.5, y as f32 + 0.5) {
                    let pixel = self.image.get_pixel_mut(x, y);
                    *pixel = paint.apply(*pixel);
                }
            }
        }
    }
}

/// Source-over with straight alpha
fn blend(dst: Rgba<u8>, src: Color) -> Rgba<u8> {
    let src_alpha = src.alpha() as f32 / 255.0;
    if src.alpha() == 0xFF {
        return Rgba(src.to_rgba8());
    }
    if src.alpha() == 0 {
        return dst;
    }

    let [dr, dg, db, da] = dst.0;
    let dst_alpha = da as f32 / 255.0 * (1.0 - src_alpha);
    let out_alpha = src_alpha + dst_alpha;
    let channel =
        |s: u8, d: u8| ((s as f32 * src_alpha + d as f32 * dst_alpha) / out_alpha).round() as u8;

    Rgba([
        channel(src.red(), dr),
        channel(src.green(), dg),
        channel(src.blue(), db),
        (out_alpha * 255.0).round() as u8,
    ])
}
