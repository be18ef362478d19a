//! 2D code scanning
//!
//! Captured images vary a lot in contrast and lighting, so decoding runs
//! through a fixed sequence of binarization strategies and returns the first
//! one that yields a code.

use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use rxing::common::{GlobalHistogramBinarizer, HybridBinarizer};
use rxing::qrcode::QRCodeReader;
use rxing::{
    BinaryBitmap, DecodeHintValue, DecodeHints, Luma8LuminanceSource, LuminanceSource, Reader,
};
use tincture_theme::ThemeConfig;
use tracing::{debug, trace};

use crate::error::{CodeError, Result};

/// Character set of the code data
const CHARACTER_SET: &str = "UTF-8";

/// How luminance is turned into black and white
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Binarizer {
    /// Local thresholds from block statistics
    Hybrid,
    /// One threshold from the valley of the luminance histogram
    GlobalHistogram,
}

/// One decode attempt
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Strategy {
    pub binarizer: Binarizer,
    pub inverted: bool,
}

/// Decode attempts, in order
pub const STRATEGIES: [Strategy; 4] = [
    Strategy {
        binarizer: Binarizer::Hybrid,
        inverted: false,
    },
    Strategy {
        binarizer: Binarizer::GlobalHistogram,
        inverted: false,
    },
    Strategy {
        binarizer: Binarizer::Hybrid,
        inverted: true,
    },
    Strategy {
        binarizer: Binarizer::GlobalHistogram,
        inverted: true,
    },
];

impl Strategy {
    /// Decoded data from `source`, inverting it first when required
    pub fn decode(&self, mut source: Luma8LuminanceSource, hints: &DecodeHints) -> Option<String> {
        if self.inverted {
            source.invert();
        }

        let result = match self.binarizer {
            Binarizer::Hybrid => read(BinaryBitmap::new(HybridBinarizer::new(source)), hints),
            Binarizer::GlobalHistogram => {
                read(BinaryBitmap::new(GlobalHistogramBinarizer::new(source)), hints)
            }
        };

        match result {
            Ok(data) => Some(data),
            Err(err) => {
                trace!("No code with {:?}: {}", self, err);
                None
            }
        }
    }
}

fn read<B: rxing::Binarizer>(
    mut bitmap: BinaryBitmap<B>,
    hints: &DecodeHints,
) -> std::result::Result<String, rxing::Exceptions> {
    QRCodeReader::new()
        .decode_with_hints(&mut bitmap, hints)
        .map(|result| result.getText().to_string())
}

/// Hints shared by every attempt
pub fn decode_hints() -> DecodeHints {
    DecodeHints::default()
        .with(DecodeHintValue::TryHarder(true))
        .with(DecodeHintValue::CharacterSet(CHARACTER_SET.to_string()))
}

/// Greyscale working copy of a scanned image
#[derive(Clone, Debug, PartialEq)]
pub struct Luminance {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Luminance {
    /// Downsample `image` to fit `max_size` and flatten it onto white
    pub fn from_image(image: &RgbaImage, max_size: u32) -> Self {
        let (width, height) = image.dimensions();
        let resized;
        let image = if max_size > 0 && width.max(height) > max_size {
            let scale = max_size as f32 / width.max(height) as f32;
            let target_width = ((width as f32 * scale).round() as u32).max(1);
            let target_height = ((height as f32 * scale).round() as u32).max(1);
            trace!(
                "Downsampling {}x{} to {}x{}",
                width,
                height,
                target_width,
                target_height
            );
            resized = imageops::resize(image, target_width, target_height, FilterType::Triangle);
            &resized
        } else {
            image
        };

        let pixels = image
            .pixels()
            .map(|pixel| {
                let [r, g, b, a] = pixel.0;
                let luma = (306 * r as u32 + 601 * g as u32 + 117 * b as u32) >> 10;
                ((luma * a as u32 + 255 * (255 - a as u32)) / 255) as u8
            })
            .collect();

        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Source for the decoder
    pub fn into_source(self) -> Result<Luma8LuminanceSource> {
        Ok(Luma8LuminanceSource::new(
            self.pixels,
            self.width,
            self.height,
        )?)
    }
}

/// Recovers code data from images
#[derive(Clone, Debug, Default)]
pub struct CodeScanner {
    config: Arc<ThemeConfig>,
}

impl CodeScanner {
    pub fn new(config: impl Into<Arc<ThemeConfig>>) -> Self {
        Self {
            config: config.into(),
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Decoded data, or `None` if no strategy finds a code
    pub fn scan(&self, image: &RgbaImage) -> Option<String> {
        match self.try_scan(image) {
            Ok(data) => Some(data),
            Err(err) => {
                debug!("{}", err);
                None
            }
        }
    }

    pub fn try_scan(&self, image: &RgbaImage) -> Result<String> {
        if image.width() == 0 || image.height() == 0 {
            return Err(CodeError::NotFound);
        }

        let source = Luminance::from_image(image, self.config.scan_size).into_source()?;
        let hints = decode_hints();

        STRATEGIES
            .iter()
            .find_map(|strategy| {
                let data = strategy.decode(source.clone(), &hints)?;
                debug!("Code found with {:?}", strategy);
                Some(data)
            })
            .ok_or(CodeError::NotFound)
    }
}
