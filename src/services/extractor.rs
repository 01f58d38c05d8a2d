//! Seeding a palette from the dominant colors of an image.
//!
//! Decoding is delegated to the `image` crate; the extractor itself only
//! looks at a flat RGBA8 buffer.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::constants::DEFAULT_SAMPLE_EVERY;
use crate::models::RgbColor;

const BYTES_PER_PIXEL: usize = 4;

/// Decoded RGBA8 pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long
    pub pixels: Vec<u8>,
}

/// Decodes an image file (PNG, JPEG or GIF) into RGBA8 pixels.
pub fn decode_image(path: &Path) -> Result<DecodedImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode image: {}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    debug!(width, height, path = %path.display(), "decoded image");

    Ok(DecodedImage {
        width,
        height,
        pixels: image.into_raw(),
    })
}

/// Ranks sampled pixel colors by frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageColorExtractor {
    sample_every: usize,
}

impl Default for ImageColorExtractor {
    fn default() -> Self {
        Self {
            sample_every: DEFAULT_SAMPLE_EVERY,
        }
    }
}

impl ImageColorExtractor {
    /// Extractor sampling one pixel out of every `sample_every` (minimum 1).
    #[must_use]
    pub fn with_sample_every(sample_every: usize) -> Self {
        Self {
            sample_every: sample_every.max(1),
        }
    }

    /// Sampling step in pixels.
    #[must_use]
    pub const fn sample_every(&self) -> usize {
        self.sample_every
    }

    /// Returns up to `count` of the most frequent sampled colors.
    ///
    /// Colors are bucketed by exact RGB value; alpha is ignored. Equal counts
    /// keep the order in which the colors were first sampled. Images with
    /// fewer distinct sampled colors than `count` give a shorter list.
    #[must_use]
    pub fn extract(&self, pixels: &[u8], count: usize) -> Vec<RgbColor> {
        let stride = self.sample_every * BYTES_PER_PIXEL;
        let mut buckets: Vec<(RgbColor, usize)> = Vec::new();
        let mut positions: HashMap<RgbColor, usize> = HashMap::new();

        for pixel in pixels.chunks(stride) {
            let [r, g, b, ..] = pixel else {
                continue;
            };
            let color = RgbColor::new(*r, *g, *b);
            match positions.get(&color) {
                Some(&slot) => buckets[slot].1 += 1,
                None => {
                    positions.insert(color, buckets.len());
                    buckets.push((color, 1));
                }
            }
        }

        // Stable sort keeps first-appearance order among ties
        buckets.sort_by(|a, b| b.1.cmp(&a.1));
        debug!(
            distinct = buckets.len(),
            requested = count,
            sample_every = self.sample_every,
            "ranked image colors"
        );

        buckets
            .into_iter()
            .take(count)
            .map(|(color, _)| color)
            .collect()
    }

    /// Extracts colors from a decoded image.
    #[must_use]
    pub fn extract_image(&self, image: &DecodedImage, count: usize) -> Vec<RgbColor> {
        self.extract(&image.pixels, count)
    }
}
