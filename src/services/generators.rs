//! Palette generation strategies.
//!
//! Independent-slot modes draw each color on its own. Coherent-batch modes
//! (analogous, complementary, triadic) pick one random base hue and derive
//! every slot from it. All randomness flows through [`RandomSource`] so tests
//! can supply fixed sequences.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use rand::rngs::{StdRng, ThreadRng};
use rand::Rng;

use crate::models::{hsl_to_rgb, GenerationMode, RgbColor};

/// Source of uniformly distributed floats in `[0, 1)`.
pub trait RandomSource {
    /// Next float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform float in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    fn index(&mut self, bound: usize) -> usize {
        ((self.next_f64() * bound as f64) as usize).min(bound.saturating_sub(1))
    }
}

impl RandomSource for StdRng {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl RandomSource for ThreadRng {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Deterministic source that cycles through a fixed list of values.
///
/// Values are clamped into `[0, 1)`. An empty list always yields 0.0.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Creates a source cycling through `values`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Saturation and lightness ranges (percent, half-open) for an HSL draw.
struct Ranges {
    saturation: (f64, f64),
    lightness: (f64, f64),
}

const PASTEL: Ranges = Ranges {
    saturation: (25.0, 50.0),
    lightness: (75.0, 90.0),
};
const VIBRANT: Ranges = Ranges {
    saturation: (70.0, 100.0),
    lightness: (45.0, 60.0),
};
const DARK: Ranges = Ranges {
    saturation: (20.0, 60.0),
    lightness: (15.0, 35.0),
};
const MONOCHROME: Ranges = Ranges {
    saturation: (10.0, 40.0),
    lightness: (20.0, 80.0),
};
const ANALOGOUS: Ranges = Ranges {
    saturation: (50.0, 80.0),
    lightness: (45.0, 65.0),
};
const COMPLEMENTARY: Ranges = Ranges {
    saturation: (50.0, 80.0),
    lightness: (40.0, 70.0),
};
const TRIADIC: Ranges = Ranges {
    saturation: (50.0, 80.0),
    lightness: (45.0, 65.0),
};

fn draw_with_hue<R: RandomSource + ?Sized>(hue: f64, ranges: &Ranges, rng: &mut R) -> RgbColor {
    let s = rng.uniform(ranges.saturation.0, ranges.saturation.1);
    let l = rng.uniform(ranges.lightness.0, ranges.lightness.1);
    hsl_to_rgb(hue, s, l)
}

fn draw_hsl<R: RandomSource + ?Sized>(ranges: &Ranges, rng: &mut R) -> RgbColor {
    let hue = rng.uniform(0.0, 360.0);
    draw_with_hue(hue, ranges, rng)
}

/// Six independent random hex digits.
pub fn random_color<R: RandomSource + ?Sized>(rng: &mut R) -> RgbColor {
    let value = (0..6).fold(0u32, |acc, _| (acc << 4) | rng.index(16) as u32);
    RgbColor::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

/// Hue of slot `index` in a coherent batch built on `base`.
#[must_use]
pub fn harmony_hue(mode: GenerationMode, base: f64, index: usize) -> f64 {
    let offset = match mode {
        GenerationMode::Analogous => 30.0 * index as f64,
        GenerationMode::Complementary => {
            if index % 2 == 0 {
                0.0
            } else {
                180.0
            }
        }
        GenerationMode::Triadic => 120.0 * index as f64,
        _ => 0.0,
    };
    (base + offset).rem_euclid(360.0)
}

const fn harmony_ranges(mode: GenerationMode) -> &'static Ranges {
    match mode {
        GenerationMode::Complementary => &COMPLEMENTARY,
        GenerationMode::Triadic => &TRIADIC,
        _ => &ANALOGOUS,
    }
}

/// Draws one color for `mode`.
///
/// For coherent-batch modes this is a batch of one: a fresh base hue with
/// the mode's saturation and lightness ranges.
pub fn generate_color<R: RandomSource + ?Sized>(mode: GenerationMode, rng: &mut R) -> RgbColor {
    match mode {
        GenerationMode::Random => random_color(rng),
        GenerationMode::Pastel => draw_hsl(&PASTEL, rng),
        GenerationMode::Vibrant => draw_hsl(&VIBRANT, rng),
        GenerationMode::Dark => draw_hsl(&DARK, rng),
        // Each call picks its own base hue, so slots do not share one
        GenerationMode::Monochrome => draw_hsl(&MONOCHROME, rng),
        GenerationMode::Analogous | GenerationMode::Complementary | GenerationMode::Triadic => {
            draw_hsl(harmony_ranges(mode), rng)
        }
    }
}

/// Generates `count` colors for `mode`.
///
/// Independent-slot modes make `count` separate draws. Coherent-batch modes
/// draw one base hue, then per-slot saturation and lightness.
pub fn generate_batch<R: RandomSource + ?Sized>(
    mode: GenerationMode,
    count: usize,
    rng: &mut R,
) -> Vec<RgbColor> {
    if !mode.is_coherent_batch() {
        return (0..count).map(|_| generate_color(mode, rng)).collect();
    }

    let base = rng.uniform(0.0, 360.0);
    let ranges = harmony_ranges(mode);
    (0..count)
        .map(|i| draw_with_hue(harmony_hue(mode, base, i), ranges, rng))
        .collect()
}
