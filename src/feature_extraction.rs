// src/feature_extraction.rs - Colour statistics the diagnosis cascades run on

use image::RgbImage;
use serde::Serialize;

use crate::errors::{AgroLeafError, Result};
use crate::image_utils::{is_bright, is_brown, is_dark, is_green, is_orange, is_red, is_yellow};

/// Scalar colour summary of one analysed raster
///
/// Means and standard deviations are per channel over all pixels (population
/// statistics). The `*_ratio` occupancy fields are fractions of the total
/// pixel count in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorFeatures {
    pub r_mean: f64,
    pub g_mean: f64,
    pub b_mean: f64,
    pub r_std: f64,
    pub g_std: f64,
    pub b_std: f64,

    /// r_mean / (g_mean + 1)
    pub rg_ratio: f64,
    /// r_mean / (b_mean + 1)
    pub rb_ratio: f64,
    /// g_mean / (b_mean + 1)
    pub gb_ratio: f64,
    /// Mean of the three channel standard deviations
    pub total_std: f64,

    pub bright_ratio: f64,
    pub dark_ratio: f64,
    pub red_ratio: f64,
    pub orange_ratio: f64,
    pub yellow_ratio: f64,
    pub green_ratio: f64,
    pub brown_ratio: f64,
}

#[derive(Default)]
struct ChannelAccumulator {
    sum: f64,
    sum_sq: f64,
}

impl ChannelAccumulator {
    #[inline]
    fn push(&mut self, value: u8) {
        let v = value as f64;
        self.sum += v;
        self.sum_sq += v * v;
    }

    fn mean_std(&self, n: f64) -> (f64, f64) {
        let mean = self.sum / n;
        // Clamp tiny negative variances produced by rounding on uniform images
        let variance = (self.sum_sq / n - mean * mean).max(0.0);
        (mean, variance.sqrt())
    }
}

/// Compute the colour features of an already-resized raster
pub fn extract_features(image: &RgbImage) -> Result<ColorFeatures> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AgroLeafError::EmptyImage { width, height });
    }

    let mut channels: [ChannelAccumulator; 3] = Default::default();
    let mut bright = 0u64;
    let mut dark = 0u64;
    let mut red = 0u64;
    let mut orange = 0u64;
    let mut yellow = 0u64;
    let mut green = 0u64;
    let mut brown = 0u64;

    for pixel in image.pixels() {
        for (acc, &value) in channels.iter_mut().zip(pixel.0.iter()) {
            acc.push(value);
        }

        bright += is_bright(pixel) as u64;
        dark += is_dark(pixel) as u64;
        red += is_red(pixel) as u64;
        orange += is_orange(pixel) as u64;
        yellow += is_yellow(pixel) as u64;
        green += is_green(pixel) as u64;
        brown += is_brown(pixel) as u64;
    }

    let total = width as f64 * height as f64;
    let (r_mean, r_std) = channels[0].mean_std(total);
    let (g_mean, g_std) = channels[1].mean_std(total);
    let (b_mean, b_std) = channels[2].mean_std(total);

    let features = ColorFeatures {
        r_mean,
        g_mean,
        b_mean,
        r_std,
        g_std,
        b_std,
        rg_ratio: r_mean / (g_mean + 1.0),
        rb_ratio: r_mean / (b_mean + 1.0),
        gb_ratio: g_mean / (b_mean + 1.0),
        total_std: (r_std + g_std + b_std) / 3.0,
        bright_ratio: bright as f64 / total,
        dark_ratio: dark as f64 / total,
        red_ratio: red as f64 / total,
        orange_ratio: orange as f64 / total,
        yellow_ratio: yellow as f64 / total,
        green_ratio: green as f64 / total,
        brown_ratio: brown as f64 / total,
    };

    features.ensure_finite()?;

    log::debug!(
        "RGB means R={:.1} G={:.1} B={:.1}, variability {:.1}",
        features.r_mean, features.g_mean, features.b_mean, features.total_std
    );
    log::debug!(
        "Red {:.3} orange {:.3} yellow {:.3} green {:.3} brown {:.3} dark {:.3} bright {:.3}",
        features.red_ratio,
        features.orange_ratio,
        features.yellow_ratio,
        features.green_ratio,
        features.brown_ratio,
        features.dark_ratio,
        features.bright_ratio
    );

    Ok(features)
}

impl ColorFeatures {
    /// Named view over every field, in declaration order
    pub fn named_values(&self) -> [(&'static str, f64); 17] {
        [
            ("r_mean", self.r_mean),
            ("g_mean", self.g_mean),
            ("b_mean", self.b_mean),
            ("r_std", self.r_std),
            ("g_std", self.g_std),
            ("b_std", self.b_std),
            ("rg_ratio", self.rg_ratio),
            ("rb_ratio", self.rb_ratio),
            ("gb_ratio", self.gb_ratio),
            ("total_std", self.total_std),
            ("bright_ratio", self.bright_ratio),
            ("dark_ratio", self.dark_ratio),
            ("red_ratio", self.red_ratio),
            ("orange_ratio", self.orange_ratio),
            ("yellow_ratio", self.yellow_ratio),
            ("green_ratio", self.green_ratio),
            ("brown_ratio", self.brown_ratio),
        ]
    }

    fn ensure_finite(&self) -> Result<()> {
        match self.named_values().iter().find(|(_, v)| !v.is_finite()) {
            Some((name, _)) => Err(AgroLeafError::NonFiniteFeature(name)),
            None => Ok(()),
        }
    }
}
