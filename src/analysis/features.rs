//! Pixel statistics for a single tile image

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::io::configuration::{
    EDGE_BRIGHTNESS_DELTA, MEANINGFUL_MIN_ALPHA, MEANINGFUL_MIN_CONTRAST,
};
use crate::io::image::PixelBuffer;

/// Mean color of a tile
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel mean
    pub r: f64,
    /// Green channel mean
    pub g: f64,
    /// Blue channel mean
    pub b: f64,
}

impl Color {
    /// Channel average on a 0-255 scale
    pub fn brightness(&self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }
}

/// Statistics the classifier works from
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileFeatures {
    /// Per-channel mean color
    ///
    /// This is an average, not a histogram peak; classifier thresholds are
    /// calibrated against the mean.
    pub dominant_color: Color,
    /// Mean of the per-pixel channel average
    pub brightness: f64,
    /// Mean summed absolute deviation of each channel from its mean
    pub variance: f64,
    /// Pixels whose brightness jumps by more than the edge delta from the
    /// previous pixel in scan order
    pub edges: usize,
    /// Whether any pixel is less than fully opaque
    pub has_transparency: bool,
    /// Number of distinct RGB colors
    pub color_complexity: usize,
}

fn pixel_brightness(pixel: [u8; 4]) -> f64 {
    (f64::from(pixel[0]) + f64::from(pixel[1]) + f64::from(pixel[2])) / 3.0
}

/// Compute classifier features from a tile's pixels
///
/// Edges are counted along the flat scan order, so the jump from the end of
/// one row to the start of the next counts like any other neighbour pair.
pub fn extract_features(buffer: &PixelBuffer) -> TileFeatures {
    let count = buffer.pixel_count();
    if count == 0 {
        return TileFeatures::default();
    }
    let n = count as f64;

    let mut sums = [0.0_f64; 3];
    let mut brightness_sum = 0.0;
    let mut edges = 0;
    let mut has_transparency = false;
    let mut colors = HashSet::new();
    let mut previous: Option<f64> = None;

    for pixel in buffer.pixels() {
        sums[0] += f64::from(pixel[0]);
        sums[1] += f64::from(pixel[1]);
        sums[2] += f64::from(pixel[2]);

        let brightness = pixel_brightness(pixel);
        brightness_sum += brightness;
        if previous.is_some_and(|prev| (brightness - prev).abs() > EDGE_BRIGHTNESS_DELTA) {
            edges += 1;
        }
        previous = Some(brightness);

        has_transparency |= pixel[3] < u8::MAX;
        colors.insert([pixel[0], pixel[1], pixel[2]]);
    }

    let dominant_color = Color {
        r: sums[0] / n,
        g: sums[1] / n,
        b: sums[2] / n,
    };

    let deviation_sum: f64 = buffer
        .pixels()
        .map(|pixel| {
            (f64::from(pixel[0]) - dominant_color.r).abs()
                + (f64::from(pixel[1]) - dominant_color.g).abs()
                + (f64::from(pixel[2]) - dominant_color.b).abs()
        })
        .sum();

    TileFeatures {
        dominant_color,
        brightness: brightness_sum / n,
        variance: deviation_sum / n,
        edges,
        has_transparency,
        color_complexity: colors.len(),
    }
}

/// Check whether a tile carries enough visible content to keep
///
/// A tile is kept when its mean alpha exceeds 50 and its mean distance from
/// mid-gray exceeds 5; empty buffers are never meaningful.
pub fn is_meaningful(buffer: &PixelBuffer) -> bool {
    let count = buffer.pixel_count();
    if count == 0 {
        return false;
    }
    let n = count as f64;

    let (alpha_sum, contrast_sum) = buffer
        .pixels()
        .fold((0.0, 0.0), |(alpha, contrast), pixel| {
            (
                alpha + f64::from(pixel[3]),
                contrast + (pixel_brightness(pixel) - 128.0).abs(),
            )
        });

    alpha_sum / n > MEANINGFUL_MIN_ALPHA && contrast_sum / n > MEANINGFUL_MIN_CONTRAST
}
