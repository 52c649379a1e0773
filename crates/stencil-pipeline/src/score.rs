//! Stencil suitability heuristics.
//!
//! Each scorer reduces the pixel buffer (or a fixed sample of it) to a
//! single measure and buckets it into an integer score in `1..=5`,
//! higher meaning more stencil-friendly. All bucket boundaries are
//! strict comparisons.
//!
//! `floating_elements` and `closed_paths` look at a single row only.
//! They are cheap approximations of region connectivity and enclosure,
//! not segmentation.

use std::collections::BTreeSet;

use tracing::debug;

use crate::types::{Dimensions, PixelBuffer, ScoreSet};

/// Scores assigned by the four bucket boundaries, best first.
const SCORE_STEPS: [u8; 4] = [5, 4, 3, 2];

/// Luminance below which a pixel counts as near-black for contrast.
pub const CONTRAST_DARK: f64 = 85.0;
/// Luminance above which a pixel counts as near-white for contrast.
pub const CONTRAST_LIGHT: f64 = 170.0;
/// Luminance below which a pixel counts as part of a line.
pub const LINE_DARK: f64 = 100.0;
/// Width of a tone bucket when counting midline regions.
pub const REGION_BUCKET: f64 = 50.0;
/// Number of evenly spaced midline samples.
pub const REGION_SAMPLES: u32 = 20;
/// Maximum number of pixels sampled for detail complexity.
pub const DETAIL_SAMPLE_LIMIT: usize = 1000;
/// Luminance delta that counts as an edge between neighbours.
pub const DETAIL_EDGE_DELTA: f64 = 30.0;
/// Column stride when sampling the top row.
pub const EDGE_ROW_STRIDE: usize = 10;

/// First step whose threshold `value` strictly exceeds, else 1.
fn score_above(value: f64, thresholds: [f64; 4]) -> u8 {
    SCORE_STEPS
        .into_iter()
        .zip(thresholds)
        .find(|&(_, t)| value > t)
        .map_or(1, |(score, _)| score)
}

/// First step whose threshold `value` is strictly below, else 1.
fn score_below(value: f64, thresholds: [f64; 4]) -> u8 {
    SCORE_STEPS
        .into_iter()
        .zip(thresholds)
        .find(|&(_, t)| value < t)
        .map_or(1, |(score, _)| score)
}

/// First step whose threshold `count` does not exceed, else 1.
fn score_at_most(count: usize, thresholds: [usize; 4]) -> u8 {
    SCORE_STEPS
        .into_iter()
        .zip(thresholds)
        .find(|&(_, t)| count <= t)
        .map_or(1, |(score, _)| score)
}

#[allow(clippy::cast_precision_loss)]
fn ratio(count: usize, total: usize) -> f64 {
    count as f64 / total as f64
}

/// Share of pixels that are near-black (< 85) or near-white (> 170).
#[must_use]
pub fn contrast(buffer: &PixelBuffer) -> u8 {
    let extreme = buffer
        .luminances()
        .filter(|&l| l < CONTRAST_DARK || l > CONTRAST_LIGHT)
        .count();
    let extreme_ratio = ratio(extreme, buffer.pixel_count());
    score_above(extreme_ratio, [0.7, 0.5, 0.3, 0.2])
}

/// Number of distinct 50-wide tone buckets among 20 samples taken
/// across the horizontal midline.
///
/// Sample `i` sits at `x = floor(i / 20 * width)` on row
/// `floor(height / 2)`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn floating_elements(buffer: &PixelBuffer) -> u8 {
    let y = buffer.height() / 2;
    let width = f64::from(buffer.width());
    let buckets: BTreeSet<u32> = (0..REGION_SAMPLES)
        .map(|i| {
            let x = (f64::from(i) / f64::from(REGION_SAMPLES) * width).floor() as u32;
            let lum = buffer.luminance_at(x.min(buffer.width() - 1), y);
            (lum / REGION_BUCKET).floor() as u32
        })
        .collect();
    score_at_most(buckets.len(), [2, 4, 6, 8])
}

/// Share of pixels darker than 100.
#[must_use]
pub fn line_thickness(buffer: &PixelBuffer) -> u8 {
    let dark = buffer.luminances().filter(|&l| l < LINE_DARK).count();
    let dark_ratio = ratio(dark, buffer.pixel_count());
    score_above(dark_ratio, [0.4, 0.25, 0.15, 0.05])
}

/// Share of sampled pixels whose luminance differs from the next pixel
/// in buffer order by more than 30.
///
/// Up to 1000 pixels are sampled at evenly strided buffer indices. The
/// neighbour of the last pixel is the pixel itself.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn detail_complexity(buffer: &PixelBuffer) -> u8 {
    let count = buffer.pixel_count();
    let sample_size = count.min(DETAIL_SAMPLE_LIMIT);
    let last = count - 1;
    let edges = (0..sample_size)
        .filter(|&i| {
            let index = ((i as f64 / sample_size as f64) * count as f64).floor() as usize;
            let index = index.min(last);
            let next = (index + 1).min(last);
            let delta = buffer.luminance_at_index(index) - buffer.luminance_at_index(next);
            delta.abs() > DETAIL_EDGE_DELTA
        })
        .count();
    score_below(ratio(edges, sample_size), [0.05, 0.1, 0.2, 0.3])
}

/// Tone separation between the centre pixel and the top row.
///
/// The top row is sampled every 10th column starting at 0; the absolute
/// difference from the centre luminance is normalized by 255.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn closed_paths(buffer: &PixelBuffer) -> u8 {
    let center = buffer.luminance_at(buffer.width() / 2, buffer.height() / 2);
    let (sum, samples) = (0..buffer.width() as usize)
        .step_by(EDGE_ROW_STRIDE)
        .fold((0.0, 0_usize), |(sum, n), x| {
            (sum + buffer.luminance_at_index(x), n + 1)
        });
    let edge_mean = sum / samples as f64;
    let separation = (center - edge_mean).abs() / 255.0;
    score_above(separation, [0.3, 0.2, 0.1, 0.05])
}

/// Bucket the source dimensions; the smaller side decides.
#[must_use]
pub const fn resolution(dimensions: Dimensions) -> u8 {
    let Dimensions { width, height } = dimensions;
    if width < 300 || height < 300 {
        1
    } else if width < 600 || height < 600 {
        2
    } else if width < 1000 || height < 1000 {
        3
    } else if width < 1500 || height < 1500 {
        4
    } else {
        5
    }
}

/// Run all six scorers.
#[must_use]
pub fn score(buffer: &PixelBuffer) -> ScoreSet {
    let scores = ScoreSet {
        contrast: contrast(buffer),
        floating_elements: floating_elements(buffer),
        line_thickness: line_thickness(buffer),
        detail_complexity: detail_complexity(buffer),
        closed_paths: closed_paths(buffer),
        resolution: resolution(buffer.dimensions()),
    };
    debug!(?scores, "scored image");
    scores
}
