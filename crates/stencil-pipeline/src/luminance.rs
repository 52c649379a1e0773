//! RGB-to-luminance conversion shared by every scorer and by
//! binarization.
//!
//! Uses the ITU-R BT.601 luma weights:
//!
//! ```text
//! Y = 0.299 * R + 0.587 * G + 0.114 * B
//! ```

/// Weight of the red channel.
pub const RED_WEIGHT: f64 = 0.299;
/// Weight of the green channel.
pub const GREEN_WEIGHT: f64 = 0.587;
/// Weight of the blue channel.
pub const BLUE_WEIGHT: f64 = 0.114;

/// Perceptual brightness of an RGB triple, in `0.0..=255.0`.
///
/// The products are summed left to right without fused multiply-add so
/// threshold comparisons stay bit-identical across platforms.
///
/// # Examples
///
/// ```
/// use stencil_pipeline::luminance::luminance;
///
/// assert!(luminance(0, 0, 0).abs() < f64::EPSILON);
/// assert!(luminance(0, 255, 0) > luminance(255, 0, 0));
/// ```
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    RED_WEIGHT * f64::from(r) + GREEN_WEIGHT * f64::from(g) + BLUE_WEIGHT * f64::from(b)
}
