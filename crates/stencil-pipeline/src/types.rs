//! Shared types for the stencil pipeline.

use serde::{Deserialize, Serialize};

use crate::luminance::luminance;

/// Number of bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// A 2D point in output (scaled) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A sequence of connected points forming a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A decoded RGBA raster.
///
/// The buffer is always well-formed: both dimensions are at least 1
/// and the byte length is exactly `width * height * 4`. Scorers and the
/// stencil extractor rely on this and are total over any `PixelBuffer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidBuffer`] if either dimension is
    /// zero or `data.len()` is not `width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PipelineError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS));
        if width == 0 || height == 0 || expected != Some(data.len()) {
            return Err(PipelineError::InvalidBuffer {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidBuffer`] if either dimension is zero.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Result<Self, PipelineError> {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, data)
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Width and height as [`Dimensions`].
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Total number of pixels (`width * height`).
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Raw RGBA bytes in row-major order.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// RGBA channels of the pixel at buffer index `index` (row-major).
    ///
    /// `index` must be less than [`pixel_count`](Self::pixel_count).
    #[must_use]
    pub fn pixel(&self, index: usize) -> [u8; 4] {
        let start = index * CHANNELS;
        let mut rgba = [0; CHANNELS];
        rgba.copy_from_slice(&self.data[start..start + CHANNELS]);
        rgba
    }

    /// Luminance of the pixel at buffer index `index`.
    #[must_use]
    pub fn luminance_at_index(&self, index: usize) -> f64 {
        let [r, g, b, _] = self.pixel(index);
        luminance(r, g, b)
    }

    /// Luminance of the pixel at `(x, y)`.
    #[must_use]
    pub fn luminance_at(&self, x: u32, y: u32) -> f64 {
        self.luminance_at_index(y as usize * self.width as usize + x as usize)
    }

    /// Iterate over the luminance of every pixel in buffer order.
    pub fn luminances(&self) -> impl Iterator<Item = f64> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| luminance(px[0], px[1], px[2]))
    }

    /// Produce a new buffer of the same shape by mapping every pixel.
    #[must_use]
    pub fn map_pixels(&self, mut f: impl FnMut([u8; 4]) -> [u8; 4]) -> Self {
        let data = self
            .data
            .chunks_exact(CHANNELS)
            .flat_map(|px| f([px[0], px[1], px[2], px[3]]))
            .collect();
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// The six stencil suitability criteria, in reporting order.
///
/// Recommendations and report lines follow this order regardless of
/// score magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Share of near-black and near-white pixels.
    Contrast,
    /// Number of distinct tone regions across the midline.
    FloatingElements,
    /// Share of dark pixels.
    LineThickness,
    /// Share of sharp transitions between neighbouring pixels.
    DetailComplexity,
    /// Tone separation between the centre and the top edge.
    ClosedPaths,
    /// Source pixel dimensions.
    Resolution,
}

impl Criterion {
    /// All criteria in their fixed order.
    pub const ALL: [Self; 6] = [
        Self::Contrast,
        Self::FloatingElements,
        Self::LineThickness,
        Self::DetailComplexity,
        Self::ClosedPaths,
        Self::Resolution,
    ];

    /// Machine-readable key (matches the serialized field name).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Contrast => "contrast",
            Self::FloatingElements => "floating_elements",
            Self::LineThickness => "line_thickness",
            Self::DetailComplexity => "detail_complexity",
            Self::ClosedPaths => "closed_paths",
            Self::Resolution => "resolution",
        }
    }

    /// Human-readable label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Contrast => "High Contrast",
            Self::FloatingElements => "No Floating Elements",
            Self::LineThickness => "Thick Lines",
            Self::DetailComplexity => "Simple Details",
            Self::ClosedPaths => "Closed Paths",
            Self::Resolution => "Image Quality",
        }
    }
}

/// Per-criterion scores, each in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub contrast: u8,
    pub floating_elements: u8,
    pub line_thickness: u8,
    pub detail_complexity: u8,
    pub closed_paths: u8,
    pub resolution: u8,
}

impl ScoreSet {
    /// A score set with every criterion at `score`.
    #[must_use]
    pub const fn uniform(score: u8) -> Self {
        Self {
            contrast: score,
            floating_elements: score,
            line_thickness: score,
            detail_complexity: score,
            closed_paths: score,
            resolution: score,
        }
    }

    /// Score for a single criterion.
    #[must_use]
    pub const fn get(&self, criterion: Criterion) -> u8 {
        match criterion {
            Criterion::Contrast => self.contrast,
            Criterion::FloatingElements => self.floating_elements,
            Criterion::LineThickness => self.line_thickness,
            Criterion::DetailComplexity => self.detail_complexity,
            Criterion::ClosedPaths => self.closed_paths,
            Criterion::Resolution => self.resolution,
        }
    }

    /// `(criterion, score)` pairs in [`Criterion::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, u8)> + '_ {
        Criterion::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum of all six scores.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, s)| u32::from(s)).sum()
    }
}

/// Outcome of a suitability analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall rating in `1..=5`.
    pub rating: u8,
    /// Individual criterion scores.
    pub scores: ScoreSet,
    /// Advisory messages in criterion order.
    pub recommendations: Vec<String>,
    /// Sum of all scores.
    pub total_score: u32,
    /// Highest achievable total (`5 * 6`).
    pub max_possible: u32,
}

/// Inclusive bounding rectangle of dark pixels, in source pixel
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl BoundingBox {
    /// A box covering the single pixel `(x, y)`.
    #[must_use]
    pub const fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        }
    }

    /// Grow the box to include `(x, y)`.
    #[must_use]
    pub fn include(self, x: u32, y: u32) -> Self {
        Self {
            min_x: self.min_x.min(x),
            max_x: self.max_x.max(x),
            min_y: self.min_y.min(y),
            max_y: self.max_y.max(y),
        }
    }
}

/// Configuration for stencil extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StencilConfig {
    /// Physical width of the finished stencil in inches.
    ///
    /// Must lie in [`MIN_WIDTH_INCHES`](Self::MIN_WIDTH_INCHES)`..=`
    /// [`MAX_WIDTH_INCHES`](Self::MAX_WIDTH_INCHES). Out-of-range values
    /// are rejected rather than clamped.
    pub width_inches: f64,
}

impl StencilConfig {
    pub const DEFAULT_WIDTH_INCHES: f64 = 10.0;
    pub const MIN_WIDTH_INCHES: f64 = 1.0;
    pub const MAX_WIDTH_INCHES: f64 = 20.0;

    /// Check the configuration before any pixel work is done.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidWidth`] if `width_inches` is NaN or
    /// outside `1.0..=20.0`.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if (Self::MIN_WIDTH_INCHES..=Self::MAX_WIDTH_INCHES).contains(&self.width_inches) {
            Ok(())
        } else {
            Err(PipelineError::InvalidWidth(self.width_inches))
        }
    }
}

impl Default for StencilConfig {
    fn default() -> Self {
        Self {
            width_inches: Self::DEFAULT_WIDTH_INCHES,
        }
    }
}

/// Errors that can occur in the stencil pipeline.
///
/// Only [`InvalidWidth`](Self::InvalidWidth) is raised by the analysis
/// and extraction core; the remaining variants come from building a
/// [`PixelBuffer`] or from the decode boundary.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Stencil width outside the accepted range.
    #[error(
        "stencil width must be between {min} and {max} inches, got {0}",
        min = StencilConfig::MIN_WIDTH_INCHES,
        max = StencilConfig::MAX_WIDTH_INCHES
    )]
    InvalidWidth(f64),

    /// Pixel data does not match the stated dimensions.
    #[error("invalid pixel buffer: {width}x{height} with {len} bytes")]
    InvalidBuffer { width: u32, height: u32, len: usize },

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The encoded input exceeds the accepted size.
    #[error("input image is {size} bytes, limit is {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    /// The input bytes are not a recognised image format.
    #[error("input is not a recognised image format")]
    UnsupportedFormat,

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- PixelBuffer ---

    #[test]
    fn pixel_buffer_accepts_matching_length() {
        let buffer = PixelBuffer::new(2, 3, vec![0; 24]).unwrap();
        assert_eq!(buffer.pixel_count(), 6);
        assert_eq!(
            buffer.dimensions(),
            Dimensions {
                width: 2,
                height: 3
            }
        );
    }

    #[test]
    fn pixel_buffer_rejects_short_data() {
        let result = PixelBuffer::new(2, 2, vec![0; 15]);
        assert!(matches!(
            result,
            Err(PipelineError::InvalidBuffer {
                width: 2,
                height: 2,
                len: 15
            })
        ));
    }

    #[test]
    fn pixel_buffer_rejects_zero_dimensions() {
        assert!(PixelBuffer::new(0, 5, vec![]).is_err());
        assert!(PixelBuffer::new(5, 0, vec![]).is_err());
    }

    #[test]
    fn from_fn_is_row_major() {
        let buffer = PixelBuffer::from_fn(3, 2, |x, y| {
            let v = u8::try_from(y * 3 + x).unwrap();
            [v, v, v, 255]
        })
        .unwrap();
        assert_eq!(buffer.pixel(4), [4, 4, 4, 255]);
        assert!((buffer.luminance_at(2, 1) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn map_pixels_leaves_source_untouched() {
        let source = PixelBuffer::from_fn(2, 2, |_, _| [10, 20, 30, 40]).unwrap();
        let mapped = source.map_pixels(|[_, _, _, a]| [0, 0, 0, a]);
        assert_eq!(source.pixel(0), [10, 20, 30, 40]);
        assert_eq!(mapped.pixel(0), [0, 0, 0, 40]);
        assert_eq!(mapped.dimensions(), source.dimensions());
    }

    // --- ScoreSet ---

    #[test]
    fn score_set_iterates_in_criterion_order() {
        let scores = ScoreSet {
            contrast: 1,
            floating_elements: 2,
            line_thickness: 3,
            detail_complexity: 4,
            closed_paths: 5,
            resolution: 1,
        };
        let values: Vec<u8> = scores.iter().map(|(_, s)| s).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 1]);
        assert_eq!(scores.total(), 16);
    }

    #[test]
    fn score_set_serializes_with_criterion_keys() {
        let json = serde_json::to_value(ScoreSet::uniform(3)).unwrap();
        for criterion in Criterion::ALL {
            assert_eq!(json[criterion.key()], 3, "missing key {}", criterion.key());
        }
    }

    // --- BoundingBox ---

    #[test]
    fn bounding_box_include_grows() {
        let bbox = BoundingBox::at(5, 5).include(2, 9).include(7, 1);
        assert_eq!(
            bbox,
            BoundingBox {
                min_x: 2,
                max_x: 7,
                min_y: 1,
                max_y: 9
            }
        );
    }

    // --- StencilConfig ---

    #[test]
    fn default_config_is_valid() {
        assert!(StencilConfig::default().validate().is_ok());
    }

    #[test]
    fn width_bounds_are_inclusive() {
        for width in [1.0, 20.0] {
            let config = StencilConfig {
                width_inches: width,
            };
            assert!(config.validate().is_ok(), "{width} should be accepted");
        }
    }

    #[test]
    fn width_outside_bounds_is_rejected() {
        for width in [0.99, 20.01, 0.0, -3.0, f64::NAN, f64::INFINITY] {
            let config = StencilConfig {
                width_inches: width,
            };
            assert!(
                matches!(config.validate(), Err(PipelineError::InvalidWidth(_))),
                "{width} should be rejected",
            );
        }
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: StencilConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StencilConfig::default());
        let config: StencilConfig = serde_json::from_str(r#"{"width_inches": 4.5}"#).unwrap();
        assert!((config.width_inches - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_width_message_names_range() {
        let msg = PipelineError::InvalidWidth(25.0).to_string();
        assert_eq!(msg, "stencil width must be between 1 and 20 inches, got 25");
    }
}
