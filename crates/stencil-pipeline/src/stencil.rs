//! Stencil outline extraction.
//!
//! 1. Binarize into a new buffer (luminance < 128 -> black, else white).
//! 2. Find the inclusive bounding box of the black pixels.
//! 3. Scale so the source width maps to `width_inches * 96` CSS pixels.
//! 4. Emit the scaled box as a closed four-corner path, clockwise from
//!    the top-left corner.
//!
//! The outline is the enclosing rectangle of the dark content, not a
//! traced contour. An image with no dark pixels yields
//! [`Outline::Empty`], which exporters render as a placeholder.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::luminance::luminance;
use crate::types::{
    BoundingBox, Dimensions, PipelineError, PixelBuffer, Point, Polyline, StencilConfig,
};

/// Output resolution in CSS pixels per inch.
pub const DPI: f64 = 96.0;

/// Luminance below which a pixel is dark.
pub const DARK_THRESHOLD: f64 = 128.0;

const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];

/// Threshold every pixel to pure black or pure white.
///
/// Returns a new buffer; `buffer` is not modified. Alpha is kept.
#[must_use]
pub fn binarize(buffer: &PixelBuffer) -> PixelBuffer {
    buffer.map_pixels(|[r, g, b, a]| {
        let [r, g, b] = if luminance(r, g, b) < DARK_THRESHOLD {
            BLACK
        } else {
            WHITE
        };
        [r, g, b, a]
    })
}

/// Inclusive bounding box of all dark pixels, scanning row-major.
///
/// Returns `None` when no pixel is dark.
#[must_use]
pub fn dark_bounds(buffer: &PixelBuffer) -> Option<BoundingBox> {
    let width = buffer.width();
    let mut bounds: Option<BoundingBox> = None;
    for y in 0..buffer.height() {
        for x in 0..width {
            if buffer.luminance_at(x, y) < DARK_THRESHOLD {
                bounds = Some(bounds.map_or_else(|| BoundingBox::at(x, y), |b| b.include(x, y)));
            }
        }
    }
    bounds
}

/// Mapping from source pixels to output CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StencilScale {
    /// Output pixels per source pixel.
    pub scale_factor: f64,
    /// Output document width (`width_inches * 96`).
    pub target_width_px: f64,
    /// Output document height (`source height * scale_factor`).
    pub target_height_px: f64,
}

impl StencilScale {
    /// Scale for a source image printed `width_inches` wide.
    #[must_use]
    pub fn new(source: Dimensions, width_inches: f64) -> Self {
        let target_width_px = width_inches * DPI;
        let scale_factor = target_width_px / f64::from(source.width);
        Self {
            scale_factor,
            target_width_px,
            target_height_px: f64::from(source.height) * scale_factor,
        }
    }

    /// Scale a source pixel coordinate into output space.
    #[must_use]
    pub fn apply(&self, x: u32, y: u32) -> Point {
        Point::new(
            f64::from(x) * self.scale_factor,
            f64::from(y) * self.scale_factor,
        )
    }
}

/// Shape extracted from the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outline {
    /// The dark content's bounding box and its scaled four-corner path.
    ///
    /// The path is implicitly closed; exporters append the close command.
    Rectangle {
        bounds: BoundingBox,
        path: Polyline,
    },
    /// No dark pixel was found.
    Empty,
}

/// Result of stencil extraction, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stencil {
    /// Requested physical width in inches.
    pub width_inches: f64,
    /// Source image dimensions.
    pub source: Dimensions,
    /// Source-to-output mapping.
    pub scale: StencilScale,
    /// Extracted shape.
    pub outline: Outline,
}

/// Clockwise corner path of `bounds` in output space, starting at
/// `(min_x, min_y)`.
#[must_use]
pub fn rectangle_path(bounds: BoundingBox, scale: &StencilScale) -> Polyline {
    Polyline::new(vec![
        scale.apply(bounds.min_x, bounds.min_y),
        scale.apply(bounds.max_x, bounds.min_y),
        scale.apply(bounds.max_x, bounds.max_y),
        scale.apply(bounds.min_x, bounds.max_y),
    ])
}

/// Extract the stencil outline from `buffer`.
///
/// The width is validated before any pixel is touched.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidWidth`] if `config.width_inches` is
/// outside `1.0..=20.0`.
pub fn extract(buffer: &PixelBuffer, config: &StencilConfig) -> Result<Stencil, PipelineError> {
    config.validate()?;

    let binary = binarize(buffer);
    let source = buffer.dimensions();
    let scale = StencilScale::new(source, config.width_inches);

    let outline = match dark_bounds(&binary) {
        Some(bounds) => {
            debug!(?bounds, scale_factor = scale.scale_factor, "found dark content");
            Outline::Rectangle {
                bounds,
                path: rectangle_path(bounds, &scale),
            }
        }
        None => {
            info!("no dark pixels found, stencil will be a placeholder");
            Outline::Empty
        }
    };

    Ok(Stencil {
        width_inches: config.width_inches,
        source,
        scale,
        outline,
    })
}
