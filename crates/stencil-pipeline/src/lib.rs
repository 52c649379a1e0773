//! stencil-pipeline: Pure stencil suitability analysis and outline
//! extraction (sans-IO).
//!
//! Two independent passes over a decoded [`PixelBuffer`]:
//!
//! - [`analyze`]: six heuristic scores -> overall rating ->
//!   recommendations.
//! - [`extract_stencil`]: binarize -> dark bounding box -> scaled
//!   outline, ready for the SVG exporter in `stencil-export`.
//!
//! This crate has **no I/O dependencies**. [`decode`] is a thin
//! boundary over the `image` crate for callers holding encoded bytes;
//! the analysis and extraction code only ever sees a `PixelBuffer`.

pub mod decode;
pub mod luminance;
pub mod rating;
pub mod recommend;
pub mod report;
pub mod score;
pub mod stencil;
pub mod types;

use tracing::info;

pub use decode::decode;
pub use stencil::{Outline, Stencil, StencilScale};
pub use types::{
    AnalysisResult, BoundingBox, Criterion, Dimensions, PipelineError, PixelBuffer, Point,
    Polyline, ScoreSet, StencilConfig,
};

/// Score `buffer` for stencil suitability.
///
/// Runs every scorer, aggregates the overall rating and derives the
/// recommendations. Total over any well-formed buffer.
#[must_use]
pub fn analyze(buffer: &PixelBuffer) -> AnalysisResult {
    let scores = score::score(buffer);
    let (rating, total_score, max_possible) = rating::aggregate(&scores);
    let recommendations = recommend::recommendations(&scores);
    info!(
        rating,
        total_score,
        max_possible,
        advice = recommendations.len(),
        "analysis complete"
    );
    AnalysisResult {
        rating,
        scores,
        recommendations,
        total_score,
        max_possible,
    }
}

/// Extract the stencil outline from `buffer` at the configured width.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidWidth`] if the configured width is
/// outside `1.0..=20.0`; no pixel work is done in that case.
pub fn extract_stencil(
    buffer: &PixelBuffer,
    config: &StencilConfig,
) -> Result<Stencil, PipelineError> {
    stencil::extract(buffer, config)
}
