//! Downloadable stencil artifact: SVG content plus naming metadata.

use tracing::info;

use stencil_pipeline::{PipelineError, PixelBuffer, Stencil, StencilConfig, extract_stencil};

use crate::svg::to_svg;

/// A finished stencil, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct StencilArtifact {
    /// Complete SVG document.
    pub svg_content: String,
    /// Physical width the document was scaled to.
    pub width_inches: f64,
    /// Suggested file name, see [`filename_hint`].
    pub filename_hint: String,
}

impl StencilArtifact {
    /// Serialize an extracted stencil.
    #[must_use]
    pub fn from_stencil(stencil: &Stencil) -> Self {
        Self {
            svg_content: to_svg(stencil),
            width_inches: stencil.width_inches,
            filename_hint: filename_hint(stencil.width_inches),
        }
    }
}

/// Default file name for a stencil of the given width.
///
/// # Examples
///
/// ```
/// use stencil_export::filename_hint;
///
/// assert_eq!(filename_hint(10.0), "stencil_10inch.svg");
/// assert_eq!(filename_hint(2.5), "stencil_2.5inch.svg");
/// ```
#[must_use]
pub fn filename_hint(width_inches: f64) -> String {
    format!("stencil_{width_inches}inch.svg")
}

/// Extract and serialize a stencil in one step.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidWidth`] if the configured width is
/// outside `1.0..=20.0`.
pub fn create_stencil(
    buffer: &PixelBuffer,
    config: &StencilConfig,
) -> Result<StencilArtifact, PipelineError> {
    let stencil = extract_stencil(buffer, config)?;
    let artifact = StencilArtifact::from_stencil(&stencil);
    info!(
        filename = %artifact.filename_hint,
        bytes = artifact.svg_content.len(),
        "stencil created"
    );
    Ok(artifact)
}
