//! Image decoding at the pipeline boundary.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces an RGBA
//! [`PixelBuffer`]. Nothing else in the crate depends on this module:
//! scorers and the extractor take an already-decoded buffer, so any
//! other decoder can feed them.

use tracing::debug;

use crate::types::{PipelineError, PixelBuffer};

/// Largest encoded input accepted, in bytes (10 MiB).
pub const MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Decode raw image bytes into an RGBA pixel buffer.
///
/// The input is checked before decoding: it must be non-empty, no
/// larger than [`MAX_INPUT_BYTES`], and sniff as a format with an
/// `image/*` MIME type.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::InputTooLarge`] if `bytes` exceeds
/// [`MAX_INPUT_BYTES`].
/// Returns [`PipelineError::UnsupportedFormat`] if the format cannot be
/// identified as an image.
/// Returns [`PipelineError::ImageDecode`] if the data is corrupt or the
/// format is not compiled in.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    if bytes.len() > MAX_INPUT_BYTES {
        return Err(PipelineError::InputTooLarge {
            size: bytes.len(),
            limit: MAX_INPUT_BYTES,
        });
    }

    let format = image::guess_format(bytes).map_err(|_| PipelineError::UnsupportedFormat)?;
    // Every format `image` sniffs today maps to `image/*`; the check keeps
    // the input contract explicit should that ever change.
    if !format.to_mime_type().starts_with("image/") {
        return Err(PipelineError::UnsupportedFormat);
    }

    let rgba = image::load_from_memory_with_format(bytes, format)?.to_rgba8();
    debug!(
        ?format,
        width = rgba.width(),
        height = rgba.height(),
        "decoded image"
    );
    PixelBuffer::new(rgba.width(), rgba.height(), rgba.into_raw())
}
