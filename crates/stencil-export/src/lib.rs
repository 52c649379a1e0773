//! stencil-export: Pure SVG serializer for stencil outlines (sans-IO).
//!
//! Turns a [`Stencil`](stencil_pipeline::Stencil) into an SVG document
//! and wraps it as a [`StencilArtifact`] with a suggested file name.

pub mod artifact;
pub mod svg;

pub use artifact::{StencilArtifact, create_stencil, filename_hint};
pub use svg::{build_path_data, to_svg};
