//! SVG export serializer.
//!
//! Converts an extracted [`Stencil`] into an SVG string using the
//! [`svg`] crate for document construction, XML escaping, and path
//! data formatting.
//!
//! The document is sized in CSS pixels at 96 DPI:
//! `width="{w}px" height="{h}px" viewBox="0 0 {w} {h}"`, where `w` is
//! the requested width in inches times 96 and `h` keeps the source
//! aspect ratio. All shapes sit in a single
//! `<g fill="black" stroke="none">` group.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use std::fmt::Write;

use svg::Document;
use svg::node::element::{Element, Group, Path, Rectangle};
use svg::node::{Node, Text};

use stencil_pipeline::{Outline, Polyline, Stencil, StencilScale};

/// Inset of the placeholder rectangle from each document edge.
pub const PLACEHOLDER_INSET: f64 = 10.0;
/// Font size of the placeholder heading.
pub const PLACEHOLDER_TITLE_SIZE: u32 = 24;
/// Font size of the placeholder width caption.
pub const PLACEHOLDER_CAPTION_SIZE: u32 = 16;
/// Vertical offset of the caption below the heading.
const PLACEHOLDER_CAPTION_OFFSET: f64 = 30.0;

/// Build a closed SVG path `d` attribute string from a polyline.
///
/// Uses `M` for the first point, `L` for subsequent points, and closes
/// the path back to the start. Returns an empty string for polylines
/// with fewer than 2 points.
///
/// Coordinates keep full `f64` precision. The [`svg`] crate's `Data`
/// builder stores `f32` parameters, so the string is written directly.
///
/// # Examples
///
/// ```
/// use stencil_pipeline::{Point, Polyline};
/// use stencil_export::build_path_data;
///
/// let polyline = Polyline::new(vec![
///     Point::new(10.0, 20.0),
///     Point::new(30.0, 20.0),
///     Point::new(30.0, 40.0),
/// ]);
/// let d = build_path_data(&polyline);
/// assert!(d.starts_with("M10,20 L30,20 L30,40"));
/// ```
#[must_use]
pub fn build_path_data(polyline: &Polyline) -> String {
    if polyline.len() < 2 {
        return String::new();
    }

    let mut data = String::new();
    for (i, p) in polyline.points().iter().enumerate() {
        let cmd = if i == 0 { "M" } else { "L" };
        let _ = write!(data, "{cmd}{},{} ", p.x, p.y);
    }
    data.push('Z');
    data
}

/// Empty document sized to the stencil's output space.
fn document(scale: &StencilScale) -> Document {
    let w = scale.target_width_px;
    let h = scale.target_height_px;
    Document::new()
        .set("width", format!("{w}px"))
        .set("height", format!("{h}px"))
        .set("viewBox", format!("0 0 {w} {h}"))
}

/// The black fill group every stencil shape lives in.
fn fill_group() -> Group {
    Group::new().set("fill", "black").set("stroke", "none")
}

/// A centred white `<text>` label.
fn label(x: f64, y: f64, font_size: u32, content: &str) -> Element {
    let mut text = Element::new("text");
    text.assign("x", x);
    text.assign("y", y);
    text.assign("text-anchor", "middle");
    text.assign("font-family", "Arial");
    text.assign("font-size", font_size);
    text.assign("fill", "white");
    text.append(Text::new(content));
    text
}

/// Inset rectangle plus "TEST STENCIL" and width labels, used when the
/// image had no dark content.
fn placeholder_group(scale: &StencilScale, width_inches: f64) -> Group {
    let w = scale.target_width_px;
    let h = scale.target_height_px;
    let rect = Rectangle::new()
        .set("x", PLACEHOLDER_INSET)
        .set("y", PLACEHOLDER_INSET)
        .set("width", (w - 2.0 * PLACEHOLDER_INSET).max(0.0))
        .set("height", (h - 2.0 * PLACEHOLDER_INSET).max(0.0));

    let cx = w / 2.0;
    let cy = h / 2.0;
    fill_group()
        .add(rect)
        .add(label(cx, cy, PLACEHOLDER_TITLE_SIZE, "TEST STENCIL"))
        .add(label(
            cx,
            cy + PLACEHOLDER_CAPTION_OFFSET,
            PLACEHOLDER_CAPTION_SIZE,
            &format!("{width_inches}\" wide"),
        ))
}

/// Serialize a stencil into an SVG document string.
///
/// [`Outline::Rectangle`] becomes one closed `<path>`;
/// [`Outline::Empty`] becomes the placeholder rectangle and labels, so
/// the output never contains a degenerate path.
///
/// # Examples
///
/// ```
/// use stencil_pipeline::{PixelBuffer, StencilConfig, extract_stencil};
/// use stencil_export::to_svg;
///
/// let buffer = PixelBuffer::from_fn(100, 50, |x, _| {
///     if x < 50 { [0, 0, 0, 255] } else { [255, 255, 255, 255] }
/// })
/// .unwrap();
/// let stencil = extract_stencil(&buffer, &StencilConfig { width_inches: 5.0 }).unwrap();
/// let svg = to_svg(&stencil);
/// assert!(svg.starts_with("<?xml"));
/// assert!(svg.contains(r#"viewBox="0 0 480 240""#));
/// assert!(svg.contains("<path"));
/// ```
#[must_use]
pub fn to_svg(stencil: &Stencil) -> String {
    let group = match &stencil.outline {
        Outline::Rectangle { path, .. } => {
            fill_group().add(Path::new().set("d", build_path_data(path)))
        }
        Outline::Empty => placeholder_group(&stencil.scale, stencil.width_inches),
    };
    let doc = document(&stencil.scale).add(group);

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stencil_pipeline::{BoundingBox, Dimensions, Point};

    use super::*;

    fn scale(width: u32, height: u32, width_inches: f64) -> StencilScale {
        StencilScale::new(Dimensions { width, height }, width_inches)
    }

    fn rectangle_stencil() -> Stencil {
        let bounds = BoundingBox {
            min_x: 10,
            max_x: 19,
            min_y: 5,
            max_y: 14,
        };
        let scale = scale(100, 50, 5.0);
        Stencil {
            width_inches: 5.0,
            source: Dimensions {
                width: 100,
                height: 50,
            },
            scale,
            outline: Outline::Rectangle {
                bounds,
                path: stencil_pipeline::stencil::rectangle_path(bounds, &scale),
            },
        }
    }

    fn empty_stencil(width_inches: f64) -> Stencil {
        Stencil {
            width_inches,
            source: Dimensions {
                width: 200,
                height: 100,
            },
            scale: scale(200, 100, width_inches),
            outline: Outline::Empty,
        }
    }

    // --- build_path_data ---

    #[test]
    fn build_path_data_empty_polyline() {
        assert_eq!(build_path_data(&Polyline::new(vec![])), "");
    }

    #[test]
    fn build_path_data_single_point() {
        let polyline = Polyline::new(vec![Point::new(5.0, 5.0)]);
        assert_eq!(build_path_data(&polyline), "");
    }

    #[test]
    fn build_path_data_is_closed() {
        let polyline = Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 3.0),
        ]);
        let d = build_path_data(&polyline);
        assert!(d.starts_with("M0,0 L4,0 L4,3"), "{d}");
        assert!(d.trim_end().to_ascii_lowercase().ends_with('z'), "{d}");
    }

    #[test]
    fn build_path_data_keeps_f64_precision() {
        let polyline = Polyline::new(vec![
            Point::new(216.361_083_249_749_27, 0.1),
            Point::new(1.0 / 3.0, 0.0),
        ]);
        assert_eq!(
            build_path_data(&polyline),
            "M216.36108324974927,0.1 L0.3333333333333333,0 Z"
        );
    }

    // --- Document structure ---

    #[test]
    fn svg_has_xml_declaration() {
        let svg = to_svg(&rectangle_stencil());
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    }

    #[test]
    fn svg_has_xmlns_namespace() {
        let svg = to_svg(&rectangle_stencil());
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
    }

    #[test]
    fn svg_is_sized_in_css_pixels() {
        let svg = to_svg(&rectangle_stencil());
        assert!(svg.contains(r#"width="480px""#), "{svg}");
        assert!(svg.contains(r#"height="240px""#), "{svg}");
        assert!(svg.contains(r#"viewBox="0 0 480 240""#), "{svg}");
    }

    #[test]
    fn svg_ends_with_closing_tag() {
        let svg = to_svg(&rectangle_stencil());
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    // --- Normal mode ---

    #[test]
    fn rectangle_emits_single_filled_path() {
        let svg = to_svg(&rectangle_stencil());
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains(r#"fill="black""#));
        assert!(svg.contains(r#"stroke="none""#));
        assert!(!svg.contains("<rect"));
        assert!(!svg.contains("TEST STENCIL"));
    }

    #[test]
    fn rectangle_path_uses_scaled_corners() {
        // scale factor 4.8: (10,5) -> (48,24), (19,14) -> (91.2,67.2)
        let svg = to_svg(&rectangle_stencil());
        assert!(svg.contains("M48,24 L91.2,24 L91.2,67.2 L48,67.2"), "{svg}");
    }

    // --- Placeholder mode ---

    #[test]
    fn empty_outline_emits_placeholder() {
        let svg = to_svg(&empty_stencil(5.0));
        assert!(!svg.contains("<path"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("TEST STENCIL"));
        assert!(svg.contains("wide"));
        assert!(svg.contains(r#"font-size="24""#));
        assert!(svg.contains(r#"font-size="16""#));
        assert!(svg.contains(r#"fill="white""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn placeholder_rect_is_inset_by_ten() {
        // 5 in -> 480 x 240
        let svg = to_svg(&empty_stencil(5.0));
        assert!(svg.contains(r#"x="10""#));
        assert!(svg.contains(r#"y="10""#));
        assert!(svg.contains(r#"width="460""#), "{svg}");
        assert!(svg.contains(r#"height="220""#), "{svg}");
    }

    #[test]
    fn placeholder_labels_are_centred() {
        let svg = to_svg(&empty_stencil(5.0));
        assert!(svg.contains(r#"x="240""#), "{svg}");
        assert!(svg.contains(r#"y="120""#), "{svg}");
        assert!(svg.contains(r#"y="150""#), "{svg}");
    }

    #[test]
    fn placeholder_caption_shows_width() {
        let svg = to_svg(&empty_stencil(2.5));
        assert!(svg.contains("2.5"), "{svg}");
    }

    #[test]
    fn placeholder_rect_never_negative() {
        // 1000 x 10 source at 1 in: height = 0.96 px.
        let stencil = Stencil {
            width_inches: 1.0,
            source: Dimensions {
                width: 1000,
                height: 10,
            },
            scale: scale(1000, 10, 1.0),
            outline: Outline::Empty,
        };
        let svg = to_svg(&stencil);
        assert!(svg.contains(r#"height="0""#), "{svg}");
    }
}
