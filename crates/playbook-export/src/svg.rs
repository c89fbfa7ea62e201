//! SVG export: the raster snapshot embedded as a base64 PNG image.
//!
//! The output is an SVG wrapper around a raster snapshot, not a vector
//! rendition.

use crate::png::encode_png;
use crate::raster::{RenderOptions, render_step};
use crate::ExportResult;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use playbook_core::document::BoardDocument;

/// Export one step of the document as an SVG document.
pub fn export_svg(
    document: &BoardDocument,
    step_index: usize,
    options: &RenderOptions,
) -> ExportResult<String> {
    let pixmap = render_step(document, step_index, options)?;
    let png = encode_png(&pixmap)?;
    let encoded = STANDARD.encode(&png);

    Ok(format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" ",
            "width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            "<image width=\"{w}\" height=\"{h}\" ",
            "href=\"data:image/png;base64,{data}\"/>",
            "</svg>"
        ),
        w = pixmap.width(),
        h = pixmap.height(),
        data = encoded,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_wraps_png_data_uri() {
        let doc = BoardDocument::new();
        let svg = export_svg(&doc, 0, &RenderOptions { scale: 1.0 }).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("data:image/png;base64,"));
        assert!(svg.ends_with("</svg>"));
    }
}
