//! PNG export (single-step snapshot).

use crate::raster::{RenderOptions, render_step, rgba_bytes};
use crate::ExportResult;
use playbook_core::document::BoardDocument;
use tiny_skia::Pixmap;

/// Encode a pixmap as a PNG.
pub fn encode_png(pixmap: &Pixmap) -> ExportResult<Vec<u8>> {
    let data = rgba_bytes(pixmap);
    let mut out = Vec::new();
    {
        let mut encoder = ::png::Encoder::new(&mut out, pixmap.width(), pixmap.height());
        encoder.set_color(::png::ColorType::Rgba);
        encoder.set_depth(::png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
    }
    Ok(out)
}

/// Export one step of the document as a PNG snapshot.
pub fn export_png(
    document: &BoardDocument,
    step_index: usize,
    options: &RenderOptions,
) -> ExportResult<Vec<u8>> {
    let pixmap = render_step(document, step_index, options)?;
    encode_png(&pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic_bytes() {
        let doc = BoardDocument::new();
        let png = export_png(&doc, 0, &RenderOptions { scale: 1.0 }).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
