//! Multi-page PDF export: one page per step, raster snapshot embedded.

use crate::raster::{RenderOptions, render_step, rgba_bytes};
use crate::{ExportError, ExportResult};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref};
use playbook_core::document::BoardDocument;

/// Export the whole step sequence as a multi-page PDF.
///
/// Every page embeds the step's raster snapshot as a DeviceRGB image scaled
/// to the page (one pixel per point).
pub fn export_pdf(document: &BoardDocument, options: &RenderOptions) -> ExportResult<Vec<u8>> {
    if document.steps.is_empty() {
        return Err(ExportError::EmptyDocument);
    }

    let mut pdf = Pdf::new();
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();

    let image_name = Name(b"Im0");
    let mut page_ids = Vec::with_capacity(document.steps.len());

    for index in 0..document.steps.len() {
        let pixmap = render_step(document, index, options)?;
        let width = pixmap.width();
        let height = pixmap.height();
        let rgb = drop_alpha(&rgba_bytes(&pixmap));

        let page_id = alloc.bump();
        let image_id = alloc.bump();
        let content_id = alloc.bump();
        page_ids.push(page_id);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, width as f32, height as f32));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().x_objects().pair(image_name, image_id);
        page.finish();

        let mut image = pdf.image_xobject(image_id, &rgb);
        image.width(width as i32);
        image.height(height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();

        let mut content = Content::new();
        content.save_state();
        content.transform([width as f32, 0.0, 0.0, height as f32, 0.0, 0.0]);
        content.x_object(image_name);
        content.restore_state();
        pdf.stream(content_id, &content.finish());
    }

    log::debug!("wrote {} pdf pages", page_ids.len());
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    Ok(pdf.finish())
}

/// Strip the alpha channel from straight RGBA bytes.
fn drop_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use playbook_core::Board;

    #[test]
    fn test_pdf_header() {
        let doc = BoardDocument::new();
        let pdf = export_pdf(&doc, &RenderOptions { scale: 1.0 }).unwrap();
        assert_eq!(&pdf[..5], b"%PDF-");
    }

    #[test]
    fn test_one_page_per_step() {
        let mut board = Board::new();
        let one = export_pdf(board.snapshot_document(), &RenderOptions { scale: 1.0 }).unwrap();

        board.add_step();
        board.add_step();
        let three = export_pdf(board.snapshot_document(), &RenderOptions { scale: 1.0 }).unwrap();

        // Three embedded snapshots take roughly three times the space
        assert!(three.len() > one.len() * 2);
    }

    #[test]
    fn test_drop_alpha() {
        let rgba = [1u8, 2, 3, 255, 4, 5, 6, 128];
        assert_eq!(drop_alpha(&rgba), vec![1, 2, 3, 4, 5, 6]);
    }
}
