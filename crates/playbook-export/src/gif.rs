//! Animated GIF export: one palette-quantized frame per step.

use crate::raster::{RenderOptions, render_step, rgba_bytes};
use crate::{ExportError, ExportResult};
use playbook_core::document::BoardDocument;

/// Export the whole step sequence as an animated GIF.
///
/// Each step contributes one frame; the frame delay comes from the step's
/// playback duration. The animation repeats forever.
pub fn export_gif(document: &BoardDocument, options: &RenderOptions) -> ExportResult<Vec<u8>> {
    if document.steps.is_empty() {
        return Err(ExportError::EmptyDocument);
    }

    let first = render_step(document, 0, options)?;
    let width = first.width() as u16;
    let height = first.height() as u16;

    let mut out = Vec::new();
    {
        let mut encoder = ::gif::Encoder::new(&mut out, width, height, &[])?;
        encoder.set_repeat(::gif::Repeat::Infinite)?;

        for (index, step) in document.steps.iter().enumerate() {
            let pixmap = if index == 0 {
                first.clone()
            } else {
                render_step(document, index, options)?
            };
            let mut rgba = rgba_bytes(&pixmap);
            let mut frame = ::gif::Frame::from_rgba_speed(width, height, &mut rgba, 10);
            // GIF delays are in centiseconds
            frame.delay = (step.duration_secs * 100.0).round().clamp(1.0, 65535.0) as u16;
            encoder.write_frame(&frame)?;
        }
    }
    log::debug!("encoded {} gif frames", document.steps.len());
    Ok(out)
}
