//! Playbook Export Library
//!
//! Raster snapshots of board steps and export encoders: PNG, animated GIF,
//! multi-page PDF, and SVG (raster embedded).

pub mod gif;
pub mod pdf;
pub mod png;
pub mod raster;
pub mod svg;

pub use gif::export_gif;
pub use pdf::export_pdf;
pub use png::export_png;
pub use raster::{RenderOptions, render_step, render_step_at};
pub use svg::export_svg;

use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid step index: {0}")]
    InvalidStep(usize),
    #[error("document has no steps")]
    EmptyDocument,
    #[error("raster error: {0}")]
    Raster(String),
    #[error("PNG encoding error: {0}")]
    Png(#[from] ::png::EncodingError),
    #[error("GIF encoding error: {0}")]
    Gif(#[from] ::gif::EncodingError),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
