//! Text label element.

use super::{ElementId, ElementStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-standing text annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLabel {
    pub(crate) id: ElementId,
    /// Anchor position (top-left of the text block).
    pub position: Point,
    /// Text content.
    pub content: String,
    /// Font size in board units.
    pub font_size: f64,
    /// Rotation in degrees. Kept at 0 by the orientation transform so
    /// annotations stay upright.
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ElementStyle,
}

impl TextLabel {
    /// Create a new text label.
    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content: content.into(),
            font_size: 2.0,
            rotation: 0.0,
            style: ElementStyle::default(),
        }
    }
}
