//! Ball element.

use super::{Color, ElementId, ElementStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The ball marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ball {
    pub(crate) id: ElementId,
    /// Center position on the pitch.
    pub position: Point,
    /// Style properties.
    pub style: ElementStyle,
}

impl Ball {
    /// Marker radius in board units.
    pub const RADIUS: f64 = 0.7;

    /// Create a new ball at the given position.
    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            style: ElementStyle {
                fill_color: Some(Color::white()),
                ..ElementStyle::default()
            },
        }
    }
}
