//! Arrow element (movement, pass and run indicators).

use super::{ElementId, ElementStyle, StrokeStyle};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An arrow between two points on the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub(crate) id: ElementId,
    /// Start point.
    pub start: Point,
    /// End point (where the arrowhead points).
    pub end: Point,
    /// Stroke style (solid = movement, dashed = pass, dotted = run).
    #[serde(default)]
    pub stroke_style: StrokeStyle,
    /// Size of the arrowhead in board units.
    pub head_size: f64,
    /// Style properties.
    pub style: ElementStyle,
}

impl Arrow {
    /// Create a new arrow.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            stroke_style: StrokeStyle::default(),
            head_size: 1.2,
            style: ElementStyle::default(),
        }
    }

    /// Get the direction vector (normalized).
    pub fn direction(&self) -> Vec2 {
        let d = self.end - self.start;
        let len = d.hypot();
        if len < f64::EPSILON {
            Vec2::new(1.0, 0.0)
        } else {
            d / len
        }
    }

    /// Get the length of the arrow shaft.
    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_length() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((arrow.length() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_direction_degenerate() {
        let arrow = Arrow::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        let dir = arrow.direction();
        assert_eq!(dir, Vec2::new(1.0, 0.0));
    }
}
