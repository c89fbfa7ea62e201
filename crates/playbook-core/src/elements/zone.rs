//! Zone element (shaded tactical area).

use super::{Color, ElementId, ElementStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangular zone highlighting an area of the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the zone.
    pub width: f64,
    /// Height of the zone.
    pub height: f64,
    /// Style properties.
    pub style: ElementStyle,
}

impl Zone {
    /// Create a new zone.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style: ElementStyle {
                fill_color: Some(Color::new(250, 200, 40, 90)),
                ..ElementStyle::default()
            },
        }
    }

    /// Create a zone from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        Self::new(
            Point::new(min_x, min_y),
            (p2.x - p1.x).abs(),
            (p2.y - p1.y).abs(),
        )
    }

    /// Center point of the zone.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Get the zone as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let zone = Zone::from_corners(Point::new(10.0, 10.0), Point::new(2.0, 4.0));
        assert_eq!(zone.position, Point::new(2.0, 4.0));
        assert_eq!(zone.width, 8.0);
        assert_eq!(zone.height, 6.0);
    }

    #[test]
    fn test_center() {
        let zone = Zone::new(Point::new(0.0, 0.0), 10.0, 4.0);
        assert_eq!(zone.center(), Point::new(5.0, 2.0));
    }
}
