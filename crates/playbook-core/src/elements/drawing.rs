//! Freehand drawing element.

use super::{ElementId, ElementStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand drawing (series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub(crate) id: ElementId,
    /// Points in the freehand path.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ElementStyle,
}

impl Drawing {
    /// Create a new empty drawing.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            style: ElementStyle::default(),
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: ElementStyle::default(),
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Simplify the path by removing redundant points.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.points.len() < 3 {
            return;
        }
        self.points = rdp_simplify(&self.points, tolerance);
    }
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}

/// Ramer-Douglas-Peucker line simplification.
fn rdp_simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    // Find point with maximum distance from the line between first and last
    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;

    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > tolerance {
        let mut left = rdp_simplify(&points[..=max_index], tolerance);
        let right = rdp_simplify(&points[max_index..], tolerance);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Perpendicular distance from a point to the line through a and b.
fn perpendicular_distance(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let len = seg.hypot();
    if len < f64::EPSILON {
        return (point - a).hypot();
    }
    ((b.x - a.x) * (a.y - point.y) - (a.x - point.x) * (b.y - a.y)).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_point() {
        let mut drawing = Drawing::new();
        assert!(drawing.is_empty());
        drawing.add_point(Point::new(1.0, 1.0));
        assert_eq!(drawing.len(), 1);
    }

    #[test]
    fn test_simplify_collinear() {
        let points: Vec<Point> = (0..10).map(|i| Point::new(i as f64, 0.0)).collect();
        let mut drawing = Drawing::from_points(points);
        drawing.simplify(0.1);
        assert_eq!(drawing.len(), 2);
    }

    #[test]
    fn test_simplify_keeps_corner() {
        let mut drawing = Drawing::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
        ]);
        drawing.simplify(0.1);
        assert_eq!(drawing.len(), 3);
    }
}
