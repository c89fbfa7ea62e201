//! Element definitions for the tactics board.

mod arrow;
mod ball;
mod drawing;
mod equipment;
mod player;
mod text;
mod zone;

pub use arrow::Arrow;
pub use ball::Ball;
pub use drawing::Drawing;
pub use equipment::{Equipment, EquipmentKind};
pub use player::{Player, Team};
pub use text::TextLabel;
pub use zone::Zone;

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Stroke style for arrows and drawings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    /// Cycle to the next stroke style.
    pub fn next(self) -> Self {
        match self {
            StrokeStyle::Solid => StrokeStyle::Dashed,
            StrokeStyle::Dashed => StrokeStyle::Dotted,
            StrokeStyle::Dotted => StrokeStyle::Solid,
        }
    }
}

/// Style properties shared by all elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    /// Stroke color.
    pub stroke_color: Color,
    /// Stroke width in board units.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<Color>,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::black(),
            stroke_width: 0.2,
            fill_color: None,
            opacity: 1.0,
        }
    }
}

/// Discriminant for the element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Player,
    Ball,
    Arrow,
    Zone,
    Text,
    Equipment,
    Drawing,
}

/// Enum wrapper over all element types (for serialization and storage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Player(Player),
    Ball(Ball),
    Arrow(Arrow),
    Zone(Zone),
    Text(TextLabel),
    Equipment(Equipment),
    Drawing(Drawing),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Player(e) => e.id,
            Element::Ball(e) => e.id,
            Element::Arrow(e) => e.id,
            Element::Zone(e) => e.id,
            Element::Text(e) => e.id,
            Element::Equipment(e) => e.id,
            Element::Drawing(e) => e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Player(_) => ElementKind::Player,
            Element::Ball(_) => ElementKind::Ball,
            Element::Arrow(_) => ElementKind::Arrow,
            Element::Zone(_) => ElementKind::Zone,
            Element::Text(_) => ElementKind::Text,
            Element::Equipment(_) => ElementKind::Equipment,
            Element::Drawing(_) => ElementKind::Drawing,
        }
    }

    /// Anchor position of the element.
    ///
    /// For arrows this is the start point, for drawings the first point.
    pub fn position(&self) -> Point {
        match self {
            Element::Player(e) => e.position,
            Element::Ball(e) => e.position,
            Element::Arrow(e) => e.start,
            Element::Zone(e) => e.position,
            Element::Text(e) => e.position,
            Element::Equipment(e) => e.position,
            Element::Drawing(e) => e.points.first().copied().unwrap_or(Point::ZERO),
        }
    }

    /// Move the anchor position, carrying dependent geometry along.
    pub fn set_position(&mut self, position: Point) {
        let delta = position - self.position();
        self.translate(delta);
    }

    /// Translate the whole element by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Element::Player(e) => e.position += delta,
            Element::Ball(e) => e.position += delta,
            Element::Arrow(e) => {
                e.start += delta;
                e.end += delta;
            }
            Element::Zone(e) => e.position += delta,
            Element::Text(e) => e.position += delta,
            Element::Equipment(e) => e.position += delta,
            Element::Drawing(e) => {
                for p in &mut e.points {
                    *p += delta;
                }
            }
        }
    }

    /// Get the rotation in degrees (0 for elements that don't support rotation).
    pub fn rotation(&self) -> f64 {
        match self {
            Element::Player(e) => e.rotation,
            Element::Text(e) => e.rotation,
            Element::Equipment(e) => e.rotation,
            _ => 0.0,
        }
    }

    /// Set the rotation in degrees.
    pub fn set_rotation(&mut self, rotation: f64) {
        match self {
            Element::Player(e) => e.rotation = rotation,
            Element::Text(e) => e.rotation = rotation,
            Element::Equipment(e) => e.rotation = rotation,
            _ => {}
        }
    }

    pub fn style(&self) -> &ElementStyle {
        match self {
            Element::Player(e) => &e.style,
            Element::Ball(e) => &e.style,
            Element::Arrow(e) => &e.style,
            Element::Zone(e) => &e.style,
            Element::Text(e) => &e.style,
            Element::Equipment(e) => &e.style,
            Element::Drawing(e) => &e.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        match self {
            Element::Player(e) => &mut e.style,
            Element::Ball(e) => &mut e.style,
            Element::Arrow(e) => &mut e.style,
            Element::Zone(e) => &mut e.style,
            Element::Text(e) => &mut e.style,
            Element::Equipment(e) => &mut e.style,
            Element::Drawing(e) => &mut e.style,
        }
    }

    /// Regenerate the element's ID with a new unique identifier.
    /// Used when duplicating or pasting elements.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Element::Player(e) => e.id = new_id,
            Element::Ball(e) => e.id = new_id,
            Element::Arrow(e) => e.id = new_id,
            Element::Zone(e) => e.id = new_id,
            Element::Text(e) => e.id = new_id,
            Element::Equipment(e) => e.id = new_id,
            Element::Drawing(e) => e.id = new_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_moves_arrow_endpoints() {
        let mut el = Element::Arrow(Arrow::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        el.translate(Vec2::new(5.0, 5.0));
        let Element::Arrow(arrow) = &el else { unreachable!() };
        assert_eq!(arrow.start, Point::new(5.0, 5.0));
        assert_eq!(arrow.end, Point::new(15.0, 5.0));
    }

    #[test]
    fn test_set_position_keeps_drawing_shape() {
        let points = vec![Point::new(0.0, 0.0), Point::new(2.0, 1.0), Point::new(4.0, 0.0)];
        let mut el = Element::Drawing(Drawing::from_points(points));
        el.set_position(Point::new(10.0, 10.0));
        let Element::Drawing(drawing) = &el else { unreachable!() };
        assert_eq!(drawing.points[0], Point::new(10.0, 10.0));
        assert_eq!(drawing.points[1], Point::new(12.0, 11.0));
        assert_eq!(drawing.points[2], Point::new(14.0, 10.0));
    }

    #[test]
    fn test_rotation_unsupported_variants() {
        let mut el = Element::Ball(Ball::new(Point::ZERO));
        assert_eq!(el.rotation(), 0.0);
        el.set_rotation(45.0);
        assert_eq!(el.rotation(), 0.0);
    }

    #[test]
    fn test_element_json_carries_type_tag() {
        let el = Element::Ball(Ball::new(Point::new(1.0, 2.0)));
        let json = serde_json::to_string(&el).unwrap();
        assert!(json.contains("\"type\":\"ball\""));
        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(back, el);
    }
}
