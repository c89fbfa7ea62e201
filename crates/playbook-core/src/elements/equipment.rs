//! Training equipment elements.

use super::{Color, ElementId, ElementStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of training equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentKind {
    Cone,
    Goal,
    Ladder,
    Hurdle,
    Marker,
}

/// A piece of training equipment placed on the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub(crate) id: ElementId,
    /// What kind of equipment this is.
    pub kind: EquipmentKind,
    /// Center position on the pitch.
    pub position: Point,
    /// Orientation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ElementStyle,
}

impl Equipment {
    /// Create a new piece of equipment.
    pub fn new(kind: EquipmentKind, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            rotation: 0.0,
            style: ElementStyle {
                fill_color: Some(Color::new(255, 140, 0, 255)),
                ..ElementStyle::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_defaults() {
        let cone = Equipment::new(EquipmentKind::Cone, Point::new(30.0, 20.0));
        assert_eq!(cone.kind, EquipmentKind::Cone);
        assert_eq!(cone.position, Point::new(30.0, 20.0));
        assert_eq!(cone.rotation, 0.0);
        assert!(cone.style.fill_color.is_some());
    }
}
