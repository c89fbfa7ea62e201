//! Player marker element.

use super::{Color, ElementId, ElementStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Team affiliation for players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    /// The opposing team.
    pub fn opponent(self) -> Self {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }
}

/// A player marker on the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub(crate) id: ElementId,
    /// Team affiliation.
    pub team: Team,
    /// Jersey number (unique per team).
    pub number: u32,
    /// Display label shown next to the marker.
    pub label: String,
    /// Center position on the pitch.
    pub position: Point,
    /// Facing direction in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ElementStyle,
}

impl Player {
    /// Marker radius in board units.
    pub const RADIUS: f64 = 1.5;

    /// Create a new player with the given jersey number.
    pub fn new(team: Team, number: u32, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            team,
            number,
            label: number.to_string(),
            position,
            rotation: 0.0,
            style: ElementStyle {
                fill_color: Some(match team {
                    Team::Home => Color::new(30, 90, 200, 255),
                    Team::Away => Color::new(210, 50, 50, 255),
                }),
                ..ElementStyle::default()
            },
        }
    }
}
