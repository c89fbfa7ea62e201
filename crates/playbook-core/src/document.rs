//! Board document: steps, team and pitch settings, metadata.

use crate::elements::{Color, Element, ElementId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default playback duration of a step in seconds.
pub const DEFAULT_STEP_DURATION_SECS: f64 = 2.0;

/// Pitch orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Landscape => Orientation::Portrait,
            Orientation::Portrait => Orientation::Landscape,
        }
    }
}

/// Kind of pitch background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchKind {
    #[default]
    Football,
    Futsal,
    Blank,
}

/// Pitch configuration.
///
/// `length` is the long axis and `width` the short axis in board units;
/// the displayed extent depends on the orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchSettings {
    pub kind: PitchKind,
    pub orientation: Orientation,
    pub length: f64,
    pub width: f64,
}

impl Default for PitchSettings {
    fn default() -> Self {
        Self {
            kind: PitchKind::Football,
            orientation: Orientation::Landscape,
            length: 105.0,
            width: 68.0,
        }
    }
}

impl PitchSettings {
    /// Displayed extent (x, y) for the current orientation.
    pub fn display_size(&self) -> (f64, f64) {
        match self.orientation {
            Orientation::Landscape => (self.length, self.width),
            Orientation::Portrait => (self.width, self.length),
        }
    }

    /// Center of the displayed pitch.
    pub fn center(&self) -> kurbo::Point {
        let (w, h) = self.display_size();
        kurbo::Point::new(w / 2.0, h / 2.0)
    }
}

/// Appearance settings for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    pub name: String,
    pub shirt_color: Color,
    pub label_color: Color,
}

/// Per-team settings for both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSettings {
    pub home: TeamInfo,
    pub away: TeamInfo,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            home: TeamInfo {
                name: "Home".to_string(),
                shirt_color: Color::new(30, 90, 200, 255),
                label_color: Color::white(),
            },
            away: TeamInfo {
                name: "Away".to_string(),
                shirt_color: Color::new(210, 50, 50, 255),
                label_color: Color::white(),
            },
        }
    }
}

/// One animation keyframe: a named snapshot of all elements plus a duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Unique step identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Playback duration in seconds.
    pub duration_secs: f64,
    /// Full snapshot of all elements active at this keyframe.
    pub elements: Vec<Element>,
}

impl Step {
    /// Create a new step with the given name and element snapshot.
    pub fn new(name: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            duration_secs: DEFAULT_STEP_DURATION_SECS,
            elements,
        }
    }

    /// Find an element in this step by ID.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }
}

/// A tactics-board document: the ordered step sequence plus settings and
/// metadata. Always contains at least one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// Ordered animation steps (never empty).
    pub steps: Vec<Step>,
    /// Team appearance settings.
    pub team_settings: TeamSettings,
    /// Pitch configuration.
    pub pitch_settings: PitchSettings,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Default for BoardDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardDocument {
    /// Create a new empty document with a single step.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            steps: vec![Step::new("Step 1", Vec::new())],
            team_settings: TeamSettings::default(),
            pitch_settings: PitchSettings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a modification.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Ball;
    use kurbo::Point;

    #[test]
    fn test_new_document_has_one_step() {
        let doc = BoardDocument::new();
        assert_eq!(doc.steps.len(), 1);
        assert!(doc.steps[0].elements.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = BoardDocument::new();
        doc.name = "Counter press".to_string();
        doc.steps[0]
            .elements
            .push(Element::Ball(Ball::new(Point::new(52.5, 34.0))));

        let json = doc.to_json().unwrap();
        let back = BoardDocument::from_json(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let doc = BoardDocument::new();
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"teamSettings\""));
        assert!(json.contains("\"pitchSettings\""));
        assert!(json.contains("\"durationSecs\""));
    }

    #[test]
    fn test_display_size_follows_orientation() {
        let mut pitch = PitchSettings::default();
        assert_eq!(pitch.display_size(), (105.0, 68.0));
        pitch.orientation = Orientation::Portrait;
        assert_eq!(pitch.display_size(), (68.0, 105.0));
    }
}
