//! Playbook Core Library
//!
//! Platform-agnostic document, history and animation logic for the Playbook
//! tactics board: elements, timed steps, snapshot-based undo/redo, playback
//! interpolation, the pitch-orientation transform, and document storage.

pub mod board;
pub mod document;
pub mod elements;
pub mod group;
pub mod history;
pub mod interpolate;
pub mod playback;
pub mod storage;
pub mod transform;

pub use board::Board;
pub use document::{
    BoardDocument, DEFAULT_STEP_DURATION_SECS, Orientation, PitchKind, PitchSettings, Step,
    TeamInfo, TeamSettings,
};
pub use elements::{
    Arrow, Ball, Color, Drawing, Element, ElementId, ElementKind, ElementStyle, Equipment,
    EquipmentKind, Player, StrokeStyle, Team, TextLabel, Zone,
};
pub use group::{ElementGroup, GroupId};
pub use history::{History, HistoryEntry, MAX_HISTORY};
pub use interpolate::{ease_in_out_cubic, interpolated, interpolated_elements};
pub use playback::{Playback, PlaybackEvent};
pub use transform::toggle_orientation;
