//! Snapshot-based undo/redo history.
//!
//! The history is a single entry array with a cursor. Committing truncates
//! everything after the cursor (dropping the redo branch) and appends a new
//! snapshot; undo and redo only move the cursor and hand back clones, so
//! stored snapshots are never mutated.

use crate::elements::{Element, ElementId};

/// Maximum number of history entries to keep.
pub const MAX_HISTORY: usize = 50;

/// An immutable snapshot of elements and selection.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// All live elements at the time of the snapshot.
    pub elements: Vec<Element>,
    /// Selected element IDs at the time of the snapshot.
    pub selected_ids: Vec<ElementId>,
}

impl HistoryEntry {
    /// Snapshot the given state.
    pub fn capture(elements: &[Element], selected_ids: &[ElementId]) -> Self {
        Self {
            elements: elements.to_vec(),
            selected_ids: selected_ids.to_vec(),
        }
    }
}

/// Undo/redo history for one step of the board.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    /// Cursor pointing at the entry matching the current live state.
    index: usize,
    /// While true, pushes are suppressed (drag/resize/draw gesture in flight).
    continuous: bool,
}

impl History {
    /// Create a history seeded with a baseline entry.
    pub fn new(baseline: HistoryEntry) -> Self {
        Self {
            entries: vec![baseline],
            index: 0,
            continuous: false,
        }
    }

    /// Commit a snapshot after an atomic action.
    ///
    /// Truncates the redo branch, appends the snapshot and evicts the oldest
    /// entry beyond [`MAX_HISTORY`]. No-op while a continuous gesture is
    /// active. Returns true if an entry was appended.
    pub fn push(&mut self, elements: &[Element], selected_ids: &[ElementId]) -> bool {
        if self.continuous {
            return false;
        }

        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry::capture(elements, selected_ids));

        if self.entries.len() > MAX_HISTORY {
            self.entries.remove(0);
        }
        self.index = self.entries.len() - 1;
        true
    }

    /// Begin a continuous gesture (drag, resize, freehand draw).
    ///
    /// Intermediate frames will not enter the history until
    /// [`History::end_continuous`] commits the gesture's final state.
    pub fn begin_continuous(&mut self) {
        self.continuous = true;
    }

    /// End a continuous gesture and commit exactly one entry for it.
    pub fn end_continuous(&mut self, elements: &[Element], selected_ids: &[ElementId]) -> bool {
        self.continuous = false;
        self.push(elements, selected_ids)
    }

    /// Whether a continuous gesture is in flight.
    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    /// Step the cursor back and return a clone of the previous snapshot.
    /// No-op at the bottom of the stack.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.entries[self.index].clone())
    }

    /// Step the cursor forward and return a clone of the next snapshot.
    /// No-op at the top of the stack.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the whole history with a single baseline entry.
    ///
    /// Used when switching steps: undo does not cross step boundaries.
    pub fn reset(&mut self, baseline: HistoryEntry) {
        self.entries.clear();
        self.entries.push(baseline);
        self.index = 0;
        self.continuous = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Ball, Player, Team};
    use kurbo::Point;

    fn ball_at(x: f64) -> Element {
        Element::Ball(Ball::new(Point::new(x, 0.0)))
    }

    fn baseline() -> HistoryEntry {
        HistoryEntry::capture(&[], &[])
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::new(baseline());
        let mut elements = Vec::new();

        // N atomic actions, each committed
        for i in 0..10 {
            elements.push(ball_at(i as f64));
            history.push(&elements, &[]);
        }

        // N undos return to the initial snapshot
        let mut last = None;
        for _ in 0..10 {
            last = history.undo();
        }
        assert_eq!(last.unwrap().elements.len(), 0);
        assert!(!history.can_undo());

        // N redos restore the final state
        let mut last = None;
        for _ in 0..10 {
            last = history.redo();
        }
        assert_eq!(last.unwrap().elements.len(), 10);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_truncates_redo_branch() {
        let mut history = History::new(baseline());
        history.push(&[ball_at(1.0)], &[]);
        history.push(&[ball_at(1.0), ball_at(2.0)], &[]);

        history.undo();
        assert!(history.can_redo());

        history.push(&[ball_at(3.0)], &[]);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_continuous_gesture_commits_once() {
        let mut history = History::new(baseline());
        let mut elements = vec![ball_at(0.0)];
        history.push(&elements, &[]);
        let before = history.len();

        history.begin_continuous();
        for i in 1..20 {
            // intermediate drag frames
            elements[0] = ball_at(i as f64);
            assert!(!history.push(&elements, &[]));
        }
        assert_eq!(history.len(), before);

        assert!(history.end_continuous(&elements, &[]));
        assert_eq!(history.len(), before + 1);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = History::new(baseline());
        for i in 0..(MAX_HISTORY * 2) {
            history.push(&[ball_at(i as f64)], &[]);
        }
        assert_eq!(history.len(), MAX_HISTORY);

        // Walk all the way back; the oldest surviving entry is not the baseline
        let mut last = None;
        while history.can_undo() {
            last = history.undo();
        }
        assert_eq!(last.unwrap().elements.len(), 1);
    }

    #[test]
    fn test_undo_does_not_mutate_snapshots() {
        let mut history = History::new(baseline());
        let player = Element::Player(Player::new(Team::Home, 1, Point::new(5.0, 5.0)));
        history.push(std::slice::from_ref(&player), &[player.id()]);

        let mut restored = history.undo().unwrap();
        restored.elements.push(ball_at(9.0));

        // Redo still sees the unmodified snapshot
        let redone = history.redo().unwrap();
        assert_eq!(redone.elements.len(), 1);
        assert_eq!(redone.selected_ids, vec![player.id()]);
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut history = History::new(baseline());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_reset_drops_everything() {
        let mut history = History::new(baseline());
        history.push(&[ball_at(1.0)], &[]);
        history.push(&[ball_at(2.0)], &[]);

        history.reset(HistoryEntry::capture(&[ball_at(3.0)], &[]));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
