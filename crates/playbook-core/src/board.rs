//! Runtime board state: live elements, selection, steps, history, playback.
//!
//! The board keeps three views of state consistent: the live element array
//! being edited, the per-step snapshots stored in the document, and the undo
//! history. All mutations are synchronous and single-writer.

use crate::document::{BoardDocument, Step};
use crate::elements::{Element, ElementId, Equipment, EquipmentKind, Player, Team};
use crate::group::{ElementGroup, GroupId};
use crate::history::{History, HistoryEntry};
use crate::playback::{Playback, PlaybackEvent};
use kurbo::{Point, Vec2};

/// Runtime board state (not persisted as a whole; the document inside is).
#[derive(Debug, Clone)]
pub struct Board {
    /// The document being edited.
    pub document: BoardDocument,
    /// Live elements of the current step.
    pub elements: Vec<Element>,
    /// Currently selected element IDs.
    pub selection: Vec<ElementId>,
    /// Named element groups.
    pub groups: Vec<ElementGroup>,
    /// Playback clock.
    pub playback: Playback,
    history: History,
    current_step: usize,
    /// Set on every committed change; drained by the autosave layer.
    dirty: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board over a fresh empty document.
    pub fn new() -> Self {
        Self::from_document(BoardDocument::new())
    }

    /// Create a board over an existing document, starting at its first step.
    pub fn from_document(mut document: BoardDocument) -> Self {
        if document.steps.is_empty() {
            document.steps.push(Step::new("Step 1", Vec::new()));
        }
        let elements = document.steps[0].elements.clone();
        let history = History::new(HistoryEntry::capture(&elements, &[]));
        Self {
            document,
            elements,
            selection: Vec::new(),
            groups: Vec::new(),
            playback: Playback::new(),
            history,
            current_step: 0,
            dirty: false,
        }
    }

    /// Index of the current step.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// The current step's stored snapshot.
    pub fn step(&self) -> &Step {
        &self.document.steps[self.current_step]
    }

    /// Whether there are uncommitted-to-storage changes.
    /// Cleared by [`Board::take_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drain the dirty flag (polled by the autosave layer).
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // ----- history -----

    /// Commit the current state as a history entry after an atomic action.
    /// No-op during a continuous gesture.
    pub fn commit(&mut self) {
        if self.history.push(&self.elements, &self.selection) {
            self.dirty = true;
            self.document.touch();
        }
    }

    /// Begin a drag/resize/freehand gesture; history commits are suppressed
    /// until [`Board::end_gesture`].
    pub fn begin_gesture(&mut self) {
        self.history.begin_continuous();
    }

    /// End a gesture, committing exactly one entry for its final state.
    pub fn end_gesture(&mut self) {
        if self.history.end_continuous(&self.elements, &self.selection) {
            self.dirty = true;
            self.document.touch();
        }
    }

    /// Restore the previous history snapshot.
    /// Returns true if undo was performed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entry) => {
                self.elements = entry.elements;
                self.selection = entry.selected_ids;
                self.dirty = true;
                self.document.touch();
                true
            }
            None => false,
        }
    }

    /// Restore the next history snapshot.
    /// Returns true if redo was performed.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                self.elements = entry.elements;
                self.selection = entry.selected_ids;
                self.dirty = true;
                self.document.touch();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ----- steps -----

    /// Insert a copy of the live elements as a new step right after the
    /// current one and make it current. Returns the new step index.
    pub fn add_step(&mut self) -> usize {
        self.store_live_elements();
        let name = format!("Step {}", self.document.steps.len() + 1);
        let step = Step::new(name, self.elements.clone());
        let index = self.current_step + 1;
        self.document.steps.insert(index, step);
        self.current_step = index;
        self.selection.clear();
        self.history
            .reset(HistoryEntry::capture(&self.elements, &self.selection));
        self.dirty = true;
        self.document.touch();
        index
    }

    /// Switch to the step at `index`.
    ///
    /// The outgoing step receives a copy of the live elements, the incoming
    /// step's snapshot becomes the live array, the selection clears, and the
    /// history resets to a single baseline (undo does not cross steps).
    /// Returns false if the index is out of range.
    pub fn go_to_step(&mut self, index: usize) -> bool {
        if index >= self.document.steps.len() {
            return false;
        }
        if index == self.current_step {
            return true;
        }
        self.store_live_elements();
        self.elements = self.document.steps[index].elements.clone();
        self.current_step = index;
        self.selection.clear();
        self.history
            .reset(HistoryEntry::capture(&self.elements, &self.selection));
        self.dirty = true;
        true
    }

    /// Remove the step at `index`. Refuses when only one step remains.
    pub fn remove_step(&mut self, index: usize) -> bool {
        if self.document.steps.len() <= 1 || index >= self.document.steps.len() {
            return false;
        }
        self.document.steps.remove(index);

        if index == self.current_step {
            self.current_step = index.min(self.document.steps.len() - 1);
            self.elements = self.document.steps[self.current_step].elements.clone();
            self.selection.clear();
            self.history
                .reset(HistoryEntry::capture(&self.elements, &self.selection));
        } else if index < self.current_step {
            self.current_step -= 1;
        }
        self.dirty = true;
        self.document.touch();
        true
    }

    /// Rename the step at `index`.
    pub fn rename_step(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.document.steps.get_mut(index) {
            Some(step) => {
                step.name = name.into();
                self.dirty = true;
                self.document.touch();
                true
            }
            None => false,
        }
    }

    /// Set the playback duration of the step at `index`.
    pub fn set_step_duration(&mut self, index: usize, duration_secs: f64) -> bool {
        match self.document.steps.get_mut(index) {
            Some(step) if duration_secs > 0.0 => {
                step.duration_secs = duration_secs;
                self.dirty = true;
                self.document.touch();
                true
            }
            _ => false,
        }
    }

    /// Write the live elements back into the current step's storage slot.
    fn store_live_elements(&mut self) {
        self.document.steps[self.current_step].elements = self.elements.clone();
    }

    /// The next step in the sequence, if any (wrapping when looping).
    pub fn next_step(&self) -> Option<&Step> {
        if self.current_step + 1 < self.document.steps.len() {
            self.document.steps.get(self.current_step + 1)
        } else if self.playback.is_looping() {
            self.document.steps.first()
        } else {
            None
        }
    }

    // ----- playback -----

    /// Advance playback by `dt` seconds, switching steps on completion.
    pub fn tick(&mut self, dt: f64) -> PlaybackEvent {
        let duration = self.step().duration_secs;
        let event = self.tick_playback(dt, duration);
        if let PlaybackEvent::AdvanceTo(next) = event {
            self.go_to_step(next);
        }
        event
    }

    fn tick_playback(&mut self, dt: f64, duration: f64) -> PlaybackEvent {
        self.playback
            .tick(dt, self.current_step, self.document.steps.len(), duration)
    }

    /// Elements blended towards the next step at the current playback
    /// progress, for display during playback. Live state is untouched.
    pub fn frame_elements(&self) -> Vec<Element> {
        let progress = self.playback.progress(self.step().duration_secs);
        match self.next_step() {
            Some(next) => crate::interpolate::interpolated_elements(&self.elements, next, progress),
            None => self.elements.clone(),
        }
    }

    // ----- elements -----

    /// Add an element and commit. Returns its ID.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        self.commit();
        id
    }

    /// Add a player for `team` at `position`, assigning the lowest unused
    /// jersey number on that team. Returns the new element's ID.
    pub fn add_player(&mut self, team: Team, position: Point) -> ElementId {
        let number = self.next_player_number(team);
        let mut player = Player::new(team, number, position);
        let info = match team {
            Team::Home => &self.document.team_settings.home,
            Team::Away => &self.document.team_settings.away,
        };
        player.style.fill_color = Some(info.shirt_color);
        self.add_element(Element::Player(player))
    }

    /// Add a piece of equipment at `position`.
    pub fn add_equipment(&mut self, kind: EquipmentKind, position: Point) -> ElementId {
        self.add_element(Element::Equipment(Equipment::new(kind, position)))
    }

    /// Lowest positive jersey number not used by any live player on `team`.
    pub fn next_player_number(&self, team: Team) -> u32 {
        let used: std::collections::HashSet<u32> = self
            .elements
            .iter()
            .filter_map(|e| match e {
                Element::Player(p) if p.team == team => Some(p.number),
                _ => None,
            })
            .collect();
        let mut n = 1;
        while used.contains(&n) {
            n += 1;
        }
        n
    }

    /// Get an element by ID.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Get a mutable reference to an element by ID.
    /// Callers commit after finishing their edits.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Remove an element, dropping it from the selection and pruning group
    /// references. Commits.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id() == id)?;
        let removed = self.elements.remove(index);
        self.selection.retain(|&s| s != id);
        self.groups.retain_mut(|g| !g.prune(id));
        self.commit();
        Some(removed)
    }

    /// Delete all selected elements. Commits once.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let doomed: Vec<ElementId> = self.selection.drain(..).collect();
        self.elements.retain(|e| !doomed.contains(&e.id()));
        for id in &doomed {
            self.groups.retain_mut(|g| !g.prune(*id));
        }
        self.commit();
    }

    /// Translate all selected elements. Does not commit; drags bracket this
    /// with [`Board::begin_gesture`] / [`Board::end_gesture`].
    pub fn translate_selected(&mut self, delta: Vec2) {
        let selected = self.selection.clone();
        for element in &mut self.elements {
            if selected.contains(&element.id()) {
                element.translate(delta);
            }
        }
    }

    /// Duplicate the selected elements with fresh IDs, offset slightly, and
    /// select the copies. Commits.
    pub fn duplicate_selected(&mut self) -> Vec<ElementId> {
        let mut copies: Vec<Element> = self
            .elements
            .iter()
            .filter(|e| self.selection.contains(&e.id()))
            .cloned()
            .collect();
        if copies.is_empty() {
            return Vec::new();
        }
        for copy in &mut copies {
            copy.regenerate_id();
            copy.translate(Vec2::new(2.0, 2.0));
        }
        // Duplicated players get their own jersey numbers
        for copy in &mut copies {
            if let Element::Player(p) = copy {
                p.number = self.next_player_number(p.team);
                p.label = p.number.to_string();
            }
            self.elements.push(copy.clone());
        }
        let ids: Vec<ElementId> = copies.iter().map(Element::id).collect();
        self.selection = ids.clone();
        self.commit();
        ids
    }

    // ----- selection -----

    /// Select a single element (clears previous selection).
    pub fn select(&mut self, id: ElementId) {
        self.selection.clear();
        self.add_to_selection(id);
    }

    /// Add to selection.
    pub fn add_to_selection(&mut self, id: ElementId) {
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select all live elements.
    pub fn select_all(&mut self) {
        self.selection = self.elements.iter().map(Element::id).collect();
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(&id)
    }

    // ----- groups -----

    /// Group the current selection under `name`.
    /// Returns None when fewer than two elements are selected.
    pub fn group_selected(&mut self, name: impl Into<String>) -> Option<GroupId> {
        if self.selection.len() < 2 {
            return None;
        }
        let group = ElementGroup::new(name, self.selection.clone());
        let id = group.id;
        self.groups.push(group);
        Some(id)
    }

    /// Dissolve a group, leaving its elements in place.
    pub fn ungroup(&mut self, id: GroupId) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.id != id);
        self.groups.len() != before
    }

    /// Get a group by ID.
    pub fn group(&self, id: GroupId) -> Option<&ElementGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Get a mutable group by ID.
    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut ElementGroup> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    /// Whether the element belongs to a locked group.
    pub fn is_locked(&self, id: ElementId) -> bool {
        self.groups.iter().any(|g| g.locked && g.contains(id))
    }

    /// The document with the live elements flushed into the current step,
    /// ready to persist.
    pub fn snapshot_document(&mut self) -> &BoardDocument {
        self.store_live_elements();
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Ball;

    fn ball_at(x: f64) -> Element {
        Element::Ball(Ball::new(Point::new(x, 0.0)))
    }

    #[test]
    fn test_new_board_is_clean() {
        let board = Board::new();
        assert_eq!(board.current_step(), 0);
        assert!(board.elements.is_empty());
        assert!(!board.is_dirty());
        assert!(!board.can_undo());
    }

    #[test]
    fn test_add_element_commits_and_dirties() {
        let mut board = Board::new();
        board.add_element(ball_at(1.0));
        assert!(board.can_undo());
        assert!(board.take_dirty());
        assert!(!board.is_dirty());
    }

    #[test]
    fn test_undo_redo_restore_selection() {
        let mut board = Board::new();
        let id = board.add_element(ball_at(1.0));
        board.select(id);
        board.commit();

        board.undo();
        board.undo();
        assert!(board.elements.is_empty());
        assert!(board.selection.is_empty());

        board.redo();
        board.redo();
        assert_eq!(board.elements.len(), 1);
        assert_eq!(board.selection, vec![id]);
    }

    #[test]
    fn test_undo_redo_touch_document() {
        let mut board = Board::new();
        board.add_element(ball_at(1.0));

        let stale = board.document.updated_at - chrono::Duration::seconds(60);
        board.document.updated_at = stale;
        assert!(board.undo());
        assert!(board.document.updated_at > stale);

        board.document.updated_at = stale;
        assert!(board.redo());
        assert!(board.document.updated_at > stale);
    }

    #[test]
    fn test_gesture_commits_once() {
        let mut board = Board::new();
        let id = board.add_element(ball_at(0.0));
        board.select(id);

        board.begin_gesture();
        for _ in 0..30 {
            board.translate_selected(Vec2::new(1.0, 0.0));
            board.commit(); // suppressed while the gesture is active
        }
        board.end_gesture();

        // One undo rewinds the entire drag
        assert!(board.undo());
        assert_eq!(board.element(id).unwrap().position(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_add_step_clones_live_elements() {
        let mut board = Board::new();
        board.add_element(ball_at(5.0));
        let index = board.add_step();
        assert_eq!(index, 1);
        assert_eq!(board.current_step(), 1);
        assert_eq!(board.document.steps.len(), 2);
        assert_eq!(board.elements.len(), 1);
    }

    #[test]
    fn test_step_switch_round_trip_is_identical() {
        let mut board = Board::new();
        board.add_element(ball_at(5.0));
        board.add_step();
        let after_add = board.elements.clone();

        assert!(board.go_to_step(0));
        assert!(board.go_to_step(1));
        assert_eq!(board.elements, after_add);
    }

    #[test]
    fn test_step_switch_resets_history() {
        let mut board = Board::new();
        board.add_element(ball_at(1.0));
        board.add_step();
        board.add_element(ball_at(2.0));

        board.go_to_step(0);
        assert!(!board.can_undo());
        assert!(!board.can_redo());
        assert!(board.selection.is_empty());
    }

    #[test]
    fn test_step_edits_survive_switching() {
        let mut board = Board::new();
        board.add_element(ball_at(1.0));
        board.add_step();
        board.add_element(ball_at(2.0));
        assert_eq!(board.elements.len(), 2);

        board.go_to_step(0);
        assert_eq!(board.elements.len(), 1);
        board.go_to_step(1);
        assert_eq!(board.elements.len(), 2);
    }

    #[test]
    fn test_remove_last_step_refused() {
        let mut board = Board::new();
        assert!(!board.remove_step(0));
        board.add_step();
        assert!(board.remove_step(0));
        assert!(!board.remove_step(0));
    }

    #[test]
    fn test_remove_earlier_step_shifts_current() {
        let mut board = Board::new();
        board.add_step();
        board.add_step();
        assert_eq!(board.current_step(), 2);
        board.remove_step(0);
        assert_eq!(board.current_step(), 1);
    }

    #[test]
    fn test_player_numbers_lowest_unused() {
        let mut board = Board::new();
        let p1 = board.add_player(Team::Home, Point::ZERO);
        board.add_player(Team::Home, Point::ZERO);
        board.add_player(Team::Home, Point::ZERO);

        // Away numbering is independent
        board.add_player(Team::Away, Point::ZERO);
        let away2 = board.add_player(Team::Away, Point::ZERO);
        let Element::Player(p) = board.element(away2).unwrap() else {
            unreachable!()
        };
        assert_eq!(p.number, 2);

        // Deleting #1 frees it for the next addition
        board.select(p1);
        board.delete_selected();
        let replacement = board.add_player(Team::Home, Point::ZERO);
        let Element::Player(p) = board.element(replacement).unwrap() else {
            unreachable!()
        };
        assert_eq!(p.number, 1);
    }

    #[test]
    fn test_delete_prunes_groups() {
        let mut board = Board::new();
        let a = board.add_element(ball_at(1.0));
        let b = board.add_element(ball_at(2.0));
        board.select(a);
        board.add_to_selection(b);
        let group = board.group_selected("pair").unwrap();

        board.select(a);
        board.delete_selected();
        assert!(!board.group(group).unwrap().contains(a));

        board.select(b);
        board.delete_selected();
        // Fully emptied groups are dropped
        assert!(board.group(group).is_none());
    }

    #[test]
    fn test_locked_group_lookup() {
        let mut board = Board::new();
        let a = board.add_element(ball_at(1.0));
        let b = board.add_element(ball_at(2.0));
        board.select_all();
        let group = board.group_selected("wall").unwrap();
        assert!(!board.is_locked(a));
        board.group_mut(group).unwrap().locked = true;
        assert!(board.is_locked(a));
        assert!(board.is_locked(b));
    }

    #[test]
    fn test_playback_advances_steps() {
        let mut board = Board::new();
        board.add_element(ball_at(0.0));
        board.add_step();
        board.go_to_step(0);
        board.set_step_duration(0, 1.0);

        board.playback.play();
        assert_eq!(board.tick(0.5), PlaybackEvent::Playing);
        assert_eq!(board.tick(0.6), PlaybackEvent::AdvanceTo(1));
        assert_eq!(board.current_step(), 1);

        board.set_step_duration(1, 1.0);
        assert_eq!(board.tick(1.5), PlaybackEvent::Halted);
        assert!(!board.playback.is_playing());
    }

    #[test]
    fn test_frame_elements_blend_towards_next_step() {
        let mut board = Board::new();
        let id = board.add_element(ball_at(0.0));
        board.add_step();
        // Move the ball in step 2
        if let Some(el) = board.element_mut(id) {
            el.set_position(Point::new(10.0, 0.0));
        }
        board.commit();
        board.go_to_step(0);
        board.set_step_duration(0, 1.0);

        board.playback.play();
        board.tick(0.5);
        let frame = board.frame_elements();
        let x = frame[0].position().x;
        // Eased midpoint: exactly half way
        assert!((x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_selected_renumbers_players() {
        let mut board = Board::new();
        let id = board.add_player(Team::Home, Point::ZERO);
        board.select(id);
        let copies = board.duplicate_selected();
        assert_eq!(copies.len(), 1);
        let Element::Player(copy) = board.element(copies[0]).unwrap() else {
            unreachable!()
        };
        assert_eq!(copy.number, 2);
        assert_eq!(board.selection, copies);
    }

    #[test]
    fn test_snapshot_document_flushes_live_elements() {
        let mut board = Board::new();
        board.add_element(ball_at(3.0));
        let doc = board.snapshot_document();
        assert_eq!(doc.steps[0].elements.len(), 1);
    }
}
