//! Named element groups.
//!
//! Groups hold weak references (IDs only) to elements; they never own the
//! elements themselves and exist purely as a selection/locking convenience.

use crate::elements::ElementId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for groups.
pub type GroupId = Uuid;

/// A named set of element references with lock and visibility flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementGroup {
    pub id: GroupId,
    /// Display name.
    pub name: String,
    /// Member element IDs (weak references).
    pub element_ids: Vec<ElementId>,
    /// Locked groups reject edits in the UI.
    #[serde(default)]
    pub locked: bool,
    /// Hidden groups are skipped when rendering.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl ElementGroup {
    /// Create a new group over the given element IDs.
    pub fn new(name: impl Into<String>, element_ids: Vec<ElementId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            element_ids,
            locked: false,
            visible: true,
        }
    }

    /// Whether the group references the given element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.element_ids.contains(&id)
    }

    /// Drop a reference to a deleted element.
    /// Returns true if the group no longer references anything.
    pub fn prune(&mut self, id: ElementId) -> bool {
        self.element_ids.retain(|&e| e != id);
        self.element_ids.is_empty()
    }
}
