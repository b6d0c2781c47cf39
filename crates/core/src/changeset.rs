//! Pure diff between a durable snapshot and an edited collection.
//!
//! The diff is the first half of the persist pipeline: it classifies
//! every item into at most one of three operation groups. Executing the
//! groups lives in [`crate::editor`]; nothing here performs I/O.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ordered::OrderedChild;
use crate::types::DbId;

/// The three persistence operation groups a commit can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpGroup {
    Create,
    Update,
    Delete,
}

impl OpGroup {
    /// String representation for display, logging, and error payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for OpGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The minimal set of persistence calls that reconciles durable state
/// with an edited collection.
///
/// `creates` and `updates` carry items with their final position already
/// set (array index + 1). An item appears in at most one group.
#[derive(Debug, Clone)]
pub struct ChangeSet<T> {
    pub creates: Vec<T>,
    pub updates: Vec<T>,
    pub deletes: Vec<DbId>,
}

impl<T> ChangeSet<T> {
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }
}

impl<T> Default for ChangeSet<T> {
    fn default() -> Self {
        Self {
            creates: Vec::new(),
            updates: Vec::new(),
            deletes: Vec::new(),
        }
    }
}

/// Diff `current` against `snapshot`.
///
/// - **creates**: items with a synthetic id, at their final position.
/// - **updates**: items present in both sides (by real id) whose
///   recomputed position or payload differs from the snapshot row.
/// - **deletes**: snapshot ids absent from `current`.
///
/// A real id present in `current` but not in `snapshot` belongs to
/// neither side of this editor's lifecycle (it was persisted by another
/// actor); it is left alone.
pub fn compute_change_set<T>(snapshot: &[T], current: &[T]) -> ChangeSet<T>
where
    T: OrderedChild + PartialEq,
{
    let snapshot_by_id: HashMap<DbId, &T> =
        snapshot.iter().map(|item| (item.id(), item)).collect();
    let current_ids: HashSet<DbId> = current.iter().map(OrderedChild::id).collect();

    let mut changes = ChangeSet::default();

    for (index, item) in current.iter().enumerate() {
        let mut desired = item.clone();
        desired.set_position(index as i32 + 1);

        if item.is_synthetic() {
            changes.creates.push(desired);
        } else if let Some(stored) = snapshot_by_id.get(&item.id()) {
            if desired != **stored {
                changes.updates.push(desired);
            }
        }
    }

    changes.deletes = snapshot
        .iter()
        .map(OrderedChild::id)
        .filter(|id| !current_ids.contains(id))
        .collect();

    changes
}
