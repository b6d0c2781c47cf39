//! Ordered child collections.
//!
//! An [`OrderedCollection`] holds the in-memory working copy of one
//! parent's child records (course learnings, quiz questions) together
//! with the snapshot of the last durable state, which is the baseline
//! the diff engine works from. All mutations are local; nothing here
//! touches persistence.

use crate::error::CoreError;
use crate::types::DbId;

/// A child record that belongs to exactly one parent and carries a
/// 1-based `position` rank within that parent's collection.
///
/// Records with a negative id have never been persisted; the id is a
/// client-side placeholder assigned by [`OrderedCollection::append`] or
/// sent by the caller, and is replaced with the database id on create.
pub trait OrderedChild: Clone {
    fn id(&self) -> DbId;

    fn set_id(&mut self, id: DbId);

    fn position(&self) -> i32;

    fn set_position(&mut self, position: i32);

    /// Whether this record exists only in memory (never persisted).
    ///
    /// Database ids are BIGSERIAL and therefore strictly positive; zero
    /// (unassigned) and negatives (client placeholders) are synthetic.
    fn is_synthetic(&self) -> bool {
        self.id() <= 0
    }
}

/// In-memory ordered list of one parent's children plus the last-fetched
/// durable snapshot.
///
/// Invariant: after any mutating operation, iterating the elements in
/// array order yields contiguous `position` values `1..=N`. Positions
/// loaded from the database are kept as-is (they may be sparse); the
/// first local mutation renumbers the whole collection.
#[derive(Debug, Clone)]
pub struct OrderedCollection<T: OrderedChild> {
    items: Vec<T>,
    snapshot: Vec<T>,
    next_synthetic: DbId,
}

impl<T: OrderedChild> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OrderedChild> OrderedCollection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            snapshot: Vec::new(),
            next_synthetic: -1,
        }
    }

    /// Replace the collection with freshly fetched records.
    ///
    /// Records are sorted ascending by position and captured both as the
    /// working copy and as the diff snapshot.
    pub fn load(&mut self, mut records: Vec<T>) {
        records.sort_by_key(OrderedChild::position);
        self.snapshot = records.clone();
        self.items = records;
    }

    /// Append an item at the end, assigning `position = len + 1` and a
    /// unique synthetic id if the item does not carry one (id `0` means
    /// "unassigned"; callers may also pass their own negative id).
    ///
    /// Returns the item's id after assignment.
    pub fn append(&mut self, mut item: T) -> DbId {
        if item.id() == 0 {
            item.set_id(self.next_synthetic);
        }
        let id = item.id();
        self.reserve_synthetic(id);
        self.items.push(item);
        self.renumber();
        id
    }

    /// Move the element at `from` to `to`, renumbering every element.
    ///
    /// `from == to` is a guaranteed no-op: the list and every position
    /// value are left untouched.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        let len = self.items.len();
        if from >= len || to >= len {
            return Err(CoreError::Validation(format!(
                "move out of bounds: {from} -> {to} in a list of {len}"
            )));
        }
        if from == to {
            return Ok(());
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.renumber();
        Ok(())
    }

    /// Remove the element with the given id. Returns `true` if found.
    pub fn remove(&mut self, id: DbId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = self.items.len() != before;
        if removed {
            self.renumber();
        }
        removed
    }

    /// Apply a payload mutation to the element with the given id without
    /// affecting its place in the order. Returns `true` if found.
    pub fn update_with(&mut self, id: DbId, f: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                // The closure edits payload fields only; position is
                // owned by the collection.
                let position = item.position();
                f(item);
                item.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Replace the whole working set (the commit endpoint's staging
    /// path), renumbering to match the new order. The snapshot is left
    /// untouched.
    pub fn stage(&mut self, items: Vec<T>) {
        self.items = items;
        for index in 0..self.items.len() {
            self.reserve_synthetic(self.items[index].id());
        }
        self.renumber();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: DbId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn index_of(&self, id: DbId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Swap the element with `id` for `item`, keeping the slot's
    /// position. Used when a create returns the durable row for a
    /// synthetic placeholder.
    pub(crate) fn replace(&mut self, id: DbId, mut item: T) -> bool {
        match self.index_of(id) {
            Some(index) => {
                item.set_position(self.items[index].position());
                self.items[index] = item;
                true
            }
            None => false,
        }
    }

    /// Mirror an immediately persisted row into the snapshot, which
    /// models durable state.
    pub(crate) fn snapshot_upsert(&mut self, item: T) {
        match self.snapshot.iter_mut().find(|s| s.id() == item.id()) {
            Some(slot) => *slot = item,
            None => self.snapshot.push(item),
        }
    }

    /// Mirror an immediate delete into the snapshot.
    pub(crate) fn snapshot_remove(&mut self, id: DbId) {
        self.snapshot.retain(|s| s.id() != id);
    }

    /// Discard local edits, restoring the working copy to the snapshot
    /// baseline.
    pub(crate) fn reset_to_snapshot(&mut self) {
        self.items = self.snapshot.clone();
    }

    /// Keep the allocator below every placeholder id seen, so caller
    /// supplied negatives can never collide with assigned ones.
    fn reserve_synthetic(&mut self, id: DbId) {
        if id < 0 && id <= self.next_synthetic {
            self.next_synthetic = id - 1;
        }
    }

    fn renumber(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.set_position(index as i32 + 1);
        }
    }
}
