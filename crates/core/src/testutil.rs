//! Shared fixtures for the crate's unit tests: a minimal ordered child
//! and an in-memory repository with per-group failure injection.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::changeset::OpGroup;
use crate::error::CoreError;
use crate::ordered::OrderedChild;
use crate::repository::AssociationRepository;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TestItem {
    pub id: DbId,
    pub position: i32,
    pub payload: String,
}

impl TestItem {
    pub fn unsaved(payload: &str) -> Self {
        Self {
            id: 0,
            position: 0,
            payload: payload.into(),
        }
    }
}

pub(crate) fn item(id: DbId, position: i32) -> TestItem {
    TestItem {
        id,
        position,
        payload: format!("item-{id}"),
    }
}

impl OrderedChild for TestItem {
    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

#[derive(Debug, Default)]
pub(crate) struct CallCounts {
    pub lists: usize,
    pub create_calls: usize,
    pub created_rows: usize,
    pub update_calls: usize,
    pub delete_calls: usize,
    pub deleted_rows: u64,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Mutex<Vec<TestItem>>,
    failing: Mutex<Vec<OpGroup>>,
    fail_next_list: std::sync::atomic::AtomicBool,
    counts: Mutex<CallCounts>,
}

/// Single-parent in-memory child store. Tests keep a clone to inspect
/// durable rows and flip failure injection while the editor owns the
/// other handle.
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryChildren {
    inner: Arc<Inner>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryChildren {
    pub fn seeded(rows: Vec<TestItem>) -> Self {
        let max_id = rows.iter().map(|r| r.id).max().unwrap_or(0);
        let store = Self {
            inner: Arc::new(Inner::default()),
            next_id: Arc::new(AtomicI64::new(max_id + 1)),
        };
        *store.inner.rows.lock().unwrap() = rows;
        store
    }

    pub fn rows(&self) -> Vec<TestItem> {
        let mut rows = self.inner.rows.lock().unwrap().clone();
        rows.sort_by_key(|r| r.position);
        rows
    }

    pub fn fail(&self, group: OpGroup) {
        self.inner.failing.lock().unwrap().push(group);
    }

    pub fn heal(&self) {
        self.inner.failing.lock().unwrap().clear();
    }

    /// Make the next `list_children` call fail, once.
    pub fn fail_next_list(&self) {
        self.inner.fail_next_list.store(true, Ordering::SeqCst);
    }

    /// Drain the call counters accumulated since the last call.
    pub fn take_counts(&self) -> CallCounts {
        std::mem::take(&mut *self.inner.counts.lock().unwrap())
    }

    fn check(&self, group: OpGroup) -> Result<(), CoreError> {
        if self.inner.failing.lock().unwrap().contains(&group) {
            return Err(CoreError::Internal(format!("injected {group} failure")));
        }
        Ok(())
    }

    fn insert(&self, item: &TestItem) -> TestItem {
        let mut stored = item.clone();
        stored.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.inner.rows.lock().unwrap().push(stored.clone());
        stored
    }
}

#[async_trait]
impl AssociationRepository for InMemoryChildren {
    type Child = TestItem;

    async fn list_children(&self, _parent_id: DbId) -> Result<Vec<TestItem>, CoreError> {
        self.inner.counts.lock().unwrap().lists += 1;
        if self.inner.fail_next_list.swap(false, Ordering::SeqCst) {
            return Err(CoreError::Internal("injected list failure".into()));
        }
        Ok(self.rows())
    }

    async fn create_one(&self, _parent_id: DbId, item: &TestItem) -> Result<TestItem, CoreError> {
        self.check(OpGroup::Create)?;
        let mut counts = self.inner.counts.lock().unwrap();
        counts.create_calls += 1;
        counts.created_rows += 1;
        drop(counts);
        Ok(self.insert(item))
    }

    async fn create_many(
        &self,
        _parent_id: DbId,
        items: &[TestItem],
    ) -> Result<Vec<TestItem>, CoreError> {
        self.check(OpGroup::Create)?;
        let mut counts = self.inner.counts.lock().unwrap();
        counts.create_calls += 1;
        counts.created_rows += items.len();
        drop(counts);
        Ok(items.iter().map(|item| self.insert(item)).collect())
    }

    async fn update_one(&self, item: &TestItem) -> Result<TestItem, CoreError> {
        self.check(OpGroup::Update)?;
        self.inner.counts.lock().unwrap().update_calls += 1;
        let mut rows = self.inner.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == item.id) {
            Some(row) => {
                *row = item.clone();
                Ok(row.clone())
            }
            None => Err(CoreError::NotFound {
                entity: "test_item",
                id: item.id,
            }),
        }
    }

    async fn delete_one(&self, id: DbId) -> Result<bool, CoreError> {
        self.check(OpGroup::Delete)?;
        self.inner.counts.lock().unwrap().delete_calls += 1;
        let mut rows = self.inner.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }

    async fn delete_many(&self, ids: &[DbId]) -> Result<u64, CoreError> {
        self.check(OpGroup::Delete)?;
        let mut rows = self.inner.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !ids.contains(&r.id));
        let removed = (before - rows.len()) as u64;
        drop(rows);
        let mut counts = self.inner.counts.lock().unwrap();
        counts.delete_calls += 1;
        counts.deleted_rows += removed;
        Ok(removed)
    }
}
