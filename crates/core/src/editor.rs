//! The ordered association editor: reconciliation between an edited
//! collection and durable state.
//!
//! [`EditorSession`] owns one parent's [`OrderedCollection`] plus the
//! repository handle, and drives the reconciliation state machine
//! (Clean, Dirty, Committing, CommitFailed). A commit diffs the
//! collection against its snapshot and issues the minimal batch of
//! create/update/delete calls; the three groups run concurrently and a
//! failure in any group leaves local state untouched so the user can
//! retry.
//!
//! The session also carries the single-item editing path (the detail
//! editor): immediate create/update/delete of one child, mirrored into
//! both the working copy and the snapshot. An item is persisted by
//! exactly one path: items staged through `append` are created by the
//! commit, items saved through `save_item` get their real id at once and
//! never reach the commit's create group.

use futures::future::join_all;
use serde::Serialize;

use crate::changeset::{compute_change_set, ChangeSet, OpGroup};
use crate::drag::MoveInstruction;
use crate::error::CoreError;
use crate::ordered::{OrderedChild, OrderedCollection};
use crate::repository::AssociationRepository;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Commit results and errors
// ---------------------------------------------------------------------------

/// Counts of rows touched by a successful commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommitReport {
    pub created: usize,
    pub updated: usize,
    pub deleted: u64,
}

/// One failed operation group within a commit.
#[derive(Debug)]
pub struct GroupFailure {
    pub group: OpGroup,
    pub error: CoreError,
}

/// A commit in which one or more operation groups failed.
///
/// Groups that did succeed are not rolled back; local state is left
/// intact so the commit can be retried.
#[derive(Debug, thiserror::Error)]
#[error("{}", self.summary())]
pub struct CommitError {
    pub failures: Vec<GroupFailure>,
}

impl CommitError {
    pub fn groups(&self) -> Vec<OpGroup> {
        self.failures.iter().map(|f| f.group).collect()
    }

    fn summary(&self) -> String {
        let groups: Vec<&str> = self.failures.iter().map(|f| f.group.as_str()).collect();
        format!("commit failed in group(s): {}", groups.join(", "))
    }
}

/// Errors surfaced by [`EditorSession`] operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Repository(#[from] CoreError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    /// The batch was applied but the snapshot refetch failed. Local
    /// state still holds the pre-commit baseline; retrying may re-issue
    /// already-applied operations.
    #[error("changes saved but refreshing the collection failed: {0}")]
    Refresh(CoreError),

    #[error("a commit is already in progress")]
    CommitInProgress,
}

// ---------------------------------------------------------------------------
// Batch execution
// ---------------------------------------------------------------------------

/// Execute a change set against the repository.
///
/// The create batch, the per-item updates (independent, issued
/// concurrently), and the delete batch are all in flight together; the
/// engine waits for every group to settle before reporting. Failures are
/// collected per group and nothing is rolled back.
pub async fn apply_change_set<R: AssociationRepository>(
    repo: &R,
    parent_id: DbId,
    changes: &ChangeSet<R::Child>,
) -> Result<CommitReport, CommitError> {
    let create_group = async {
        if changes.creates.is_empty() {
            return Ok(0);
        }
        repo.create_many(parent_id, &changes.creates)
            .await
            .map(|rows| rows.len())
    };

    let update_group = async {
        let results = join_all(changes.updates.iter().map(|item| repo.update_one(item))).await;
        let mut updated = 0;
        for result in results {
            result?;
            updated += 1;
        }
        Ok(updated)
    };

    let delete_group = async {
        if changes.deletes.is_empty() {
            return Ok(0);
        }
        repo.delete_many(&changes.deletes).await
    };

    let (created, updated, deleted) = tokio::join!(create_group, update_group, delete_group);

    let mut failures = Vec::new();
    let mut report = CommitReport::default();
    match created {
        Ok(count) => report.created = count,
        Err(error) => failures.push(GroupFailure {
            group: OpGroup::Create,
            error,
        }),
    }
    match updated {
        Ok(count) => report.updated = count,
        Err(error) => failures.push(GroupFailure {
            group: OpGroup::Update,
            error,
        }),
    }
    match deleted {
        Ok(count) => report.deleted = count,
        Err(error) => failures.push(GroupFailure {
            group: OpGroup::Delete,
            error,
        }),
    }

    if failures.is_empty() {
        Ok(report)
    } else {
        for failure in &failures {
            tracing::warn!(
                group = %failure.group,
                error = %failure.error,
                parent_id,
                "Commit operation group failed",
            );
        }
        Err(CommitError { failures })
    }
}

// ---------------------------------------------------------------------------
// Editor session
// ---------------------------------------------------------------------------

/// Where the session stands relative to durable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Working copy matches the snapshot baseline.
    Clean,
    /// Local edits have not been committed.
    Dirty,
    /// A commit is in flight.
    Committing,
    /// The last commit failed; local edits are preserved for retry.
    CommitFailed,
}

/// One parent's editing session: collection, repository, state machine.
pub struct EditorSession<R: AssociationRepository> {
    repo: R,
    parent_id: DbId,
    collection: OrderedCollection<R::Child>,
    state: SessionState,
}

impl<R: AssociationRepository> EditorSession<R> {
    pub fn new(repo: R, parent_id: DbId) -> Self {
        Self {
            repo,
            parent_id,
            collection: OrderedCollection::new(),
            state: SessionState::Clean,
        }
    }

    /// Fetch the parent's children and reset the baseline.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        let rows = self.repo.list_children(self.parent_id).await?;
        self.collection.load(rows);
        self.state = SessionState::Clean;
        Ok(())
    }

    pub fn parent_id(&self) -> DbId {
        self.parent_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn items(&self) -> &[R::Child] {
        self.collection.items()
    }

    pub fn collection(&self) -> &OrderedCollection<R::Child> {
        &self.collection
    }

    // -- Local mutations (optimistic, no backend calls) ---------------------

    pub fn append(&mut self, item: R::Child) -> DbId {
        let id = self.collection.append(item);
        self.state = SessionState::Dirty;
        id
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        self.collection.move_item(from, to)?;
        self.state = SessionState::Dirty;
        Ok(())
    }

    /// Apply a move emitted by a [`crate::drag::DragSession`].
    pub fn apply_move(&mut self, instruction: MoveInstruction) -> Result<(), CoreError> {
        self.move_item(instruction.from, instruction.to)
    }

    pub fn remove(&mut self, id: DbId) -> bool {
        let removed = self.collection.remove(id);
        if removed {
            self.state = SessionState::Dirty;
        }
        removed
    }

    pub fn update_with(&mut self, id: DbId, f: impl FnOnce(&mut R::Child)) -> bool {
        let found = self.collection.update_with(id, f);
        if found {
            self.state = SessionState::Dirty;
        }
        found
    }

    /// Replace the working set wholesale with a client-supplied ordered
    /// list (negative ids mark rows to create). The snapshot baseline is
    /// untouched; the next commit diffs against it.
    pub fn stage(&mut self, items: Vec<R::Child>) {
        self.collection.stage(items);
        self.state = SessionState::Dirty;
    }

    // -- Commit -------------------------------------------------------------

    /// Diff the collection against its snapshot and persist the
    /// difference. An empty diff is a no-op and issues no backend calls.
    ///
    /// On success the children are refetched so the next diff starts
    /// from a clean baseline. On failure local state is left as it was.
    pub async fn commit(&mut self) -> Result<CommitReport, EditorError> {
        if self.state == SessionState::Committing {
            return Err(EditorError::CommitInProgress);
        }

        let changes = compute_change_set(self.collection.snapshot(), self.collection.items());
        if changes.is_empty() {
            self.state = SessionState::Clean;
            return Ok(CommitReport::default());
        }

        self.state = SessionState::Committing;
        let report = match apply_change_set(&self.repo, self.parent_id, &changes).await {
            Ok(report) => report,
            Err(error) => {
                self.state = SessionState::CommitFailed;
                return Err(error.into());
            }
        };

        match self.repo.list_children(self.parent_id).await {
            Ok(rows) => {
                self.collection.load(rows);
                self.state = SessionState::Clean;
                tracing::debug!(
                    parent_id = self.parent_id,
                    created = report.created,
                    updated = report.updated,
                    deleted = report.deleted,
                    "Commit applied",
                );
                Ok(report)
            }
            Err(error) => {
                self.state = SessionState::CommitFailed;
                Err(EditorError::Refresh(error))
            }
        }
    }

    /// Throw away local edits and return to the snapshot baseline.
    ///
    /// The escape hatch after a failed commit for a user who would
    /// rather discard pending changes than retry them.
    pub fn rollback(&mut self) {
        self.collection.reset_to_snapshot();
        self.state = SessionState::Clean;
    }

    // -- Single-item path (detail editor) -----------------------------------

    /// Persist one child immediately, outside the batch commit.
    ///
    /// An item already in the collection with a real id is updated in
    /// place (its slot keeps its position). Anything else is created:
    /// the returned row replaces the synthetic placeholder if one is in
    /// the collection, or is appended at the end. Both the working copy
    /// and the snapshot mirror the durable row afterwards.
    pub async fn save_item(&mut self, item: R::Child) -> Result<R::Child, EditorError> {
        let id = item.id();
        if !item.is_synthetic() {
            let position = match self.collection.get(id) {
                Some(stored) => stored.position(),
                None => {
                    return Err(CoreError::NotFound {
                        entity: "ordered_child",
                        id,
                    }
                    .into())
                }
            };

            let mut to_save = item;
            // The detail editor may carry a stale rank; the collection
            // owns ordering.
            to_save.set_position(position);

            let updated = self.repo.update_one(&to_save).await?;
            self.collection.replace(id, updated.clone());
            self.collection.snapshot_upsert(updated.clone());
            return Ok(updated);
        }

        let mut to_create = item;
        let position = match self.collection.index_of(id) {
            Some(index) => index as i32 + 1,
            None => self.collection.len() as i32 + 1,
        };
        to_create.set_position(position);

        let created = self.repo.create_one(self.parent_id, &to_create).await?;
        if !self.collection.replace(id, created.clone()) {
            self.collection.append(created.clone());
        }
        self.collection.snapshot_upsert(created.clone());
        Ok(created)
    }

    /// Remove one child immediately: dropped from the collection at
    /// once, and deleted from durable state if it has a real id.
    /// Remaining local positions are renumbered, so the session turns
    /// dirty until the next commit corrects the stored ranks.
    pub async fn delete_item(&mut self, id: DbId) -> Result<bool, EditorError> {
        let existed_locally = self.collection.remove(id);
        if existed_locally {
            self.state = SessionState::Dirty;
        }
        if id > 0 {
            let deleted = self.repo.delete_one(id).await?;
            self.collection.snapshot_remove(id);
            return Ok(deleted || existed_locally);
        }
        Ok(existed_locally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{item, InMemoryChildren, TestItem};
    use assert_matches::assert_matches;

    const PARENT: DbId = 7;

    async fn session_with(
        rows: Vec<TestItem>,
    ) -> (EditorSession<InMemoryChildren>, InMemoryChildren) {
        let repo = InMemoryChildren::seeded(rows);
        let handle = repo.clone();
        let mut session = EditorSession::new(repo, PARENT);
        session.refresh().await.unwrap();
        handle.take_counts();
        (session, handle)
    }

    fn local_ids(session: &EditorSession<InMemoryChildren>) -> Vec<DbId> {
        session.items().iter().map(|i| i.id).collect()
    }

    #[tokio::test]
    async fn drag_to_end_updates_every_position() {
        // Three items, first dragged to the end.
        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2), item(3, 3)]).await;

        session.move_item(0, 2).unwrap();
        assert_eq!(session.state(), SessionState::Dirty);

        let report = session.commit().await.unwrap();
        assert_eq!(
            report,
            CommitReport {
                created: 0,
                updated: 3,
                deleted: 0
            }
        );

        let counts = repo.take_counts();
        assert_eq!(counts.create_calls, 0);
        assert_eq!(counts.update_calls, 3);
        assert_eq!(counts.delete_calls, 0);
        assert_eq!(counts.lists, 1);

        let durable: Vec<_> = repo.rows().iter().map(|r| (r.id, r.position)).collect();
        assert_eq!(durable, vec![(2, 1), (3, 2), (1, 3)]);
        assert_eq!(local_ids(&session), vec![2, 3, 1]);
        assert_eq!(session.state(), SessionState::Clean);
    }

    #[tokio::test]
    async fn appended_item_is_created_without_touching_the_rest() {
        // One synthetic append against a 2-item store.
        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2)]).await;

        let synthetic = session.append(TestItem::unsaved("fresh"));
        assert!(synthetic < 0);

        let report = session.commit().await.unwrap();
        assert_eq!(
            report,
            CommitReport {
                created: 1,
                updated: 0,
                deleted: 0
            }
        );

        let counts = repo.take_counts();
        assert_eq!(counts.created_rows, 1);
        assert_eq!(counts.update_calls, 0);
        assert_eq!(counts.delete_calls, 0);

        let created = repo.rows().into_iter().find(|r| r.payload == "fresh").unwrap();
        assert_eq!(created.position, 3);
        assert!(created.id > 0);
        // The refetch swapped the placeholder for the durable row.
        assert_eq!(local_ids(&session), vec![1, 2, created.id]);
    }

    #[tokio::test]
    async fn removing_the_only_item_issues_one_delete() {
        let (mut session, repo) = session_with(vec![item(1, 1)]).await;

        assert!(session.remove(1));
        let report = session.commit().await.unwrap();
        assert_eq!(
            report,
            CommitReport {
                created: 0,
                updated: 0,
                deleted: 1
            }
        );

        let counts = repo.take_counts();
        assert_eq!(counts.delete_calls, 1);
        assert_eq!(counts.deleted_rows, 1);
        assert_eq!(counts.create_calls, 0);
        assert_eq!(counts.update_calls, 0);
        assert!(repo.rows().is_empty());
        assert!(session.items().is_empty());
    }

    #[tokio::test]
    async fn second_commit_after_rebaseline_is_a_no_op() {
        // The refetch re-baselines, so an unchanged second commit
        // issues no backend calls at all.
        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2), item(3, 3)]).await;

        session.move_item(2, 0).unwrap();
        session.commit().await.unwrap();
        repo.take_counts();

        let report = session.commit().await.unwrap();
        assert_eq!(report, CommitReport::default());

        let counts = repo.take_counts();
        assert_eq!(counts.create_calls, 0);
        assert_eq!(counts.update_calls, 0);
        assert_eq!(counts.delete_calls, 0);
        assert_eq!(counts.lists, 0);
        assert_eq!(session.state(), SessionState::Clean);
    }

    #[tokio::test]
    async fn drag_session_moves_feed_the_editor() {
        use crate::drag::{DragSession, RowBounds};

        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2), item(3, 3)]).await;

        // Drag the first row (40px tall rows) down past the other two;
        // each emitted move is applied immediately, so the second event
        // reasons against the already-updated order.
        let mut drag = DragSession::begin(0);
        let row = |top: f64| RowBounds { top, height: 40.0 };

        assert!(drag.pointer_moved(55.0, 1, row(40.0)).is_none());
        if let Some(mv) = drag.pointer_moved(61.0, 1, row(40.0)) {
            session.apply_move(mv).unwrap();
        }
        if let Some(mv) = drag.pointer_moved(101.0, 2, row(80.0)) {
            session.apply_move(mv).unwrap();
        }
        assert_eq!(drag.finish(), 2);
        assert_eq!(local_ids(&session), vec![2, 3, 1]);

        let report = session.commit().await.unwrap();
        assert_eq!(report.updated, 3);
        let durable: Vec<_> = repo.rows().iter().map(|r| r.id).collect();
        assert_eq!(durable, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn commit_with_no_changes_issues_nothing() {
        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2)]).await;
        let report = session.commit().await.unwrap();
        assert_eq!(report, CommitReport::default());
        let counts = repo.take_counts();
        assert_eq!(counts.create_calls + counts.update_calls + counts.delete_calls, 0);
    }

    #[tokio::test]
    async fn failed_group_preserves_local_state_for_retry() {
        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2)]).await;

        session.move_item(0, 1).unwrap();
        repo.fail(OpGroup::Update);

        let err = session.commit().await.unwrap_err();
        assert_matches!(&err, EditorError::Commit(commit) if commit.groups() == vec![OpGroup::Update]);
        assert_eq!(session.state(), SessionState::CommitFailed);
        // Optimistic local order is still there.
        assert_eq!(local_ids(&session), vec![2, 1]);

        // Retry once the backend recovers.
        repo.heal();
        repo.take_counts();
        let report = session.commit().await.unwrap();
        assert_eq!(report.updated, 2);
        assert_eq!(session.state(), SessionState::Clean);
        let durable: Vec<_> = repo.rows().iter().map(|r| r.id).collect();
        assert_eq!(durable, vec![2, 1]);
    }

    #[tokio::test]
    async fn rollback_discards_local_edits_after_a_failed_commit() {
        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2)]).await;

        session.move_item(0, 1).unwrap();
        repo.fail(OpGroup::Update);
        session.commit().await.unwrap_err();

        session.rollback();
        assert_eq!(session.state(), SessionState::Clean);
        assert_eq!(local_ids(&session), vec![1, 2]);

        // Nothing left to commit.
        repo.heal();
        repo.take_counts();
        let report = session.commit().await.unwrap();
        assert_eq!(report, CommitReport::default());
        let counts = repo.take_counts();
        assert_eq!(counts.update_calls, 0);
    }

    #[tokio::test]
    async fn partial_failure_reports_only_failed_groups() {
        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2)]).await;

        session.append(TestItem::unsaved("new"));
        session.remove(1);
        repo.fail(OpGroup::Delete);

        let err = session.commit().await.unwrap_err();
        assert_matches!(&err, EditorError::Commit(commit) if commit.groups() == vec![OpGroup::Delete]);

        // The create group went through; nothing was rolled back.
        let counts = repo.take_counts();
        assert_eq!(counts.created_rows, 1);
        assert!(repo.rows().iter().any(|r| r.payload == "new"));
        assert!(repo.rows().iter().any(|r| r.id == 1));
    }

    #[tokio::test]
    async fn staged_client_list_commits_like_local_edits() {
        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2), item(3, 3)]).await;

        // Client kept 3 and 1 (reversed), dropped 2, added one new row.
        let mut incoming = vec![item(3, 0), item(-90, 0), item(1, 0)];
        incoming[1].payload = "staged".into();
        session.stage(incoming);

        let report = session.commit().await.unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(report.deleted, 1);
        // 3 moves to rank 1 and 1 to rank 3; both differ from stored.
        assert_eq!(report.updated, 2);

        let durable: Vec<_> = repo
            .rows()
            .iter()
            .map(|r| (r.payload.clone(), r.position))
            .collect();
        assert_eq!(
            durable,
            vec![
                ("item-3".to_string(), 1),
                ("staged".to_string(), 2),
                ("item-1".to_string(), 3),
            ]
        );
    }

    #[tokio::test]
    async fn save_item_updates_existing_rows_in_place() {
        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2)]).await;

        let mut edited = session.items()[1].clone();
        edited.payload = "rewritten".into();
        // A stale rank from the form must not reorder anything.
        edited.position = 40;

        let saved = session.save_item(edited).await.unwrap();
        assert_eq!(saved.position, 2);
        assert_eq!(repo.rows()[1].payload, "rewritten");
        assert_eq!(local_ids(&session), vec![1, 2]);

        // Mirrored into the snapshot: a follow-up commit has no work.
        let report = session.commit().await.unwrap();
        assert_eq!(report, CommitReport::default());
    }

    #[tokio::test]
    async fn save_item_creates_new_rows_immediately() {
        let (mut session, repo) = session_with(vec![item(1, 1)]).await;

        let created = session.save_item(TestItem::unsaved("dialog")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.position, 2);
        assert_eq!(local_ids(&session), vec![1, created.id]);
        assert_eq!(repo.rows().len(), 2);

        // The commit engine must not create it a second time.
        repo.take_counts();
        let report = session.commit().await.unwrap();
        assert_eq!(report.created, 0);
        let counts = repo.take_counts();
        assert_eq!(counts.create_calls, 0);
    }

    #[tokio::test]
    async fn save_item_rejects_real_ids_outside_the_collection() {
        let (mut session, repo) = session_with(vec![item(1, 1)]).await;

        let err = session.save_item(item(99, 1)).await.unwrap_err();
        assert_matches!(
            err,
            EditorError::Repository(CoreError::NotFound { id: 99, .. })
        );
        assert_eq!(repo.rows().len(), 1);
    }

    #[tokio::test]
    async fn save_item_swaps_synthetic_placeholder_for_durable_row() {
        let (mut session, _repo) = session_with(vec![item(1, 1)]).await;

        let synthetic = session.append(TestItem::unsaved("pending"));
        let staged = session.items()[1].clone();

        let created = session.save_item(staged).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(local_ids(&session), vec![1, created.id]);
        assert!(session.items().iter().all(|i| i.id != synthetic));
    }

    #[tokio::test]
    async fn delete_item_hits_backend_for_real_ids_only() {
        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2)]).await;

        let synthetic = session.append(TestItem::unsaved("temp"));
        repo.take_counts();

        assert!(session.delete_item(synthetic).await.unwrap());
        let counts = repo.take_counts();
        assert_eq!(counts.delete_calls, 0);

        assert!(session.delete_item(2).await.unwrap());
        let counts = repo.take_counts();
        assert_eq!(counts.delete_calls, 1);
        assert_eq!(repo.rows().len(), 1);

        // Snapshot mirrored the delete: committing does not re-delete.
        let report = session.commit().await.unwrap();
        assert_eq!(report.deleted, 0);
    }

    #[tokio::test]
    async fn refresh_failure_after_apply_keeps_local_state() {
        let (mut session, repo) = session_with(vec![item(1, 1), item(2, 2)]).await;

        session.move_item(0, 1).unwrap();
        repo.fail_next_list();

        let err = session.commit().await.unwrap_err();
        assert_matches!(err, EditorError::Refresh(_));
        assert_eq!(session.state(), SessionState::CommitFailed);
        // The writes went through; the stale baseline is preserved.
        let durable: Vec<_> = repo.rows().iter().map(|r| r.id).collect();
        assert_eq!(durable, vec![2, 1]);
        assert_eq!(local_ids(&session), vec![2, 1]);

        // A retry re-diffs against the stale snapshot, re-issues the
        // now-idempotent updates, and rebaselines.
        let report = session.commit().await.unwrap();
        assert_eq!(report.updated, 2);
        assert_eq!(session.state(), SessionState::Clean);
    }
}
