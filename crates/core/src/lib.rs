//! Domain logic for the aula back-office.
//!
//! Everything in this crate is independent of SQL and HTTP: the ordered
//! child collections behind the course/quiz editors, the diff engine that
//! turns an edited collection into a minimal batch of persistence calls,
//! the drag-session tracker, and the validation used by the API layer.
//! Persistence is reached only through the [`repository::AssociationRepository`]
//! trait, implemented in `aula-db`.

pub mod changeset;
pub mod drag;
pub mod editor;
pub mod error;
pub mod forms;
pub mod ordered;
pub mod repository;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use changeset::{compute_change_set, ChangeSet, OpGroup};
pub use drag::{DragSession, MoveInstruction, RowBounds};
pub use editor::{
    apply_change_set, CommitError, CommitReport, EditorError, EditorSession, SessionState,
};
pub use error::CoreError;
pub use ordered::{OrderedChild, OrderedCollection};
pub use repository::AssociationRepository;
