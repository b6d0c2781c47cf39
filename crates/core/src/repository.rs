//! Persistence capability consumed by the editor.
//!
//! One implementation exists per child resource (course learnings, quiz
//! questions), each bound to its table in `aula-db`. The editor only
//! sees these six operation shapes and their success or failure; SQL and
//! transport details never cross this boundary.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::ordered::OrderedChild;
use crate::types::DbId;

#[async_trait]
pub trait AssociationRepository: Send + Sync {
    type Child: OrderedChild + PartialEq + Send + Sync;

    /// Fetch one parent's children, ordered by position ascending.
    async fn list_children(&self, parent_id: DbId) -> Result<Vec<Self::Child>, CoreError>;

    /// Persist a single new child. The returned row carries the real id.
    async fn create_one(
        &self,
        parent_id: DbId,
        item: &Self::Child,
    ) -> Result<Self::Child, CoreError>;

    /// Persist a batch of new children in one call.
    async fn create_many(
        &self,
        parent_id: DbId,
        items: &[Self::Child],
    ) -> Result<Vec<Self::Child>, CoreError>;

    /// Update an existing child (position and payload fields).
    async fn update_one(&self, item: &Self::Child) -> Result<Self::Child, CoreError>;

    /// Delete a single child. Returns whether a row was removed.
    async fn delete_one(&self, id: DbId) -> Result<bool, CoreError>;

    /// Delete a batch of children. Returns the number of removed rows.
    async fn delete_many(&self, ids: &[DbId]) -> Result<u64, CoreError>;
}
