//! Course-learning association models.
//!
//! A `course_learnings` row links one learning material (and optionally
//! a quiz) into a course at a 1-based `position`. Rows are the ordered
//! children the course editor reorders and batch-persists.

use aula_core::ordered::OrderedChild;
use aula_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `course_learnings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct CourseLearning {
    pub id: DbId,
    pub course_id: DbId,
    pub learnings_id: DbId,
    pub quiz_id: Option<DbId>,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderedChild for CourseLearning {
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

// ---------------------------------------------------------------------------
// View (list display)
// ---------------------------------------------------------------------------

/// A course-learning row joined with its learning and quiz titles, the
/// shape the course editor's list renders.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseLearningView {
    pub id: DbId,
    pub course_id: DbId,
    pub learnings_id: DbId,
    pub quiz_id: Option<DbId>,
    pub position: i32,
    pub learning_title: String,
    pub quiz_title: Option<String>,
}
