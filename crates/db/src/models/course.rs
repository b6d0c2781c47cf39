//! Course models and DTOs.

use aula_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A course row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new course. A missing slug is derived from the
/// name by the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: Option<String>,
}

/// Partial update; only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourse {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: Option<String>,
}

/// Filter parameters for course listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseFilter {
    pub status: Option<String>,
    pub search: Option<String>,
}
