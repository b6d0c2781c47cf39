//! Learning material models and DTOs.

use aula_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A learning material row from the `learning_materials` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LearningMaterial {
    pub id: DbId,
    pub title: String,
    pub content: serde_json::Value,
    pub cover_image_url: Option<String>,
    pub category_id: Option<DbId>,
    pub status: String,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Compact shape for selection lists (the course editor's "add a
/// lesson" picker needs ids and titles only).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LearningMaterialRef {
    pub id: DbId,
    pub title: String,
}

/// Input for creating a new learning material.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLearningMaterial {
    pub title: String,
    #[serde(default = "empty_document")]
    pub content: serde_json::Value,
    pub cover_image_url: Option<String>,
    pub category_id: Option<DbId>,
    pub status: Option<String>,
    pub published_at: Option<Timestamp>,
}

/// Partial update; only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLearningMaterial {
    pub title: Option<String>,
    pub content: Option<serde_json::Value>,
    pub cover_image_url: Option<String>,
    pub category_id: Option<DbId>,
    pub status: Option<String>,
    pub published_at: Option<Timestamp>,
}

/// Filter parameters for learning material listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LearningMaterialFilter {
    pub status: Option<String>,
    pub category_id: Option<DbId>,
    pub search: Option<String>,
}

fn empty_document() -> serde_json::Value {
    serde_json::json!({})
}
