//! Story models and DTOs.
//!
//! `content` holds the block-editor document as JSON; the service never
//! interprets it beyond storage.

use aula_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A story row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Story {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub content: serde_json::Value,
    pub thumbnail_url: Option<String>,
    pub status: String,
    pub featured: bool,
    pub view_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new story.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStory {
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "empty_document")]
    pub content: serde_json::Value,
    pub thumbnail_url: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Partial update; only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStory {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<serde_json::Value>,
    pub thumbnail_url: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
}

/// Filter parameters for story listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoryFilter {
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

fn empty_document() -> serde_json::Value {
    serde_json::json!({})
}
