//! Event models and DTOs.

use aula_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An event row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub organizer_name: Option<String>,
    pub start_at: Option<Timestamp>,
    pub location: Option<String>,
    pub status: String,
    pub featured: bool,
    pub view_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Input for creating a new event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub organizer_name: Option<String>,
    pub start_at: Option<Timestamp>,
    pub location: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Partial update; only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub organizer_name: Option<String>,
    pub start_at: Option<Timestamp>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
}

/// Filter parameters for event listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub status: Option<String>,
    pub category_id: Option<DbId>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}
