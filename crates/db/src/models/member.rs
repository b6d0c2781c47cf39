//! Member models and DTOs.

use aula_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A member row from the `members` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: DbId,
    pub full_name: String,
    pub user_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub slogan: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Input for creating a new member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMember {
    pub full_name: String,
    pub user_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub slogan: Option<String>,
    pub status: Option<String>,
}

/// Partial update; only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMember {
    pub full_name: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub slogan: Option<String>,
    pub status: Option<String>,
}

/// Filter parameters for member listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberFilter {
    pub status: Option<String>,
    pub search: Option<String>,
}
