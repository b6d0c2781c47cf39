//! Repository for the `stories` table.

use sqlx::PgPool;

use aula_core::types::DbId;

use crate::models::story::{CreateStory, Story, StoryFilter, UpdateStory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, content, thumbnail_url, \
    status, featured, view_count, created_at, updated_at";

/// Provides CRUD operations for stories.
pub struct StoryRepo;

impl StoryRepo {
    /// Insert a new story, returning the created row.
    ///
    /// If `status` is `None`, defaults to `draft`.
    pub async fn create(pool: &PgPool, input: &CreateStory) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories
                (title, description, content, thumbnail_url, status, featured)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'draft'), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.thumbnail_url)
            .bind(&input.status)
            .bind(input.featured)
            .fetch_one(pool)
            .await
    }

    /// Find a story by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List stories, newest first, with optional filters.
    pub async fn list(
        pool: &PgPool,
        filter: &StoryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::boolean IS NULL OR featured = $2)
               AND ($3::text IS NULL OR title ILIKE '%' || $3 || '%')
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(&filter.status)
            .bind(filter.featured)
            .bind(&filter.search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a story. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStory,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                content = COALESCE($4, content),
                thumbnail_url = COALESCE($5, thumbnail_url),
                status = COALESCE($6, status),
                featured = COALESCE($7, featured),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.thumbnail_url)
            .bind(&input.status)
            .bind(input.featured)
            .fetch_optional(pool)
            .await
    }

    /// Delete a story by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
