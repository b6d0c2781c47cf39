//! Repository for the `events` table.

use sqlx::PgPool;

use aula_core::types::DbId;

use crate::models::event::{CreateEvent, Event, EventFilter, UpdateEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category_id, organizer_name, \
    start_at, location, status, featured, view_count, created_at, updated_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    ///
    /// If `status` is `None`, defaults to `draft`.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                (title, description, category_id, organizer_name,
                 start_at, location, status, featured)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'draft'), $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.organizer_name)
            .bind(input.start_at)
            .bind(&input.location)
            .bind(&input.status)
            .bind(input.featured)
            .fetch_one(pool)
            .await
    }

    /// Find an event by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events, newest first, with optional filters.
    pub async fn list(
        pool: &PgPool,
        filter: &EventFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::bigint IS NULL OR category_id = $2)
               AND ($3::boolean IS NULL OR featured = $3)
               AND ($4::text IS NULL OR title ILIKE '%' || $4 || '%')
             ORDER BY created_at DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&filter.status)
            .bind(filter.category_id)
            .bind(filter.featured)
            .bind(&filter.search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update an event. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category_id = COALESCE($4, category_id),
                organizer_name = COALESCE($5, organizer_name),
                start_at = COALESCE($6, start_at),
                location = COALESCE($7, location),
                status = COALESCE($8, status),
                featured = COALESCE($9, featured),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.organizer_name)
            .bind(input.start_at)
            .bind(&input.location)
            .bind(&input.status)
            .bind(input.featured)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
