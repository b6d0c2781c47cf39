//! Repository for the `courses` table.

use sqlx::PgPool;

use aula_core::types::DbId;

use crate::models::course::{Course, CourseFilter, CreateCourse, UpdateCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, thumbnail_url, \
    status, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row. The caller is
    /// responsible for supplying a slug (derived from the name when the
    /// client omits one).
    ///
    /// If `status` is `None`, defaults to `draft`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCourse,
        slug: &str,
    ) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (name, slug, description, thumbnail_url, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'draft'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a course by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List courses, newest first, with optional filters.
    pub async fn list(
        pool: &PgPool,
        filter: &CourseFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&filter.status)
            .bind(&filter.search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a course. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                thumbnail_url = COALESCE($5, thumbnail_url),
                status = COALESCE($6, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course by ID. Returns `true` if a row was removed.
    /// Association rows cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
