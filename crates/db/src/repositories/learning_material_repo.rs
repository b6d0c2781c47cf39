//! Repository for the `learning_materials` table.

use sqlx::PgPool;

use aula_core::types::DbId;

use crate::models::learning_material::{
    CreateLearningMaterial, LearningMaterial, LearningMaterialFilter, LearningMaterialRef,
    UpdateLearningMaterial,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, cover_image_url, category_id, \
    status, published_at, created_at, updated_at";

/// Provides CRUD operations for learning materials.
pub struct LearningMaterialRepo;

impl LearningMaterialRepo {
    /// Insert a new learning material, returning the created row.
    ///
    /// If `status` is `None`, defaults to `draft`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLearningMaterial,
    ) -> Result<LearningMaterial, sqlx::Error> {
        let query = format!(
            "INSERT INTO learning_materials
                (title, content, cover_image_url, category_id, status, published_at)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'draft'), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningMaterial>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.cover_image_url)
            .bind(input.category_id)
            .bind(&input.status)
            .bind(input.published_at)
            .fetch_one(pool)
            .await
    }

    /// Find a learning material by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LearningMaterial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learning_materials WHERE id = $1");
        sqlx::query_as::<_, LearningMaterial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List learning materials, newest first, with optional filters.
    pub async fn list(
        pool: &PgPool,
        filter: &LearningMaterialFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LearningMaterial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learning_materials
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::bigint IS NULL OR category_id = $2)
               AND ($3::text IS NULL OR title ILIKE '%' || $3 || '%')
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, LearningMaterial>(&query)
            .bind(&filter.status)
            .bind(filter.category_id)
            .bind(&filter.search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List id/title pairs for selection pickers, newest first.
    pub async fn list_refs(pool: &PgPool, limit: i64) -> Result<Vec<LearningMaterialRef>, sqlx::Error> {
        sqlx::query_as::<_, LearningMaterialRef>(
            "SELECT id, title FROM learning_materials
             ORDER BY created_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Update a learning material. Only non-`None` fields in `input`
    /// are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLearningMaterial,
    ) -> Result<Option<LearningMaterial>, sqlx::Error> {
        let query = format!(
            "UPDATE learning_materials SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                cover_image_url = COALESCE($4, cover_image_url),
                category_id = COALESCE($5, category_id),
                status = COALESCE($6, status),
                published_at = COALESCE($7, published_at),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningMaterial>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.cover_image_url)
            .bind(input.category_id)
            .bind(&input.status)
            .bind(input.published_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a learning material by ID. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM learning_materials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
