//! Repository for the `members` table.

use sqlx::PgPool;

use aula_core::types::DbId;

use crate::models::member::{CreateMember, Member, MemberFilter, UpdateMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, user_name, email, avatar_url, \
    department, title, slogan, status, created_at, updated_at";

/// Provides CRUD operations for members.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member, returning the created row.
    ///
    /// If `status` is `None`, defaults to `active`.
    pub async fn create(pool: &PgPool, input: &CreateMember) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members
                (full_name, user_name, email, avatar_url,
                 department, title, slogan, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'active'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.full_name)
            .bind(&input.user_name)
            .bind(&input.email)
            .bind(&input.avatar_url)
            .bind(&input.department)
            .bind(&input.title)
            .bind(&input.slogan)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a member by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List members, newest first, with optional status/search filters.
    pub async fn list(
        pool: &PgPool,
        filter: &MemberFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM members
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL
                    OR full_name ILIKE '%' || $2 || '%'
                    OR user_name ILIKE '%' || $2 || '%'
                    OR email ILIKE '%' || $2 || '%')
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&filter.status)
            .bind(&filter.search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a member. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMember,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members SET
                full_name = COALESCE($2, full_name),
                user_name = COALESCE($3, user_name),
                email = COALESCE($4, email),
                avatar_url = COALESCE($5, avatar_url),
                department = COALESCE($6, department),
                title = COALESCE($7, title),
                slogan = COALESCE($8, slogan),
                status = COALESCE($9, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.user_name)
            .bind(&input.email)
            .bind(&input.avatar_url)
            .bind(&input.department)
            .bind(&input.title)
            .bind(&input.slogan)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a member by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
