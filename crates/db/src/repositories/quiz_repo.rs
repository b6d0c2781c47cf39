//! Repository for the `quizzes` table.

use sqlx::PgPool;

use aula_core::types::DbId;

use crate::models::quiz::{CreateQuiz, Quiz, UpdateQuiz};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, created_at, updated_at";

/// Provides CRUD operations for quizzes.
pub struct QuizRepo;

impl QuizRepo {
    /// Insert a new quiz, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuiz) -> Result<Quiz, sqlx::Error> {
        let query = format!(
            "INSERT INTO quizzes (title, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a quiz by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quizzes WHERE id = $1");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List quizzes, newest first, with an optional title search.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quizzes
             WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%')
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a quiz. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuiz,
    ) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!(
            "UPDATE quizzes SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a quiz by ID. Returns `true` if a row was removed.
    /// Questions and their options cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count questions attached to a quiz.
    pub async fn question_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM quiz_questions WHERE quiz_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
