//! Repository for the `quiz_options` table.
//!
//! Options have no ordering; they are created and deleted immediately
//! from the question dialog with no batching.

use sqlx::PgPool;

use aula_core::types::DbId;

use crate::models::quiz::{CreateQuizOption, QuizOption};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, question_id, option_key, text, created_at";

/// Provides CRUD operations for quiz options.
pub struct QuizOptionRepo;

impl QuizOptionRepo {
    /// Insert a new option under a question, returning the created row.
    pub async fn create(
        pool: &PgPool,
        question_id: DbId,
        input: &CreateQuizOption,
    ) -> Result<QuizOption, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_options (question_id, option_key, text)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuizOption>(&query)
            .bind(question_id)
            .bind(&input.option_key)
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    /// List a question's options by key ascending.
    pub async fn list_for_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<QuizOption>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quiz_options
             WHERE question_id = $1
             ORDER BY option_key ASC"
        );
        sqlx::query_as::<_, QuizOption>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }

    /// List options for every question of a quiz in one query.
    pub async fn list_for_quiz(pool: &PgPool, quiz_id: DbId) -> Result<Vec<QuizOption>, sqlx::Error> {
        sqlx::query_as::<_, QuizOption>(
            "SELECT o.id, o.question_id, o.option_key, o.text, o.created_at
             FROM quiz_options o
             JOIN quiz_questions qq ON qq.id = o.question_id
             WHERE qq.quiz_id = $1
             ORDER BY o.question_id ASC, o.option_key ASC",
        )
        .bind(quiz_id)
        .fetch_all(pool)
        .await
    }

    /// Delete an option by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quiz_options WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all options under a question. Returns the number of
    /// removed rows.
    pub async fn delete_for_question(pool: &PgPool, question_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quiz_options WHERE question_id = $1")
            .bind(question_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
