//! Repository for the `quiz_questions` table.
//!
//! Questions are ordered within their quiz by `order_index`; the batch
//! methods exist for the reorder commit, which creates and deletes
//! whole groups at once.

use sqlx::PgPool;

use aula_core::types::DbId;

use crate::models::quiz::QuizQuestion;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, quiz_id, question, correct_answer, reason, \
    order_index, created_at, updated_at";

/// Provides CRUD operations for quiz questions.
pub struct QuizQuestionRepo;

impl QuizQuestionRepo {
    /// Insert a new question, returning the created row. The payload is
    /// taken from `item`; its id is ignored.
    pub async fn create(
        pool: &PgPool,
        quiz_id: DbId,
        item: &QuizQuestion,
    ) -> Result<QuizQuestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_questions
                (quiz_id, question, correct_answer, reason, order_index)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(quiz_id)
            .bind(&item.question)
            .bind(&item.correct_answer)
            .bind(&item.reason)
            .bind(item.order_index)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of questions in one transaction, returning the
    /// created rows in input order.
    pub async fn create_batch(
        pool: &PgPool,
        quiz_id: DbId,
        items: &[QuizQuestion],
    ) -> Result<Vec<QuizQuestion>, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_questions
                (quiz_id, question, correct_answer, reason, order_index)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, QuizQuestion>(&query)
                .bind(quiz_id)
                .bind(&item.question)
                .bind(&item.correct_answer)
                .bind(&item.reason)
                .bind(item.order_index)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// Find a question by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QuizQuestion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quiz_questions WHERE id = $1");
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a quiz's questions, ordered by rank ascending.
    pub async fn list_for_quiz(
        pool: &PgPool,
        quiz_id: DbId,
    ) -> Result<Vec<QuizQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quiz_questions
             WHERE quiz_id = $1
             ORDER BY order_index ASC"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(quiz_id)
            .fetch_all(pool)
            .await
    }

    /// Update a question's payload and rank.
    ///
    /// Returns `None` if no row with the item's `id` exists.
    pub async fn update(
        pool: &PgPool,
        item: &QuizQuestion,
    ) -> Result<Option<QuizQuestion>, sqlx::Error> {
        let query = format!(
            "UPDATE quiz_questions SET
                question = $2,
                correct_answer = $3,
                reason = $4,
                order_index = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(item.id)
            .bind(&item.question)
            .bind(&item.correct_answer)
            .bind(&item.reason)
            .bind(item.order_index)
            .fetch_optional(pool)
            .await
    }

    /// Delete a question by ID. Returns `true` if a row was removed.
    /// Its options cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quiz_questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a batch of questions. Returns the number of removed rows.
    pub async fn delete_batch(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quiz_questions WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
