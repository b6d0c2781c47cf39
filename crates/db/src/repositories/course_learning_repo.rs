//! Repository for the `course_learnings` table.

use sqlx::PgPool;

use aula_core::types::DbId;

use crate::models::course_learning::{CourseLearning, CourseLearningView};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, learnings_id, quiz_id, position, \
    created_at, updated_at";

/// Provides CRUD operations for course-learning associations.
pub struct CourseLearningRepo;

impl CourseLearningRepo {
    /// Insert a new association, returning the created row. The payload
    /// is taken from `item`; its id is ignored.
    pub async fn create(
        pool: &PgPool,
        course_id: DbId,
        item: &CourseLearning,
    ) -> Result<CourseLearning, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_learnings (course_id, learnings_id, quiz_id, position)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseLearning>(&query)
            .bind(course_id)
            .bind(item.learnings_id)
            .bind(item.quiz_id)
            .bind(item.position)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of associations in one transaction, returning the
    /// created rows in input order.
    pub async fn create_batch(
        pool: &PgPool,
        course_id: DbId,
        items: &[CourseLearning],
    ) -> Result<Vec<CourseLearning>, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_learnings (course_id, learnings_id, quiz_id, position)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, CourseLearning>(&query)
                .bind(course_id)
                .bind(item.learnings_id)
                .bind(item.quiz_id)
                .bind(item.position)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// Find an association by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CourseLearning>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM course_learnings WHERE id = $1");
        sqlx::query_as::<_, CourseLearning>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a course's associations, ordered by position ascending.
    pub async fn list_for_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseLearning>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_learnings
             WHERE course_id = $1
             ORDER BY position ASC"
        );
        sqlx::query_as::<_, CourseLearning>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// List a course's associations joined with learning and quiz
    /// titles, ordered by position ascending.
    pub async fn list_views_for_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseLearningView>, sqlx::Error> {
        sqlx::query_as::<_, CourseLearningView>(
            "SELECT cl.id, cl.course_id, cl.learnings_id, cl.quiz_id, cl.position,
                    lm.title AS learning_title, q.title AS quiz_title
             FROM course_learnings cl
             JOIN learning_materials lm ON lm.id = cl.learnings_id
             LEFT JOIN quizzes q ON q.id = cl.quiz_id
             WHERE cl.course_id = $1
             ORDER BY cl.position ASC",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// Update an association's rank and quiz link.
    ///
    /// Returns `None` if no row with the item's `id` exists.
    pub async fn update(
        pool: &PgPool,
        item: &CourseLearning,
    ) -> Result<Option<CourseLearning>, sqlx::Error> {
        let query = format!(
            "UPDATE course_learnings SET
                learnings_id = $2,
                quiz_id = $3,
                position = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseLearning>(&query)
            .bind(item.id)
            .bind(item.learnings_id)
            .bind(item.quiz_id)
            .bind(item.position)
            .fetch_optional(pool)
            .await
    }

    /// Delete an association by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM course_learnings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a batch of associations. Returns the number of removed
    /// rows.
    pub async fn delete_batch(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM course_learnings WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
