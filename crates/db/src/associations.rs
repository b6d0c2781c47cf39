//! Postgres-backed [`AssociationRepository`] implementations.
//!
//! These adapters are what the ordered-association editor runs against:
//! one per child resource, each holding a pool handle and delegating to
//! the repository layer. sqlx errors are folded into [`CoreError`] here
//! so the core crate never sees SQL details.

use async_trait::async_trait;

use aula_core::error::CoreError;
use aula_core::repository::AssociationRepository;
use aula_core::types::DbId;

use crate::models::course_learning::CourseLearning;
use crate::models::quiz::QuizQuestion;
use crate::repositories::{CourseLearningRepo, QuizQuestionRepo};
use crate::DbPool;

fn internal(err: sqlx::Error) -> CoreError {
    CoreError::Internal(err.to_string())
}

// ---------------------------------------------------------------------------
// Course learnings
// ---------------------------------------------------------------------------

/// `course_learnings` as an association store, parented by course id.
#[derive(Clone)]
pub struct PgCourseLearnings {
    pool: DbPool,
}

impl PgCourseLearnings {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssociationRepository for PgCourseLearnings {
    type Child = CourseLearning;

    async fn list_children(&self, parent_id: DbId) -> Result<Vec<CourseLearning>, CoreError> {
        CourseLearningRepo::list_for_course(&self.pool, parent_id)
            .await
            .map_err(internal)
    }

    async fn create_one(
        &self,
        parent_id: DbId,
        item: &CourseLearning,
    ) -> Result<CourseLearning, CoreError> {
        CourseLearningRepo::create(&self.pool, parent_id, item)
            .await
            .map_err(internal)
    }

    async fn create_many(
        &self,
        parent_id: DbId,
        items: &[CourseLearning],
    ) -> Result<Vec<CourseLearning>, CoreError> {
        CourseLearningRepo::create_batch(&self.pool, parent_id, items)
            .await
            .map_err(internal)
    }

    async fn update_one(&self, item: &CourseLearning) -> Result<CourseLearning, CoreError> {
        CourseLearningRepo::update(&self.pool, item)
            .await
            .map_err(internal)?
            .ok_or(CoreError::NotFound {
                entity: "course_learning",
                id: item.id,
            })
    }

    async fn delete_one(&self, id: DbId) -> Result<bool, CoreError> {
        CourseLearningRepo::delete(&self.pool, id)
            .await
            .map_err(internal)
    }

    async fn delete_many(&self, ids: &[DbId]) -> Result<u64, CoreError> {
        CourseLearningRepo::delete_batch(&self.pool, ids)
            .await
            .map_err(internal)
    }
}

// ---------------------------------------------------------------------------
// Quiz questions
// ---------------------------------------------------------------------------

/// `quiz_questions` as an association store, parented by quiz id.
#[derive(Clone)]
pub struct PgQuizQuestions {
    pool: DbPool,
}

impl PgQuizQuestions {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssociationRepository for PgQuizQuestions {
    type Child = QuizQuestion;

    async fn list_children(&self, parent_id: DbId) -> Result<Vec<QuizQuestion>, CoreError> {
        QuizQuestionRepo::list_for_quiz(&self.pool, parent_id)
            .await
            .map_err(internal)
    }

    async fn create_one(
        &self,
        parent_id: DbId,
        item: &QuizQuestion,
    ) -> Result<QuizQuestion, CoreError> {
        QuizQuestionRepo::create(&self.pool, parent_id, item)
            .await
            .map_err(internal)
    }

    async fn create_many(
        &self,
        parent_id: DbId,
        items: &[QuizQuestion],
    ) -> Result<Vec<QuizQuestion>, CoreError> {
        QuizQuestionRepo::create_batch(&self.pool, parent_id, items)
            .await
            .map_err(internal)
    }

    async fn update_one(&self, item: &QuizQuestion) -> Result<QuizQuestion, CoreError> {
        QuizQuestionRepo::update(&self.pool, item)
            .await
            .map_err(internal)?
            .ok_or(CoreError::NotFound {
                entity: "quiz_question",
                id: item.id,
            })
    }

    async fn delete_one(&self, id: DbId) -> Result<bool, CoreError> {
        QuizQuestionRepo::delete(&self.pool, id)
            .await
            .map_err(internal)
    }

    async fn delete_many(&self, ids: &[DbId]) -> Result<u64, CoreError> {
        QuizQuestionRepo::delete_batch(&self.pool, ids)
            .await
            .map_err(internal)
    }
}
