//! Quiz, quiz-question, and quiz-option models.
//!
//! Questions are the ordered children of a quiz (`order_index` is the
//! 1-based rank); options are plain sub-children of a question with no
//! ordering of their own.

use aula_core::ordered::OrderedChild;
use aula_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

/// A quiz row from the `quizzes` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new quiz.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuiz {
    pub title: String,
    pub description: Option<String>,
}

/// Partial update; only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuiz {
    pub title: Option<String>,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Questions (ordered children)
// ---------------------------------------------------------------------------

/// A question row from the `quiz_questions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: DbId,
    pub quiz_id: DbId,
    pub question: String,
    pub correct_answer: String,
    pub reason: Option<String>,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderedChild for QuizQuestion {
    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn position(&self) -> i32 {
        self.order_index
    }

    fn set_position(&mut self, position: i32) {
        self.order_index = position;
    }
}

/// A question together with its options, the shape the quiz editor
/// fetches.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestionWithOptions {
    #[serde(flatten)]
    pub question: QuizQuestion,
    pub options: Vec<QuizOption>,
}

// ---------------------------------------------------------------------------
// Options (nested, unordered)
// ---------------------------------------------------------------------------

/// An option row from the `quiz_options` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: DbId,
    pub question_id: DbId,
    pub option_key: String,
    pub text: String,
    pub created_at: Timestamp,
}

/// Input for creating a new option under a question.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuizOption {
    pub option_key: String,
    pub text: String,
}
