//! Route definitions for quizzes, their questions, and question
//! options.
//!
//! Two routers are provided:
//! - `router()` for quiz-rooted routes mounted at `/quizzes`
//! - `question_router()` for question-rooted routes mounted at the API
//!   root (`/questions`, `/options`)

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{quiz_questions, quizzes};
use crate::state::AppState;

/// ```text
/// GET    /                       -> list_quizzes
/// POST   /                       -> create_quiz
/// GET    /{id}                   -> get_quiz
/// PUT    /{id}                   -> update_quiz
/// DELETE /{id}                   -> delete_quiz
/// GET    /{id}/questions         -> list_quiz_questions
/// POST   /{id}/questions         -> create_question
/// PUT    /{id}/questions/order   -> save_question_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quizzes::list_quizzes).post(quizzes::create_quiz))
        .route(
            "/{id}",
            get(quizzes::get_quiz)
                .put(quizzes::update_quiz)
                .delete(quizzes::delete_quiz),
        )
        .route(
            "/{id}/questions",
            get(quizzes::list_quiz_questions).post(quiz_questions::create_question),
        )
        .route(
            "/{id}/questions/order",
            put(quiz_questions::save_question_order),
        )
}

/// ```text
/// PUT    /questions/{id}         -> update_question
/// DELETE /questions/{id}         -> delete_question
/// POST   /questions/{id}/options -> add_option
/// DELETE /options/{id}           -> delete_option
/// ```
pub fn question_router() -> Router<AppState> {
    Router::new()
        .route(
            "/questions/{id}",
            put(quiz_questions::update_question).delete(quiz_questions::delete_question),
        )
        .route("/questions/{id}/options", post(quiz_questions::add_option))
        .route("/options/{id}", delete(quiz_questions::delete_option))
}
