//! Handlers for quiz management.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use aula_core::error::CoreError;
use aula_core::forms::validate_title;
use aula_core::types::DbId;
use aula_db::models::quiz::{CreateQuiz, QuizQuestionWithOptions, UpdateQuiz};
use aula_db::repositories::{QuizOptionRepo, QuizQuestionRepo, QuizRepo};
use aula_db::{clamp_limit, clamp_offset};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for quiz listing.
#[derive(Debug, Deserialize)]
pub struct QuizListParams {
    pub search: Option<String>,
}

/// GET /api/v1/quizzes
pub async fn list_quizzes(
    State(state): State<AppState>,
    Query(params): Query<QuizListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let quizzes = QuizRepo::list(
        &state.pool,
        params.search.as_deref(),
        clamp_limit(page.limit),
        clamp_offset(page.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: quizzes }))
}

/// GET /api/v1/quizzes/{id}
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quiz = QuizRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "quiz", id })?;
    Ok(Json(DataResponse { data: quiz }))
}

/// GET /api/v1/quizzes/{id}/questions
///
/// The quiz's questions in rank order, each with its options.
pub async fn list_quiz_questions(
    State(state): State<AppState>,
    Path(quiz_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    QuizRepo::find_by_id(&state.pool, quiz_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "quiz",
            id: quiz_id,
        })?;

    let questions = QuizQuestionRepo::list_for_quiz(&state.pool, quiz_id).await?;
    let options = QuizOptionRepo::list_for_quiz(&state.pool, quiz_id).await?;

    let mut by_question: HashMap<DbId, Vec<_>> = HashMap::new();
    for option in options {
        by_question.entry(option.question_id).or_default().push(option);
    }

    let data: Vec<QuizQuestionWithOptions> = questions
        .into_iter()
        .map(|question| {
            let options = by_question.remove(&question.id).unwrap_or_default();
            QuizQuestionWithOptions { question, options }
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/quizzes
pub async fn create_quiz(
    State(state): State<AppState>,
    Json(input): Json<CreateQuiz>,
) -> AppResult<impl IntoResponse> {
    validate_title("title", &input.title)?;

    let quiz = QuizRepo::create(&state.pool, &input).await?;

    tracing::info!(quiz_id = quiz.id, title = %quiz.title, "Quiz created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: quiz })))
}

/// PUT /api/v1/quizzes/{id}
pub async fn update_quiz(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuiz>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("title", title)?;
    }

    let quiz = QuizRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "quiz", id })?;
    Ok(Json(DataResponse { data: quiz }))
}

/// DELETE /api/v1/quizzes/{id}
pub async fn delete_quiz(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let questions = QuizRepo::question_count(&state.pool, id).await?;
    if !QuizRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "quiz", id }.into());
    }
    tracing::info!(quiz_id = id, cascaded_questions = questions, "Quiz deleted");
    Ok(StatusCode::NO_CONTENT)
}
