//! Handlers for quiz questions and their options.
//!
//! Two persistence paths exist, and an item only ever travels one of
//! them: the question dialog saves single questions immediately
//! (create/update/delete through the editor session's single-item
//! path), while the reorder endpoint reconciles the whole list through
//! the diff engine. Options are plain immediate CRUD under a question.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use aula_core::editor::EditorSession;
use aula_core::error::CoreError;
use aula_core::forms::{OptionForm, QuestionForm};
use aula_core::types::DbId;
use aula_db::associations::PgQuizQuestions;
use aula_db::models::quiz::{CreateQuizOption, QuizQuestion};
use aula_db::repositories::{QuizOptionRepo, QuizQuestionRepo, QuizRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// One row of the client's ordered question list.
///
/// Rows with a zero/negative id are created and must carry `question`;
/// for existing rows the payload fields override the stored values when
/// present.
#[derive(Debug, Deserialize)]
pub struct QuestionOrderEntry {
    pub id: DbId,
    pub question: Option<String>,
    pub correct_answer: Option<String>,
    pub reason: Option<String>,
}

/// Request body for PUT /quizzes/{id}/questions/order.
#[derive(Debug, Deserialize)]
pub struct SaveQuestionOrderRequest {
    pub items: Vec<QuestionOrderEntry>,
}

// ---------------------------------------------------------------------------
// Ordering commit
// ---------------------------------------------------------------------------

/// PUT /api/v1/quizzes/{id}/questions/order
///
/// Reconcile the stored question list with the client's ordered list.
/// Responds with the counts of created/updated/deleted rows.
pub async fn save_question_order(
    State(state): State<AppState>,
    Path(quiz_id): Path<DbId>,
    Json(input): Json<SaveQuestionOrderRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_quiz_exists(&state, quiz_id).await?;

    let repo = PgQuizQuestions::new(state.pool.clone());
    let mut session = EditorSession::new(repo, quiz_id);
    session.refresh().await.map_err(AppError::Core)?;

    let staged = build_questions(&session, quiz_id, &input.items)?;
    session.stage(staged);

    let report = session.commit().await?;

    tracing::info!(
        quiz_id,
        created = report.created,
        updated = report.updated,
        deleted = report.deleted,
        "Quiz question order saved",
    );

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Single-question path (the question dialog)
// ---------------------------------------------------------------------------

/// POST /api/v1/quizzes/{id}/questions
///
/// Create one question immediately, appended at the end of the list.
pub async fn create_question(
    State(state): State<AppState>,
    Path(quiz_id): Path<DbId>,
    Json(form): Json<QuestionForm>,
) -> AppResult<impl IntoResponse> {
    form.validate()?;
    ensure_quiz_exists(&state, quiz_id).await?;

    let mut session = question_session(&state, quiz_id).await?;
    let created = session.save_item(new_question(quiz_id, &form)).await?;

    tracing::info!(quiz_id, question_id = created.id, "Quiz question created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/questions/{id}
///
/// Update one question's payload immediately; its rank is untouched.
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(form): Json<QuestionForm>,
) -> AppResult<impl IntoResponse> {
    form.validate()?;
    let stored = find_question(&state, id).await?;

    let mut session = question_session(&state, stored.quiz_id).await?;
    let mut item = stored;
    item.question = form.question.clone();
    item.correct_answer = form.correct_answer.clone();
    item.reason = form.reason.clone();

    let updated = session.save_item(item).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/questions/{id}
///
/// Delete one question immediately. Its options cascade.
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stored = find_question(&state, id).await?;

    let mut session = question_session(&state, stored.quiz_id).await?;
    session.delete_item(id).await?;

    tracing::info!(quiz_id = stored.quiz_id, question_id = id, "Quiz question deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Options (nested immediate CRUD)
// ---------------------------------------------------------------------------

/// POST /api/v1/questions/{id}/options
pub async fn add_option(
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
    Json(input): Json<CreateQuizOption>,
) -> AppResult<impl IntoResponse> {
    OptionForm {
        option_key: input.option_key.clone(),
        text: input.text.clone(),
    }
    .validate()?;
    find_question(&state, question_id).await?;

    let option = QuizOptionRepo::create(&state.pool, question_id, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: option })))
}

/// DELETE /api/v1/options/{id}
pub async fn delete_option(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !QuizOptionRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "quiz_option",
            id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_quiz_exists(state: &AppState, quiz_id: DbId) -> Result<(), AppError> {
    QuizRepo::find_by_id(&state.pool, quiz_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "quiz",
            id: quiz_id,
        })?;
    Ok(())
}

async fn find_question(state: &AppState, id: DbId) -> Result<QuizQuestion, AppError> {
    Ok(QuizQuestionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "quiz_question",
            id,
        })?)
}

/// A session over the quiz's questions, freshly loaded.
async fn question_session(
    state: &AppState,
    quiz_id: DbId,
) -> Result<EditorSession<PgQuizQuestions>, AppError> {
    let repo = PgQuizQuestions::new(state.pool.clone());
    let mut session = EditorSession::new(repo, quiz_id);
    session.refresh().await.map_err(AppError::Core)?;
    Ok(session)
}

fn new_question(quiz_id: DbId, form: &QuestionForm) -> QuizQuestion {
    let now = chrono::Utc::now();
    QuizQuestion {
        id: 0,
        quiz_id,
        question: form.question.clone(),
        correct_answer: form.correct_answer.clone(),
        reason: form.reason.clone(),
        order_index: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Materialize the client's entries against the freshly loaded session.
fn build_questions(
    session: &EditorSession<PgQuizQuestions>,
    quiz_id: DbId,
    entries: &[QuestionOrderEntry],
) -> Result<Vec<QuizQuestion>, AppError> {
    entries
        .iter()
        .map(|entry| {
            if entry.id > 0 {
                let stored = session.collection().get(entry.id).ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Question {} does not belong to quiz {quiz_id}",
                        entry.id
                    ))
                })?;
                let mut row = stored.clone();
                if let Some(question) = &entry.question {
                    row.question = question.clone();
                }
                if let Some(correct_answer) = &entry.correct_answer {
                    row.correct_answer = correct_answer.clone();
                }
                if let Some(reason) = &entry.reason {
                    row.reason = Some(reason.clone());
                }
                Ok(row)
            } else {
                let form = QuestionForm {
                    question: entry.question.clone().unwrap_or_default(),
                    correct_answer: entry.correct_answer.clone().unwrap_or_default(),
                    reason: entry.reason.clone(),
                };
                form.validate()?;
                let mut row = new_question(quiz_id, &form);
                row.id = entry.id;
                Ok(row)
            }
        })
        .collect()
}
