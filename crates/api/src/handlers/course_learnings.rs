//! Handlers for a course's ordered learning list.
//!
//! The list endpoint returns rows joined with their titles; the order
//! endpoint takes the client's whole optimistic list (negative ids mark
//! rows to create) and reconciles durable state through the editor's
//! diff engine.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use aula_core::editor::EditorSession;
use aula_core::error::CoreError;
use aula_core::forms::CourseLearningForm;
use aula_core::types::DbId;
use aula_db::associations::PgCourseLearnings;
use aula_db::models::course_learning::CourseLearning;
use aula_db::repositories::{CourseLearningRepo, CourseRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// One row of the client's ordered list.
///
/// `id` is a durable id, or zero/negative for a row that has not been
/// persisted yet (those need `learnings_id`). `quiz_id` replaces the
/// stored value, so omitting it clears the link.
#[derive(Debug, Deserialize)]
pub struct CourseLearningEntry {
    pub id: DbId,
    pub learnings_id: Option<DbId>,
    pub quiz_id: Option<DbId>,
}

/// Request body for PUT /courses/{id}/learnings/order.
#[derive(Debug, Deserialize)]
pub struct SaveOrderRequest {
    pub items: Vec<CourseLearningEntry>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/courses/{id}/learnings
///
/// The course's learning list in display order, with titles joined in.
pub async fn list_course_learnings(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_course_exists(&state, course_id).await?;
    let rows = CourseLearningRepo::list_views_for_course(&state.pool, course_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// PUT /api/v1/courses/{id}/learnings/order
///
/// Reconcile the stored list with the client's ordered list: rows with
/// synthetic ids are created, surviving rows get their new position and
/// quiz link, rows the client dropped are deleted. Responds with the
/// counts of each group.
pub async fn save_course_learning_order(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<SaveOrderRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_course_exists(&state, course_id).await?;

    let repo = PgCourseLearnings::new(state.pool.clone());
    let mut session = EditorSession::new(repo, course_id);
    session.refresh().await.map_err(AppError::Core)?;

    let staged = build_rows(&session, course_id, &input.items)?;
    session.stage(staged);

    let report = session.commit().await?;

    tracing::info!(
        course_id,
        created = report.created,
        updated = report.updated,
        deleted = report.deleted,
        "Course learning order saved",
    );

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_course_exists(state: &AppState, course_id: DbId) -> Result<(), AppError> {
    CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "course",
            id: course_id,
        })?;
    Ok(())
}

/// Materialize the client's entries against the freshly loaded session.
fn build_rows(
    session: &EditorSession<PgCourseLearnings>,
    course_id: DbId,
    entries: &[CourseLearningEntry],
) -> Result<Vec<CourseLearning>, AppError> {
    entries
        .iter()
        .map(|entry| {
            if entry.id > 0 {
                let stored = session.collection().get(entry.id).ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Course learning {} does not belong to course {course_id}",
                        entry.id
                    ))
                })?;
                let mut row = stored.clone();
                if let Some(learnings_id) = entry.learnings_id {
                    row.learnings_id = learnings_id;
                }
                row.quiz_id = entry.quiz_id;
                CourseLearningForm {
                    learnings_id: row.learnings_id,
                    quiz_id: row.quiz_id,
                }
                .validate()?;
                Ok(row)
            } else {
                let form = CourseLearningForm {
                    learnings_id: entry.learnings_id.unwrap_or(0),
                    quiz_id: entry.quiz_id,
                };
                form.validate()?;
                let now = chrono::Utc::now();
                Ok(CourseLearning {
                    id: entry.id,
                    course_id,
                    learnings_id: form.learnings_id,
                    quiz_id: form.quiz_id,
                    position: 0,
                    created_at: now,
                    updated_at: now,
                })
            }
        })
        .collect()
}
