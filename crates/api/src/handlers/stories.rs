//! Handlers for story management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use aula_core::error::CoreError;
use aula_core::forms::{validate_title, PublishStatus};
use aula_core::types::DbId;
use aula_db::models::story::{CreateStory, StoryFilter, UpdateStory};
use aula_db::repositories::StoryRepo;
use aula_db::{clamp_limit, clamp_offset};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stories
pub async fn list_stories(
    State(state): State<AppState>,
    Query(filter): Query<StoryFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let stories = StoryRepo::list(
        &state.pool,
        &filter,
        clamp_limit(page.limit),
        clamp_offset(page.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: stories }))
}

/// GET /api/v1/stories/{id}
pub async fn get_story(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = StoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "story", id })?;
    Ok(Json(DataResponse { data: story }))
}

/// POST /api/v1/stories
pub async fn create_story(
    State(state): State<AppState>,
    Json(input): Json<CreateStory>,
) -> AppResult<impl IntoResponse> {
    validate_title("title", &input.title)?;
    if let Some(status) = &input.status {
        PublishStatus::parse(status)?;
    }

    let story = StoryRepo::create(&state.pool, &input).await?;

    tracing::info!(story_id = story.id, title = %story.title, "Story created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: story })))
}

/// PUT /api/v1/stories/{id}
pub async fn update_story(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStory>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("title", title)?;
    }
    if let Some(status) = &input.status {
        PublishStatus::parse(status)?;
    }

    let story = StoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "story", id })?;
    Ok(Json(DataResponse { data: story }))
}

/// DELETE /api/v1/stories/{id}
pub async fn delete_story(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !StoryRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "story", id }.into());
    }
    tracing::info!(story_id = id, "Story deleted");
    Ok(StatusCode::NO_CONTENT)
}
