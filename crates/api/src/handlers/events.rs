//! Handlers for event management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use aula_core::error::CoreError;
use aula_core::forms::{validate_title, PublishStatus};
use aula_core::types::DbId;
use aula_db::models::event::{CreateEvent, EventFilter, UpdateEvent};
use aula_db::repositories::EventRepo;
use aula_db::{clamp_limit, clamp_offset};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list(
        &state.pool,
        &filter,
        clamp_limit(page.limit),
        clamp_offset(page.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "event", id })?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /api/v1/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    validate_title("title", &input.title)?;
    if let Some(status) = &input.status {
        PublishStatus::parse(status)?;
    }

    let event = EventRepo::create(&state.pool, &input).await?;

    tracing::info!(event_id = event.id, title = %event.title, "Event created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /api/v1/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("title", title)?;
    }
    if let Some(status) = &input.status {
        PublishStatus::parse(status)?;
    }

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "event", id })?;
    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !EventRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "event", id }.into());
    }
    tracing::info!(event_id = id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}
