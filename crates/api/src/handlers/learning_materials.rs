//! Handlers for learning material management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use aula_core::error::CoreError;
use aula_core::forms::{validate_title, PublishStatus};
use aula_core::types::DbId;
use aula_db::models::learning_material::{
    CreateLearningMaterial, LearningMaterialFilter, UpdateLearningMaterial,
};
use aula_db::repositories::LearningMaterialRepo;
use aula_db::{clamp_limit, clamp_offset, MAX_LIMIT};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/learning-materials
pub async fn list_learning_materials(
    State(state): State<AppState>,
    Query(filter): Query<LearningMaterialFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let materials = LearningMaterialRepo::list(
        &state.pool,
        &filter,
        clamp_limit(page.limit),
        clamp_offset(page.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: materials }))
}

/// GET /api/v1/learning-materials/refs
///
/// Id/title pairs for the course editor's lesson picker.
pub async fn list_learning_material_refs(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let refs = LearningMaterialRepo::list_refs(&state.pool, MAX_LIMIT).await?;
    Ok(Json(DataResponse { data: refs }))
}

/// GET /api/v1/learning-materials/{id}
pub async fn get_learning_material(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let material = LearningMaterialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "learning_material",
            id,
        })?;
    Ok(Json(DataResponse { data: material }))
}

/// POST /api/v1/learning-materials
pub async fn create_learning_material(
    State(state): State<AppState>,
    Json(input): Json<CreateLearningMaterial>,
) -> AppResult<impl IntoResponse> {
    validate_title("title", &input.title)?;
    if let Some(status) = &input.status {
        PublishStatus::parse(status)?;
    }

    let material = LearningMaterialRepo::create(&state.pool, &input).await?;

    tracing::info!(
        learning_material_id = material.id,
        title = %material.title,
        "Learning material created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: material })))
}

/// PUT /api/v1/learning-materials/{id}
pub async fn update_learning_material(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLearningMaterial>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("title", title)?;
    }
    if let Some(status) = &input.status {
        PublishStatus::parse(status)?;
    }

    let material = LearningMaterialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "learning_material",
            id,
        })?;
    Ok(Json(DataResponse { data: material }))
}

/// DELETE /api/v1/learning-materials/{id}
pub async fn delete_learning_material(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !LearningMaterialRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "learning_material",
            id,
        }
        .into());
    }
    tracing::info!(learning_material_id = id, "Learning material deleted");
    Ok(StatusCode::NO_CONTENT)
}
