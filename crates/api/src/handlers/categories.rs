//! Handlers for category management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use aula_core::error::CoreError;
use aula_core::forms::{slugify, validate_title};
use aula_core::types::DbId;
use aula_db::models::category::{CreateCategory, UpdateCategory};
use aula_db::repositories::CategoryRepo;
use aula_db::{clamp_limit, clamp_offset};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(
        &state.pool,
        clamp_limit(page.limit),
        clamp_offset(page.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "category",
            id,
        })?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /api/v1/categories
///
/// The slug is derived from the name when the client does not send one.
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_title("name", &input.name)?;
    let slug = match &input.slug {
        Some(slug) => slug.clone(),
        None => slugify(&input.name),
    };

    let category = CategoryRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(category_id = category.id, slug = %category.slug, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_title("name", name)?;
    }

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "category",
            id,
        })?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "category",
            id,
        }
        .into());
    }
    tracing::info!(category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
