//! Handlers for course management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use aula_core::error::CoreError;
use aula_core::forms::{slugify, validate_title, PublishStatus};
use aula_core::types::DbId;
use aula_db::models::course::{CourseFilter, CreateCourse, UpdateCourse};
use aula_db::repositories::CourseRepo;
use aula_db::{clamp_limit, clamp_offset};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/courses
pub async fn list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let courses = CourseRepo::list(
        &state.pool,
        &filter,
        clamp_limit(page.limit),
        clamp_offset(page.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let course = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "course",
            id,
        })?;
    Ok(Json(DataResponse { data: course }))
}

/// POST /api/v1/courses
///
/// The slug is derived from the name when the client does not send one.
pub async fn create_course(
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<impl IntoResponse> {
    validate_title("name", &input.name)?;
    if let Some(status) = &input.status {
        PublishStatus::parse(status)?;
    }
    let slug = match &input.slug {
        Some(slug) => slug.clone(),
        None => slugify(&input.name),
    };

    let course = CourseRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(course_id = course.id, slug = %course.slug, "Course created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// PUT /api/v1/courses/{id}
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_title("name", name)?;
    }
    if let Some(status) = &input.status {
        PublishStatus::parse(status)?;
    }

    let course = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "course",
            id,
        })?;
    Ok(Json(DataResponse { data: course }))
}

/// DELETE /api/v1/courses/{id}
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CourseRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "course",
            id,
        }
        .into());
    }
    tracing::info!(course_id = id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}
