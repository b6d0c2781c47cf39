//! Handlers for member management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use aula_core::error::CoreError;
use aula_core::forms::{validate_title, MemberStatus};
use aula_core::types::DbId;
use aula_db::models::member::{CreateMember, MemberFilter, UpdateMember};
use aula_db::repositories::MemberRepo;
use aula_db::{clamp_limit, clamp_offset};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/members
pub async fn list_members(
    State(state): State<AppState>,
    Query(filter): Query<MemberFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let members = MemberRepo::list(
        &state.pool,
        &filter,
        clamp_limit(page.limit),
        clamp_offset(page.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let member = MemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "member",
            id,
        })?;
    Ok(Json(DataResponse { data: member }))
}

/// POST /api/v1/members
pub async fn create_member(
    State(state): State<AppState>,
    Json(input): Json<CreateMember>,
) -> AppResult<impl IntoResponse> {
    validate_member_input(&input)?;

    let member = MemberRepo::create(&state.pool, &input).await?;

    tracing::info!(member_id = member.id, user_name = %member.user_name, "Member created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PUT /api/v1/members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMember>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &input.status {
        MemberStatus::parse(status)?;
    }
    if let Some(full_name) = &input.full_name {
        validate_title("full_name", full_name)?;
    }

    let member = MemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "member",
            id,
        })?;
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/members/{id}
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !MemberRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "member",
            id,
        }
        .into());
    }
    tracing::info!(member_id = id, "Member deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn validate_member_input(input: &CreateMember) -> Result<(), AppError> {
    validate_title("full_name", &input.full_name)?;
    validate_title("user_name", &input.user_name)?;
    if !input.email.contains('@') {
        return Err(AppError::BadRequest(format!(
            "'{}' is not a valid email address",
            input.email
        )));
    }
    if let Some(status) = &input.status {
        MemberStatus::parse(status)?;
    }
    Ok(())
}
