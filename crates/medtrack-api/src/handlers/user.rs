//! User profile handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use medtrack_service::user::UserInput;

use crate::dto::request::UpdateUserRequest;
use crate::dto::response::UserResponse;
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get_by_email(&auth.email).await?;
    Ok(Json(user.into()))
}

/// GET /users/{id}
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get(id).await?;
    Ok(Json(user.into()))
}

/// PUT /users/{id} — self-only, 403 otherwise.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    validate::validate_update_user(&req)?;

    let user = state
        .user_service
        .update(
            auth.context(),
            id,
            UserInput {
                full_name: req.name,
                email: req.email,
                national_id: req.national_id,
                birth_date: req.birth_date,
                password: req.password,
                phone: req.phone,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /users/{id} — self-only, 403 otherwise.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.user_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
