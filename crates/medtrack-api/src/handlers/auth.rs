//! Auth handlers — register, login, refresh-token, logout.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use medtrack_auth::session::Registration;

use crate::dto::request::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::dto::response::AuthResponse;
use crate::dto::validate;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    validate::validate_register(&req)?;

    let tokens = state
        .auth_manager
        .register(Registration {
            full_name: req.name,
            email: req.email,
            national_id: req.national_id,
            birth_date: req.birth_date,
            password: req.password,
            phone: req.phone,
        })
        .await?;

    Ok(Json(tokens.into()))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    validate::validate_login(&req)?;

    let tokens = state.auth_manager.login(&req.email, &req.password).await?;

    Ok(Json(tokens.into()))
}

/// POST /auth/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    validate::validate_refresh(&req)?;

    let tokens = state.auth_manager.refresh(&req.refresh_token).await?;

    Ok(Json(tokens.into()))
}

/// POST /auth/logout/{userId}
///
/// Idempotent: revoking zero tokens is still a success.
pub async fn logout(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.auth_manager.logout(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
