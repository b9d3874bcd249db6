//! Dosage reminder handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use medtrack_core::types::pagination::PageResponse;
use medtrack_service::reminder::ReminderInput;

use crate::dto::request::ReminderRequest;
use crate::dto::response::ReminderResponse;
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /reminders
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<ReminderResponse>>, ApiError> {
    let page = state
        .reminder_service
        .list(auth.context(), params.into_page_request())
        .await?;

    Ok(Json(page.map(Into::into)))
}

/// GET /reminders/today
pub async fn list_due_today(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ReminderResponse>>, ApiError> {
    let reminders = state.reminder_service.list_due_today(auth.context()).await?;
    Ok(Json(reminders.into_iter().map(Into::into).collect()))
}

/// GET /reminders/active
pub async fn list_active(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ReminderResponse>>, ApiError> {
    let reminders = state.reminder_service.list_active(auth.context()).await?;
    Ok(Json(reminders.into_iter().map(Into::into).collect()))
}

/// GET /reminders/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ReminderResponse>, ApiError> {
    let reminder = state.reminder_service.get(auth.context(), id).await?;
    Ok(Json(reminder.into()))
}

/// POST /reminders
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ReminderRequest>,
) -> Result<(StatusCode, Json<ReminderResponse>), ApiError> {
    validate::validate_reminder(&req)?;

    let reminder = state
        .reminder_service
        .create(auth.context(), input_from(req))
        .await?;

    Ok((StatusCode::CREATED, Json(reminder.into())))
}

/// PUT /reminders/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReminderRequest>,
) -> Result<Json<ReminderResponse>, ApiError> {
    validate::validate_reminder(&req)?;

    let reminder = state
        .reminder_service
        .update(auth.context(), id, input_from(req))
        .await?;

    Ok(Json(reminder.into()))
}

/// DELETE /reminders/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.reminder_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn input_from(req: ReminderRequest) -> ReminderInput {
    ReminderInput {
        medication_id: req.medication_id,
        times: req.times,
        weekdays: req.weekdays,
        dose_quantity: req.dose_quantity,
        instructions: req.instructions,
        active: req.active,
    }
}
