//! Health-record handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use medtrack_core::types::pagination::PageResponse;
use medtrack_entity::health::MetricKind;
use medtrack_service::health::HealthRecordInput;

use crate::dto::request::HealthRecordRequest;
use crate::dto::response::HealthRecordResponse;
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Query parameters for the latest-measurements endpoint.
#[derive(Debug, Deserialize)]
pub struct LatestParams {
    /// Maximum number of records (default 10).
    pub limit: Option<i64>,
}

/// Query parameters for the time-window endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetweenParams {
    /// Window start (inclusive, RFC 3339).
    pub from: DateTime<Utc>,
    /// Window end (inclusive, RFC 3339).
    pub to: DateTime<Utc>,
}

/// GET /health-records
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<HealthRecordResponse>>, ApiError> {
    let page = state
        .health_service
        .list(auth.context(), params.into_page_request())
        .await?;

    Ok(Json(page.map(Into::into)))
}

/// GET /health-records/latest?limit=
pub async fn latest(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<LatestParams>,
) -> Result<Json<Vec<HealthRecordResponse>>, ApiError> {
    let records = state
        .health_service
        .latest(auth.context(), params.limit)
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// GET /health-records/kind/{kind}
pub async fn list_by_kind(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(kind): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<HealthRecordResponse>>, ApiError> {
    let kind: MetricKind = kind.parse()?;

    let page = state
        .health_service
        .list_by_kind(auth.context(), kind, params.into_page_request())
        .await?;

    Ok(Json(page.map(Into::into)))
}

/// GET /health-records/between?from=&to=
pub async fn list_between(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(window): Query<BetweenParams>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<HealthRecordResponse>>, ApiError> {
    let page = state
        .health_service
        .list_between(
            auth.context(),
            window.from,
            window.to,
            params.into_page_request(),
        )
        .await?;

    Ok(Json(page.map(Into::into)))
}

/// GET /health-records/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<HealthRecordResponse>, ApiError> {
    let record = state.health_service.get(auth.context(), id).await?;
    Ok(Json(record.into()))
}

/// POST /health-records
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<HealthRecordRequest>,
) -> Result<(StatusCode, Json<HealthRecordResponse>), ApiError> {
    validate::validate_health_record(&req)?;

    let record = state
        .health_service
        .create(auth.context(), input_from(req))
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// PUT /health-records/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<HealthRecordRequest>,
) -> Result<Json<HealthRecordResponse>, ApiError> {
    validate::validate_health_record(&req)?;

    let record = state
        .health_service
        .update(auth.context(), id, input_from(req))
        .await?;

    Ok(Json(record.into()))
}

/// DELETE /health-records/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.health_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn input_from(req: HealthRecordRequest) -> HealthRecordInput {
    HealthRecordInput {
        kind: req.kind,
        systolic: req.systolic,
        diastolic: req.diastolic,
        pulse: req.pulse,
        glucose_level: req.glucose_level,
        fasting: req.fasting,
        notes: req.notes,
        recorded_at: req.recorded_at,
    }
}
