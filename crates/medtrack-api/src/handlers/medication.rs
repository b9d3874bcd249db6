//! Medication handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use medtrack_core::types::pagination::PageResponse;
use medtrack_service::medication::MedicationInput;

use crate::dto::request::MedicationRequest;
use crate::dto::response::MedicationResponse;
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Query parameters for the medication name search.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Name fragment to match.
    pub name: String,
}

/// GET /medications
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<MedicationResponse>>, ApiError> {
    let page = state
        .medication_service
        .list(auth.context(), params.into_page_request())
        .await?;

    Ok(Json(page.map(Into::into)))
}

/// GET /medications/search?name=
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(search): Query<SearchParams>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<MedicationResponse>>, ApiError> {
    let page = state
        .medication_service
        .search(auth.context(), &search.name, params.into_page_request())
        .await?;

    Ok(Json(page.map(Into::into)))
}

/// GET /medications/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MedicationResponse>, ApiError> {
    let medication = state.medication_service.get(auth.context(), id).await?;
    Ok(Json(medication.into()))
}

/// POST /medications
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<MedicationRequest>,
) -> Result<(StatusCode, Json<MedicationResponse>), ApiError> {
    validate::validate_medication(&req)?;

    let medication = state
        .medication_service
        .create(auth.context(), input_from(req))
        .await?;

    Ok((StatusCode::CREATED, Json(medication.into())))
}

/// PUT /medications/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MedicationRequest>,
) -> Result<Json<MedicationResponse>, ApiError> {
    validate::validate_medication(&req)?;

    let medication = state
        .medication_service
        .update(auth.context(), id, input_from(req))
        .await?;

    Ok(Json(medication.into()))
}

/// DELETE /medications/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.medication_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn input_from(req: MedicationRequest) -> MedicationInput {
    MedicationInput {
        full_name: req.full_name,
        short_name: req.short_name,
        dosage: req.dosage,
        form: req.form,
        photo_url: req.photo_url,
    }
}
