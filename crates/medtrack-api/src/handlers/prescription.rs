//! Prescription handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use medtrack_core::types::pagination::PageResponse;
use medtrack_service::prescription::{PrescriptionInput, PrescriptionItemInput};

use crate::dto::request::PrescriptionRequest;
use crate::dto::response::PrescriptionResponse;
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Query parameters for the doctor-name search.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Doctor-name fragment to match.
    pub doctor_name: String,
}

/// GET /prescriptions
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<PrescriptionResponse>>, ApiError> {
    let page = state
        .prescription_service
        .list(auth.context(), params.into_page_request())
        .await?;

    Ok(Json(page.map(Into::into)))
}

/// GET /prescriptions/current
pub async fn list_current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<PrescriptionResponse>>, ApiError> {
    let prescriptions = state.prescription_service.list_current(auth.context()).await?;
    Ok(Json(prescriptions.into_iter().map(Into::into).collect()))
}

/// GET /prescriptions/search?doctorName=
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(search): Query<SearchParams>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<PrescriptionResponse>>, ApiError> {
    let page = state
        .prescription_service
        .search_by_doctor(
            auth.context(),
            &search.doctor_name,
            params.into_page_request(),
        )
        .await?;

    Ok(Json(page.map(Into::into)))
}

/// GET /prescriptions/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PrescriptionResponse>, ApiError> {
    let prescription = state.prescription_service.get(auth.context(), id).await?;
    Ok(Json(prescription.into()))
}

/// POST /prescriptions
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<PrescriptionRequest>,
) -> Result<(StatusCode, Json<PrescriptionResponse>), ApiError> {
    validate::validate_prescription(&req)?;

    let prescription = state
        .prescription_service
        .create(auth.context(), input_from(req))
        .await?;

    Ok((StatusCode::CREATED, Json(prescription.into())))
}

/// PUT /prescriptions/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PrescriptionRequest>,
) -> Result<Json<PrescriptionResponse>, ApiError> {
    validate::validate_prescription(&req)?;

    let prescription = state
        .prescription_service
        .update(auth.context(), id, input_from(req))
        .await?;

    Ok(Json(prescription.into()))
}

/// DELETE /prescriptions/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.prescription_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn input_from(req: PrescriptionRequest) -> PrescriptionInput {
    PrescriptionInput {
        doctor_name: req.doctor_name,
        doctor_registration: req.doctor_registration,
        issued_on: req.issued_on,
        expires_on: req.expires_on,
        notes: req.notes,
        image_url: req.image_url,
        items: req
            .items
            .into_iter()
            .map(|item| PrescriptionItemInput {
                medication_id: item.medication_id,
                description: item.description,
                instructions: item.instructions,
                quantity: item.quantity,
            })
            .collect(),
    }
}
