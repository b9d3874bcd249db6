//! Personal inventory handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use medtrack_core::types::pagination::PageResponse;
use medtrack_service::inventory::InventoryInput;

use crate::dto::request::InventoryRequest;
use crate::dto::response::InventoryResponse;
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /inventory
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<InventoryResponse>>, ApiError> {
    let page = state
        .inventory_service
        .list(auth.context(), params.into_page_request())
        .await?;

    Ok(Json(page.map(Into::into)))
}

/// GET /inventory/low-stock
pub async fn list_low_stock(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<InventoryResponse>>, ApiError> {
    let items = state.inventory_service.list_low_stock(auth.context()).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// GET /inventory/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let item = state.inventory_service.get(auth.context(), id).await?;
    Ok(Json(item.into()))
}

/// POST /inventory
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<InventoryRequest>,
) -> Result<(StatusCode, Json<InventoryResponse>), ApiError> {
    validate::validate_inventory(&req)?;

    let item = state
        .inventory_service
        .create(auth.context(), input_from(req))
        .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// PUT /inventory/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<InventoryRequest>,
) -> Result<Json<InventoryResponse>, ApiError> {
    validate::validate_inventory(&req)?;

    let item = state
        .inventory_service
        .update(auth.context(), id, input_from(req))
        .await?;

    Ok(Json(item.into()))
}

/// DELETE /inventory/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.inventory_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn input_from(req: InventoryRequest) -> InventoryInput {
    InventoryInput {
        medication_id: req.medication_id,
        current_quantity: req.current_quantity,
        alert_quantity: req.alert_quantity,
    }
}
