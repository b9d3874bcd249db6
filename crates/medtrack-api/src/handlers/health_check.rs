//! Liveness probe.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthCheckResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /health
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthCheckResponse>, ApiError> {
    medtrack_database::connection::health_check(&state.db_pool).await?;

    Ok(Json(HealthCheckResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
