//! Route definitions for the MedTrack HTTP API.
//!
//! All routes are organized by domain. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    let cors = build_cors_layer(&state);

    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(medication_routes())
        .merge(prescription_routes())
        .merge(inventory_routes())
        .merge(reminder_routes())
        .merge(health_record_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints: register, login, refresh-token, logout.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh-token", post(handlers::auth::refresh_token))
        .route("/auth/logout/{userId}", post(handlers::auth::logout))
}

/// User profile endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route("/users/{id}", get(handlers::user::get))
        .route("/users/{id}", put(handlers::user::update))
        .route("/users/{id}", delete(handlers::user::delete))
}

/// Medication CRUD and search.
fn medication_routes() -> Router<AppState> {
    Router::new()
        .route("/medications", get(handlers::medication::list))
        .route("/medications", post(handlers::medication::create))
        .route("/medications/search", get(handlers::medication::search))
        .route("/medications/{id}", get(handlers::medication::get))
        .route("/medications/{id}", put(handlers::medication::update))
        .route("/medications/{id}", delete(handlers::medication::delete))
}

/// Prescription CRUD, current list, and doctor search.
fn prescription_routes() -> Router<AppState> {
    Router::new()
        .route("/prescriptions", get(handlers::prescription::list))
        .route("/prescriptions", post(handlers::prescription::create))
        .route(
            "/prescriptions/current",
            get(handlers::prescription::list_current),
        )
        .route("/prescriptions/search", get(handlers::prescription::search))
        .route("/prescriptions/{id}", get(handlers::prescription::get))
        .route("/prescriptions/{id}", put(handlers::prescription::update))
        .route(
            "/prescriptions/{id}",
            delete(handlers::prescription::delete),
        )
}

/// Personal inventory CRUD and the low-stock list.
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(handlers::inventory::list))
        .route("/inventory", post(handlers::inventory::create))
        .route(
            "/inventory/low-stock",
            get(handlers::inventory::list_low_stock),
        )
        .route("/inventory/{id}", get(handlers::inventory::get))
        .route("/inventory/{id}", put(handlers::inventory::update))
        .route("/inventory/{id}", delete(handlers::inventory::delete))
}

/// Reminder CRUD plus the today/active lists.
fn reminder_routes() -> Router<AppState> {
    Router::new()
        .route("/reminders", get(handlers::reminder::list))
        .route("/reminders", post(handlers::reminder::create))
        .route("/reminders/today", get(handlers::reminder::list_due_today))
        .route("/reminders/active", get(handlers::reminder::list_active))
        .route("/reminders/{id}", get(handlers::reminder::get))
        .route("/reminders/{id}", put(handlers::reminder::update))
        .route("/reminders/{id}", delete(handlers::reminder::delete))
}

/// Health-record CRUD plus kind/latest/window queries.
fn health_record_routes() -> Router<AppState> {
    Router::new()
        .route("/health-records", get(handlers::health::list))
        .route("/health-records", post(handlers::health::create))
        .route("/health-records/latest", get(handlers::health::latest))
        .route(
            "/health-records/kind/{kind}",
            get(handlers::health::list_by_kind),
        )
        .route(
            "/health-records/between",
            get(handlers::health::list_between),
        )
        .route("/health-records/{id}", get(handlers::health::get))
        .route("/health-records/{id}", put(handlers::health::update))
        .route("/health-records/{id}", delete(handlers::health::delete))
}

/// Liveness endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check::health_check))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new().allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
