//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use medtrack_auth::jwt::JwtDecoder;
use medtrack_auth::session::AuthManager;
use medtrack_core::config::AppConfig;
use medtrack_database::repositories::user::UserRepository;
use medtrack_service::health::HealthService;
use medtrack_service::inventory::InventoryService;
use medtrack_service::medication::MedicationService;
use medtrack_service::prescription::PrescriptionService;
use medtrack_service::reminder::ReminderService;
use medtrack_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,

    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Auth lifecycle orchestrator.
    pub auth_manager: Arc<AuthManager>,
    /// User repository, for bearer-subject resolution.
    pub user_repo: Arc<UserRepository>,

    /// Medication service.
    pub medication_service: Arc<MedicationService>,
    /// Prescription service.
    pub prescription_service: Arc<PrescriptionService>,
    /// Inventory service.
    pub inventory_service: Arc<InventoryService>,
    /// Reminder service.
    pub reminder_service: Arc<ReminderService>,
    /// Health-record service.
    pub health_service: Arc<HealthService>,
    /// User profile service.
    pub user_service: Arc<UserService>,
}
