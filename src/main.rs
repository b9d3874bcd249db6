//! MedTrack Server — medication-management REST backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use medtrack_core::config::AppConfig;
use medtrack_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("MEDTRACK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting MedTrack v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db_pool = medtrack_database::connection::create_pool(&config.database).await?;
    medtrack_database::migration::run_migrations(&db_pool).await?;

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(medtrack_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let refresh_token_repo = Arc::new(
        medtrack_database::repositories::refresh_token::RefreshTokenRepository::new(
            db_pool.clone(),
        ),
    );
    let medication_repo = Arc::new(
        medtrack_database::repositories::medication::MedicationRepository::new(db_pool.clone()),
    );
    let prescription_repo = Arc::new(
        medtrack_database::repositories::prescription::PrescriptionRepository::new(
            db_pool.clone(),
        ),
    );
    let inventory_repo = Arc::new(
        medtrack_database::repositories::inventory::InventoryRepository::new(db_pool.clone()),
    );
    let reminder_repo = Arc::new(
        medtrack_database::repositories::reminder::ReminderRepository::new(db_pool.clone()),
    );
    let health_repo = Arc::new(
        medtrack_database::repositories::health::HealthRecordRepository::new(db_pool.clone()),
    );

    // ── Auth system ──────────────────────────────────────────────
    tracing::info!("Initializing authentication system...");
    let password_hasher = Arc::new(medtrack_auth::password::PasswordHasher::new());
    let jwt_encoder = Arc::new(medtrack_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(medtrack_auth::jwt::JwtDecoder::new(&config.auth));
    let token_store = Arc::new(medtrack_auth::session::TokenStore::new(
        Arc::clone(&refresh_token_repo),
        &config.auth,
    ));
    let auth_manager = Arc::new(medtrack_auth::session::AuthManager::new(
        Arc::clone(&jwt_encoder),
        Arc::clone(&token_store),
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        db_pool.clone(),
    ));

    // ── Services ─────────────────────────────────────────────────
    let medication_service = Arc::new(medtrack_service::medication::MedicationService::new(
        Arc::clone(&medication_repo),
    ));
    let prescription_service = Arc::new(medtrack_service::prescription::PrescriptionService::new(
        Arc::clone(&prescription_repo),
        Arc::clone(&medication_repo),
    ));
    let inventory_service = Arc::new(medtrack_service::inventory::InventoryService::new(
        Arc::clone(&inventory_repo),
        Arc::clone(&medication_repo),
    ));
    let reminder_service = Arc::new(medtrack_service::reminder::ReminderService::new(
        Arc::clone(&reminder_repo),
        Arc::clone(&medication_repo),
    ));
    let health_service = Arc::new(medtrack_service::health::HealthService::new(Arc::clone(
        &health_repo,
    )));
    let user_service = Arc::new(medtrack_service::user::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
    ));

    // ── Shutdown channel ─────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Expired refresh-token purge task ─────────────────────────
    let cleanup = medtrack_auth::session::TokenCleanup::new(Arc::clone(&token_store));
    let purge_interval = Duration::from_secs(config.auth.token_purge_interval_minutes * 60);
    let purge_handle = tokio::spawn(run_purge_loop(cleanup, purge_interval, shutdown_rx));

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = medtrack_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        jwt_decoder: Arc::clone(&jwt_decoder),
        auth_manager: Arc::clone(&auth_manager),
        user_repo: Arc::clone(&user_repo),
        medication_service,
        prescription_service,
        inventory_service,
        reminder_service,
        health_service,
        user_service,
    };

    let app = medtrack_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("MedTrack server listening on {addr}");

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    let _ = tokio::time::timeout(Duration::from_secs(10), purge_handle).await;

    tracing::info!("MedTrack server shut down gracefully");
    Ok(())
}

/// Periodically purge expired refresh tokens until shutdown.
async fn run_purge_loop(
    cleanup: medtrack_auth::session::TokenCleanup,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // The first tick fires immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = cleanup.run_purge().await {
                    tracing::error!("Refresh-token purge failed: {e}");
                }
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
