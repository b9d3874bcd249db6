//! Shared test helpers for integration tests.
//!
//! These tests exercise the full HTTP stack against a live PostgreSQL
//! instance; point config/test.toml (or MEDTRACK_DATABASE__URL) at a
//! disposable database before running them.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use medtrack_core::config::AppConfig;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: PgPool,
}

/// A captured test response.
pub struct TestResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Parsed JSON body (Null when empty).
    pub body: Value,
}

impl TestApp {
    /// Create a new test application on a clean database.
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db_pool = medtrack_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        medtrack_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let user_repo = Arc::new(medtrack_database::repositories::user::UserRepository::new(
            db_pool.clone(),
        ));
        let refresh_token_repo = Arc::new(
            medtrack_database::repositories::refresh_token::RefreshTokenRepository::new(
                db_pool.clone(),
            ),
        );
        let medication_repo = Arc::new(
            medtrack_database::repositories::medication::MedicationRepository::new(
                db_pool.clone(),
            ),
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

        let state = medtrack_api::state::AppState {
            config: Arc::new(config),
            db_pool: db_pool.clone(),
            jwt_decoder,
            auth_manager,
            user_repo: Arc::clone(&user_repo),
            medication_service: Arc::new(
                medtrack_service::medication::MedicationService::new(Arc::clone(
                    &medication_repo,
                )),
            ),
            prescription_service: Arc::new(
                medtrack_service::prescription::PrescriptionService::new(
                    Arc::clone(&prescription_repo),
                    Arc::clone(&medication_repo),
                ),
            ),
            inventory_service: Arc::new(medtrack_service::inventory::InventoryService::new(
                Arc::clone(&inventory_repo),
                Arc::clone(&medication_repo),
            )),
            reminder_service: Arc::new(medtrack_service::reminder::ReminderService::new(
                Arc::clone(&reminder_repo),
                Arc::clone(&medication_repo),
            )),
            health_service: Arc::new(medtrack_service::health::HealthService::new(Arc::clone(
                &health_repo,
            ))),
            user_service: Arc::new(medtrack_service::user::UserService::new(
                Arc::clone(&user_repo),
                Arc::clone(&password_hasher),
            )),
        };

        let router = medtrack_api::router::build_router(state);

        Self { router, db_pool }
    }

    /// Truncate all tables between tests.
    async fn clean_database(pool: &PgPool) {
        sqlx::query(
            "TRUNCATE health_records, reminders, inventory_items, prescription_items, \
             prescriptions, medications, refresh_tokens, users CASCADE",
        )
        .execute(pool)
        .await
        .expect("Failed to clean database");
    }

    /// Issue a request against the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Register a user and return the auth response body.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/auth/register",
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "registration failed");
        response.body
    }

    /// Register a user and return their access token.
    pub async fn register_and_token(&self, name: &str, email: &str, password: &str) -> String {
        self.register(name, email, password)
            .await
            .get("accessToken")
            .and_then(Value::as_str)
            .expect("missing accessToken")
            .to_string()
    }

    /// Create a medication for the given token; returns its ID.
    pub async fn create_medication(&self, token: &str, full_name: &str) -> String {
        let response = self
            .request(
                "POST",
                "/medications",
                Some(serde_json::json!({ "fullName": full_name })),
                Some(token),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED, "medication create failed");
        response
            .body
            .get("id")
            .and_then(Value::as_str)
            .expect("missing medication id")
            .to_string()
    }
}
