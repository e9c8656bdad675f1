//! Application builder — wires router + middleware + state into an Axum app.

use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;

use docvault_auth::jwt::decoder::JwtDecoder;
use docvault_auth::jwt::encoder::JwtEncoder;
use docvault_auth::password::hasher::PasswordHasher;
use docvault_auth::password::validator::PasswordValidator;
use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_database::repositories::document::RevisionRepository;
use docvault_database::repositories::user::UserRepository;
use docvault_service::document::service::DocumentService;
use docvault_service::user::service::AuthService;

use crate::router::build_router;
use crate::state::AppState;

/// Constructs the full `AppState`: repositories, auth primitives, and
/// services, all wired against the given pool and configuration.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let revision_repo = Arc::new(RevisionRepository::new(db_pool.clone()));

    let password_hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_validator),
        Arc::clone(&jwt_encoder),
        &config.auth,
    ));

    let document_service = Arc::new(DocumentService::new(
        Arc::clone(&revision_repo),
        config.server.max_upload_size_bytes,
    ));

    AppState {
        config: Arc::new(config),
        db_pool,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        user_repo,
        revision_repo,
        auth_service,
        document_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the DocVault server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting DocVault server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, db_pool);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("DocVault server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("DocVault server stopped");

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
