//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use docvault_auth::jwt::decoder::JwtDecoder;
use docvault_auth::jwt::encoder::JwtEncoder;
use docvault_auth::password::hasher::PasswordHasher;
use docvault_core::config::AppConfig;
use docvault_database::repositories::document::RevisionRepository;
use docvault_database::repositories::user::UserRepository;
use docvault_service::document::service::DocumentService;
use docvault_service::user::service::AuthService;

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
    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2).
    pub password_hasher: Arc<PasswordHasher>,
    /// User repository.
    pub user_repo: Arc<UserRepository>,
    /// Revision repository.
    pub revision_repo: Arc<RevisionRepository>,
    /// Identity service.
    pub auth_service: Arc<AuthService>,
    /// Versioned document service.
    pub document_service: Arc<DocumentService>,
}
