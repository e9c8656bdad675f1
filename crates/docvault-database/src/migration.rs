//! Embedded schema migrations.

use sqlx::PgPool;

use docvault_core::error::{AppError, ErrorKind};

/// Apply any migrations not yet recorded in the target database.
///
/// The migration set is compiled into the binary from the workspace-level
/// `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Schema migration failed", e))
}
