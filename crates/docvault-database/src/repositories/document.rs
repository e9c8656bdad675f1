//! Document revision repository implementation.
//!
//! Revisions are append-only: there is no update or delete. Every query is
//! scoped by `owner_id`, so a revision owned by another user is
//! indistinguishable from one that does not exist.

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::document::{NewRevision, Revision, RevisionSummary};

/// Attempts before giving up when concurrent appends keep colliding on the
/// same version number.
const APPEND_MAX_ATTEMPTS: u32 = 3;

/// Repository for append and query operations on document revisions.
#[derive(Debug, Clone)]
pub struct RevisionRepository {
    pool: PgPool,
}

impl RevisionRepository {
    /// Create a new revision repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a new revision for (owner, name), assigning version max + 1
    /// (0 for the first upload of the name).
    ///
    /// The insert computes the next version in the same statement that
    /// writes the row; the unique constraint on
    /// (owner_id, name_lower, version) rejects the loser of a concurrent
    /// race, which retries against the new maximum.
    pub async fn append(&self, data: &NewRevision) -> AppResult<Revision> {
        let name_lower = data.name.to_lowercase();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let result = sqlx::query_as::<_, Revision>(
                "INSERT INTO revisions (id, owner_id, name, name_lower, content, version) \
                 SELECT $1, $2, $3, $4, $5, COALESCE(MAX(version) + 1, 0) \
                 FROM revisions WHERE owner_id = $2 AND name_lower = $4 \
                 RETURNING *",
            )
            .bind(Uuid::new_v4())
            .bind(data.owner_id)
            .bind(&data.name)
            .bind(&name_lower)
            .bind(&data.content)
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(revision) => return Ok(revision),
                Err(sqlx::Error::Database(ref db_err))
                    if db_err.constraint() == Some("revisions_owner_name_version_key")
                        && attempt < APPEND_MAX_ATTEMPTS =>
                {
                    debug!(
                        owner_id = %data.owner_id,
                        name = %data.name,
                        attempt,
                        "Concurrent append collided on version, retrying"
                    );
                }
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::Database,
                        "Failed to append revision",
                        e,
                    ));
                }
            }
        }
    }

    /// Find the latest revision of (owner, name).
    pub async fn find_latest(&self, owner_id: Uuid, name: &str) -> AppResult<Option<Revision>> {
        sqlx::query_as::<_, Revision>(
            "SELECT * FROM revisions WHERE owner_id = $1 AND name_lower = $2 \
             ORDER BY version DESC LIMIT 1",
        )
        .bind(owner_id)
        .bind(name.to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find latest revision", e)
        })
    }

    /// Find the revision of (owner, name) at an exact version.
    pub async fn find_version(
        &self,
        owner_id: Uuid,
        name: &str,
        version: i32,
    ) -> AppResult<Option<Revision>> {
        sqlx::query_as::<_, Revision>(
            "SELECT * FROM revisions WHERE owner_id = $1 AND name_lower = $2 AND version = $3",
        )
        .bind(owner_id)
        .bind(name.to_lowercase())
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find revision", e))
    }

    /// List the latest revision of every distinct name owned by a user.
    ///
    /// Returns one summary row per name_lower; content is not fetched.
    pub async fn list_latest(&self, owner_id: Uuid) -> AppResult<Vec<RevisionSummary>> {
        sqlx::query_as::<_, RevisionSummary>(
            "SELECT DISTINCT ON (name_lower) name, version, created_at \
             FROM revisions WHERE owner_id = $1 \
             ORDER BY name_lower ASC, version DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list revisions", e))
    }
}
