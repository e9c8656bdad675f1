//! Versioned document store — upload, fetch, and list operations.
//!
//! Every upload of a filename appends a new immutable revision; fetches
//! resolve either the latest revision or an exact historical one. All
//! operations are scoped to the acting user, so another user's documents
//! are indistinguishable from absent ones.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use docvault_core::error::AppError;
use docvault_database::repositories::document::RevisionRepository;
use docvault_entity::document::{NewRevision, Revision, RevisionSummary};

use crate::context::RequestContext;

/// Manages per-user versioned document revisions.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Revision repository.
    revision_repo: Arc<RevisionRepository>,
    /// Maximum accepted content size in bytes.
    max_content_bytes: u64,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(revision_repo: Arc<RevisionRepository>, max_content_bytes: u64) -> Self {
        Self {
            revision_repo,
            max_content_bytes,
        }
    }

    /// Uploads a new revision of (owner, name) and returns its version
    /// number: 0 for the first upload of the name, previous max + 1 after.
    ///
    /// Content may be empty; the name may not.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        name: &str,
        content: Bytes,
    ) -> Result<Revision, AppError> {
        let name = validated_name(name)?;

        if content.len() as u64 > self.max_content_bytes {
            return Err(AppError::validation(format!(
                "Content exceeds maximum upload size of {} bytes",
                self.max_content_bytes
            )));
        }

        let revision = self
            .revision_repo
            .append(&NewRevision {
                owner_id: ctx.user_id,
                name: name.to_string(),
                content: content.to_vec(),
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            name = %revision.name,
            version = revision.version,
            size = revision.content.len(),
            "Revision uploaded"
        );

        Ok(revision)
    }

    /// Fetches a revision of (owner, name).
    ///
    /// With `revision = None` the latest version is returned; otherwise the
    /// exact version. A missing name, a missing version, or a name owned by
    /// a different user all fail not-found.
    pub async fn fetch(
        &self,
        ctx: &RequestContext,
        name: &str,
        revision: Option<i32>,
    ) -> Result<Revision, AppError> {
        let name = validated_name(name)?;

        let found = match revision {
            Some(version) => {
                self.revision_repo
                    .find_version(ctx.user_id, name, version)
                    .await?
            }
            None => self.revision_repo.find_latest(ctx.user_id, name).await?,
        };

        found.ok_or_else(|| AppError::not_found("Document not found"))
    }

    /// Lists the latest revision of every distinct name the user owns.
    pub async fn list_latest(&self, ctx: &RequestContext) -> Result<Vec<RevisionSummary>, AppError> {
        self.revision_repo.list_latest(ctx.user_id).await
    }
}

/// Validates a logical filename: non-empty after trimming.
fn validated_name(name: &str) -> Result<&str, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("File name cannot be empty"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_name_rejects_empty() {
        assert!(validated_name("").is_err());
        assert!(validated_name("   ").is_err());
    }

    #[test]
    fn test_validated_name_trims() {
        assert_eq!(validated_name(" a.txt ").expect("valid"), "a.txt");
    }
}
