//! Document revision entity model.
//!
//! A document has no mutable record of its own: each upload of a filename
//! appends one immutable [`Revision`], and the "current" document is
//! implicitly the revision with the highest version number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One immutable stored copy of a document's content at a specific version.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Revision {
    /// Unique revision identifier.
    pub id: Uuid,
    /// The user this revision belongs to.
    pub owner_id: Uuid,
    /// Display filename as uploaded.
    pub name: String,
    /// Normalized lowercase filename; partition key together with the owner.
    pub name_lower: String,
    /// Opaque content bytes (may be empty).
    #[serde(skip_serializing)]
    pub content: Vec<u8>,
    /// Sequential version number, 0-based and gapless per (owner, name_lower).
    pub version: i32,
    /// When this revision was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new revision. The version number is assigned
/// by the storage layer.
#[derive(Debug, Clone)]
pub struct NewRevision {
    /// The owning user.
    pub owner_id: Uuid,
    /// Display filename.
    pub name: String,
    /// Content bytes.
    pub content: Vec<u8>,
}

/// Listing row: the latest revision of one distinct name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RevisionSummary {
    /// Display filename.
    pub name: String,
    /// Highest version number for this name.
    pub version: i32,
    /// Creation timestamp of that revision.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_not_serialized() {
        let rev = Revision {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Report.pdf".to_string(),
            name_lower: "report.pdf".to_string(),
            content: vec![1, 2, 3],
            version: 0,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&rev).expect("serialize");
        assert!(json.get("content").is_none());
        assert_eq!(json["name"], "Report.pdf");
        assert_eq!(json["version"], 0);
    }
}
