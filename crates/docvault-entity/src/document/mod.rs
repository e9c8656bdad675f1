//! Document revision entities.

pub mod model;

pub use model::{NewRevision, Revision, RevisionSummary};
