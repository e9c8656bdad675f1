//! # docvault-service
//!
//! Business logic services for DocVault. Services orchestrate the
//! repositories and the auth primitives; all operations take a
//! [`context::RequestContext`] identifying the acting user.

pub mod context;
pub mod document;
pub mod user;

pub use context::RequestContext;
pub use document::DocumentService;
pub use user::AuthService;
