//! Repository implementations for all DocVault entities.

pub mod document;
pub mod user;

pub use document::RevisionRepository;
pub use user::UserRepository;
