//! Versioned document store.

pub mod service;

pub use service::DocumentService;
