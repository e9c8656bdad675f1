//! User identity services.

pub mod service;

pub use service::{AuthService, LoginResult};
