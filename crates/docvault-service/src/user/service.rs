//! Identity service — registration, login, and profile lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use docvault_auth::jwt::encoder::JwtEncoder;
use docvault_auth::password::{PasswordHasher, PasswordValidator};
use docvault_core::config::AuthConfig;
use docvault_core::error::AppError;
use docvault_database::repositories::user::UserRepository;
use docvault_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Result of a successful login: the user and a signed access token.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// Signed JWT access token.
    pub access_token: String,
    /// Token expiration time.
    pub expires_at: DateTime<Utc>,
}

/// Handles registration, authentication, and profile lookup.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy validator.
    validator: Arc<PasswordValidator>,
    /// JWT encoder.
    jwt_encoder: Arc<JwtEncoder>,
    /// Maximum username length.
    username_max_length: usize,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        jwt_encoder: Arc<JwtEncoder>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            jwt_encoder,
            username_max_length: config.username_max_length,
        }
    }

    /// Registers a new user account.
    ///
    /// Fails with a conflict error when the username is already taken
    /// (case-insensitively).
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }
        if username.len() > self.username_max_length {
            return Err(AppError::validation(format!(
                "Username must be at most {} characters long",
                self.username_max_length
            )));
        }

        self.validator.validate(password)?;

        let password_hash = self.hasher.hash_password(password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Authenticates a user and issues an access token.
    ///
    /// Unknown username and wrong password fail identically so that the
    /// response does not reveal which accounts exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Invalid username or password"));
        }

        self.user_repo.update_last_login(user.id).await?;

        let (access_token, expires_at) = self
            .jwt_encoder
            .generate_access_token(user.id, &user.username)?;

        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(LoginResult {
            user: User {
                last_login_at: Some(Utc::now()),
                ..user
            },
            access_token,
            expires_at,
        })
    }

    /// Gets the current user's profile.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
