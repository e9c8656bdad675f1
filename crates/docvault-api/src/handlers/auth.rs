//! Auth handlers — register, login, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use docvault_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
///
/// Registers a new account and immediately logs it in, returning a token
/// so the caller does not need a second round trip.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .auth_service
        .register(&req.username, &req.password)
        .await?;

    let result = state.auth_service.login(&req.username, &req.password).await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        access_token: result.access_token,
        expires_at: result.expires_at,
        user: UserResponse::from(result.user),
    })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state.auth_service.login(&req.username, &req.password).await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        access_token: result.access_token,
        expires_at: result.expires_at,
        user: UserResponse::from(result.user),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.auth_service.profile(&auth).await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
