//! Auth handlers: register, login, refresh, me, status, password.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use crate::dto::request::{ChangePasswordRequest, LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{
    ApiResponse, AuthStatusResponse, MessageResponse, TokenResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    req.validate()?;

    let user = state.accounts.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(user))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    req.validate()?;

    let tokens = state
        .authenticator
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(tokens.into())))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    req.validate()?;

    let tokens = state.renewal.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(tokens.into())))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.accounts.get_user(auth.id).await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// GET /api/auth/status
pub async fn status(MaybeAuthUser(subject): MaybeAuthUser) -> Json<ApiResponse<AuthStatusResponse>> {
    Json(ApiResponse::ok(AuthStatusResponse {
        authenticated: subject.is_some(),
        user: subject,
    }))
}

/// POST /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    req.validate()?;

    state
        .accounts
        .change_password(auth.id, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password changed successfully".to_string(),
    })))
}
