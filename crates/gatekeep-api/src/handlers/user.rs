//! User lookup and deactivation handlers.

use axum::Json;
use axum::extract::{Path, State};

use gatekeep_auth::RoleRequirement;
use gatekeep_core::UserId;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    auth.require(&RoleRequirement::moderator_or_above())?;

    let user = state.accounts.get_user(user_id).await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/users/{id}/deactivate
///
/// Allowed for the account itself or an admin.
pub async fn deactivate_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.accounts.deactivate(&auth, user_id).await?;

    Ok(Json(ApiResponse::ok(user.into())))
}
