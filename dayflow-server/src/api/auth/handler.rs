//! Authentication Handlers

use axum::{Json, extract::State};
use shared::client::{CurrentUserResponse, LoginRequest, LoginResponse, UserInfo};
use shared::models::User;

use crate::auth::{CurrentUser, verify_password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::{AppError, AppResult};

fn user_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id,
        employee_id: user.employee_id,
        username: user.username,
        email: user.email,
        role: user.role,
    }
}

/// POST /api/auth/login
///
/// `username` may be a username, email or employee ID. Unknown users and
/// wrong passwords produce the same error.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let login = req.username.trim();
    if login.is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Username and password are required"));
    }

    let found = user::find_by_login(&state.pool, login).await?;
    let user = match found {
        Some(u) if verify_password(&req.password, &u.password_hash) => u,
        Some(_) => {
            security_log!("WARN", "login_failed", username = login.to_string(), reason = "invalid_password");
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!("WARN", "login_failed", username = login.to_string(), reason = "unknown_user");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .get_jwt_service()
        .generate_token(user.id, &user.username, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: user_info(user),
    }))
}

/// GET /api/auth/me
///
/// Re-read from the database; the username may have changed since login.
pub async fn me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<CurrentUserResponse>> {
    let user = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(AppError::unauthorized)?;

    Ok(Json(CurrentUserResponse {
        user: user_info(user),
    }))
}
