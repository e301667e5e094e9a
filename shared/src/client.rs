//! Client-facing request/response types
//!
//! Small DTOs that are not tied to a single table.

use crate::models::Role;
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
///
/// `username` may also be an email address or an employee ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub employee_id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// `GET /api/auth/me` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user: UserInfo,
}

// =============================================================================
// Generic acknowledgements
// =============================================================================

/// `{ "message": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ "message": ..., "id": ... }` for 201 responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}

/// `GET /health` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
