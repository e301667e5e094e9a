//! HTTP API
//!
//! # Layout
//!
//! - [`health`] - liveness and database check
//! - [`auth`] - login and current user
//! - [`employees`] - employee directory
//! - [`leave`] - leave requests and decisions
//! - [`attendance`] - attendance listings
//! - [`payroll`] - payroll records
//! - [`reports`] - salary slips
//!
//! Every handler authorizes through [`crate::auth::permissions::authorize`].

pub mod attendance;
pub mod auth;
pub mod employees;
pub mod health;
pub mod leave;
pub mod payroll;
pub mod reports;

use axum::Router;
use http::Uri;

use crate::core::ServerState;
use crate::utils::{AppError, ErrorCode};

/// Every route, without state or outer layers
pub fn build_app() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(employees::router())
        .merge(leave::router())
        .merge(attendance::router())
        .merge(payroll::router())
        .merge(reports::router())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::with_message(ErrorCode::NotFound, format!("No route for {}", uri.path()))
}
