//! Attendance API Module (read-only)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/attendance", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/my-attendance", get(handler::list_mine))
        .route("/all", get(handler::list_all))
}
