//! Reports API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/salary-slip/{user_id}", get(handler::salary_slip))
        .route("/salary-slip/{user_id}/download", get(handler::download_salary_slip))
}
