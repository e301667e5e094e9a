//! Payroll API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payroll", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/my-payroll", get(handler::list_mine))
        .route("/all", get(handler::list_all))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::set_status))
}
