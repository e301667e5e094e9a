//! Leave Request API Module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/leave", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::submit))
        .route("/my-leaves", get(handler::list_mine))
        .route("/all", get(handler::list_all))
        .route("/{id}/approve", put(handler::decide))
}
