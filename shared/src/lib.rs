//! Shared types for Dayflow
//!
//! Common types used by the server and its clients: the unified error
//! system, wire/DB models, auth DTOs and small utilities.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
