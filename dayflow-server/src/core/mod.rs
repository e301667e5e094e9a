//! Core module - configuration, state, server and startup errors
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared state
//! - [`Server`] - HTTP server
//! - [`ServerError`] - lifecycle errors

pub mod config;
pub mod error;
pub mod middleware;
pub mod server;
pub mod state;

pub use config::{BootstrapAdmin, Config};
pub use error::{Result, ServerError};
pub use server::{Server, build_router};
pub use state::ServerState;
