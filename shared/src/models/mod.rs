//! Data models
//!
//! Shared between dayflow-server and clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), calendar dates are
//! `YYYY-MM-DD` strings and timestamps are Unix milliseconds.

pub mod attendance;
pub mod employee;
pub mod leave;
pub mod payroll;
pub mod user;

// Re-exports
pub use attendance::*;
pub use employee::*;
pub use leave::*;
pub use payroll::*;
pub use user::*;
