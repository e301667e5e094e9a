//! Utilities - shared helpers and types
//!
//! - [`AppError`] - application error (from shared::error)
//! - [`sanitize`] - remark denylist filter
//! - [`money`] - decimal payroll arithmetic
//! - [`time`] - calendar date helpers
//! - [`validation`] - text length checks
//! - [`logger`] - tracing subscriber setup

pub mod error;
pub mod logger;
pub mod money;
pub mod sanitize;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
