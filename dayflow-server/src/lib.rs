//! Dayflow Server - employee management backend
//!
//! # Overview
//!
//! - **Database** (`db`): SQLite via sqlx, migrations under `migrations/`
//! - **Auth** (`auth`): JWT + Argon2, role policy
//! - **HTTP API** (`api`): employees, leave, attendance, payroll, reports
//! - **Remark filtering** (`utils::sanitize`): denylist text filter
//!
//! # Layout
//!
//! ```text
//! dayflow-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── auth/          # JWT, middleware, extractor, policy
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # pool, repositories
//! └── utils/         # errors, logging, validation, dates, sanitizer
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Security event log, written to the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and install the global subscriber
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_JSON").ok().and_then(|v| v.parse().ok());
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), json, log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____              ______
   / __ \____ ___  __/ __/ /___ _      __
  / / / / __ `/ / / / /_/ / __ \ | /| / /
 / /_/ / /_/ / /_/ / __/ / /_/ / |/ |/ /
/_____/\__,_/\__, /_/ /_/\____/|__/|__/
            /____/
    "#
    );
}
