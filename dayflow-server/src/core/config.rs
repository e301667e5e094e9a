use crate::auth::JwtConfig;
use crate::core::ServerError;
use crate::utils::sanitize::{DEFAULT_DENYLIST, MatchMode};

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | DATABASE_PATH | dayflow.db | SQLite database file |
/// | ENVIRONMENT | development | development / staging / production |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
/// | REMARK_DENYLIST | fuck,f*ck,fck | comma-separated remark filter terms |
/// | REMARK_MATCH_MODE | substring | `substring` or `word` |
/// | ADMIN_USERNAME | admin | bootstrap admin username |
/// | ADMIN_EMAIL | admin@dayflow.local | bootstrap admin email |
/// | ADMIN_PASSWORD | admin123 | bootstrap admin password (required in production) |
///
/// JWT settings are read by [`JwtConfig::from_env`].
///
/// # Example
///
/// ```ignore
/// DATABASE_PATH=/data/dayflow.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub http_port: u16,
    /// SQLite file path
    pub database_path: String,
    /// JWT settings
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    /// Request timeout (ms)
    pub request_timeout_ms: u64,
    /// Remark denylist terms
    pub remark_denylist: Vec<String>,
    /// Remark matching mode
    pub remark_match_mode: MatchMode,
    /// Admin account created when the users table is empty
    pub bootstrap_admin: BootstrapAdmin,
}

/// Credentials of the first admin account
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    /// `None` in production unless ADMIN_PASSWORD is set
    pub password: Option<String>,
}

/// Bootstrap admin password used outside production when ADMIN_PASSWORD is unset
pub const DEV_ADMIN_PASSWORD: &str = "admin123";

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let production = environment == "production";

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "dayflow.db".into()),
            jwt: JwtConfig::from_env(),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            remark_denylist: std::env::var("REMARK_DENYLIST")
                .ok()
                .map(|v| parse_list(&v))
                .unwrap_or_else(|| DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect()),
            remark_match_mode: parse_match_mode(std::env::var("REMARK_MATCH_MODE").ok().as_deref()),
            bootstrap_admin: BootstrapAdmin {
                username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
                email: std::env::var("ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@dayflow.local".into()),
                password: std::env::var("ADMIN_PASSWORD")
                    .ok()
                    .or_else(|| (!production).then(|| DEV_ADMIN_PASSWORD.to_string())),
            },
            environment,
        }
    }

    /// Configuration for tests: in-memory database, fixed JWT secret
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            database_path: ":memory:".into(),
            jwt: JwtConfig::for_tests(),
            environment: "test".into(),
            request_timeout_ms: 30000,
            remark_denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            remark_match_mode: MatchMode::Substring,
            bootstrap_admin: BootstrapAdmin {
                username: "admin".into(),
                email: "admin@dayflow.local".into(),
                password: Some(DEV_ADMIN_PASSWORD.into()),
            },
        }
    }

    /// Reject settings that are only acceptable during development
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.is_production() && self.jwt.ephemeral {
            return Err(ServerError::Config(
                "JWT_SECRET must be set (at least 32 characters) in production".into(),
            ));
        }
        if self.remark_denylist.is_empty() {
            tracing::warn!("REMARK_DENYLIST is empty, remarks will not be filtered");
        }
        Ok(())
    }

    /// Whether running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Unknown modes fall back to substring matching with a warning
fn parse_match_mode(value: Option<&str>) -> MatchMode {
    match value.map(str::parse::<MatchMode>) {
        None => MatchMode::default(),
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            tracing::warn!("{e}, falling back to {:?}", MatchMode::default());
            MatchMode::default()
        }
    }
}
