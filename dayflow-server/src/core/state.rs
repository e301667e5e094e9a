use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::config::DEV_ADMIN_PASSWORD;
use crate::core::{Config, ServerError};
use crate::db::{DbService, repository::user};
use crate::utils::sanitize::RemarkFilter;

/// Server state - shared references to every service
///
/// Cloning is cheap: the pool and services are reference counted.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | immutable settings |
/// | pool | SqlitePool | SQLite connection pool |
/// | jwt_service | Arc<JwtService> | token issue/validation |
/// | remark_filter | Arc<RemarkFilter> | denylist filter for free text |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub remark_filter: Arc<RemarkFilter>,
}

impl ServerState {
    /// Build state around an existing pool
    pub fn with_pool(config: Config, pool: SqlitePool) -> Result<Self, ServerError> {
        let remark_filter = RemarkFilter::new(config.remark_denylist.as_slice(), config.remark_match_mode)
            .map_err(|e| ServerError::Config(format!("Invalid REMARK_DENYLIST: {e}")))?;
        let jwt_service = JwtService::with_config(config.jwt.clone());

        Ok(Self {
            config,
            pool,
            jwt_service: Arc::new(jwt_service),
            remark_filter: Arc::new(remark_filter),
        })
    }

    /// Initialize server state
    ///
    /// 1. Validate configuration
    /// 2. Open the database and apply migrations
    /// 3. Create the bootstrap admin if no users exist
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        config.validate()?;

        let db = DbService::new(&config.database_path).await?;
        let state = Self::with_pool(config.clone(), db.pool)?;
        state.ensure_bootstrap_admin().await?;

        Ok(state)
    }

    /// Initialize against a private in-memory database (tests)
    pub async fn in_memory(config: Config) -> Result<Self, ServerError> {
        let db = DbService::in_memory().await?;
        Self::with_pool(config, db.pool)
    }

    async fn ensure_bootstrap_admin(&self) -> Result<(), ServerError> {
        let admin = &self.config.bootstrap_admin;
        let Some(password) = admin.password.as_deref() else {
            if user::count(&self.pool).await.map_err(db_err)? == 0 {
                tracing::warn!("No users exist and ADMIN_PASSWORD is not set; nobody can log in");
            }
            return Ok(());
        };

        let created = user::create_admin_if_empty(&self.pool, &admin.username, &admin.email, password)
            .await
            .map_err(db_err)?;
        if created {
            tracing::info!(username = %admin.username, "Bootstrap admin account created");
            if password == DEV_ADMIN_PASSWORD {
                tracing::warn!("Bootstrap admin uses the development password, change it");
            }
        }
        Ok(())
    }

    /// JWT service handle
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}

fn db_err(e: impl std::fmt::Display) -> ServerError {
    ServerError::Database(e.to_string())
}
