use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the contact stores
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_CONTACTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id           UUID PRIMARY KEY,
        owner        UUID NOT NULL,
        name         TEXT NOT NULL,
        email        TEXT,
        phone        TEXT,
        contact_type TEXT,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT now(),
        seq          BIGSERIAL NOT NULL
    )
"#;

// `seq` breaks ties between rows sharing a `created_at`
const CREATE_OWNER_INDEX: &str = "CREATE INDEX IF NOT EXISTS contacts_owner_created_at_idx \
     ON contacts (owner, created_at DESC, seq DESC)";

/// Connection lifecycle for the PostgreSQL store. The pool is built once at
/// startup, handed to whoever needs it, and closed on shutdown.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool against `DATABASE_URL` with the configured limits
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(
            "Connected to database (max_connections={})",
            config.max_connections
        );
        Ok(pool)
    }

    /// Create the contacts table and its owner index if missing
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_CONTACTS_TABLE).execute(pool).await?;
        sqlx::query(CREATE_OWNER_INDEX).execute(pool).await?;
        info!("Contacts schema is up to date");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(pool: &PgPool) {
        pool.close().await;
        info!("Closed database pool");
    }
}
