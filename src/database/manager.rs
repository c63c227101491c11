use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Map write failures, turning unique violations into [`DatabaseError::Conflict`].
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return DatabaseError::Conflict(
                    "content with the same jurisdiction, type and title already exists".to_string(),
                );
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Connection setup and schema bootstrap for the Postgres store
pub struct DatabaseManager;

impl DatabaseManager {
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

        info!("Connected to database: {}", Self::redact(url)?);
        Ok(pool)
    }

    /// Connection string with the password masked, for logs.
    pub fn redact(database_url: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(database_url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }

    /// Create tables and indexes if missing. Idempotent.
    pub async fn migrate(pool: &PgPool, locales: &[String]) -> Result<(), DatabaseError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS jurisdictions (
                id UUID PRIMARY KEY,
                code TEXT NOT NULL,
                name TEXT NOT NULL
            )
            "#
            .to_string(),
            r#"
            CREATE TABLE IF NOT EXISTS contents (
                id UUID PRIMARY KEY,
                jurisdiction UUID NULL,
                type TEXT NOT NULL,
                title JSONB NOT NULL DEFAULT '{}'::jsonb,
                body JSONB NOT NULL DEFAULT '{}'::jsonb,
                published_at TIMESTAMPTZ NULL,
                extras JSONB NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL,
                deleted_at TIMESTAMPTZ NULL
            )
            "#
            .to_string(),
            "CREATE INDEX IF NOT EXISTS contents_jurisdiction_idx ON contents (jurisdiction)".to_string(),
            "CREATE INDEX IF NOT EXISTS contents_type_idx ON contents (type)".to_string(),
            "CREATE INDEX IF NOT EXISTS contents_published_at_idx ON contents (published_at)".to_string(),
            Self::unique_index_sql(locales)?,
        ];

        for statement in statements.iter() {
            sqlx::query(statement).execute(pool).await?;
        }
        Self::drop_stale_unique_indexes(pool, locales).await?;

        info!("Content schema ready for locales: {}", locales.join(", "));
        Ok(())
    }

    /// Unique indexes left behind by an earlier locale list still enforce
    /// the old key, so only the current one may remain.
    async fn drop_stale_unique_indexes(pool: &PgPool, locales: &[String]) -> Result<(), DatabaseError> {
        let current = Self::unique_index_name(locales);
        let stale: Vec<String> = sqlx::query_scalar(
            "SELECT indexname::text FROM pg_indexes \
             WHERE tablename = 'contents' AND indexname LIKE 'contents\\_unique\\_title\\_%' \
             AND indexname <> $1",
        )
        .bind(&current)
        .fetch_all(pool)
        .await?;

        for name in stale {
            warn!("Dropping unique index {} left by a previous locale list", name);
            sqlx::query(&format!("DROP INDEX IF EXISTS \"{}\"", name.replace('"', "\"\"")))
                .execute(pool)
                .await?;
        }
        Ok(())
    }

    pub fn unique_index_name(locales: &[String]) -> String {
        format!("contents_unique_title_{}", locales.join("_").replace('-', "_").to_lowercase())
    }

    /// Unique index over (jurisdiction, type, title per locale) for live rows.
    /// A null jurisdiction participates as the nil UUID.
    pub fn unique_index_sql(locales: &[String]) -> Result<String, DatabaseError> {
        if locales.is_empty() {
            return Err(DatabaseError::ConfigMissing("LOCALES"));
        }
        if let Some(bad) = locales.iter().find(|l| !Self::is_valid_locale(l)) {
            return Err(DatabaseError::QueryError(format!("invalid locale code: {}", bad)));
        }

        let name = Self::unique_index_name(locales);
        let title_columns: Vec<String> = locales
            .iter()
            .map(|l| format!("(title->>'{}')", l))
            .collect();

        Ok(format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {} ON contents \
             (COALESCE(jurisdiction, '00000000-0000-0000-0000-000000000000'::uuid), type, {}) \
             WHERE deleted_at IS NULL",
            name,
            title_columns.join(", ")
        ))
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    fn is_valid_locale(code: &str) -> bool {
        crate::config::ContentConfig::is_valid_locale(code)
    }
}
