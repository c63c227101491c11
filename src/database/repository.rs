use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::content::SeedCriteria;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Content, Jurisdiction};
use crate::database::query_builder::{ContentQuery, CONTENT_COLUMNS};
use crate::database::store::{ContentStore, JurisdictionDirectory};
use crate::filter::FilterData;
use crate::locale::LocalizedText;

#[derive(Debug, FromRow)]
struct ContentRow {
    id: Uuid,
    jurisdiction: Option<Uuid>,
    #[sqlx(rename = "type")]
    content_type: String,
    title: Json<LocalizedText>,
    body: Json<LocalizedText>,
    published_at: Option<DateTime<Utc>>,
    extras: Option<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<ContentRow> for Content {
    fn from(row: ContentRow) -> Self {
        Content {
            id: row.id,
            jurisdiction: row.jurisdiction,
            content_type: row.content_type,
            title: row.title.0,
            body: row.body.0,
            published_at: row.published_at,
            extras: row.extras,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// Postgres-backed [`ContentStore`]
pub struct PgContentStore {
    pool: PgPool,
    locales: Vec<String>,
}

impl PgContentStore {
    pub fn new(pool: PgPool, locales: Vec<String>) -> Self {
        Self { pool, locales }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn find(&self, filter: &FilterData) -> Result<(Vec<Content>, u64), DatabaseError> {
        let rows = ContentQuery::select(filter)
            .build_query_as::<ContentRow>()
            .fetch_all(&self.pool)
            .await?;
        let total: i64 = ContentQuery::count(filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Selected {} of {} contents", rows.len(), total);
        Ok((rows.into_iter().map(Content::from).collect(), total.max(0) as u64))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Content>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM contents WHERE id = $1 AND deleted_at IS NULL",
            CONTENT_COLUMNS
        );
        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Content::from))
    }

    async fn find_by_criteria(&self, criteria: &SeedCriteria) -> Result<Option<Content>, DatabaseError> {
        let row = ContentQuery::by_criteria(criteria, &self.locales)
            .build_query_as::<ContentRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Content::from))
    }

    async fn last_write(&self) -> Result<Option<DateTime<Utc>>, DatabaseError> {
        let at: Option<DateTime<Utc>> = sqlx::query_scalar("SELECT MAX(updated_at) FROM contents")
            .fetch_one(&self.pool)
            .await?;
        Ok(at)
    }

    async fn insert(&self, content: &Content) -> Result<Content, DatabaseError> {
        let sql = format!(
            "INSERT INTO contents ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {cols}",
            cols = CONTENT_COLUMNS
        );
        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(content.id)
            .bind(content.jurisdiction)
            .bind(&content.content_type)
            .bind(Json(&content.title))
            .bind(Json(&content.body))
            .bind(content.published_at)
            .bind(&content.extras)
            .bind(content.created_at)
            .bind(content.updated_at)
            .bind(content.deleted_at)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_write)?;
        Ok(row.into())
    }

    async fn update(&self, content: &Content) -> Result<Content, DatabaseError> {
        let sql = format!(
            "UPDATE contents SET jurisdiction = $2, type = $3, title = $4, body = $5, \
             published_at = $6, extras = $7, updated_at = $8 \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            CONTENT_COLUMNS
        );
        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(content.id)
            .bind(content.jurisdiction)
            .bind(&content.content_type)
            .bind(Json(&content.title))
            .bind(Json(&content.body))
            .bind(content.published_at)
            .bind(&content.extras)
            .bind(content.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_write)?;
        row.map(Content::from)
            .ok_or_else(|| DatabaseError::NotFound(format!("content {}", content.id)))
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<Content>, DatabaseError> {
        let sql = format!(
            "UPDATE contents SET deleted_at = $2, updated_at = $2 \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            CONTENT_COLUMNS
        );
        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(id)
            .bind(at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Content::from))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

/// Postgres-backed [`JurisdictionDirectory`] reading the `jurisdictions` table
pub struct PgJurisdictionDirectory {
    pool: PgPool,
}

impl PgJurisdictionDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JurisdictionDirectory for PgJurisdictionDirectory {
    async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM jurisdictions WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Jurisdiction>, DatabaseError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!(
            "SELECT {} FROM jurisdictions WHERE id = ANY($1)",
            Jurisdiction::SELECT.join(", ")
        );
        let rows = sqlx::query_as::<_, Jurisdiction>(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
