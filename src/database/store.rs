use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::content::SeedCriteria;
use crate::database::manager::DatabaseError;
use crate::database::models::{Content, Jurisdiction};
use crate::filter::FilterData;

/// Persistence for content records. Soft-deleted rows are invisible to every method.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Matching records for the filter (paginated when `filter.limit` is set)
    /// and the total number of matches.
    async fn find(&self, filter: &FilterData) -> Result<(Vec<Content>, u64), DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Content>, DatabaseError>;

    /// Oldest live record matching the criteria.
    async fn find_by_criteria(&self, criteria: &SeedCriteria) -> Result<Option<Content>, DatabaseError>;

    /// Latest `updated_at` over every record, soft-deleted ones included.
    async fn last_write(&self) -> Result<Option<DateTime<Utc>>, DatabaseError>;

    /// Fails with [`DatabaseError::Conflict`] on a duplicate id or natural key.
    async fn insert(&self, content: &Content) -> Result<Content, DatabaseError>;

    /// Fails with [`DatabaseError::NotFound`] when the record is gone.
    async fn update(&self, content: &Content) -> Result<Content, DatabaseError>;

    /// Returns the deleted record, or `None` if there was nothing live to delete.
    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<Content>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Lookup side of the externally owned jurisdiction registry.
#[async_trait]
pub trait JurisdictionDirectory: Send + Sync {
    async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError>;

    /// Projections for the given ids; unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Jurisdiction>, DatabaseError>;
}
