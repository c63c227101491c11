//! In-process store used when no database is configured, and by tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::content::SeedCriteria;
use crate::database::manager::DatabaseError;
use crate::database::models::{Content, Jurisdiction};
use crate::database::store::{ContentStore, JurisdictionDirectory};
use crate::filter::{Filter, FilterData, FilterOrder};

/// Natural key mirroring the Postgres unique index.
type NaturalKey = (Option<Uuid>, String, Vec<Option<String>>);

pub struct MemoryContentStore {
    records: RwLock<HashMap<Uuid, Content>>,
    locales: Vec<String>,
}

impl MemoryContentStore {
    pub fn new(locales: Vec<String>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            locales,
        }
    }

    fn natural_key(&self, content: &Content) -> NaturalKey {
        (
            content.jurisdiction,
            content.content_type.clone(),
            self.locales
                .iter()
                .map(|l| content.title.get(l).map(str::to_string))
                .collect(),
        )
    }

    fn ensure_unique(
        &self,
        records: &HashMap<Uuid, Content>,
        content: &Content,
    ) -> Result<(), DatabaseError> {
        let key = self.natural_key(content);
        let clash = records
            .values()
            .filter(|c| !c.is_deleted() && c.id != content.id)
            .any(|c| self.natural_key(c) == key);
        if clash {
            return Err(DatabaseError::Conflict(
                "content with the same jurisdiction, type and title already exists".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn find(&self, filter: &FilterData) -> Result<(Vec<Content>, u64), DatabaseError> {
        let records = self.records.read().await;
        let mut matched: Vec<&Content> = records
            .values()
            .filter(|c| Filter::matches(filter, c))
            .collect();
        matched.sort_by(|a, b| FilterOrder::compare(&filter.order, a, b));

        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(filter.skip as usize)
            .take(filter.limit.map_or(usize::MAX, |l| l as usize))
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Content>, DatabaseError> {
        let records = self.records.read().await;
        Ok(records.get(&id).filter(|c| !c.is_deleted()).cloned())
    }

    async fn find_by_criteria(&self, criteria: &SeedCriteria) -> Result<Option<Content>, DatabaseError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|c| !c.is_deleted() && criteria.matches(c, &self.locales))
            .min_by_key(|c| (c.created_at, c.id))
            .cloned())
    }

    async fn last_write(&self) -> Result<Option<DateTime<Utc>>, DatabaseError> {
        let records = self.records.read().await;
        Ok(records.values().map(|c| c.updated_at).max())
    }

    async fn insert(&self, content: &Content) -> Result<Content, DatabaseError> {
        let mut records = self.records.write().await;
        if records.contains_key(&content.id) {
            return Err(DatabaseError::Conflict(format!("content {} already exists", content.id)));
        }
        self.ensure_unique(&records, content)?;
        records.insert(content.id, content.clone());
        Ok(content.clone())
    }

    async fn update(&self, content: &Content) -> Result<Content, DatabaseError> {
        let mut records = self.records.write().await;
        match records.get(&content.id) {
            Some(existing) if !existing.is_deleted() => {}
            _ => return Err(DatabaseError::NotFound(format!("content {}", content.id))),
        }
        self.ensure_unique(&records, content)?;
        records.insert(content.id, content.clone());
        Ok(content.clone())
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<Content>, DatabaseError> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(content) if !content.is_deleted() => {
                content.deleted_at = Some(at);
                content.updated_at = at;
                Ok(Some(content.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryJurisdictionDirectory {
    jurisdictions: RwLock<HashMap<Uuid, Jurisdiction>>,
}

impl MemoryJurisdictionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, jurisdiction: Jurisdiction) {
        self.jurisdictions
            .write()
            .await
            .insert(jurisdiction.id, jurisdiction);
    }

    pub async fn remove(&self, id: Uuid) -> Option<Jurisdiction> {
        self.jurisdictions.write().await.remove(&id)
    }
}

#[async_trait]
impl JurisdictionDirectory for MemoryJurisdictionDirectory {
    async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.jurisdictions.read().await.contains_key(&id))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Jurisdiction>, DatabaseError> {
        let jurisdictions = self.jurisdictions.read().await;
        Ok(ids.iter().filter_map(|id| jurisdictions.get(id).cloned()).collect())
    }
}
