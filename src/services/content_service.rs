use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ContentConfig;
use crate::content::{derive_seed_criteria, normalize, validate, ContentError};
use crate::database::models::{Content, ContentInput, ContentPatch, ContentView};
use crate::database::{ContentStore, DatabaseError, JurisdictionDirectory};
use crate::filter::{Filter, FilterLimits, ListQuery, Page};
use crate::services::export_service::ExportService;
use crate::services::schema_service::{JsonSchema, SchemaService};

/// Orchestrates every content read and write.
///
/// Writes run defaults, then [`normalize`], then [`validate`], then the
/// jurisdiction check, then the store. Reads query the store and then
/// populate jurisdiction projections.
pub struct ContentService {
    store: Arc<dyn ContentStore>,
    jurisdictions: Arc<dyn JurisdictionDirectory>,
    config: ContentConfig,
    limits: FilterLimits,
}

/// Outcome of seeding one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedOutcome {
    Created(ContentView),
    Updated(ContentView),
}

impl SeedOutcome {
    pub fn content(&self) -> &ContentView {
        match self {
            SeedOutcome::Created(c) | SeedOutcome::Updated(c) => c,
        }
    }
}

impl ContentService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        jurisdictions: Arc<dyn JurisdictionDirectory>,
        config: ContentConfig,
        limits: FilterLimits,
    ) -> Self {
        Self {
            store,
            jurisdictions,
            config,
            limits,
        }
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<ContentView>, ContentError> {
        let filter = Filter::paginated(query, self.limits)?;
        let (records, total) = self.store.find(&filter).await?;
        let last_modified = records.iter().map(|c| c.updated_at).max();
        let changed_at = self.store.last_write().await?;
        let data = self.populate(records).await?;
        Ok(Page::new(
            data,
            total,
            filter.limit.unwrap_or(self.limits.default_limit),
            filter.skip,
            last_modified,
        )
        .changed_at(changed_at))
    }

    pub async fn list_for_jurisdiction(
        &self,
        jurisdiction: Uuid,
        query: &ListQuery,
    ) -> Result<Page<ContentView>, ContentError> {
        let query = ListQuery {
            jurisdiction: Some(jurisdiction.to_string()),
            ..query.clone()
        };
        self.list(&query).await
    }

    pub async fn get(&self, id: Uuid) -> Result<ContentView, ContentError> {
        let content = self.store.find_by_id(id).await?.ok_or(ContentError::NotFound)?;
        self.populate_one(content).await
    }

    pub async fn create(&self, input: ContentInput) -> Result<ContentView, ContentError> {
        let content = Content::from_input(input, &self.config.default_type, Utc::now());
        let content = self.prepare(content).await?;
        let created = self.store.insert(&content).await?;
        info!("Created content {} ({})", created.id, created.content_type);
        self.populate_one(created).await
    }

    pub async fn patch(&self, id: Uuid, patch: ContentPatch) -> Result<ContentView, ContentError> {
        let mut content = self.store.find_by_id(id).await?.ok_or(ContentError::NotFound)?;
        content.apply_patch(patch);
        content.updated_at = Utc::now();
        self.save(content).await
    }

    pub async fn put(&self, id: Uuid, input: ContentInput) -> Result<ContentView, ContentError> {
        let mut content = self.store.find_by_id(id).await?.ok_or(ContentError::NotFound)?;
        content.replace_with(input, &self.config.default_type);
        content.updated_at = Utc::now();
        self.save(content).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<ContentView, ContentError> {
        let deleted = self
            .store
            .soft_delete(id, Utc::now())
            .await?
            .ok_or(ContentError::NotFound)?;
        info!("Deleted content {}", id);
        self.populate_one(deleted).await
    }

    /// Every live record matching the query filters, without pagination.
    pub async fn export_rows(&self, query: &ListQuery) -> Result<Vec<ContentView>, ContentError> {
        let filter = Filter::unpaginated(query)?;
        let (records, total) = self.store.find(&filter).await?;
        debug!("Exporting {} contents", total);
        self.populate(records).await
    }

    pub async fn export_csv(&self, query: &ListQuery) -> Result<String, ContentError> {
        let rows = self.export_rows(query).await?;
        Ok(self.exporter().to_csv(&rows))
    }

    pub fn exporter(&self) -> ExportService {
        ExportService::new(self.config.locales.clone())
    }

    pub fn schema(&self) -> JsonSchema {
        SchemaService::content_schema(&self.config)
    }

    /// Upsert each candidate by its seed criteria. A match only takes the keys
    /// the candidate carries. Re-running the same seed leaves the store
    /// unchanged apart from `updatedAt`.
    pub async fn seed(&self, candidates: Vec<ContentInput>) -> Result<Vec<SeedOutcome>, ContentError> {
        let mut outcomes = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let criteria = derive_seed_criteria(&candidate, &self.config.locales);
            debug!("Seeding content matching {}", criteria.to_json(&self.config.locales));

            let outcome = match self.store.find_by_criteria(&criteria).await? {
                Some(mut existing) => {
                    existing.apply_patch(ContentPatch::from(candidate));
                    existing.updated_at = Utc::now();
                    SeedOutcome::Updated(self.save(existing).await?)
                }
                None => SeedOutcome::Created(self.create(candidate).await?),
            };
            outcomes.push(outcome);
        }
        info!("Seeded {} contents", outcomes.len());
        Ok(outcomes)
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        self.store.health_check().await
    }

    async fn save(&self, content: Content) -> Result<ContentView, ContentError> {
        let content = self.prepare(content).await?;
        let updated = self.store.update(&content).await.map_err(|e| match e {
            DatabaseError::NotFound(_) => ContentError::NotFound,
            other => other.into(),
        })?;
        info!("Updated content {}", updated.id);
        self.populate_one(updated).await
    }

    /// Normalize and validate a record about to be written.
    async fn prepare(&self, content: Content) -> Result<Content, ContentError> {
        let content = normalize(content, &self.config.locales);
        validate(&content, &self.config)?;
        if let Some(jurisdiction) = content.jurisdiction {
            if !self.jurisdictions.exists(jurisdiction).await? {
                return Err(ContentError::UnknownJurisdiction(jurisdiction));
            }
        }
        Ok(content)
    }

    async fn populate_one(&self, content: Content) -> Result<ContentView, ContentError> {
        let mut views = self.populate(vec![content]).await?;
        views.pop().ok_or(ContentError::NotFound)
    }

    /// Replace jurisdiction ids with their projections. Ids that no longer
    /// resolve read as `null`.
    async fn populate(&self, records: Vec<Content>) -> Result<Vec<ContentView>, ContentError> {
        let mut ids: Vec<Uuid> = records.iter().filter_map(|c| c.jurisdiction).collect();
        ids.sort();
        ids.dedup();

        let known: HashMap<Uuid, _> = self
            .jurisdictions
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|j| (j.id, j))
            .collect();

        Ok(records
            .into_iter()
            .map(|c| {
                let jurisdiction = c.jurisdiction.and_then(|id| known.get(&id).cloned());
                c.into_view(jurisdiction)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Jurisdiction, JurisdictionInput};
    use crate::database::{MemoryContentStore, MemoryJurisdictionDirectory};
    use crate::locale::LocalizedText;

    struct Fixture {
        service: ContentService,
        jurisdictions: Arc<MemoryJurisdictionDirectory>,
    }

    fn fixture() -> Fixture {
        let config = ContentConfig::new("en", &["en", "sw"], "Post", &["Post", "FAQ", "Tariff"]);
        let store = Arc::new(MemoryContentStore::new(config.locales.clone()));
        let jurisdictions = Arc::new(MemoryJurisdictionDirectory::new());
        let service = ContentService::new(
            store,
            jurisdictions.clone(),
            config,
            FilterLimits { default_limit: 10, max_limit: 100 },
        );
        Fixture { service, jurisdictions }
    }

    fn input(title: &str) -> ContentInput {
        ContentInput {
            title: LocalizedText::new().with("en", title),
            body: LocalizedText::new().with("en", format!("{} body", title)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_normalizes_and_defaults_type() {
        let fx = fixture();
        let created = fx.service.create(input("Fees")).await.unwrap();
        assert_eq!(created.content_type, "Post");
        assert_eq!(created.title.get("sw"), Some("Fees"));
        assert_eq!(created.body.get("sw"), Some("Fees"));
        assert_eq!(created.body.get("en"), Some("Fees body"));
    }

    #[tokio::test]
    async fn create_rejects_unknown_jurisdiction() {
        let fx = fixture();
        let mut candidate = input("Fees");
        let missing = Uuid::new_v4();
        candidate.jurisdiction = Some(JurisdictionInput::Id(missing));
        let err = fx.service.create(candidate).await.unwrap_err();
        assert!(matches!(err, ContentError::UnknownJurisdiction(id) if id == missing));
    }

    #[tokio::test]
    async fn reads_populate_jurisdiction() {
        let fx = fixture();
        let dsm = Jurisdiction::new("DSM", "Dar es Salaam");
        fx.jurisdictions.insert(dsm.clone()).await;

        let mut candidate = input("Fees");
        candidate.jurisdiction = Some(JurisdictionInput::Id(dsm.id));
        let created = fx.service.create(candidate).await.unwrap();
        assert_eq!(created.jurisdiction, Some(dsm.clone()));

        fx.jurisdictions.remove(dsm.id).await;
        let fetched = fx.service.get(created.id).await.unwrap();
        assert_eq!(fetched.jurisdiction, None);
    }

    #[tokio::test]
    async fn patch_merges_locales() {
        let fx = fixture();
        let created = fx.service.create(input("Fees")).await.unwrap();
        let patch = ContentPatch {
            title: Some(LocalizedText::new().with("sw", "Ada")),
            ..Default::default()
        };
        let patched = fx.service.patch(created.id, patch).await.unwrap();
        assert_eq!(patched.title.get("en"), Some("Fees"));
        assert_eq!(patched.title.get("sw"), Some("Ada"));
        assert!(patched.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn put_keeps_identity() {
        let fx = fixture();
        let created = fx.service.create(input("Fees")).await.unwrap();
        let mut replacement = input("Tariffs");
        replacement.content_type = Some("Tariff".to_string());
        let replaced = fx.service.put(created.id, replacement).await.unwrap();
        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.created_at, created.created_at);
        assert_eq!(replaced.content_type, "Tariff");
        assert_eq!(replaced.title.get("en"), Some("Tariffs"));
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let fx = fixture();
        let created = fx.service.create(input("Fees")).await.unwrap();
        let deleted = fx.service.delete(created.id).await.unwrap();
        assert!(deleted.deleted_at.is_some());
        assert!(matches!(fx.service.delete(created.id).await, Err(ContentError::NotFound)));
        assert!(matches!(fx.service.get(created.id).await, Err(ContentError::NotFound)));
    }

    #[tokio::test]
    async fn seed_is_idempotent() {
        let fx = fixture();
        let seeds = vec![input("Fees"), input("Tariffs")];

        let first = fx.service.seed(seeds.clone()).await.unwrap();
        assert!(first.iter().all(|o| matches!(o, SeedOutcome::Created(_))));

        let second = fx.service.seed(seeds).await.unwrap();
        assert!(second.iter().all(|o| matches!(o, SeedOutcome::Updated(_))));
        assert_eq!(first[0].content().id, second[0].content().id);

        let page = fx.service.list(&ListQuery::default()).await.unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn list_reports_last_modified() {
        let fx = fixture();
        fx.service.create(input("Fees")).await.unwrap();
        let newest = fx.service.create(input("Tariffs")).await.unwrap();
        let page = fx.service.list(&ListQuery::default()).await.unwrap();
        assert_eq!(page.last_modified, Some(newest.updated_at));
        assert_eq!(page.data[0].id, newest.id);
    }

    #[tokio::test]
    async fn delete_advances_list_validator() {
        let fx = fixture();
        fx.service.create(input("Fees")).await.unwrap();
        let newest = fx.service.create(input("Tariffs")).await.unwrap();
        let before = fx.service.list(&ListQuery::default()).await.unwrap();

        let deleted = fx.service.delete(newest.id).await.unwrap();
        let after = fx.service.list(&ListQuery::default()).await.unwrap();
        assert_eq!(after.total, 1);
        assert!(after.last_modified <= before.last_modified);
        assert_eq!(after.changed_at, deleted.deleted_at);
        assert!(after.changed_at >= before.changed_at);
    }

    #[tokio::test]
    async fn seed_merges_into_scoped_match() {
        let fx = fixture();
        let dsm = Jurisdiction::new("DSM", "Dar es Salaam");
        fx.jurisdictions.insert(dsm.clone()).await;

        let published = Utc::now();
        let mut scoped = input("Fees");
        scoped.content_type = Some("FAQ".to_string());
        scoped.jurisdiction = Some(JurisdictionInput::Id(dsm.id));
        scoped.published_at = Some(published);
        let created = fx.service.create(scoped).await.unwrap();

        let mut unscoped = ContentInput {
            content_type: Some("FAQ".to_string()),
            title: LocalizedText::new().with("en", "Fees"),
            ..Default::default()
        };
        unscoped.body = LocalizedText::new().with("en", "Paid monthly");
        let outcomes = fx.service.seed(vec![unscoped]).await.unwrap();

        let SeedOutcome::Updated(updated) = &outcomes[0] else {
            panic!("expected an update, got {:?}", outcomes[0]);
        };
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.jurisdiction, Some(dsm));
        assert_eq!(updated.published_at, Some(published));
        assert_eq!(updated.body.get("en"), Some("Paid monthly"));
        assert_eq!(updated.title.get("sw"), Some("Fees"));
    }
}
