use anyhow::{Context, Result};
use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::database::{
    ContentStore, DatabaseManager, JurisdictionDirectory, MemoryContentStore, MemoryJurisdictionDirectory,
    PgContentStore, PgJurisdictionDirectory,
};
use crate::filter::FilterLimits;
use crate::handlers;
use crate::services::{ContentService, SeedLoader};

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub contents: Arc<ContentService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn ContentStore>,
        jurisdictions: Arc<dyn JurisdictionDirectory>,
    ) -> Self {
        let limits = FilterLimits {
            default_limit: config.api.default_limit,
            max_limit: config.api.max_limit,
        };
        let contents = ContentService::new(store, jurisdictions, config.content.clone(), limits);
        Self {
            config: Arc::new(config),
            contents: Arc::new(contents),
        }
    }

    /// Postgres when `DATABASE_URL` is set, the in-memory store otherwise.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let locales = config.content.locales.clone();

        let (store, jurisdictions) =
            if config.database.url.is_some() {
                let pool = DatabaseManager::connect(&config.database)
                    .await
                    .context("failed to connect to database")?;
                DatabaseManager::migrate(&pool, &locales)
                    .await
                    .context("failed to prepare database schema")?;
                (
                    Arc::new(PgContentStore::new(pool.clone(), locales)) as Arc<dyn ContentStore>,
                    Arc::new(PgJurisdictionDirectory::new(pool)) as Arc<dyn JurisdictionDirectory>,
                )
            } else {
                warn!("DATABASE_URL not set, contents are kept in memory and lost on restart");
                let directory = MemoryJurisdictionDirectory::new();
                let known = SeedLoader::load_jurisdictions(&config.seed.path)
                    .context("failed to load jurisdictions seed")?;
                if known.is_empty() {
                    warn!(
                        "No jurisdictions file under {}, every jurisdiction reference will be rejected",
                        config.seed.path
                    );
                }
                for jurisdiction in known {
                    directory.insert(jurisdiction).await;
                }
                (
                    Arc::new(MemoryContentStore::new(locales)) as Arc<dyn ContentStore>,
                    Arc::new(directory) as Arc<dyn JurisdictionDirectory>,
                )
            };

        Ok(Self::new(config, store, jurisdictions))
    }
}

pub fn app(state: AppState) -> Result<Router> {
    let prefix = state.config.api.prefix()?;
    info!("Serving contents under {}", prefix);

    let router = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        .nest(&prefix, content_routes())
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}

fn content_routes() -> Router<AppState> {
    use handlers::contents;

    Router::new()
        .route("/contents", get(contents::contents_get).post(contents::contents_post))
        // Static paths before the `:id` capture
        .route("/contents/schema", get(contents::schema_get))
        .route("/contents/schema/", get(contents::schema_get))
        .route("/contents/export", get(contents::export_get))
        .route(
            "/contents/:id",
            get(contents::record_get)
                .put(contents::record_put)
                .patch(contents::record_patch)
                .delete(contents::record_delete),
        )
        .route(
            "/jurisdictions/:jurisdiction/contents",
            get(contents::jurisdiction_contents_get),
        )
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }
    if config.security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    CorsLayer::permissive().allow_origin(origins)
}
