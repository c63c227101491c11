#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use majifix_content::app::{app, AppState};
use majifix_content::config::{AppConfig, ContentConfig};
use majifix_content::database::models::Jurisdiction;
use majifix_content::database::{MemoryContentStore, MemoryJurisdictionDirectory};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
    pub state: AppState,
    pub jurisdictions: Arc<MemoryJurisdictionDirectory>,
}

/// Two locales and three types, on the in-memory store.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.content = ContentConfig::new("en", &["en", "sw"], "Post", &["Post", "FAQ", "Tariff"]);
    config
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(test_config()).await
    }

    /// Start the real router in-process on a free port with a fresh store.
    pub async fn spawn_with(config: AppConfig) -> Result<Self> {
        let store = Arc::new(MemoryContentStore::new(config.content.locales.clone()));
        let jurisdictions = Arc::new(MemoryJurisdictionDirectory::new());
        let state = AppState::new(config, store, jurisdictions.clone());
        let router = app(state.clone())?;

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            state,
            jurisdictions,
        })
    }

    /// URL under the versioned content prefix.
    pub fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.base_url, path)
    }

    pub async fn jurisdiction(&self, code: &str, name: &str) -> Jurisdiction {
        let jurisdiction = Jurisdiction::new(code, name);
        self.jurisdictions.insert(jurisdiction.clone()).await;
        jurisdiction
    }

    /// POST a content body, failing the test unless it is created.
    pub async fn create(&self, body: Value) -> Result<Value> {
        let res = self.client.post(self.url("/contents")).json(&body).send().await?;
        let status = res.status();
        let payload = res.json::<Value>().await?;
        anyhow::ensure!(status == reqwest::StatusCode::CREATED, "create failed with {}: {}", status, payload);
        Ok(payload)
    }
}

pub fn content(title_en: &str) -> Value {
    json!({
        "type": "FAQ",
        "title": { "en": title_en },
        "body": { "en": format!("{} answer", title_en) },
    })
}
