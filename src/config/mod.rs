use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub content: ContentConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Locale and content-type settings handed to the content service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub default_locale: String,
    /// Configured locales, default locale first.
    pub locales: Vec<String>,
    pub default_type: String,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres URL. When unset the service runs on the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub version: String,
    pub port: u16,
    pub default_limit: u32,
    pub max_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Directory holding contents.json / contents.yaml seed files, and the
    /// jurisdictions file read by the in-memory directory.
    pub path: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid locale code: {0}")]
    InvalidLocale(String),

    #[error("At least one content type must be configured")]
    NoContentTypes,

    #[error("Default content type '{0}' is not among the configured types")]
    DefaultTypeNotAllowed(String),

    #[error("Invalid API version: {0}")]
    InvalidVersion(String),
}

impl ContentConfig {
    pub fn new(
        default_locale: impl Into<String>,
        locales: &[&str],
        default_type: impl Into<String>,
        types: &[&str],
    ) -> Self {
        let default_locale = default_locale.into();
        let default_type = default_type.into();
        Self {
            locales: ordered_set(&default_locale, locales.iter().map(|s| s.to_string())),
            types: ordered_set(&default_type, types.iter().map(|s| s.to_string())),
            default_locale,
            default_type,
        }
    }

    /// Locale codes end up inside index expressions, so only `[a-zA-Z0-9_-]` is accepted.
    pub fn is_valid_locale(code: &str) -> bool {
        !code.is_empty()
            && code.len() <= 16
            && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for locale in &self.locales {
            if !Self::is_valid_locale(locale) {
                return Err(ConfigError::InvalidLocale(locale.clone()));
            }
        }
        if self.types.is_empty() {
            return Err(ConfigError::NoContentTypes);
        }
        if !self.types.contains(&self.default_type) {
            return Err(ConfigError::DefaultTypeNotAllowed(self.default_type.clone()));
        }
        Ok(())
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self::new("en", &["en"], "Post", &["Post"])
    }
}

impl ApiConfig {
    /// Route prefix derived from the major version, e.g. `1.0.0` -> `/v1`.
    pub fn prefix(&self) -> Result<String, ConfigError> {
        let major = self
            .version
            .trim_start_matches('v')
            .split('.')
            .next()
            .filter(|m| !m.is_empty() && m.chars().all(|c| c.is_ascii_digit()))
            .ok_or_else(|| ConfigError::InvalidVersion(self.version.clone()))?;
        Ok(format!("/v{}", major))
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.content.validate()?;
        self.api.prefix()?;
        Ok(())
    }

    fn with_env_overrides(mut self) -> Self {
        // Content overrides
        if let Ok(v) = env::var("DEFAULT_LOCALE") {
            self.content.default_locale = v.trim().to_string();
        }
        let locales = env::var("LOCALES").map(|v| split_list(&v)).unwrap_or_default();
        self.content.locales = ordered_set(&self.content.default_locale, locales);

        if let Ok(v) = env::var("DEFAULT_CONTENT_TYPE") {
            self.content.default_type = v.trim().to_string();
        }
        let types = env::var("CONTENT_TYPES").map(|v| split_list(&v)).unwrap_or_default();
        self.content.types = ordered_set(&self.content.default_type, types);

        // API overrides
        if let Ok(v) = env::var("API_VERSION") {
            self.api.version = v.trim().to_string();
        }
        if let Some(port) = env::var("CONTENT_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("API_DEFAULT_LIMIT") {
            self.api.default_limit = v.parse().unwrap_or(self.api.default_limit);
        }
        if let Ok(v) = env::var("API_MAX_LIMIT") {
            self.api.max_limit = v.parse().unwrap_or(self.api.max_limit);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = split_list(&v);
        }

        if let Ok(v) = env::var("SEEDS_PATH") {
            self.seed.path = v;
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            content: ContentConfig::default(),
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                version: "1.0.0".to_string(),
                port: 3000,
                default_limit: 10,
                max_limit: 1000,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![],
            },
            seed: SeedConfig {
                path: "seeds".to_string(),
            },
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.database.max_connections = 20;
        config.database.connection_timeout = 10;
        config.api.max_limit = 500;
        config
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.database.max_connections = 50;
        config.database.connection_timeout = 5;
        config.api.max_limit = 100;
        config.security.cors_origins = vec!["https://app.example.com".to_string()];
        config
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Deduplicated list with `first` at the head, preserving the order of `rest`.
fn ordered_set(first: &str, rest: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out = vec![first.to_string()];
    for item in rest {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.content.default_locale, "en");
        assert_eq!(config.content.locales, vec!["en"]);
        assert_eq!(config.content.types, vec!["Post"]);
        assert_eq!(config.api.default_limit, 10);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.api.max_limit, 100);
        assert_eq!(config.database.max_connections, 50);
    }

    #[test]
    fn default_locale_always_leads() {
        let content = ContentConfig::new("sw", &["en", "sw", "en"], "FAQ", &["Post", "FAQ"]);
        assert_eq!(content.locales, vec!["sw", "en"]);
        assert_eq!(content.types, vec!["FAQ", "Post"]);
    }

    #[test]
    fn rejects_locale_codes_unsafe_for_indexes() {
        let content = ContentConfig::new("en", &["en", "sw'); DROP"], "Post", &["Post"]);
        assert!(matches!(content.validate(), Err(ConfigError::InvalidLocale(_))));
        assert!(ContentConfig::is_valid_locale("pt-BR"));
    }

    #[test]
    fn derives_prefix_from_major_version() {
        let mut api = AppConfig::development().api;
        assert_eq!(api.prefix().unwrap(), "/v1");
        api.version = "v2.3.1".to_string();
        assert_eq!(api.prefix().unwrap(), "/v2");
        api.version = "latest".to_string();
        assert!(api.prefix().is_err());
    }
}
