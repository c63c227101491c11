use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::database::models::{ContentInput, Jurisdiction};

const SEED_FILES: &[&str] = &["contents.json", "contents.yaml", "contents.yml"];
const JURISDICTION_FILES: &[&str] = &["jurisdictions.json", "jurisdictions.yaml", "jurisdictions.yml"];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("No contents.json, contents.yaml or contents.yml found in {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON seed file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML seed file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Reads seed candidates from disk.
pub struct SeedLoader;

impl SeedLoader {
    /// First seed file present in `dir`, in JSON then YAML order.
    pub fn locate(dir: impl AsRef<Path>) -> Result<PathBuf, SeedError> {
        let dir = dir.as_ref();
        first_file(dir, SEED_FILES).ok_or_else(|| SeedError::NotFound(dir.to_path_buf()))
    }

    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<ContentInput>, SeedError> {
        let path = Self::locate(dir)?;
        Self::load_file(&path)
    }

    /// Parse a seed file. Accepts a list of candidates or a single candidate.
    pub fn load_file(path: &Path) -> Result<Vec<ContentInput>, SeedError> {
        load_list(path)
    }

    /// Jurisdictions for the in-memory directory, from `jurisdictions.{json,yaml,yml}`.
    /// A directory without such a file yields none.
    pub fn load_jurisdictions(dir: impl AsRef<Path>) -> Result<Vec<Jurisdiction>, SeedError> {
        match first_file(dir.as_ref(), JURISDICTION_FILES) {
            Some(path) => load_list(&path),
            None => Ok(vec![]),
        }
    }
}

fn first_file(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}

fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let value: serde_json::Value = serde_json::from_str(&raw).map_err(|source| SeedError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let candidates = match value {
            serde_json::Value::Array(_) => serde_json::from_value(value),
            other => serde_json::from_value(other).map(|one| vec![one]),
        };
        candidates.map_err(|source| SeedError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        let value: serde_yaml::Value = serde_yaml::from_str(&raw).map_err(|source| SeedError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        let candidates = match value {
            serde_yaml::Value::Sequence(_) => serde_yaml::from_value(value),
            other => serde_yaml::from_value(other).map(|one| vec![one]),
        };
        candidates.map_err(|source| SeedError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}
