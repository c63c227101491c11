use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Projection of an externally owned jurisdiction, embedded into content on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Jurisdiction {
    pub id: Uuid,
    pub code: String,
    pub name: String,
}

impl Jurisdiction {
    pub const MODEL_NAME: &'static str = "Jurisdiction";

    /// Columns read when populating a content record.
    pub const SELECT: &'static [&'static str] = &["id", "code", "name"];

    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            name: name.into(),
        }
    }
}
