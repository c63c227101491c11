use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::jurisdiction::Jurisdiction;
use crate::locale::LocalizedText;

/// Stored content record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: Uuid,
    pub jurisdiction: Option<Uuid>,
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: LocalizedText,
    pub body: LocalizedText,
    pub published_at: Option<DateTime<Utc>>,
    pub extras: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A jurisdiction reference as clients send it: a bare id, or a populated
/// object read back from this API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JurisdictionInput {
    Id(Uuid),
    Object {
        #[serde(alias = "_id")]
        id: Uuid,
    },
}

impl JurisdictionInput {
    pub fn id(&self) -> Uuid {
        match self {
            JurisdictionInput::Id(id) | JurisdictionInput::Object { id } => *id,
        }
    }
}

/// Body of create and full-update requests, and the shape of seed entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInput {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<JurisdictionInput>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub body: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
}

/// Body of partial-update requests. An explicit `null` clears nullable fields;
/// an absent key leaves them alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub jurisdiction: Option<Option<JurisdictionInput>>,
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub title: Option<LocalizedText>,
    #[serde(default)]
    pub body: Option<LocalizedText>,
    #[serde(default, deserialize_with = "double_option")]
    pub published_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub extras: Option<Option<Value>>,
}

impl From<ContentInput> for ContentPatch {
    /// Only the keys the input carries; empty localized maps count as absent.
    fn from(input: ContentInput) -> Self {
        Self {
            jurisdiction: input.jurisdiction.map(Some),
            content_type: input.content_type.filter(|t| !t.trim().is_empty()),
            title: Some(input.title).filter(|t| !t.is_empty()),
            body: Some(input.body).filter(|b| !b.is_empty()),
            published_at: input.published_at.map(Some),
            extras: input.extras.map(Some),
        }
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Content as returned by the API, with the jurisdiction reference replaced
/// by its projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentView {
    pub id: Uuid,
    pub jurisdiction: Option<Jurisdiction>,
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: LocalizedText,
    pub body: LocalizedText,
    pub published_at: Option<DateTime<Utc>>,
    pub extras: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Content {
    /// Build a fresh record from client input. Type falls back to `default_type`.
    pub fn from_input(input: ContentInput, default_type: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: input.id.unwrap_or_else(Uuid::new_v4),
            jurisdiction: input.jurisdiction.as_ref().map(JurisdictionInput::id),
            content_type: type_or_default(input.content_type, default_type),
            title: input.title,
            body: input.body,
            published_at: input.published_at,
            extras: input.extras,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Replace every mutable field, keeping identity and creation time.
    pub fn replace_with(&mut self, input: ContentInput, default_type: &str) {
        self.jurisdiction = input.jurisdiction.as_ref().map(JurisdictionInput::id);
        self.content_type = type_or_default(input.content_type, default_type);
        self.title = input.title;
        self.body = input.body;
        self.published_at = input.published_at;
        self.extras = input.extras;
    }

    /// Apply a partial update. Localized maps are merged locale by locale.
    pub fn apply_patch(&mut self, patch: ContentPatch) {
        if let Some(jurisdiction) = patch.jurisdiction {
            self.jurisdiction = jurisdiction.as_ref().map(JurisdictionInput::id);
        }
        if let Some(content_type) = patch.content_type {
            self.content_type = content_type.trim().to_string();
        }
        if let Some(title) = patch.title {
            self.title = self.title.merged_with(&title);
        }
        if let Some(body) = patch.body {
            self.body = self.body.merged_with(&body);
        }
        if let Some(published_at) = patch.published_at {
            self.published_at = published_at;
        }
        if let Some(extras) = patch.extras {
            self.extras = extras;
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Attach the jurisdiction projection found for this record, if any.
    pub fn into_view(self, jurisdiction: Option<Jurisdiction>) -> ContentView {
        ContentView {
            id: self.id,
            jurisdiction,
            content_type: self.content_type,
            title: self.title,
            body: self.body,
            published_at: self.published_at,
            extras: self.extras,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

fn type_or_default(content_type: Option<String>, default_type: &str) -> String {
    content_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| default_type.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn input_accepts_populated_jurisdiction_object() {
        let id = Uuid::new_v4();
        let input: ContentInput = serde_json::from_value(json!({
            "jurisdiction": { "_id": id, "code": "DSM", "name": "Dar es Salaam" },
            "type": "FAQ",
            "title": { "en": "How do I pay?" },
        }))
        .unwrap();
        assert_eq!(input.jurisdiction.map(|j| j.id()), Some(id));
        assert_eq!(input.content_type.as_deref(), Some("FAQ"));
    }

    #[test]
    fn input_ignores_system_timestamps() {
        let input: ContentInput = serde_json::from_value(json!({
            "title": { "en": "Tariffs" },
            "createdAt": "2020-01-01T00:00:00Z",
            "deletedAt": "2020-01-02T00:00:00Z",
        }))
        .unwrap();
        let content = Content::from_input(input, "Post", Utc::now());
        assert_eq!(content.content_type, "Post");
        assert!(!content.is_deleted());
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let patch: ContentPatch = serde_json::from_value(json!({ "publishedAt": null })).unwrap();
        assert_eq!(patch.published_at, Some(None));
        assert_eq!(patch.extras, None);
    }

    #[test]
    fn patch_merges_localized_text() {
        let now = Utc::now();
        let mut content = Content::from_input(
            ContentInput {
                title: LocalizedText::new().with("en", "Fees"),
                ..Default::default()
            },
            "Post",
            now,
        );
        content.apply_patch(ContentPatch {
            title: Some(LocalizedText::new().with("sw", "Ada")),
            ..Default::default()
        });
        assert_eq!(content.title.get("en"), Some("Fees"));
        assert_eq!(content.title.get("sw"), Some("Ada"));
    }

    #[test]
    fn patch_from_input_skips_absent_keys() {
        let patch = ContentPatch::from(ContentInput {
            content_type: Some("FAQ".into()),
            title: LocalizedText::new().with("en", "Fees"),
            ..Default::default()
        });
        assert_eq!(patch.content_type.as_deref(), Some("FAQ"));
        assert!(patch.title.is_some());
        assert_eq!(patch.body, None);
        assert_eq!(patch.jurisdiction, None);
        assert_eq!(patch.published_at, None);
        assert_eq!(patch.extras, None);
    }

    #[test]
    fn replace_keeps_identity() {
        let now = Utc::now();
        let mut content = Content::from_input(
            ContentInput {
                content_type: Some("FAQ".into()),
                title: LocalizedText::new().with("en", "Fees"),
                ..Default::default()
            },
            "Post",
            now,
        );
        let id = content.id;
        content.replace_with(
            ContentInput {
                title: LocalizedText::new().with("en", "Charges"),
                ..Default::default()
            },
            "Post",
        );
        assert_eq!(content.id, id);
        assert_eq!(content.created_at, now);
        assert_eq!(content.content_type, "Post");
        assert_eq!(content.title.get("en"), Some("Charges"));
    }
}
