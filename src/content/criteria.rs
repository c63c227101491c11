use serde_json::{Map, Value};
use uuid::Uuid;

use crate::database::models::{Content, ContentInput, JurisdictionInput};
use crate::locale::{localized_keys_for, localized_values_for, LocalizedText};

/// Lookup used to decide whether a seed candidate already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedCriteria {
    Id(Uuid),
    /// Mirrors the uniqueness constraint. Absent fields are unconstrained.
    Natural {
        jurisdiction: Option<Uuid>,
        content_type: Option<String>,
        title: LocalizedText,
    },
}

/// Derive the seed criteria for a (possibly partial) candidate.
pub fn derive_seed_criteria(candidate: &ContentInput, locales: &[String]) -> SeedCriteria {
    if let Some(id) = candidate.id {
        return SeedCriteria::Id(id);
    }
    SeedCriteria::Natural {
        jurisdiction: candidate.jurisdiction.as_ref().map(JurisdictionInput::id),
        content_type: candidate
            .content_type
            .as_ref()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
        title: localized_values_for(&candidate.title, locales),
    }
}

impl SeedCriteria {
    pub fn matches(&self, content: &Content, locales: &[String]) -> bool {
        match self {
            SeedCriteria::Id(id) => content.id == *id,
            SeedCriteria::Natural {
                jurisdiction,
                content_type,
                title,
            } => {
                jurisdiction.map_or(true, |j| content.jurisdiction == Some(j))
                    && content_type.as_ref().map_or(true, |t| &content.content_type == t)
                    && locales.iter().all(|l| content.title.get(l) == title.get(l))
            }
        }
    }

    /// Flat JSON form: `{ "id" }` or `{ "jurisdiction", "type", "title.<locale>"... }`.
    pub fn to_json(&self, locales: &[String]) -> Value {
        let mut map = Map::new();
        match self {
            SeedCriteria::Id(id) => {
                map.insert("id".to_string(), Value::String(id.to_string()));
            }
            SeedCriteria::Natural {
                jurisdiction,
                content_type,
                title,
            } => {
                if let Some(j) = jurisdiction {
                    map.insert("jurisdiction".to_string(), Value::String(j.to_string()));
                }
                if let Some(t) = content_type {
                    map.insert("type".to_string(), Value::String(t.clone()));
                }
                for (key, locale) in localized_keys_for("title", locales).into_iter().zip(locales) {
                    let value = title.get(locale).map(|v| Value::String(v.to_string()));
                    map.insert(key, value.unwrap_or(Value::Null));
                }
            }
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn locales() -> Vec<String> {
        vec!["en".to_string(), "sw".to_string()]
    }

    #[test]
    fn id_wins_over_everything_else() {
        let id = Uuid::new_v4();
        let candidate = ContentInput {
            id: Some(id),
            content_type: Some("FAQ".into()),
            title: LocalizedText::new().with("en", "Fees"),
            ..Default::default()
        };
        let criteria = derive_seed_criteria(&candidate, &locales());
        assert_eq!(criteria, SeedCriteria::Id(id));
        assert_eq!(criteria.to_json(&locales()), json!({ "id": id.to_string() }));
    }

    #[test]
    fn natural_key_expands_title_locales() {
        let jurisdiction = Uuid::new_v4();
        let candidate = ContentInput {
            jurisdiction: Some(JurisdictionInput::Id(jurisdiction)),
            content_type: Some("FAQ".into()),
            title: LocalizedText::new().with("en", "Fees"),
            body: LocalizedText::new().with("en", "Ignored by criteria"),
            ..Default::default()
        };
        let criteria = derive_seed_criteria(&candidate, &locales());
        assert_eq!(
            criteria.to_json(&locales()),
            json!({
                "jurisdiction": jurisdiction.to_string(),
                "type": "FAQ",
                "title.en": "Fees",
                "title.sw": "Fees",
            })
        );
    }

    #[test]
    fn absent_fields_are_left_out() {
        let candidate = ContentInput {
            title: LocalizedText::new().with("en", "Fees").with("sw", "Ada"),
            ..Default::default()
        };
        let criteria = derive_seed_criteria(&candidate, &locales());
        assert_eq!(
            criteria.to_json(&locales()),
            json!({ "title.en": "Fees", "title.sw": "Ada" })
        );
    }

    #[test]
    fn matches_on_every_title_locale() {
        let stored = Content::from_input(
            ContentInput {
                content_type: Some("FAQ".into()),
                title: LocalizedText::new().with("en", "Fees").with("sw", "Ada"),
                ..Default::default()
            },
            "Post",
            Utc::now(),
        );
        let same = derive_seed_criteria(
            &ContentInput {
                content_type: Some("FAQ".into()),
                title: LocalizedText::new().with("en", "Fees").with("sw", "Ada"),
                ..Default::default()
            },
            &locales(),
        );
        let other_locale = derive_seed_criteria(
            &ContentInput {
                content_type: Some("FAQ".into()),
                title: LocalizedText::new().with("en", "Fees"),
                ..Default::default()
            },
            &locales(),
        );
        assert!(same.matches(&stored, &locales()));
        assert!(!other_locale.matches(&stored, &locales()));
    }
}
