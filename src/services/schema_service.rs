use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::config::ContentConfig;
use crate::database::models::Jurisdiction;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaProperty {
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, JsonSchemaProperty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(rename = "x-majifix-reference", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    pub title: String,
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: String,
    pub properties: BTreeMap<String, JsonSchemaProperty>,
    pub required: Vec<String>,
}

impl JsonSchemaProperty {
    fn typed(property_type: &str, description: &str) -> Self {
        Self {
            property_type: property_type.to_string(),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    fn formatted(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }
}

pub struct SchemaService;

impl SchemaService {
    /// JSON schema of a content record for the configured locales and types.
    pub fn content_schema(config: &ContentConfig) -> JsonSchema {
        let mut properties = BTreeMap::new();

        properties.insert(
            "id".to_string(),
            JsonSchemaProperty::typed("string", "Unique identifier of the content").formatted("uuid"),
        );

        let mut jurisdiction =
            JsonSchemaProperty::typed("string", "Jurisdiction the content belongs to").formatted("uuid");
        jurisdiction.reference = Some(Jurisdiction::MODEL_NAME.to_string());
        properties.insert("jurisdiction".to_string(), jurisdiction);

        let mut content_type = JsonSchemaProperty::typed("string", "Human readable type of the content");
        content_type.enum_values = Some(config.types.clone());
        content_type.default = Some(json!(config.default_type));
        properties.insert("type".to_string(), content_type);

        properties.insert(
            "title".to_string(),
            Self::localized(config, "Human readable title of the content"),
        );
        properties.insert(
            "body".to_string(),
            Self::localized(config, "Human readable body of the content"),
        );

        properties.insert(
            "publishedAt".to_string(),
            JsonSchemaProperty::typed("string", "Date when the content was published").formatted("date-time"),
        );
        properties.insert(
            "extras".to_string(),
            JsonSchemaProperty::typed("object", "Additional free form details of the content"),
        );
        for (name, description) in [
            ("createdAt", "Date when the content was created"),
            ("updatedAt", "Date when the content was last updated"),
        ] {
            properties.insert(
                name.to_string(),
                JsonSchemaProperty::typed("string", description).formatted("date-time"),
            );
        }

        JsonSchema {
            title: "Content".to_string(),
            schema_type: "object".to_string(),
            description: "Frequently asked questions, tariffs, posts and other published content".to_string(),
            properties,
            required: vec!["type".to_string(), "title".to_string(), "body".to_string()],
        }
    }

    fn localized(config: &ContentConfig, description: &str) -> JsonSchemaProperty {
        let locales = config
            .locales
            .iter()
            .map(|locale| {
                (
                    locale.clone(),
                    JsonSchemaProperty::typed("string", &format!("{} ({})", description, locale)),
                )
            })
            .collect();

        JsonSchemaProperty {
            properties: Some(locales),
            required: Some(vec![config.default_locale.clone()]),
            ..JsonSchemaProperty::typed("object", description)
        }
    }
}
