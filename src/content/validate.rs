use super::error::ContentError;
use crate::config::ContentConfig;
use crate::database::models::Content;

/// Field-level checks run after normalization and before the record is stored.
///
/// The jurisdiction existence check needs the directory and lives in the
/// service; everything decidable from the record alone is here.
pub fn validate(content: &Content, config: &ContentConfig) -> Result<(), ContentError> {
    if content.content_type.trim().is_empty() {
        return Err(ContentError::MissingRequiredField("type".to_string()));
    }
    if !config.types.iter().any(|t| t == &content.content_type) {
        return Err(ContentError::InvalidType {
            value: content.content_type.clone(),
            allowed: config.types.clone(),
        });
    }

    let default_locale = &config.default_locale;
    if !content.title.contains(default_locale) {
        return Err(ContentError::MissingRequiredField(format!("title.{}", default_locale)));
    }
    if !content.body.contains(default_locale) {
        return Err(ContentError::MissingRequiredField(format!("body.{}", default_locale)));
    }
    Ok(())
}
