//! Localized text values and the per-locale helpers used by the content schema.
//!
//! A localized field is stored as a map from locale code to text. The helpers
//! here expand such a map across the configured locales and derive the flat
//! `field.locale` keys used for uniqueness and seed lookups.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Locale code -> text. Values are trimmed; blank values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used mostly by tests and seeds: `LocalizedText::new().with("en", "Hello")`.
    pub fn with(mut self, locale: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(locale, value);
        self
    }

    /// Set a locale value. Blank input removes the locale.
    pub fn set(&mut self, locale: impl Into<String>, value: impl Into<String>) {
        let locale = locale.into();
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.0.remove(&locale);
        } else {
            self.0.insert(locale, trimmed.to_string());
        }
    }

    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0
            .get(locale)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.get(locale).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keep only configured locales, trimming values and dropping blanks.
    pub fn restricted_to(&self, locales: &[String]) -> Self {
        let mut out = Self::new();
        for locale in locales {
            if let Some(value) = self.get(locale) {
                out.set(locale.clone(), value);
            }
        }
        out
    }

    /// Overlay `other` on top of `self`, locale by locale.
    pub fn merged_with(&self, other: &LocalizedText) -> Self {
        let mut out = self.clone();
        for (locale, value) in other.iter() {
            out.set(locale, value);
        }
        out
    }

    /// Case-insensitive substring match against any locale.
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.0
            .values()
            .any(|v| v.to_lowercase().contains(needle_lowercase))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.set(k, v);
        }
        out
    }
}

/// Expand `text` so every configured locale carries a value.
///
/// `locales[0]` is the default locale. A missing locale takes the default
/// locale's value, or failing that the first value present in configured
/// order. Locales outside `locales` are dropped. An input with no usable
/// value comes back empty.
pub fn localized_values_for(text: &LocalizedText, locales: &[String]) -> LocalizedText {
    let known = text.restricted_to(locales);
    let fallback = locales
        .first()
        .and_then(|default| known.get(default))
        .or_else(|| locales.iter().find_map(|l| known.get(l)))
        .map(str::to_string);

    let Some(fallback) = fallback else {
        return LocalizedText::new();
    };

    locales
        .iter()
        .map(|locale| {
            let value = known.get(locale).unwrap_or(fallback.as_str()).to_string();
            (locale.clone(), value)
        })
        .collect()
}

/// Flat per-locale keys for a localized field, e.g. `title` -> `title.en`, `title.sw`.
pub fn localized_keys_for(field: &str, locales: &[String]) -> Vec<String> {
    locales.iter().map(|l| format!("{}.{}", field, l)).collect()
}
