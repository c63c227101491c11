use serde::Deserialize;
use uuid::Uuid;

/// Raw list/export query string as sent by clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
    /// Free-text search over type, title and body.
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub jurisdiction: Option<String>,
    pub published: Option<bool>,
    /// Comma separated fields, `-` prefix for descending. e.g. `-updatedAt,type`
    pub sort: Option<String>,
}

/// Validated filter handed to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterData {
    /// Lowercased search needle.
    pub q: Option<String>,
    pub content_type: Option<String>,
    pub jurisdiction: Option<Uuid>,
    pub published: Option<bool>,
    pub order: Vec<FilterOrderInfo>,
    /// `None` means unpaginated (export).
    pub limit: Option<u32>,
    pub skip: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Fields clients may sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    PublishedAt,
    Type,
}

impl SortField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "createdAt" => Some(SortField::CreatedAt),
            "updatedAt" => Some(SortField::UpdatedAt),
            "publishedAt" => Some(SortField::PublishedAt),
            "type" => Some(SortField::Type),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::PublishedAt => "published_at",
            SortField::Type => "type",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub field: SortField,
    pub sort: SortDirection,
}
