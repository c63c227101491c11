use std::cmp::Ordering;

use super::error::FilterError;
use super::types::{FilterOrderInfo, SortDirection, SortField};
use crate::database::models::Content;

pub struct FilterOrder;

impl FilterOrder {
    /// Default ordering: most recently updated first.
    pub fn default_order() -> Vec<FilterOrderInfo> {
        vec![FilterOrderInfo {
            field: SortField::UpdatedAt,
            sort: SortDirection::Desc,
        }]
    }

    /// Parse `-updatedAt,type` style sort strings.
    pub fn parse(value: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let mut out = Vec::new();
        for part in value.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let (name, sort) = match trimmed.strip_prefix('-') {
                Some(rest) => (rest, SortDirection::Desc),
                None => (trimmed.trim_start_matches('+'), SortDirection::Asc),
            };
            let field = SortField::parse(name)
                .ok_or_else(|| FilterError::InvalidSortField(name.to_string()))?;
            out.push(FilterOrderInfo { field, sort });
        }
        if out.is_empty() {
            return Ok(Self::default_order());
        }
        Ok(out)
    }

    /// `ORDER BY` clause; `id` is always the final tie breaker so pages are stable.
    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        let mut parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" {} NULLS LAST", i.field.column(), i.sort.to_sql()))
            .collect();
        parts.push("\"id\" ASC".to_string());
        format!("ORDER BY {}", parts.join(", "))
    }

    /// In-memory equivalent of [`FilterOrder::generate`].
    pub fn compare(infos: &[FilterOrderInfo], a: &Content, b: &Content) -> Ordering {
        for info in infos {
            let ordering = match info.field {
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                SortField::Type => a.content_type.cmp(&b.content_type),
                SortField::PublishedAt => match (a.published_at, b.published_at) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    // nulls last in both directions
                    (Some(_), None) => return Ordering::Less,
                    (None, Some(_)) => return Ordering::Greater,
                    (None, None) => Ordering::Equal,
                },
            };
            let ordering = match info.sort {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.id.cmp(&b.id)
    }
}
