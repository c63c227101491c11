use uuid::Uuid;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::types::{FilterData, ListQuery};
use crate::database::models::Content;

/// Limits applied while turning a [`ListQuery`] into [`FilterData`].
#[derive(Debug, Clone, Copy)]
pub struct FilterLimits {
    pub default_limit: u32,
    pub max_limit: u32,
}

pub struct Filter;

impl Filter {
    /// Paginated filter for list endpoints.
    pub fn paginated(query: &ListQuery, limits: FilterLimits) -> Result<FilterData, FilterError> {
        let mut data = Self::unpaginated(query)?;

        let limit = match query.limit {
            Some(l) if l <= 0 => {
                return Err(FilterError::InvalidLimit("Limit must be positive".to_string()))
            }
            Some(l) => l as u64,
            None => limits.default_limit as u64,
        };
        let limit = if limit > limits.max_limit as u64 {
            tracing::debug!("Limit {} exceeds max {}, capping to max", limit, limits.max_limit);
            limits.max_limit
        } else {
            limit as u32
        };

        let skip = match (query.skip, query.page) {
            (Some(s), _) if s < 0 => {
                return Err(FilterError::InvalidSkip("Skip must be non-negative".to_string()))
            }
            (Some(s), _) => s as u64,
            (None, Some(p)) if p < 1 => {
                return Err(FilterError::InvalidPage("Page starts at 1".to_string()))
            }
            (None, Some(p)) => (p as u64 - 1)
                .checked_mul(limit as u64)
                .ok_or_else(|| FilterError::InvalidPage(format!("{} is too large", p)))?,
            (None, None) => 0,
        };

        data.limit = Some(limit);
        data.skip = u32::try_from(skip)
            .map_err(|_| FilterError::InvalidSkip(format!("{} is too large", skip)))?;
        Ok(data)
    }

    /// Filter without pagination, used by export.
    pub fn unpaginated(query: &ListQuery) -> Result<FilterData, FilterError> {
        let jurisdiction = query
            .jurisdiction
            .as_deref()
            .map(|j| Uuid::parse_str(j.trim()).map_err(|_| FilterError::InvalidJurisdiction(j.to_string())))
            .transpose()?;

        let order = match query.sort.as_deref() {
            Some(sort) => FilterOrder::parse(sort)?,
            None => FilterOrder::default_order(),
        };

        Ok(FilterData {
            q: non_blank(query.q.as_deref()).map(|q| q.to_lowercase()),
            content_type: non_blank(query.content_type.as_deref()).map(str::to_string),
            jurisdiction,
            published: query.published,
            order,
            limit: None,
            skip: 0,
        })
    }

    /// In-memory evaluation of the filter predicates (pagination excluded).
    pub fn matches(data: &FilterData, content: &Content) -> bool {
        if content.is_deleted() {
            return false;
        }
        if let Some(t) = &data.content_type {
            if &content.content_type != t {
                return false;
            }
        }
        if let Some(j) = data.jurisdiction {
            if content.jurisdiction != Some(j) {
                return false;
            }
        }
        if let Some(published) = data.published {
            if content.published_at.is_some() != published {
                return false;
            }
        }
        if let Some(q) = &data.q {
            return content.content_type.to_lowercase().contains(q.as_str())
                || content.title.matches(q)
                || content.body.matches(q);
        }
        true
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
