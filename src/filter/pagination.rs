use chrono::{DateTime, Utc};
use serde::Serialize;

/// One page of list results plus the paging arithmetic clients rely on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub size: usize,
    pub limit: u32,
    pub skip: u32,
    pub page: u32,
    pub pages: u32,
    pub last_modified: Option<DateTime<Utc>>,
    /// Latest write to the collection, deletes included. Drives `Last-Modified`.
    #[serde(skip)]
    pub changed_at: Option<DateTime<Utc>>,
}

impl<T> Page<T> {
    pub fn new(
        data: Vec<T>,
        total: u64,
        limit: u32,
        skip: u32,
        last_modified: Option<DateTime<Utc>>,
    ) -> Self {
        let limit_nz = limit.max(1) as u64;
        let pages = total.div_ceil(limit_nz);
        Self {
            size: data.len(),
            data,
            total,
            limit,
            skip,
            page: skip / limit.max(1) + 1,
            pages: u32::try_from(pages).unwrap_or(u32::MAX),
            last_modified,
            changed_at: last_modified,
        }
    }

    /// Widen the conditional-request validator to a collection-wide write time.
    pub fn changed_at(mut self, changed_at: Option<DateTime<Utc>>) -> Self {
        self.changed_at = self.changed_at.max(changed_at);
        self
    }
}
