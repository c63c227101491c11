use sqlx::{Postgres, QueryBuilder};

use crate::content::SeedCriteria;
use crate::filter::{FilterData, FilterOrder};

pub const CONTENT_COLUMNS: &str =
    "id, jurisdiction, type, title, body, published_at, extras, created_at, updated_at, deleted_at";

/// Builds the SQL for content reads from a [`FilterData`] or [`SeedCriteria`].
pub struct ContentQuery;

impl ContentQuery {
    pub fn select(filter: &FilterData) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM contents", CONTENT_COLUMNS));
        Self::push_where(&mut qb, filter);
        qb.push(" ");
        qb.push(FilterOrder::generate(&filter.order));
        if let Some(limit) = filter.limit {
            qb.push(" LIMIT ").push_bind(limit as i64);
        }
        if filter.skip > 0 {
            qb.push(" OFFSET ").push_bind(filter.skip as i64);
        }
        qb
    }

    pub fn count(filter: &FilterData) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM contents");
        Self::push_where(&mut qb, filter);
        qb
    }

    pub fn by_criteria(criteria: &SeedCriteria, locales: &[String]) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {} FROM contents WHERE deleted_at IS NULL",
            CONTENT_COLUMNS
        ));
        match criteria {
            SeedCriteria::Id(id) => {
                qb.push(" AND id = ").push_bind(*id);
            }
            SeedCriteria::Natural {
                jurisdiction,
                content_type,
                title,
            } => {
                if let Some(j) = jurisdiction {
                    qb.push(" AND jurisdiction = ").push_bind(*j);
                }
                if let Some(t) = content_type {
                    qb.push(" AND type = ").push_bind(t.clone());
                }
                for locale in locales {
                    qb.push(" AND title->>").push_bind(locale.clone());
                    match title.get(locale) {
                        Some(value) => {
                            qb.push(" = ").push_bind(value.to_string());
                        }
                        None => {
                            qb.push(" IS NULL");
                        }
                    }
                }
            }
        }
        qb.push(" ORDER BY created_at ASC, id ASC LIMIT 1");
        qb
    }

    fn push_where(qb: &mut QueryBuilder<'static, Postgres>, filter: &FilterData) {
        qb.push(" WHERE deleted_at IS NULL");
        if let Some(t) = &filter.content_type {
            qb.push(" AND type = ").push_bind(t.clone());
        }
        if let Some(j) = filter.jurisdiction {
            qb.push(" AND jurisdiction = ").push_bind(j);
        }
        match filter.published {
            Some(true) => {
                qb.push(" AND published_at IS NOT NULL");
            }
            Some(false) => {
                qb.push(" AND published_at IS NULL");
            }
            None => {}
        }
        if let Some(q) = &filter.q {
            let pattern = format!("%{}%", escape_like(q));
            qb.push(" AND (type ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR EXISTS (SELECT 1 FROM jsonb_each_text(title) t WHERE t.value ILIKE ")
                .push_bind(pattern.clone())
                .push(") OR EXISTS (SELECT 1 FROM jsonb_each_text(body) b WHERE b.value ILIKE ")
                .push_bind(pattern)
                .push("))");
        }
    }
}

/// Escape LIKE wildcards so search text is matched literally.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedText;
    use uuid::Uuid;

    #[test]
    fn select_applies_filters_and_paging() {
        let filter = FilterData {
            q: Some("fee".into()),
            content_type: Some("FAQ".into()),
            published: Some(true),
            order: FilterOrder::default_order(),
            limit: Some(20),
            skip: 40,
            ..Default::default()
        };
        let sql = ContentQuery::select(&filter).into_sql();
        assert!(sql.contains("WHERE deleted_at IS NULL AND type = $1"));
        assert!(sql.contains("published_at IS NOT NULL"));
        assert!(sql.contains("jsonb_each_text(title)"));
        assert!(sql.contains("ORDER BY \"updated_at\" DESC NULLS LAST, \"id\" ASC LIMIT $5 OFFSET $6"));
    }

    #[test]
    fn count_has_no_paging() {
        let filter = FilterData { limit: Some(10), skip: 10, ..Default::default() };
        let sql = ContentQuery::count(&filter).into_sql();
        assert_eq!(sql, "SELECT COUNT(*) FROM contents WHERE deleted_at IS NULL");
    }

    #[test]
    fn criteria_binds_every_locale() {
        let criteria = SeedCriteria::Natural {
            jurisdiction: Some(Uuid::new_v4()),
            content_type: None,
            title: LocalizedText::new().with("en", "Fees"),
        };
        let locales = vec!["en".to_string(), "sw".to_string()];
        let sql = ContentQuery::by_criteria(&criteria, &locales).into_sql();
        assert!(sql.contains("jurisdiction = $1"));
        assert!(sql.contains("title->>$2 = $3"));
        assert!(sql.contains("title->>$4 IS NULL"));
        assert!(sql.ends_with("ORDER BY created_at ASC, id ASC LIMIT 1"));
    }

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }
}
