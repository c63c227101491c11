use chrono::{DateTime, SecondsFormat, Utc};

use crate::database::models::ContentView;
use crate::locale::localized_keys_for;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// CSV rendering of content records. One header line, then one line per record,
/// each terminated by CRLF.
pub struct ExportService {
    locales: Vec<String>,
}

impl ExportService {
    pub fn new(locales: Vec<String>) -> Self {
        Self { locales }
    }

    pub fn file_name(now: DateTime<Utc>) -> String {
        format!("contents_exports_{}.csv", now.timestamp_millis())
    }

    pub fn header(&self) -> String {
        let mut columns = vec!["id".to_string(), "jurisdiction".to_string(), "type".to_string()];
        columns.extend(localized_keys_for("title", &self.locales));
        columns.extend(localized_keys_for("body", &self.locales));
        columns.extend(["publishedAt", "createdAt", "updatedAt"].map(String::from));
        line(columns.iter().map(String::as_str))
    }

    pub fn row(&self, content: &ContentView) -> String {
        let mut fields = vec![
            content.id.to_string(),
            content
                .jurisdiction
                .as_ref()
                .map(|j| j.name.clone())
                .unwrap_or_default(),
            content.content_type.clone(),
        ];
        for text in [&content.title, &content.body] {
            fields.extend(
                self.locales
                    .iter()
                    .map(|l| text.get(l).unwrap_or_default().to_string()),
            );
        }
        fields.push(content.published_at.map(timestamp).unwrap_or_default());
        fields.push(timestamp(content.created_at));
        fields.push(timestamp(content.updated_at));
        line(fields.iter().map(String::as_str))
    }

    pub fn to_csv(&self, contents: &[ContentView]) -> String {
        let mut out = self.header();
        for content in contents {
            out.push_str(&self.row(content));
        }
        out
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut out = fields.map(escape).collect::<Vec<_>>().join(",");
    out.push_str("\r\n");
    out
}

/// Quote a field when it holds a delimiter, quote or line break (RFC 4180).
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
