use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use futures::stream;
use std::convert::Infallible;

use crate::app::AppState;
use crate::error::ApiError;
use crate::filter::ListQuery;
use crate::handlers::utils::query_params;
use crate::services::{ExportService, CSV_CONTENT_TYPE};

/// GET /contents/export - CSV download of every matching record
pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = query_params(query)?;
    let rows = state.contents.export_rows(&query).await?;
    let exporter = state.contents.exporter();

    let lines = std::iter::once(exporter.header())
        .chain(rows.iter().map(|row| exporter.row(row)))
        .map(Ok::<_, Infallible>)
        .collect::<Vec<_>>();

    let disposition = format!("attachment; filename=\"{}\"", ExportService::file_name(Utc::now()));
    tracing::info!("Exporting {} contents", rows.len());

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(stream::iter(lines)),
    )
        .into_response())
}
