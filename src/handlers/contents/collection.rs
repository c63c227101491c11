use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Json, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::database::models::{ContentInput, ContentView};
use crate::error::ApiError;
use crate::filter::{ListQuery, Page};
use crate::handlers::utils::{json_body, parse_id, query_params};
use crate::middleware::{not_modified_since, ApiResponse, ApiResult};

/// GET /contents - Paginated, filterable list
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = query_params(query)?;
    let page = state.contents.list(&query).await?;
    Ok(conditional(&headers, page))
}

/// GET /jurisdictions/:jurisdiction/contents - List scoped to one jurisdiction
pub async fn list_for_jurisdiction(
    State(state): State<AppState>,
    Path(jurisdiction): Path<String>,
    headers: HeaderMap,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let jurisdiction = parse_id("jurisdiction", &jurisdiction)?;
    let query = query_params(query)?;
    let page = state.contents.list_for_jurisdiction(jurisdiction, &query).await?;
    Ok(conditional(&headers, page))
}

/// POST /contents - Create a record
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ContentInput>, JsonRejection>,
) -> ApiResult<ContentView> {
    let input = json_body(body)?;
    let created = state.contents.create(input).await?;
    Ok(ApiResponse::created(created))
}

/// Answer 304 when nothing in the collection changed since the client's copy.
fn conditional(headers: &HeaderMap, page: Page<ContentView>) -> Response {
    if not_modified_since(headers, page.changed_at) {
        return StatusCode::NOT_MODIFIED.into_response();
    }
    let changed_at = page.changed_at;
    ApiResponse::success(page)
        .last_modified(changed_at)
        .into_response()
}
