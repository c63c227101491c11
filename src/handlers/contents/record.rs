use axum::extract::{rejection::JsonRejection, Json, Path, State};

use crate::app::AppState;
use crate::database::models::{ContentInput, ContentPatch, ContentView};
use crate::handlers::utils::{json_body, parse_id};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /contents/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ContentView> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.contents.get(id).await?))
}

/// PATCH /contents/:id - Partial update, localized fields merged per locale
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ContentPatch>, JsonRejection>,
) -> ApiResult<ContentView> {
    let id = parse_id("id", &id)?;
    let patch = json_body(body)?;
    Ok(ApiResponse::success(state.contents.patch(id, patch).await?))
}

/// PUT /contents/:id - Replace every mutable field
pub async fn put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ContentInput>, JsonRejection>,
) -> ApiResult<ContentView> {
    let id = parse_id("id", &id)?;
    let input = json_body(body)?;
    Ok(ApiResponse::success(state.contents.put(id, input).await?))
}

/// DELETE /contents/:id - Soft delete, returns the deleted record
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ContentView> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.contents.delete(id).await?))
}
