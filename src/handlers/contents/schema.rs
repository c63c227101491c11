use axum::extract::State;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::JsonSchema;

/// GET /contents/schema - JSON schema for the configured locales and types
pub async fn get(State(state): State<AppState>) -> ApiResult<JsonSchema> {
    Ok(ApiResponse::success(state.contents.schema()))
}
