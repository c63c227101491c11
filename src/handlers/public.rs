use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - Service info
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let content = &state.config.content;
    let prefix = state.config.api.prefix().unwrap_or_default();

    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "version": env!("CARGO_PKG_VERSION"),
        "apiVersion": state.config.api.version,
        "prefix": prefix,
        "locales": content.locales,
        "defaultLocale": content.default_locale,
        "types": content.types,
        "defaultType": content.default_type,
        "endpoints": {
            "contents": format!("{}/contents[/:id]", prefix),
            "schema": format!("{}/contents/schema", prefix),
            "export": format!("{}/contents/export", prefix),
            "jurisdiction": format!("{}/jurisdictions/:jurisdiction/contents", prefix),
        }
    }))
}

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.contents.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": true,
                    "status": 503,
                    "code": "SERVICE_UNAVAILABLE",
                    "message": "database unavailable",
                    "timestamp": now,
                })),
            )
        }
    }
}
