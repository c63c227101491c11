use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query};
use uuid::Uuid;

use crate::content::ContentError;
use crate::error::ApiError;

/// Parse a path id, answering 400 on anything that is not a UUID.
pub fn parse_id(field: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        ApiError::field_error(format!("Invalid {}", field), field, format!("Invalid UUID format: {}", raw))
    })
}

/// Unwrap a JSON body, reporting malformed input as a validation error.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ContentError::InvalidJson(rejection.body_text()).into())
}

pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ApiError::validation_error(rejection.body_text(), None))
}
