use thiserror::Error;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::filter::FilterError;

/// Errors raised by the content service.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Invalid content type '{value}', expected one of: {}", .allowed.join(", "))]
    InvalidType { value: String, allowed: Vec<String> },

    #[error("Jurisdiction {0} does not exist")]
    UnknownJurisdiction(Uuid),

    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),

    #[error("Not Found")]
    NotFound,

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
