use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Invalid skip: {0}")]
    InvalidSkip(String),

    #[error("Invalid jurisdiction id: {0}")]
    InvalidJurisdiction(String),
}
