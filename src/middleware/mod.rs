pub mod response;

pub use response::{http_date, not_modified_since, ApiResponse, ApiResult};
