pub mod error;
pub mod filter;
pub mod filter_order;
pub mod pagination;
pub mod types;

pub use error::FilterError;
pub use filter::{Filter, FilterLimits};
pub use filter_order::FilterOrder;
pub use pagination::Page;
pub use types::*;
