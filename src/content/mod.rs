//! Content entity rules: locale normalization, validation and seed criteria.

pub mod criteria;
pub mod error;
pub mod normalize;
pub mod validate;

pub use criteria::{derive_seed_criteria, SeedCriteria};
pub use error::ContentError;
pub use normalize::normalize;
pub use validate::validate;
