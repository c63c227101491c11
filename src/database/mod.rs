pub mod manager;
pub mod memory;
pub mod models;
pub mod query_builder;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryContentStore, MemoryJurisdictionDirectory};
pub use repository::{PgContentStore, PgJurisdictionDirectory};
pub use store::{ContentStore, JurisdictionDirectory};
