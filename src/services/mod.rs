pub mod content_service;
pub mod export_service;
pub mod schema_service;
pub mod seed_service;

pub use content_service::{ContentService, SeedOutcome};
pub use export_service::{ExportService, CSV_CONTENT_TYPE};
pub use schema_service::{JsonSchema, JsonSchemaProperty, SchemaService};
pub use seed_service::{SeedError, SeedLoader};
