pub mod collection;
pub mod export;
pub mod record;
pub mod schema;

// Re-export handler functions for use in routing
pub use collection::create as contents_post;
pub use collection::list as contents_get;
pub use collection::list_for_jurisdiction as jurisdiction_contents_get;

pub use record::delete as record_delete;
pub use record::get as record_get;
pub use record::patch as record_patch;
pub use record::put as record_put;

pub use export::get as export_get;
pub use schema::get as schema_get;
