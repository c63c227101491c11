pub mod content;
pub mod jurisdiction;

pub use content::{Content, ContentInput, ContentPatch, ContentView, JurisdictionInput};
pub use jurisdiction::Jurisdiction;
