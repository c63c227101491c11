// Public handlers (service info, health) are unversioned; content handlers are
// mounted under the API version prefix.
pub mod contents;
pub mod public;
pub mod utils;
