pub mod export;
pub mod normalize;
pub mod schema;
pub mod seed;
