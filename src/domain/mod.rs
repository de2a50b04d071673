//! Domain layer types and invariants.

pub mod analysis;
pub mod entities;
pub mod error;
pub mod meta;
pub mod schema;
pub mod sitemap;
pub mod types;
