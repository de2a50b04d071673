//! Application services: sitemap, robots, meta, structured data and analysis.

pub mod analyzer;
pub mod error;
pub mod meta;
pub mod profile;
pub mod repos;
pub mod robots;
pub mod seo_config;
pub mod sitemap;
pub mod structured_data;
pub mod xml;
