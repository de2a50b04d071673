//! Sitemap, robots.txt and SEO metadata engine for the Akibeks site.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
