//! Repository traits describing persistence adapters.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{
    ProjectRecord, RobotsDirectiveRecord, SeoConfigurationRecord, ServiceRecord,
};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[async_trait]
pub trait ServicesRepo: Send + Sync {
    /// Active services in display order.
    async fn list_active_services(&self) -> Result<Vec<ServiceRecord>, RepoError>;
}

#[async_trait]
pub trait ProjectsRepo: Send + Sync {
    /// Active projects in display order.
    async fn list_active_projects(&self) -> Result<Vec<ProjectRecord>, RepoError>;
}

#[async_trait]
pub trait RobotsRepo: Send + Sync {
    /// Active directives ordered by ascending priority.
    async fn list_active_directives(&self) -> Result<Vec<RobotsDirectiveRecord>, RepoError>;
}

/// Writable fields of a persisted SEO configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoConfigurationParams {
    pub page_type: String,
    pub page_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub canonical_url: Option<String>,
    pub robots: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_type: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
    pub structured_data: Option<Value>,
    pub custom_meta: Option<BTreeMap<String, String>>,
    pub is_active: bool,
}

impl Default for SeoConfigurationParams {
    fn default() -> Self {
        Self {
            page_type: String::new(),
            page_id: None,
            title: None,
            description: None,
            keywords: None,
            canonical_url: None,
            robots: None,
            og_title: None,
            og_description: None,
            og_image: None,
            og_type: None,
            twitter_card: None,
            twitter_title: None,
            twitter_description: None,
            twitter_image: None,
            structured_data: None,
            custom_meta: None,
            is_active: true,
        }
    }
}

#[async_trait]
pub trait SeoConfigRepo: Send + Sync {
    /// The active configuration for `(page_type, page_id)`, else for `page_type` alone.
    async fn find_active_configuration(
        &self,
        page_type: &str,
        page_id: Option<&str>,
    ) -> Result<Option<SeoConfigurationRecord>, RepoError>;

    async fn list_configurations(&self) -> Result<Vec<SeoConfigurationRecord>, RepoError>;

    async fn create_configuration(
        &self,
        params: SeoConfigurationParams,
    ) -> Result<SeoConfigurationRecord, RepoError>;

    async fn update_configuration(
        &self,
        id: Uuid,
        params: SeoConfigurationParams,
    ) -> Result<SeoConfigurationRecord, RepoError>;
}

#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), RepoError>;
}
