//! Persisted SEO configuration management.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::application::repos::{RepoError, SeoConfigRepo, SeoConfigurationParams};
use crate::domain::entities::SeoConfigurationRecord;
use crate::domain::types::PageType;

#[derive(Debug, Error)]
pub enum SeoConfigError {
    #[error("pageType is required")]
    MissingPageType,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct SeoConfigService {
    repo: Arc<dyn SeoConfigRepo>,
}

impl SeoConfigService {
    pub fn new(repo: Arc<dyn SeoConfigRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<SeoConfigurationRecord>, SeoConfigError> {
        Ok(self.repo.list_configurations().await?)
    }

    pub async fn find(
        &self,
        page_type: &PageType,
        page_id: Option<&str>,
    ) -> Result<Option<SeoConfigurationRecord>, SeoConfigError> {
        Ok(self
            .repo
            .find_active_configuration(page_type.as_key(), page_id)
            .await?)
    }

    pub async fn create(
        &self,
        params: SeoConfigurationParams,
    ) -> Result<SeoConfigurationRecord, SeoConfigError> {
        let params = normalize(params)?;
        let record = self.repo.create_configuration(params).await?;
        info!(
            target = "akibeks_seo::seo_config",
            id = %record.id,
            page_type = %record.page_type,
            "SEO configuration created"
        );
        Ok(record)
    }

    pub async fn update(
        &self,
        id: Uuid,
        params: SeoConfigurationParams,
    ) -> Result<SeoConfigurationRecord, SeoConfigError> {
        let params = normalize(params)?;
        let record = self.repo.update_configuration(id, params).await?;
        info!(
            target = "akibeks_seo::seo_config",
            id = %record.id,
            page_type = %record.page_type,
            "SEO configuration updated"
        );
        Ok(record)
    }
}

/// Canonical page type key and a blank page id treated as absent.
fn normalize(mut params: SeoConfigurationParams) -> Result<SeoConfigurationParams, SeoConfigError> {
    if params.page_type.trim().is_empty() {
        return Err(SeoConfigError::MissingPageType);
    }
    params.page_type = PageType::parse(&params.page_type).as_key().to_string();
    params.page_id = params
        .page_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());
    Ok(params)
}
