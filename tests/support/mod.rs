//! In-memory repositories shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use akibeks_seo::application::{
    analyzer::PageAnalyzer,
    meta::MetaService,
    profile::SiteProfile,
    repos::{
        HealthProbe, ProjectsRepo, RepoError, RobotsRepo, SeoConfigRepo, SeoConfigurationParams,
        ServicesRepo,
    },
    robots::RobotsService,
    seo_config::SeoConfigService,
    sitemap::SitemapService,
    structured_data::StructuredDataService,
};
use akibeks_seo::domain::entities::{
    ProjectRecord, RobotsDirectiveRecord, SeoConfigurationRecord, ServiceRecord,
};
use akibeks_seo::infra::http::HttpState;
use async_trait::async_trait;
use time::OffsetDateTime;
use time::macros::datetime;
use uuid::Uuid;

pub const UPDATED_AT: OffsetDateTime = datetime!(2024-03-15 10:00 UTC);

#[derive(Default)]
pub struct MemoryStore {
    pub services: Vec<ServiceRecord>,
    pub projects: Vec<ProjectRecord>,
    pub directives: Vec<RobotsDirectiveRecord>,
    pub configurations: Mutex<Vec<SeoConfigurationRecord>>,
    pub offline: bool,
}

impl MemoryStore {
    fn check(&self) -> Result<(), RepoError> {
        if self.offline {
            Err(RepoError::from_persistence("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ServicesRepo for MemoryStore {
    async fn list_active_services(&self) -> Result<Vec<ServiceRecord>, RepoError> {
        self.check()?;
        Ok(self.services.clone())
    }
}

#[async_trait]
impl ProjectsRepo for MemoryStore {
    async fn list_active_projects(&self) -> Result<Vec<ProjectRecord>, RepoError> {
        self.check()?;
        Ok(self.projects.clone())
    }
}

#[async_trait]
impl RobotsRepo for MemoryStore {
    async fn list_active_directives(&self) -> Result<Vec<RobotsDirectiveRecord>, RepoError> {
        self.check()?;
        Ok(self.directives.clone())
    }
}

#[async_trait]
impl SeoConfigRepo for MemoryStore {
    async fn find_active_configuration(
        &self,
        page_type: &str,
        page_id: Option<&str>,
    ) -> Result<Option<SeoConfigurationRecord>, RepoError> {
        self.check()?;
        let configurations = self
            .configurations
            .lock()
            .map_err(RepoError::from_persistence)?;
        let candidates = configurations
            .iter()
            .filter(|config| config.is_active && config.page_type == page_type);
        let specific = page_id.and_then(|id| {
            candidates
                .clone()
                .find(|config| config.page_id.as_deref() == Some(id))
        });
        Ok(specific
            .or_else(|| candidates.clone().find(|config| config.page_id.is_none()))
            .cloned())
    }

    async fn list_configurations(&self) -> Result<Vec<SeoConfigurationRecord>, RepoError> {
        self.check()?;
        Ok(self
            .configurations
            .lock()
            .map_err(RepoError::from_persistence)?
            .clone())
    }

    async fn create_configuration(
        &self,
        params: SeoConfigurationParams,
    ) -> Result<SeoConfigurationRecord, RepoError> {
        self.check()?;
        let mut configurations = self
            .configurations
            .lock()
            .map_err(RepoError::from_persistence)?;
        if configurations
            .iter()
            .any(|config| config.page_type == params.page_type && config.page_id == params.page_id)
        {
            return Err(RepoError::Duplicate {
                constraint: "seo_configurations_page_key".to_string(),
            });
        }
        let record = configuration_from(Uuid::new_v4(), params);
        configurations.push(record.clone());
        Ok(record)
    }

    async fn update_configuration(
        &self,
        id: Uuid,
        params: SeoConfigurationParams,
    ) -> Result<SeoConfigurationRecord, RepoError> {
        self.check()?;
        let mut configurations = self
            .configurations
            .lock()
            .map_err(RepoError::from_persistence)?;
        let slot = configurations
            .iter_mut()
            .find(|config| config.id == id)
            .ok_or(RepoError::NotFound)?;
        *slot = configuration_from(id, params);
        Ok(slot.clone())
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> Result<(), RepoError> {
        self.check()
    }
}

pub fn configuration_from(id: Uuid, params: SeoConfigurationParams) -> SeoConfigurationRecord {
    SeoConfigurationRecord {
        id,
        page_type: params.page_type,
        page_id: params.page_id,
        title: params.title,
        description: params.description,
        keywords: params.keywords,
        canonical_url: params.canonical_url,
        robots: params.robots,
        og_title: params.og_title,
        og_description: params.og_description,
        og_image: params.og_image,
        og_type: params.og_type,
        twitter_card: params.twitter_card,
        twitter_title: params.twitter_title,
        twitter_description: params.twitter_description,
        twitter_image: params.twitter_image,
        structured_data: params.structured_data,
        custom_meta: params.custom_meta,
        is_active: params.is_active,
        created_at: UPDATED_AT,
        updated_at: UPDATED_AT,
    }
}

pub fn service(slug: &str, image: Option<&str>) -> ServiceRecord {
    ServiceRecord {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        title: slug.to_string(),
        description: None,
        image_url: image.map(str::to_string),
        gallery: Vec::new(),
        is_active: true,
        updated_at: UPDATED_AT,
    }
}

pub fn project(slug: &str, image: Option<&str>) -> ProjectRecord {
    ProjectRecord {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        title: slug.to_string(),
        description: None,
        image_url: image.map(str::to_string),
        gallery: Vec::new(),
        is_active: true,
        updated_at: UPDATED_AT,
    }
}

pub fn directive(agent: &str, name: &str, value: &str, priority: i32) -> RobotsDirectiveRecord {
    RobotsDirectiveRecord {
        id: Uuid::new_v4(),
        user_agent: agent.to_string(),
        directive: name.to_string(),
        value: value.to_string(),
        priority,
        is_active: true,
    }
}

pub fn http_state(store: Arc<MemoryStore>) -> HttpState {
    let profile = Arc::new(SiteProfile::default());
    HttpState {
        sitemap: Arc::new(SitemapService::new(
            store.clone(),
            store.clone(),
            profile.clone(),
        )),
        robots: Arc::new(RobotsService::new(store.clone(), profile.clone())),
        meta: Arc::new(MetaService::new(store.clone(), profile.clone())),
        structured_data: Arc::new(StructuredDataService::new(profile.clone())),
        analyzer: Arc::new(PageAnalyzer::new(profile)),
        seo_config: Arc::new(SeoConfigService::new(store.clone())),
        health: store,
    }
}
