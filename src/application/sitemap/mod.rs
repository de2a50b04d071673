//! Sitemap service: collects entries for a sitemap kind and renders them.
//!
//! Collection reads the active service and project listings; rendering is a
//! pure function of the collected entries and the requested XML dialect.

mod collect;
mod render;

use std::sync::Arc;

use metrics::{counter, histogram};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use crate::application::profile::SiteProfile;
use crate::application::repos::{ProjectsRepo, RepoError, ServicesRepo};
use crate::domain::error::DomainError;
use crate::domain::sitemap::SitemapEntry;
use crate::domain::types::{SitemapFormat, SitemapKind};

pub use collect::{project_entry, service_entry, static_entries};
pub use render::{lastmod_date, render};

const METRIC_SITEMAP_GENERATED: &str = "seo_sitemap_generated_total";
const METRIC_SITEMAP_ENTRIES: &str = "seo_sitemap_entries";

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("failed to list services")]
    Services(#[source] RepoError),
    #[error("failed to list projects")]
    Projects(#[source] RepoError),
    #[error("invalid sitemap entry")]
    Entry(#[from] DomainError),
}

#[derive(Clone)]
pub struct SitemapService {
    services: Arc<dyn ServicesRepo>,
    projects: Arc<dyn ProjectsRepo>,
    profile: Arc<SiteProfile>,
}

impl SitemapService {
    pub fn new(
        services: Arc<dyn ServicesRepo>,
        projects: Arc<dyn ProjectsRepo>,
        profile: Arc<SiteProfile>,
    ) -> Self {
        Self {
            services,
            projects,
            profile,
        }
    }

    /// Gather entries in collection order: static routes, services, projects.
    ///
    /// A failed listing fails the whole collection; no partial list is returned.
    pub async fn collect_entries(
        &self,
        kind: SitemapKind,
        now: OffsetDateTime,
    ) -> Result<Vec<SitemapEntry>, SitemapError> {
        let mut entries = Vec::new();

        if kind.includes_static_routes() {
            entries.extend(static_entries(&self.profile, now)?);
        }

        if kind.includes_services() {
            let services = self
                .services
                .list_active_services()
                .await
                .map_err(SitemapError::Services)?;
            for service in services.iter().filter(|service| service.is_active) {
                entries.push(service_entry(&self.profile, service)?);
            }
        }

        if kind.includes_projects() {
            let projects = self
                .projects
                .list_active_projects()
                .await
                .map_err(SitemapError::Projects)?;
            for project in projects.iter().filter(|project| project.is_active) {
                entries.push(project_entry(&self.profile, project)?);
            }
        }

        Ok(entries)
    }

    /// Render the sitemap document for `kind`.
    pub async fn generate(&self, kind: SitemapKind) -> Result<String, SitemapError> {
        let entries = self
            .collect_entries(kind, OffsetDateTime::now_utc())
            .await?;
        Ok(self.render_entries(kind, &entries))
    }

    /// Render pre-collected entries in the dialect of a named format.
    ///
    /// Unknown format names fall back to the standard dialect.
    pub fn render_named(&self, format: &str, entries: &[SitemapEntry]) -> String {
        render(entries, SitemapFormat::from_name(format), &self.profile)
    }

    fn render_entries(&self, kind: SitemapKind, entries: &[SitemapEntry]) -> String {
        let xml = render(entries, kind.format(), &self.profile);

        info!(
            target = "akibeks_seo::sitemap",
            kind = kind.as_str(),
            entries = entries.len(),
            bytes = xml.len(),
            "sitemap generated"
        );
        counter!(METRIC_SITEMAP_GENERATED, "kind" => kind.as_str()).increment(1);
        histogram!(METRIC_SITEMAP_ENTRIES).record(entries.len() as f64);

        xml
    }
}
