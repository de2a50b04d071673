pub mod api;
mod middleware;
mod public;

pub use public::build_router;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{
    analyzer::PageAnalyzer,
    error::ErrorReport,
    meta::MetaService,
    repos::{HealthProbe, RepoError},
    robots::RobotsService,
    seo_config::SeoConfigService,
    sitemap::SitemapService,
    structured_data::StructuredDataService,
};

/// Services shared by the public documents and the `/api/seo` routes.
#[derive(Clone)]
pub struct HttpState {
    pub sitemap: Arc<SitemapService>,
    pub robots: Arc<RobotsService>,
    pub meta: Arc<MetaService>,
    pub structured_data: Arc<StructuredDataService>,
    pub analyzer: Arc<PageAnalyzer>,
    pub seo_config: Arc<SeoConfigService>,
    pub health: Arc<dyn HealthProbe>,
}

fn db_health_response(result: Result<(), RepoError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
