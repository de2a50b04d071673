//! robots.txt generation from persisted directive rows.

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::info;

use crate::application::profile::SiteProfile;
use crate::application::repos::{RepoError, RobotsRepo};
use crate::domain::entities::RobotsDirectiveRecord;
use crate::domain::types::SitemapKind;

const METRIC_ROBOTS_GENERATED: &str = "seo_robots_generated_total";

#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("failed to load robots directives")]
    Directives(#[from] RepoError),
}

#[derive(Clone)]
pub struct RobotsService {
    directives: Arc<dyn RobotsRepo>,
    profile: Arc<SiteProfile>,
}

impl RobotsService {
    pub fn new(directives: Arc<dyn RobotsRepo>, profile: Arc<SiteProfile>) -> Self {
        Self {
            directives,
            profile,
        }
    }

    pub async fn robots_txt(&self) -> Result<String, RobotsError> {
        let rows = self.directives.list_active_directives().await?;
        let body = render_robots(&rows, &self.profile);

        info!(
            target = "akibeks_seo::robots",
            directives = rows.len(),
            "robots.txt generated"
        );
        counter!(METRIC_ROBOTS_GENERATED).increment(1);

        Ok(body)
    }
}

/// Render directive rows grouped by user agent, followed by the published sitemaps.
///
/// Agents keep first-seen order; rows inside an agent keep ascending priority.
/// `sitemap` rows never form part of a group.
pub fn render_robots(rows: &[RobotsDirectiveRecord], profile: &SiteProfile) -> String {
    let mut ordered: Vec<&RobotsDirectiveRecord> = rows
        .iter()
        .filter(|row| row.is_active && !row.is_sitemap())
        .collect();
    ordered.sort_by_key(|row| row.priority);

    let mut groups: Vec<(&str, Vec<&RobotsDirectiveRecord>)> = Vec::new();
    for row in ordered {
        let agent = row.user_agent.trim();
        match groups.iter_mut().find(|(name, _)| *name == agent) {
            Some((_, members)) => members.push(row),
            None => groups.push((agent, vec![row])),
        }
    }

    let mut out = format!("# robots.txt for {}\n\n", profile.base_url());
    for (agent, members) in groups {
        out.push_str(&format!("User-agent: {agent}\n"));
        for row in members {
            out.push_str(&format!(
                "{}: {}\n",
                directive_name(&row.directive),
                row.value.trim()
            ));
        }
        out.push('\n');
    }

    for kind in SitemapKind::PUBLISHED {
        out.push_str(&format!("Sitemap: {}/{}\n", profile.base_url(), kind.path()));
    }
    out
}

/// `crawl-delay` -> `Crawl-delay`, `DISALLOW` -> `Disallow`.
fn directive_name(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
