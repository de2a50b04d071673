//! Meta-tag resolution: regional defaults, then persisted configuration, then
//! caller overrides.
//!
//! Precedence per field:
//!
//! | field                     | configuration layer          | override layer |
//! |---------------------------|------------------------------|----------------|
//! | scalars, keywords         | `config ?? default`          | replaces       |
//! | `openGraph`, `twitter`    | per nested field `??`        | replaces whole |
//! | `structuredData`          | shallow object merge         | replaces whole |
//! | `customMeta`              | union of keys, config wins   | replaces whole |

use std::collections::BTreeMap;
use std::sync::Arc;

use metrics::counter;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::application::profile::SiteProfile;
use crate::application::repos::{RepoError, SeoConfigRepo};
use crate::application::structured_data::organization;
use crate::domain::entities::SeoConfigurationRecord;
use crate::domain::meta::{MetaOverrides, OpenGraph, SeoMetaBundle, TwitterCard};
use crate::domain::types::PageType;

const METRIC_META_RESOLVED: &str = "seo_meta_resolved_total";

#[derive(Debug, Error)]
pub enum MetaError {
    #[error("failed to load SEO configuration")]
    Configuration(#[from] RepoError),
    #[error("failed to encode default structured data")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct MetaService {
    configs: Arc<dyn SeoConfigRepo>,
    profile: Arc<SiteProfile>,
}

impl MetaService {
    pub fn new(configs: Arc<dyn SeoConfigRepo>, profile: Arc<SiteProfile>) -> Self {
        Self { configs, profile }
    }

    pub async fn resolve(
        &self,
        page_type: &PageType,
        page_id: Option<&str>,
        overrides: MetaOverrides,
    ) -> Result<SeoMetaBundle, MetaError> {
        let config = self
            .configs
            .find_active_configuration(page_type.as_key(), page_id)
            .await?
            .filter(|config| config.is_active);

        let source = if config.is_some() {
            "configuration"
        } else {
            "defaults"
        };

        let mut bundle = default_bundle(&self.profile, page_type, page_id)?;
        if let Some(config) = config {
            apply_configuration(&mut bundle, config, &self.profile);
        }
        apply_overrides(&mut bundle, overrides);

        info!(
            target = "akibeks_seo::meta",
            page_type = %page_type,
            page_id = page_id.unwrap_or(""),
            source,
            "meta tags resolved"
        );
        counter!(METRIC_META_RESOLVED, "source" => source).increment(1);

        Ok(bundle)
    }
}

/// Regional defaults for a page before any configuration is applied.
pub fn default_bundle(
    profile: &SiteProfile,
    page_type: &PageType,
    page_id: Option<&str>,
) -> Result<SeoMetaBundle, serde_json::Error> {
    let canonical = profile.absolute_url(&page_type.page_path(page_id));
    let image = profile.absolute_url(&profile.default_image);

    let mut custom_meta = BTreeMap::new();
    custom_meta.insert("geo.region".to_string(), profile.geo.region_code.clone());
    custom_meta.insert("geo.placename".to_string(), profile.geo.placename.clone());
    custom_meta.insert("geo.position".to_string(), profile.geo_position());
    custom_meta.insert(
        "ICBM".to_string(),
        format!("{}, {}", profile.geo.latitude, profile.geo.longitude),
    );

    Ok(SeoMetaBundle {
        title: profile.default_title.clone(),
        description: profile.default_description.clone(),
        keywords: profile.default_keywords.clone(),
        canonical: Some(canonical.clone()),
        robots_directive: Some(profile.default_robots.clone()),
        open_graph: OpenGraph {
            title: Some(profile.default_title.clone()),
            description: Some(profile.default_description.clone()),
            image: Some(image.clone()),
            kind: Some(profile.og_type.clone()),
            url: Some(canonical),
        },
        twitter: TwitterCard {
            card: Some(profile.twitter_card.clone()),
            title: Some(profile.default_title.clone()),
            description: Some(profile.default_description.clone()),
            image: Some(image),
        },
        structured_data: serde_json::to_value(organization(profile))?,
        custom_meta,
    })
}

/// Field-level fallback onto the defaults.
///
/// Social titles and descriptions follow the configured page title and
/// description when the configuration leaves them unset.
pub fn apply_configuration(
    bundle: &mut SeoMetaBundle,
    config: SeoConfigurationRecord,
    profile: &SiteProfile,
) {
    let title = config.title.clone();
    let description = config.description.clone();

    if let Some(title) = config.title {
        bundle.title = title;
    }
    if let Some(description) = config.description {
        bundle.description = description;
    }
    if let Some(keywords) = config.keywords {
        bundle.keywords = keywords;
    }
    if let Some(canonical) = config.canonical_url {
        let canonical = profile.absolute_url(&canonical);
        bundle.open_graph.url = Some(canonical.clone());
        bundle.canonical = Some(canonical);
    }
    if config.robots.is_some() {
        bundle.robots_directive = config.robots;
    }

    let og = &mut bundle.open_graph;
    fallback(&mut og.title, config.og_title.or_else(|| title.clone()));
    fallback(&mut og.description, config.og_description.or_else(|| description.clone()));
    fallback(&mut og.image, config.og_image.map(|image| profile.absolute_url(&image)));
    fallback(&mut og.kind, config.og_type);

    let twitter = &mut bundle.twitter;
    fallback(&mut twitter.card, config.twitter_card);
    fallback(&mut twitter.title, config.twitter_title.or(title));
    fallback(&mut twitter.description, config.twitter_description.or(description));
    fallback(
        &mut twitter.image,
        config.twitter_image.map(|image| profile.absolute_url(&image)),
    );

    if let Some(structured) = config.structured_data {
        merge_structured_data(&mut bundle.structured_data, structured);
    }
    if let Some(custom) = config.custom_meta {
        bundle.custom_meta.extend(custom);
    }
}

/// Top-level overrides replace the resolved field wholesale.
pub fn apply_overrides(bundle: &mut SeoMetaBundle, overrides: MetaOverrides) {
    if let Some(title) = overrides.title {
        bundle.title = title;
    }
    if let Some(description) = overrides.description {
        bundle.description = description;
    }
    if let Some(keywords) = overrides.keywords {
        bundle.keywords = keywords;
    }
    if overrides.canonical.is_some() {
        bundle.canonical = overrides.canonical;
    }
    if overrides.robots_directive.is_some() {
        bundle.robots_directive = overrides.robots_directive;
    }
    if let Some(open_graph) = overrides.open_graph {
        bundle.open_graph = open_graph;
    }
    if let Some(twitter) = overrides.twitter {
        bundle.twitter = twitter;
    }
    if let Some(structured_data) = overrides.structured_data {
        bundle.structured_data = structured_data;
    }
    if let Some(custom_meta) = overrides.custom_meta {
        bundle.custom_meta = custom_meta;
    }
}

fn fallback(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Shallow merge when both sides are objects; anything else replaces.
fn merge_structured_data(base: &mut Value, incoming: Value) {
    match (base, incoming) {
        (Value::Object(base), Value::Object(incoming)) => base.extend(incoming),
        (base, incoming) => *base = incoming,
    }
}
