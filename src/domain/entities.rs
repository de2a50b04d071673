//! Domain entities mirrored from persistent storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

/// A service offering listed on the public site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub gallery: Vec<Option<String>>,
    pub is_active: bool,
    pub updated_at: OffsetDateTime,
}

/// A completed or ongoing construction project listed on the public site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub gallery: Vec<Option<String>>,
    pub is_active: bool,
    pub updated_at: OffsetDateTime,
}

/// Persisted per-page SEO overrides keyed by `(page_type, page_id)`.
///
/// Every content field is optional; absent fields fall back to the site
/// defaults when a bundle is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoConfigurationRecord {
    pub id: Uuid,
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
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// One robots.txt rule row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsDirectiveRecord {
    pub id: Uuid,
    pub user_agent: String,
    pub directive: String,
    pub value: String,
    pub priority: i32,
    pub is_active: bool,
}

impl RobotsDirectiveRecord {
    pub fn is_sitemap(&self) -> bool {
        self.directive.trim().eq_ignore_ascii_case("sitemap")
    }
}
