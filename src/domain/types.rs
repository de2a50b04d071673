//! Shared domain enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Crawl-frequency hint from the sitemap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

/// XML dialect a sitemap is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SitemapFormat {
    Standard,
    Image,
    Video,
    News,
}

impl SitemapFormat {
    /// Parse a format name; anything unrecognised renders as a standard sitemap.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "image" | "images" => SitemapFormat::Image,
            "video" | "videos" => SitemapFormat::Video,
            "news" => SitemapFormat::News,
            _ => SitemapFormat::Standard,
        }
    }
}

/// Which sitemap document is being generated.
///
/// The kind decides both which listings are collected and which XML dialect
/// is used to render them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SitemapKind {
    Main,
    Services,
    Projects,
    Images,
    Videos,
    News,
}

impl SitemapKind {
    /// Sitemaps advertised publicly (routes and robots.txt `Sitemap:` lines).
    pub const PUBLISHED: [SitemapKind; 4] = [
        SitemapKind::Main,
        SitemapKind::Services,
        SitemapKind::Projects,
        SitemapKind::Images,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SitemapKind::Main => "main",
            SitemapKind::Services => "services",
            SitemapKind::Projects => "projects",
            SitemapKind::Images => "images",
            SitemapKind::Videos => "videos",
            SitemapKind::News => "news",
        }
    }

    pub fn format(self) -> SitemapFormat {
        match self {
            SitemapKind::Main | SitemapKind::Services | SitemapKind::Projects => {
                SitemapFormat::Standard
            }
            SitemapKind::Images => SitemapFormat::Image,
            SitemapKind::Videos => SitemapFormat::Video,
            SitemapKind::News => SitemapFormat::News,
        }
    }

    /// Public path of the document, relative to the site root.
    pub fn path(self) -> &'static str {
        match self {
            SitemapKind::Main => "sitemap.xml",
            SitemapKind::Services => "sitemap-services.xml",
            SitemapKind::Projects => "sitemap-projects.xml",
            SitemapKind::Images => "sitemap-images.xml",
            SitemapKind::Videos => "sitemap-videos.xml",
            SitemapKind::News => "sitemap-news.xml",
        }
    }

    pub fn includes_static_routes(self) -> bool {
        !matches!(self, SitemapKind::Services | SitemapKind::Projects)
    }

    pub fn includes_services(self) -> bool {
        !matches!(self, SitemapKind::Projects)
    }

    pub fn includes_projects(self) -> bool {
        !matches!(self, SitemapKind::Services)
    }
}

impl fmt::Display for SitemapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse page category used to pick defaults and schemas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageType {
    Home,
    About,
    Service,
    Project,
    Contact,
    Other(String),
}

impl PageType {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "home" => PageType::Home,
            "about" => PageType::About,
            "service" | "services" => PageType::Service,
            "project" | "projects" => PageType::Project,
            "contact" => PageType::Contact,
            other => PageType::Other(other.to_string()),
        }
    }

    /// Key used when matching persisted configuration rows.
    pub fn as_key(&self) -> &str {
        match self {
            PageType::Home => "home",
            PageType::About => "about",
            PageType::Service => "service",
            PageType::Project => "project",
            PageType::Contact => "contact",
            PageType::Other(value) => value.as_str(),
        }
    }

    /// Root-relative path of the page this type (and optional id) points at.
    pub fn page_path(&self, page_id: Option<&str>) -> String {
        match (self, page_id) {
            (PageType::Home, _) => "/".to_string(),
            (PageType::About, _) => "/about".to_string(),
            (PageType::Contact, _) => "/contact".to_string(),
            (PageType::Service, Some(id)) => format!("/services/{id}"),
            (PageType::Service, None) => "/services".to_string(),
            (PageType::Project, Some(id)) => format!("/projects/{id}"),
            (PageType::Project, None) => "/projects".to_string(),
            (PageType::Other(value), Some(id)) => format!("/{value}/{id}"),
            (PageType::Other(value), None) => format!("/{value}"),
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}
