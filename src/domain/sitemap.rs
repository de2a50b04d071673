//! Sitemap entry value types.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::error::DomainError;
use crate::domain::types::ChangeFrequency;

/// Crawl priority in `0.0..=1.0`, always rendered with one decimal digit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Priority(f64);

impl Priority {
    pub const fn from_tenths(tenths: u8) -> Self {
        assert!(tenths <= 10, "priority tenths must be within 0..=10");
        Self(tenths as f64 / 10.0)
    }

    pub fn new(value: f64) -> Result<Self, DomainError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::PriorityOutOfRange { value })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn render(self) -> String {
        format!("{:.1}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoEntry {
    pub thumbnail_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_seconds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsEntry {
    /// Passed through verbatim; callers supply W3C date/time text.
    pub publish_date: String,
    pub title: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternateLink {
    pub hreflang: String,
    pub href: String,
}

/// One candidate URL plus crawl hints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    url: String,
    pub last_modified: OffsetDateTime,
    pub change_frequency: Option<ChangeFrequency>,
    pub priority: Option<Priority>,
    pub images: Vec<String>,
    pub videos: Vec<VideoEntry>,
    pub news: Option<NewsEntry>,
    pub alternates: Vec<AlternateLink>,
}

impl SitemapEntry {
    pub fn new(url: impl Into<String>, last_modified: OffsetDateTime) -> Result<Self, DomainError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(DomainError::EmptyUrl);
        }
        Ok(Self {
            url,
            last_modified,
            change_frequency: None,
            priority: None,
            images: Vec::new(),
            videos: Vec::new(),
            news: None,
            alternates: Vec::new(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn with_change_frequency(mut self, frequency: ChangeFrequency) -> Self {
        self.change_frequency = Some(frequency);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_videos(mut self, videos: Vec<VideoEntry>) -> Self {
        self.videos = videos;
        self
    }

    pub fn with_news(mut self, news: NewsEntry) -> Self {
        self.news = Some(news);
        self
    }

    pub fn with_alternates(mut self, alternates: Vec<AlternateLink>) -> Self {
        self.alternates = alternates;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_renders_one_decimal() {
        assert_eq!(Priority::new(1.0).unwrap().render(), "1.0");
        assert_eq!(Priority::new(0.9).unwrap().render(), "0.9");
        assert_eq!(Priority::from_tenths(6).render(), "0.6");
        assert_eq!(Priority::new(0.0).unwrap().render(), "0.0");
    }

    #[test]
    fn priority_rejects_out_of_range() {
        assert!(matches!(
            Priority::new(1.5),
            Err(DomainError::PriorityOutOfRange { .. })
        ));
        assert!(Priority::new(-0.1).is_err());
        assert!(Priority::new(f64::NAN).is_err());
    }

    #[test]
    fn entry_requires_url() {
        let now = OffsetDateTime::UNIX_EPOCH;
        assert_eq!(SitemapEntry::new("  ", now), Err(DomainError::EmptyUrl));
        let entry = SitemapEntry::new("https://example.com/", now).unwrap();
        assert_eq!(entry.url(), "https://example.com/");
        assert!(entry.images.is_empty());
    }
}
