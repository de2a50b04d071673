//! Sitemap-protocol XML rendering for the standard, image, video and news dialects.

use time::{OffsetDateTime, UtcOffset};

use crate::application::profile::SiteProfile;
use crate::application::xml::XmlWriter;
use crate::domain::sitemap::SitemapEntry;
use crate::domain::types::SitemapFormat;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";
pub const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";
pub const NEWS_NS: &str = "http://www.google.com/schemas/sitemap-news/0.9";
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Render `entries` as a complete `<urlset>` document.
///
/// Media dialects skip entries lacking the corresponding data entirely.
pub fn render(entries: &[SitemapEntry], format: SitemapFormat, profile: &SiteProfile) -> String {
    match format {
        SitemapFormat::Standard => render_standard(entries),
        SitemapFormat::Image => render_images(entries),
        SitemapFormat::Video => render_videos(entries),
        SitemapFormat::News => render_news(entries, profile),
    }
}

/// `YYYY-MM-DD` in UTC.
pub fn lastmod_date(at: OffsetDateTime) -> String {
    let date = at.to_offset(UtcOffset::UTC).date();
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn render_standard(entries: &[SitemapEntry]) -> String {
    let mut xml = XmlWriter::new();
    if entries.iter().any(|entry| !entry.alternates.is_empty()) {
        xml.open("urlset", &[("xmlns", SITEMAP_NS), ("xmlns:xhtml", XHTML_NS)]);
    } else {
        xml.open("urlset", &[("xmlns", SITEMAP_NS)]);
    }

    for entry in entries {
        xml.open("url", &[]);
        xml.text_element("loc", entry.url());
        xml.text_element("lastmod", &lastmod_date(entry.last_modified));
        if let Some(frequency) = entry.change_frequency {
            xml.text_element("changefreq", frequency.as_str());
        }
        if let Some(priority) = entry.priority {
            xml.text_element("priority", &priority.render());
        }
        for alternate in &entry.alternates {
            xml.empty_element(
                "xhtml:link",
                &[
                    ("rel", "alternate"),
                    ("hreflang", alternate.hreflang.as_str()),
                    ("href", alternate.href.as_str()),
                ],
            );
        }
        xml.close();
    }

    xml.finish()
}

fn render_images(entries: &[SitemapEntry]) -> String {
    let mut xml = XmlWriter::new();
    xml.open("urlset", &[("xmlns", SITEMAP_NS), ("xmlns:image", IMAGE_NS)]);

    for entry in entries.iter().filter(|entry| !entry.images.is_empty()) {
        xml.open("url", &[]);
        xml.text_element("loc", entry.url());
        for image in &entry.images {
            xml.open("image:image", &[]);
            xml.text_element("image:loc", image);
            xml.close();
        }
        xml.close();
    }

    xml.finish()
}

fn render_videos(entries: &[SitemapEntry]) -> String {
    let mut xml = XmlWriter::new();
    xml.open("urlset", &[("xmlns", SITEMAP_NS), ("xmlns:video", VIDEO_NS)]);

    for entry in entries.iter().filter(|entry| !entry.videos.is_empty()) {
        xml.open("url", &[]);
        xml.text_element("loc", entry.url());
        for video in &entry.videos {
            xml.open("video:video", &[]);
            if let Some(thumbnail) = &video.thumbnail_url {
                xml.text_element("video:thumbnail_loc", thumbnail);
            }
            if let Some(title) = &video.title {
                xml.text_element("video:title", title);
            }
            if let Some(description) = &video.description {
                xml.text_element("video:description", description);
            }
            if let Some(duration) = video.duration_seconds {
                xml.text_element("video:duration", &duration.to_string());
            }
            xml.close();
        }
        xml.close();
    }

    xml.finish()
}

fn render_news(entries: &[SitemapEntry], profile: &SiteProfile) -> String {
    let mut xml = XmlWriter::new();
    xml.open("urlset", &[("xmlns", SITEMAP_NS), ("xmlns:news", NEWS_NS)]);

    for entry in entries {
        let Some(news) = &entry.news else {
            continue;
        };
        xml.open("url", &[]);
        xml.text_element("loc", entry.url());
        xml.open("news:news", &[]);
        xml.open("news:publication", &[]);
        xml.text_element("news:name", &profile.organization_name);
        xml.text_element("news:language", &profile.language);
        xml.close();
        xml.text_element("news:publication_date", &news.publish_date);
        xml.text_element("news:title", &news.title);
        if !news.keywords.is_empty() {
            xml.text_element("news:keywords", &news.keywords.join(", "));
        }
        xml.close();
        xml.close();
    }

    xml.finish()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::domain::sitemap::{AlternateLink, NewsEntry, Priority, VideoEntry};
    use crate::domain::types::ChangeFrequency;

    fn entry(url: &str) -> SitemapEntry {
        SitemapEntry::new(url, datetime!(2024-03-05 23:30 -3)).expect("valid entry")
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn standard_sitemap_renders_all_fields() {
        let entries = vec![
            entry("https://example.com/")
                .with_change_frequency(ChangeFrequency::Daily)
                .with_priority(Priority::new(1.0).unwrap()),
            entry("https://example.com/about"),
        ];

        let xml = render(&entries, SitemapFormat::Standard, &SiteProfile::default());

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.contains(&format!("<urlset xmlns=\"{SITEMAP_NS}\">")));
        assert_eq!(count(&xml, "<url>"), 2);
        // 23:30 at -03:00 is the next day in UTC.
        assert!(xml.contains("<lastmod>2024-03-06</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert_eq!(count(&xml, "<priority>"), 1);
        assert_eq!(count(&xml, "<changefreq>"), 1);
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn priority_passes_through_one_decimal() {
        let entries = vec![entry("https://example.com/").with_priority(Priority::new(0.9).unwrap())];
        let xml = render(&entries, SitemapFormat::Standard, &SiteProfile::default());
        assert!(xml.contains("<priority>0.9</priority>"));
    }

    #[test]
    fn text_nodes_are_escaped() {
        let entries = vec![
            entry("https://example.com/?a=1&b=2").with_news(NewsEntry {
                publish_date: "2024-03-05".to_string(),
                title: r#"Bricks & <Mortar> "Q1" 'update'"#.to_string(),
                keywords: Vec::new(),
            }),
        ];

        let standard = render(&entries, SitemapFormat::Standard, &SiteProfile::default());
        assert!(standard.contains("<loc>https://example.com/?a=1&amp;b=2</loc>"));

        let news = render(&entries, SitemapFormat::News, &SiteProfile::default());
        assert!(news.contains(
            "<news:title>Bricks &amp; &lt;Mortar&gt; &quot;Q1&quot; &apos;update&apos;</news:title>"
        ));
    }

    #[test]
    fn image_sitemap_skips_entries_without_images() {
        let entries = vec![
            entry("https://example.com/services/a")
                .with_images(vec!["https://example.com/a.jpg".to_string()]),
            entry("https://example.com/services/b"),
        ];

        let xml = render(&entries, SitemapFormat::Image, &SiteProfile::default());

        assert!(xml.contains(&format!("xmlns:image=\"{IMAGE_NS}\"")));
        assert_eq!(count(&xml, "<url>"), 1);
        assert_eq!(count(&xml, "<image:image>"), 1);
        assert!(xml.contains("<image:loc>https://example.com/a.jpg</image:loc>"));
        assert!(!xml.contains("services/b"));
    }

    #[test]
    fn video_sitemap_omits_absent_fields() {
        let entries = vec![
            entry("https://example.com/projects/tower").with_videos(vec![VideoEntry {
                title: Some("Site tour".to_string()),
                duration_seconds: Some(95),
                ..VideoEntry::default()
            }]),
            entry("https://example.com/projects/bridge"),
        ];

        let xml = render(&entries, SitemapFormat::Video, &SiteProfile::default());

        assert_eq!(count(&xml, "<url>"), 1);
        assert!(xml.contains("<video:title>Site tour</video:title>"));
        assert!(xml.contains("<video:duration>95</video:duration>"));
        assert!(!xml.contains("video:thumbnail_loc"));
        assert!(!xml.contains("video:description"));
    }

    #[test]
    fn news_sitemap_uses_publication_details() {
        let entries = vec![
            entry("https://example.com/news/launch").with_news(NewsEntry {
                publish_date: "2024-03-05T10:00:00+03:00".to_string(),
                title: "Launch".to_string(),
                keywords: vec!["construction".to_string(), "nairobi".to_string()],
            }),
            entry("https://example.com/about"),
        ];
        let profile = SiteProfile::default();

        let xml = render(&entries, SitemapFormat::News, &profile);

        assert_eq!(count(&xml, "<url>"), 1);
        assert!(xml.contains(&format!("<news:name>{}</news:name>", profile.organization_name)));
        assert!(xml.contains("<news:language>en</news:language>"));
        assert!(xml.contains(
            "<news:publication_date>2024-03-05T10:00:00+03:00</news:publication_date>"
        ));
        assert!(xml.contains("<news:keywords>construction, nairobi</news:keywords>"));
    }

    #[test]
    fn alternates_declare_xhtml_namespace() {
        let entries = vec![entry("https://example.com/").with_alternates(vec![AlternateLink {
            hreflang: "sw".to_string(),
            href: "https://example.com/sw/".to_string(),
        }])];

        let xml = render(&entries, SitemapFormat::Standard, &SiteProfile::default());

        assert!(xml.contains(&format!("xmlns:xhtml=\"{XHTML_NS}\"")));
        assert!(xml.contains(
            "<xhtml:link rel=\"alternate\" hreflang=\"sw\" href=\"https://example.com/sw/\"/>"
        ));
    }

    #[test]
    fn empty_entry_list_is_valid_document() {
        let xml = render(&[], SitemapFormat::Image, &SiteProfile::default());
        assert!(xml.contains("<urlset"));
        assert!(xml.ends_with("</urlset>\n"));
        assert_eq!(count(&xml, "<url>"), 0);
    }
}
