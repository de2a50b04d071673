//! Organization and regional defaults shared by every SEO surface.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://akibeks.co.ke";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostalDetails {
    pub street: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoDetails {
    pub latitude: f64,
    pub longitude: f64,
    pub region_code: String,
    pub placename: String,
}

/// Site identity used for default meta tags, JSON-LD and analyzer heuristics.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteProfile {
    base_url: String,
    pub organization_name: String,
    pub default_title: String,
    pub default_description: String,
    pub default_keywords: Vec<String>,
    pub locale: String,
    pub language: String,
    pub country_name: String,
    pub og_type: String,
    pub twitter_card: String,
    pub default_robots: String,
    pub default_image: String,
    pub logo: String,
    pub telephone: String,
    pub email: String,
    pub address: PostalDetails,
    pub geo: GeoDetails,
    pub opening_hours: Vec<String>,
    pub price_range: String,
    pub available_languages: Vec<String>,
    pub same_as: Vec<String>,
    /// Lower-case city and region names a locally targeted page should mention.
    pub regional_keywords: Vec<String>,
}

impl SiteProfile {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Resolve a root-relative path (or pass through an absolute URL).
    pub fn absolute_url(&self, path: &str) -> String {
        let path = path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let trimmed = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, trimmed)
    }

    /// Whether `text` mentions any regional keyword, ignoring case.
    pub fn mentions_region(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.regional_keywords
            .iter()
            .any(|keyword| lowered.contains(&keyword.to_lowercase()))
    }

    pub fn geo_position(&self) -> String {
        format!("{};{}", self.geo.latitude, self.geo.longitude)
    }
}

fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            organization_name: "Akibeks Engineering Solutions".to_string(),
            default_title: "Akibeks Engineering Solutions | Construction Company in Kenya"
                .to_string(),
            default_description: "Leading construction and engineering company in Kenya \
                offering building construction, civil engineering, renovation and project \
                management services across Nairobi and beyond."
                .to_string(),
            default_keywords: strings(&[
                "construction company Kenya",
                "building contractors Nairobi",
                "civil engineering Kenya",
                "renovation services Kenya",
                "project management Kenya",
            ]),
            locale: "en_KE".to_string(),
            language: "en".to_string(),
            country_name: "Kenya".to_string(),
            og_type: "website".to_string(),
            twitter_card: "summary_large_image".to_string(),
            default_robots: "index, follow".to_string(),
            default_image: "/images/og-default.jpg".to_string(),
            logo: "/images/logo.png".to_string(),
            telephone: "+254 700 000 000".to_string(),
            email: "info@akibeks.co.ke".to_string(),
            address: PostalDetails {
                street: "Nairobi CBD".to_string(),
                locality: "Nairobi".to_string(),
                region: "Nairobi County".to_string(),
                postal_code: "00100".to_string(),
                country: "KE".to_string(),
            },
            geo: GeoDetails {
                latitude: -1.286389,
                longitude: 36.817223,
                region_code: "KE-30".to_string(),
                placename: "Nairobi".to_string(),
            },
            opening_hours: strings(&["Mo-Fr 08:00-17:00", "Sa 09:00-13:00"]),
            price_range: "$$".to_string(),
            available_languages: strings(&["English", "Swahili"]),
            same_as: Vec::new(),
            regional_keywords: strings(&[
                "kenya", "nairobi", "mombasa", "kisumu", "nakuru", "eldoret", "thika",
                "machakos", "kiambu", "kajiado",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let profile = SiteProfile::default().with_base_url("https://example.com/");
        assert_eq!(profile.base_url(), "https://example.com");
        assert_eq!(profile.absolute_url("/"), "https://example.com/");
        assert_eq!(profile.absolute_url("services"), "https://example.com/services");

        let blank = SiteProfile::default().with_base_url("  ");
        assert_eq!(blank.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn absolute_urls_pass_through() {
        let profile = SiteProfile::default();
        assert_eq!(
            profile.absolute_url("https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn region_match_ignores_case() {
        let profile = SiteProfile::default();
        assert!(profile.mentions_region("Builders in NAIROBI"));
        assert!(!profile.mentions_region("Builders in Lagos"));
    }
}
