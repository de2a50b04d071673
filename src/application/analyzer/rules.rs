//! Individual analysis checks over raw HTML source.
//!
//! Every rule is independent: it sees the whole document and reports its own
//! deduction, so rules can be tested and reordered without touching scoring.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::application::profile::SiteProfile;
use crate::domain::analysis::AnalysisIssue;

pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MIN_CHARS: usize = 120;
pub const DESCRIPTION_MAX_CHARS: usize = 160;
pub const MIN_INTERNAL_LINKS: usize = 3;
const ALT_PENALTY_PER_IMAGE: u32 = 2;
const ALT_PENALTY_CAP: u32 = 10;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("title pattern is valid"));

static META_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<meta\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("meta pattern is valid")
});

/// `name=description` with the value closed by a quote, whitespace or the tag end.
static NAME_DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\sname\s*=\s*(?:"description"|'description'|description(?:[\s/>]|$))"#)
        .expect("name pattern is valid")
});

static CONTENT_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\scontent\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("content pattern is valid")
});

static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h1[\s>]").expect("h1 pattern is valid"));

static IMG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<img\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("img pattern is valid")
});

static ALT_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)^<img\b(?:[^>"']|"[^"]*"|'[^']*')*?\salt\s*="#).expect("alt pattern is valid")
});

static HREF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\b(?:[^>"']|"[^"]*"|'[^']*')*?\shref\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("href pattern is valid")
});

/// The page under analysis.
#[derive(Debug, Clone, Copy)]
pub struct PageSource<'a> {
    pub url: &'a str,
    pub html: &'a str,
}

/// What a single rule contributes to the overall result.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub deduction: u32,
    pub issues: Vec<AnalysisIssue>,
    pub recommendations: Vec<String>,
}

impl RuleOutcome {
    fn issue(mut self, issue: AnalysisIssue, deduction: u32) -> Self {
        self.issues.push(issue);
        self.deduction += deduction;
        self
    }

    fn recommend(mut self, text: impl Into<String>) -> Self {
        self.recommendations.push(text.into());
        self
    }
}

pub type Rule = fn(&PageSource<'_>, &SiteProfile) -> RuleOutcome;

/// Checks in execution order; the order is reflected in the issue list.
pub const RULES: [(&str, Rule); 7] = [
    ("title", title),
    ("meta_description", meta_description),
    ("headings", headings),
    ("image_alt", image_alt),
    ("internal_links", internal_links),
    ("regional_keywords", regional_keywords),
    ("structured_data", structured_data),
];

pub fn title(page: &PageSource<'_>, profile: &SiteProfile) -> RuleOutcome {
    let outcome = RuleOutcome::default();
    let Some(captures) = TITLE_RE.captures(page.html) else {
        return outcome.issue(AnalysisIssue::error("Missing title tag"), 20);
    };

    let text = captures.get(1).map_or("", |m| m.as_str()).trim();
    let length = text.chars().count();
    let outcome = if length < TITLE_MIN_CHARS {
        outcome.issue(
            AnalysisIssue::warning(format!(
                "Title is too short ({length} characters, recommended {TITLE_MIN_CHARS}-{TITLE_MAX_CHARS})"
            )),
            5,
        )
    } else if length > TITLE_MAX_CHARS {
        outcome.issue(
            AnalysisIssue::warning(format!(
                "Title is too long ({length} characters, recommended {TITLE_MIN_CHARS}-{TITLE_MAX_CHARS})"
            )),
            5,
        )
    } else {
        outcome
    };

    if profile.mentions_region(text) {
        outcome
    } else {
        outcome.recommend(format!(
            "Include \"{}\" or a city name in the title to target local searches",
            profile.country_name
        ))
    }
}

pub fn meta_description(page: &PageSource<'_>, _profile: &SiteProfile) -> RuleOutcome {
    let outcome = RuleOutcome::default();
    let Some(content) = description_content(page.html) else {
        return outcome.issue(AnalysisIssue::error("Missing meta description"), 15);
    };

    let length = content.trim().chars().count();
    if length < DESCRIPTION_MIN_CHARS {
        outcome.issue(
            AnalysisIssue::warning(format!(
                "Meta description is too short ({length} characters, recommended {DESCRIPTION_MIN_CHARS}-{DESCRIPTION_MAX_CHARS})"
            )),
            3,
        )
    } else if length > DESCRIPTION_MAX_CHARS {
        outcome.issue(
            AnalysisIssue::warning(format!(
                "Meta description is too long ({length} characters, recommended {DESCRIPTION_MIN_CHARS}-{DESCRIPTION_MAX_CHARS})"
            )),
            3,
        )
    } else {
        outcome
    }
}

pub fn headings(page: &PageSource<'_>, _profile: &SiteProfile) -> RuleOutcome {
    let outcome = RuleOutcome::default();
    match H1_RE.find_iter(page.html).count() {
        0 => outcome.issue(AnalysisIssue::error("Missing H1 heading"), 10),
        1 => outcome,
        count => outcome.issue(
            AnalysisIssue::warning(format!("Multiple H1 headings found ({count})")),
            5,
        ),
    }
}

pub fn image_alt(page: &PageSource<'_>, _profile: &SiteProfile) -> RuleOutcome {
    let missing = IMG_RE
        .find_iter(page.html)
        .filter(|tag| !ALT_ATTR_RE.is_match(tag.as_str()))
        .count();
    if missing == 0 {
        return RuleOutcome::default();
    }

    let missing = u32::try_from(missing).unwrap_or(u32::MAX);
    RuleOutcome::default().issue(
        AnalysisIssue::warning(format!("{missing} image(s) missing alt text")),
        missing.saturating_mul(ALT_PENALTY_PER_IMAGE).min(ALT_PENALTY_CAP),
    )
}

pub fn internal_links(page: &PageSource<'_>, _profile: &SiteProfile) -> RuleOutcome {
    let page_host = Url::parse(page.url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase));
    let count = HREF_RE
        .captures_iter(page.html)
        .filter_map(|captures| captures.get(1).or_else(|| captures.get(2)))
        .filter(|href| is_internal(href.as_str().trim(), page_host.as_deref()))
        .count();

    if count < MIN_INTERNAL_LINKS {
        RuleOutcome::default().recommend(format!(
            "Add more internal links (found {count}, aim for at least {MIN_INTERNAL_LINKS})"
        ))
    } else {
        RuleOutcome::default()
    }
}

/// Root-relative paths, or absolute links back to the analysed page's host.
fn is_internal(href: &str, page_host: Option<&str>) -> bool {
    if href.starts_with('/') && !href.starts_with("//") {
        return true;
    }
    let Some(page_host) = page_host else {
        return false;
    };
    Url::parse(href)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .and_then(|url| url.host_str().map(|host| host.eq_ignore_ascii_case(page_host)))
        .unwrap_or(false)
}

pub fn regional_keywords(page: &PageSource<'_>, profile: &SiteProfile) -> RuleOutcome {
    if profile.mentions_region(page.html) {
        RuleOutcome::default()
    } else {
        RuleOutcome::default().recommend(format!(
            "Mention the locations you serve (for example {}) to improve local relevance",
            profile
                .regional_keywords
                .iter()
                .take(3)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }
}

pub fn structured_data(page: &PageSource<'_>, _profile: &SiteProfile) -> RuleOutcome {
    if page.html.contains("application/ld+json") {
        return RuleOutcome::default();
    }
    RuleOutcome::default()
        .issue(AnalysisIssue::warning("No structured data found"), 5)
        .recommend("Add JSON-LD structured data (Organization, LocalBusiness) for rich results")
}

fn description_content(html: &str) -> Option<&str> {
    META_TAG_RE
        .find_iter(html)
        .map(|tag| tag.as_str())
        .filter(|tag| NAME_DESCRIPTION_RE.is_match(tag))
        .find_map(|tag| {
            let captures = CONTENT_ATTR_RE.captures(tag)?;
            captures.get(1).or_else(|| captures.get(2)).map(|m| m.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Severity;

    fn run(rule: Rule, html: &str) -> RuleOutcome {
        rule(
            &PageSource {
                url: "https://akibeks.co.ke/",
                html,
            },
            &SiteProfile::default(),
        )
    }

    #[test]
    fn title_missing_is_an_error() {
        let outcome = run(title, "<html><head></head></html>");
        assert_eq!(outcome.deduction, 20);
        assert_eq!(outcome.issues[0].severity, Severity::Error);
    }

    #[test]
    fn title_length_bounds() {
        let short = run(title, "<title>Nairobi builders</title>");
        assert_eq!(short.deduction, 5);
        assert!(short.issues[0].message.contains("too short"));
        assert!(short.recommendations.is_empty());

        let long = run(
            title,
            "<title>Akibeks Engineering Solutions - Building Contractors and Civil Engineers in Nairobi</title>",
        );
        assert_eq!(long.deduction, 5);
        assert!(long.issues[0].message.contains("too long"));

        let good = run(title, "<TITLE>Construction Company in Nairobi | Akibeks</TITLE>");
        assert_eq!(good.deduction, 0);
        assert!(good.issues.is_empty());
    }

    #[test]
    fn title_without_region_only_recommends() {
        let outcome = run(title, "<title>Quality Construction and Engineering Works</title>");
        assert_eq!(outcome.deduction, 0);
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.recommendations.len(), 1);
    }

    #[test]
    fn description_matches_any_attribute_order() {
        let text = "x".repeat(130);
        let html = format!(r#"<meta content="{text}" name="description">"#);
        let outcome = run(meta_description, &html);
        assert_eq!(outcome.deduction, 0, "{outcome:?}");

        let missing = run(meta_description, r#"<meta name="keywords" content="a">"#);
        assert_eq!(missing.deduction, 15);

        let short = run(meta_description, r#"<meta name='description' content='short'>"#);
        assert_eq!(short.deduction, 3);

        let long = format!(r#"<meta name="description" content="{}">"#, "y".repeat(161));
        assert_eq!(run(meta_description, &long).deduction, 3);
    }

    #[test]
    fn description_with_angle_bracket_in_content_is_found() {
        let text = format!("Homes > offices {}", "x".repeat(120));
        let html = format!(r#"<meta name="description" content="{text}"><title>t</title>"#);
        let outcome = run(meta_description, &html);
        assert_eq!(outcome, RuleOutcome::default());
    }

    #[test]
    fn description_name_must_match_exactly() {
        let text = "x".repeat(130);
        for name in [
            r#""description-extra""#,
            r#""descriptions""#,
            "description-extra",
        ] {
            let html = format!(r#"<meta name={name} content="{text}">"#);
            assert_eq!(run(meta_description, &html).deduction, 15, "{html}");
        }

        let bare = format!(r#"<meta name=description content="{text}"/>"#);
        assert_eq!(run(meta_description, &bare).deduction, 0);

        let data_attr = format!(r#"<meta data-name="description" content="{text}">"#);
        assert_eq!(run(meta_description, &data_attr).deduction, 15);
    }

    #[test]
    fn heading_counts() {
        assert_eq!(run(headings, "<h2>No h1</h2>").deduction, 10);
        assert_eq!(run(headings, "<h1 class=\"hero\">One</h1>").deduction, 0);
        let multiple = run(headings, "<h1>One</h1><H1>Two</H1>");
        assert_eq!(multiple.deduction, 5);
        assert_eq!(multiple.issues[0].severity, Severity::Warning);
    }

    #[test]
    fn alt_penalty_is_capped() {
        let two = run(image_alt, r#"<img src="a.jpg"><img src="b.jpg" alt="B"><img src="c.jpg" />"#);
        assert_eq!(two.deduction, 4);
        assert!(two.issues[0].message.starts_with("2 image"));

        let many = "<img src=\"x.jpg\">".repeat(8);
        assert_eq!(run(image_alt, &many).deduction, 10);
    }

    #[test]
    fn quoted_angle_brackets_stay_inside_image_tags() {
        let html = r#"<img title="a > b" src="a.jpg" alt="A"><img data-note=" alt=" src="b.jpg">"#;
        let outcome = run(image_alt, html);
        assert_eq!(outcome.deduction, 2);
        assert!(outcome.issues[0].message.starts_with("1 image"));
    }

    #[test]
    fn internal_links_ignore_protocol_relative() {
        let html = r#"<a href="/about">A</a><a href="//cdn.example.com/x">B</a><a href="https://x.com">C</a><a href='/contact'>D</a>"#;
        let outcome = run(internal_links, html);
        assert_eq!(outcome.deduction, 0);
        assert!(outcome.recommendations[0].contains("found 2"));

        let enough = r#"<a href="/">1</a><a href="/about">2</a><a class="x" href="/contact">3</a>"#;
        assert!(run(internal_links, enough).recommendations.is_empty());
    }

    #[test]
    fn absolute_links_to_the_same_host_are_internal() {
        let html = r#"<a title="x > y" href="https://AKIBEKS.co.ke/services">1</a>
            <a href="http://akibeks.co.ke/projects">2</a>
            <a href="/contact">3</a>
            <a href="https://elsewhere.test/">4</a>
            <a href="mailto:info@akibeks.co.ke">5</a>"#;
        assert!(run(internal_links, html).recommendations.is_empty());

        let foreign_page = internal_links(
            &PageSource {
                url: "not a url",
                html,
            },
            &SiteProfile::default(),
        );
        assert!(foreign_page.recommendations[0].contains("found 1"));
    }

    #[test]
    fn regional_keywords_are_case_insensitive() {
        assert!(run(regional_keywords, "<p>Serving MOMBASA</p>").recommendations.is_empty());
        assert_eq!(run(regional_keywords, "<p>Serving you</p>").recommendations.len(), 1);
    }

    #[test]
    fn structured_data_presence() {
        let present = run(
            structured_data,
            r#"<script type="application/ld+json">{}</script>"#,
        );
        assert_eq!(present, RuleOutcome::default());

        let absent = run(structured_data, "<p></p>");
        assert_eq!(absent.deduction, 5);
        assert_eq!(absent.recommendations.len(), 1);
    }
}
