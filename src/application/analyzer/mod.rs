//! Heuristic page SEO analysis over raw HTML text.

pub mod rules;

use std::sync::Arc;

use metrics::{counter, histogram};
use tracing::info;

use crate::application::profile::SiteProfile;
use crate::domain::analysis::AnalysisResult;

use self::rules::{PageSource, RULES};

const METRIC_ANALYSIS: &str = "seo_analysis_total";
const METRIC_ANALYSIS_SCORE: &str = "seo_analysis_score";

#[derive(Clone)]
pub struct PageAnalyzer {
    profile: Arc<SiteProfile>,
}

impl PageAnalyzer {
    pub fn new(profile: Arc<SiteProfile>) -> Self {
        Self { profile }
    }

    pub fn analyze(&self, url: &str, html: &str) -> AnalysisResult {
        let result = analyze_page(&self.profile, url, html);

        info!(
            target = "akibeks_seo::analyzer",
            url,
            score = result.score,
            issues = result.issues.len(),
            recommendations = result.recommendations.len(),
            "page analysed"
        );
        counter!(METRIC_ANALYSIS).increment(1);
        histogram!(METRIC_ANALYSIS_SCORE).record(f64::from(result.score));

        result
    }
}

/// Run every rule in order and sum their deductions.
pub fn analyze_page(profile: &SiteProfile, url: &str, html: &str) -> AnalysisResult {
    let page = PageSource { url, html };
    let mut deductions = 0u32;
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    for (_name, rule) in RULES {
        let outcome = rule(&page, profile);
        deductions = deductions.saturating_add(outcome.deduction);
        issues.extend(outcome.issues);
        recommendations.extend(outcome.recommendations);
    }

    AnalysisResult {
        score: AnalysisResult::clamp_score(deductions),
        issues,
        recommendations,
    }
}
