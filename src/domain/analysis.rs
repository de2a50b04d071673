//! Page analysis results.

use serde::Serialize;

use crate::domain::types::Severity;

pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisIssue {
    pub severity: Severity,
    pub message: String,
}

impl AnalysisIssue {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub score: u32,
    pub issues: Vec<AnalysisIssue>,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Score left after subtracting `deductions` from a perfect score, floored at zero.
    pub fn clamp_score(deductions: u32) -> u32 {
        MAX_SCORE.saturating_sub(deductions)
    }
}
