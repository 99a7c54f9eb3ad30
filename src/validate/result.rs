//! Validation result types

use serde::Serialize;
use std::fmt;

use super::quality::QualityReport;

/// Coarse quality classification of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Band {
    Red,
    Yellow,
    Green,
}

impl Band {
    pub fn from_score(score: i32) -> Self {
        if score >= 80 {
            Band::Green
        } else if score >= 60 {
            Band::Yellow
        } else {
            Band::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Red => "Red",
            Band::Yellow => "Yellow",
            Band::Green => "Green",
        }
    }
}

/// Severity of a quality issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Fail,
    Warn,
}

impl Severity {
    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::Fail => "FAIL",
            Severity::Warn => "WARN",
        }
    }
}

/// One graded quality finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub message: String,
}

impl QualityIssue {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fail,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            message: message.into(),
        }
    }
}

impl fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.prefix(), self.message)
    }
}

/// Outcome of validating a track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Structurally valid and scored at least 70
    pub passed: bool,
    pub validity_passed: bool,
    pub quality_score: i32,
    pub band: Band,
    pub validity_reasons: Vec<String>,
    /// Quality issues rendered with their `FAIL:`/`WARN:` prefix
    pub quality_issues: Vec<String>,
    /// Validity reasons followed by quality issues
    pub reasons: Vec<String>,
    pub report: QualityReport,
}

impl ValidationResult {
    pub(crate) fn new(validity_reasons: Vec<String>, report: QualityReport) -> Self {
        let validity_passed = validity_reasons.is_empty();
        let quality_score = report.score;
        let quality_issues: Vec<String> = report.issues.iter().map(|i| i.to_string()).collect();

        let mut reasons = validity_reasons.clone();
        for issue in &quality_issues {
            if !reasons.contains(issue) {
                reasons.push(issue.clone());
            }
        }

        Self {
            passed: validity_passed && quality_score >= crate::consts::PASS_SCORE,
            validity_passed,
            quality_score,
            band: Band::from_score(quality_score),
            validity_reasons,
            quality_issues,
            reasons,
            report,
        }
    }
}
