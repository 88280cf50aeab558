//! Data-quality issue types.

use serde::{Deserialize, Serialize};

/// Type of quality issue detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Missing rate above the high threshold.
    HighMissingRate,
    /// Missing rate above the moderate threshold.
    ModerateMissingRate,
    /// Outlier rate above threshold (numeric columns only).
    HighOutliers,
    /// Unique rate above threshold (categorical columns only).
    HighCardinality,
}

impl IssueType {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IssueType::HighMissingRate => "High Missing Rate",
            IssueType::ModerateMissingRate => "Moderate Missing Rate",
            IssueType::HighOutliers => "High Outliers",
            IssueType::HighCardinality => "High Cardinality",
        }
    }
}

/// Severity level of a quality issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth knowing, rarely blocking.
    Low,
    /// Should be reviewed before modeling.
    Medium,
    /// Should be addressed before modeling.
    High,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

/// A data-quality finding for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    /// Type of issue.
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Severity level.
    pub severity: Severity,
    /// Affected column name.
    pub column: String,
    /// Human-readable description embedding the offending rate.
    pub message: String,
    /// Actionable suggestion.
    pub suggestion: String,
}
