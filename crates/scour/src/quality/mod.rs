//! Quality issue detection over table profiles.

mod detector;
mod issue;

pub use detector::QualityDetector;
pub use issue::{IssueType, QualityIssue, Severity};
