//! Rule-based issue detection over a table profile.

use crate::profile::TableProfile;

use super::issue::{IssueType, QualityIssue, Severity};

/// Derives ranked quality issues from a table profile.
///
/// Detection is a pure function of the profile: issues come out in a
/// deterministic order (missing-rate issues in column order, then outlier
/// issues, then cardinality issues), and running it twice on the same
/// profile yields the same sequence.
#[derive(Debug, Clone)]
pub struct QualityDetector {
    /// Missing rate above which a column is severely incomplete.
    high_missing_threshold: f64,
    /// Missing rate above which a column needs an imputation strategy.
    moderate_missing_threshold: f64,
    /// Outlier rate above which a numeric column is flagged.
    outlier_rate_threshold: f64,
    /// Unique rate above which a categorical column looks like an identifier.
    cardinality_threshold: f64,
}

impl QualityDetector {
    /// Create a detector with default thresholds.
    pub fn new() -> Self {
        Self {
            high_missing_threshold: 0.5,
            moderate_missing_threshold: 0.1,
            outlier_rate_threshold: 0.1,
            cardinality_threshold: 0.9,
        }
    }

    /// Detect quality issues in a table profile.
    pub fn detect(&self, profile: &TableProfile) -> Vec<QualityIssue> {
        let mut issues = Vec::new();

        for (column, col_profile) in &profile.column_profiles {
            if col_profile.missing_rate > self.high_missing_threshold {
                issues.push(QualityIssue {
                    issue_type: IssueType::HighMissingRate,
                    severity: Severity::High,
                    column: column.clone(),
                    message: format!(
                        "Column '{}' has a high missing rate of {:.1}%",
                        column,
                        col_profile.missing_rate * 100.0
                    ),
                    suggestion: "Consider dropping the column or imputing the missing values"
                        .to_string(),
                });
            } else if col_profile.missing_rate > self.moderate_missing_threshold {
                issues.push(QualityIssue {
                    issue_type: IssueType::ModerateMissingRate,
                    severity: Severity::Medium,
                    column: column.clone(),
                    message: format!(
                        "Column '{}' has {:.1}% missing values",
                        column,
                        col_profile.missing_rate * 100.0
                    ),
                    suggestion: "Consider an imputation strategy for the missing values"
                        .to_string(),
                });
            }
        }

        for (column, col_profile) in &profile.column_profiles {
            if let Some(ref numeric) = col_profile.numeric {
                if numeric.outliers_rate > self.outlier_rate_threshold {
                    issues.push(QualityIssue {
                        issue_type: IssueType::HighOutliers,
                        severity: Severity::Medium,
                        column: column.clone(),
                        message: format!(
                            "Column '{}' contains {:.1}% outliers",
                            column,
                            numeric.outliers_rate * 100.0
                        ),
                        suggestion: "Consider capping or removing the outlier values".to_string(),
                    });
                }
            }
        }

        for column in &profile.categorical_columns {
            let Some(col_profile) = profile.column_profiles.get(column) else {
                continue;
            };
            if col_profile.unique_rate > self.cardinality_threshold {
                issues.push(QualityIssue {
                    issue_type: IssueType::HighCardinality,
                    severity: Severity::Low,
                    column: column.clone(),
                    message: format!(
                        "Column '{}' has a high unique rate of {:.1}%",
                        column,
                        col_profile.unique_rate * 100.0
                    ),
                    suggestion:
                        "Likely an identifier column; use with caution as a model feature"
                            .to_string(),
                });
            }
        }

        issues
    }
}

impl Default for QualityDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::TableProfiler;
    use crate::table::{Table, Value};

    fn profile_of(table: &Table) -> TableProfile {
        TableProfiler::new().profile(table)
    }

    #[test]
    fn test_high_missing_rate_single_issue() {
        // 3 of 5 cells missing: rate 0.6 crosses the high threshold only.
        let table = Table::from_columns(vec![(
            "gappy".to_string(),
            vec![
                Value::Missing,
                Value::Missing,
                Value::Missing,
                1.0.into(),
                2.0.into(),
            ],
        )])
        .unwrap();

        let issues = QualityDetector::new().detect(&profile_of(&table));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, IssueType::HighMissingRate);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].column, "gappy");
        assert!(issues[0].message.contains("60.0%"));
    }

    #[test]
    fn test_moderate_missing_rate() {
        let mut values: Vec<Value> = (0..8).map(|i| Value::Number(i as f64)).collect();
        values.push(Value::Missing);
        values.push(Value::Number(9.0));
        let table = Table::from_columns(vec![("v".to_string(), values)]).unwrap();

        // 10% missing is exactly the threshold; no issue.
        assert!(QualityDetector::new().detect(&profile_of(&table)).is_empty());
    }

    #[test]
    fn test_outlier_issue_for_numeric_column() {
        // 1 outlier in 5 values: rate 0.2 > 0.1.
        let table = Table::from_columns(vec![(
            "v".to_string(),
            vec![1.0.into(), 2.0.into(), 3.0.into(), 4.0.into(), 100.0.into()],
        )])
        .unwrap();

        let issues = QualityDetector::new().detect(&profile_of(&table));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, IssueType::HighOutliers);
        assert!(issues[0].message.contains("20.0%"));
    }

    #[test]
    fn test_high_cardinality_for_categorical_only() {
        let ids: Vec<Value> = (0..10).map(|i| Value::Text(format!("id_{}", i))).collect();
        let nums: Vec<Value> = (0..10).map(|i| Value::Number(i as f64)).collect();
        let table = Table::from_columns(vec![
            ("id".to_string(), ids),
            ("n".to_string(), nums),
        ])
        .unwrap();

        let issues = QualityDetector::new().detect(&profile_of(&table));
        // The numeric column is all-unique too but only categorical columns
        // are checked for cardinality.
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, IssueType::HighCardinality);
        assert_eq!(issues[0].column, "id");
        assert_eq!(issues[0].severity, Severity::Low);
    }

    #[test]
    fn test_issue_order_is_missing_then_outliers_then_cardinality() {
        let gappy: Vec<Value> = vec![
            Value::Missing,
            Value::Missing,
            Value::Missing,
            "a".into(),
            "b".into(),
        ];
        let spiky: Vec<Value> =
            vec![1.0.into(), 2.0.into(), 3.0.into(), 4.0.into(), 100.0.into()];
        let ids: Vec<Value> = (0..5).map(|i| Value::Text(format!("id_{}", i))).collect();
        let table = Table::from_columns(vec![
            ("ids".to_string(), ids),
            ("gappy".to_string(), gappy),
            ("spiky".to_string(), spiky),
        ])
        .unwrap();

        let issues = QualityDetector::new().detect(&profile_of(&table));
        let kinds: Vec<IssueType> = issues.iter().map(|i| i.issue_type).collect();
        assert_eq!(
            kinds,
            vec![
                IssueType::HighMissingRate,
                IssueType::HighOutliers,
                IssueType::HighCardinality,
            ]
        );
    }

    #[test]
    fn test_detection_is_idempotent() {
        let table = crate::table::sample_table();
        let profile = profile_of(&table);
        let detector = QualityDetector::new();
        assert_eq!(detector.detect(&profile), detector.detect(&profile));
    }

    #[test]
    fn test_clean_profile_yields_no_issues() {
        let table = Table::from_columns(vec![(
            "v".to_string(),
            vec![1.0.into(), 2.0.into(), 3.0.into(), 4.0.into()],
        )])
        .unwrap();
        assert!(QualityDetector::new().detect(&profile_of(&table)).is_empty());
    }
}
