//! Per-column statistical profiling.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::table::Value;

/// Dtype classification for a profiled column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DtypeCategory {
    /// All non-missing cells are numbers.
    Numeric,
    /// Text or mixed cell types.
    Categorical,
    /// All non-missing cells are date/time values.
    Datetime,
    /// All non-missing cells are booleans.
    Boolean,
}

impl DtypeCategory {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DtypeCategory::Numeric => "numeric",
            DtypeCategory::Categorical => "categorical",
            DtypeCategory::Datetime => "datetime",
            DtypeCategory::Boolean => "boolean",
        }
    }
}

/// Numeric descriptive statistics over the non-missing values of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericProfile {
    pub mean: f64,
    /// Sample standard deviation (ddof = 1); 0 for a single value.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// First quartile (25th percentile, linear interpolation).
    pub q1: f64,
    /// Third quartile (75th percentile, linear interpolation).
    pub q3: f64,
    /// Values outside the Tukey fences.
    pub outliers_count: usize,
    /// `outliers_count / count` over non-missing values.
    pub outliers_rate: f64,
}

impl NumericProfile {
    /// Calculate the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lower and upper Tukey fences for the given IQR multiplier.
    pub fn outlier_fences(&self, multiplier: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - multiplier * iqr, self.q3 + multiplier * iqr)
    }

    /// Check if a value falls outside the fences.
    pub fn is_outlier(&self, value: f64, multiplier: f64) -> bool {
        let (lower, upper) = self.outlier_fences(multiplier);
        value < lower || value > upper
    }
}

/// Profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub dtype_category: DtypeCategory,
    /// Number of non-missing values.
    pub count: usize,
    /// Number of missing values.
    pub missing: usize,
    /// `missing / total` (0 for an empty column).
    pub missing_rate: f64,
    /// Number of distinct non-missing values.
    pub unique: usize,
    /// `unique / total` (0 for an empty column).
    pub unique_rate: f64,
    /// Present iff the column is numeric with at least one value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericProfile>,
    /// The 10 most frequent values, descending, for low-cardinality
    /// non-numeric columns. Keys are stringified values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_values: Option<IndexMap<String, usize>>,
}

/// Computes descriptive statistics and a dtype classification for one column.
#[derive(Debug, Clone)]
pub struct ColumnProfiler {
    /// Maximum unique values for `top_values` to be reported.
    categorical_threshold: usize,
    /// Maximum entries in `top_values`.
    top_values_limit: usize,
    /// Outlier detection multiplier for the IQR method.
    iqr_multiplier: f64,
}

impl ColumnProfiler {
    /// Create a profiler with default settings.
    pub fn new() -> Self {
        Self {
            categorical_threshold: 20,
            top_values_limit: 10,
            iqr_multiplier: 1.5,
        }
    }

    /// Profile one column. Pure function of the input values.
    pub fn profile(&self, values: &[Value]) -> ColumnProfile {
        let total = values.len();
        let count = values.iter().filter(|v| !v.is_missing()).count();
        let missing = total - count;

        // Frequencies in first-encounter order; keys stringified.
        let mut value_counts: IndexMap<String, usize> = IndexMap::new();
        for value in values.iter().filter(|v| !v.is_missing()) {
            *value_counts.entry(value.to_string()).or_insert(0) += 1;
        }
        let unique = value_counts.len();

        let (missing_rate, unique_rate) = if total == 0 {
            (0.0, 0.0)
        } else {
            (missing as f64 / total as f64, unique as f64 / total as f64)
        };

        let dtype_category = dtype_of(values);

        let numeric = if dtype_category == DtypeCategory::Numeric && count > 0 {
            let numbers: Vec<f64> = values.iter().filter_map(Value::as_number).collect();
            Some(self.numeric_profile(&numbers))
        } else {
            None
        };

        let top_values = if dtype_category != DtypeCategory::Numeric
            && unique > 0
            && unique <= self.categorical_threshold
        {
            // Stable sort keeps first-encounter order among ties.
            let mut entries: Vec<(String, usize)> = value_counts.into_iter().collect();
            entries.sort_by(|a, b| b.1.cmp(&a.1));
            Some(entries.into_iter().take(self.top_values_limit).collect())
        } else {
            None
        };

        ColumnProfile {
            dtype_category,
            count,
            missing,
            missing_rate,
            unique,
            unique_rate,
            numeric,
            top_values,
        }
    }

    fn numeric_profile(&self, values: &[f64]) -> NumericProfile {
        let count = values.len();
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = sample_std(&sorted, mean);
        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);

        let iqr = q3 - q1;
        let lower = q1 - self.iqr_multiplier * iqr;
        let upper = q3 + self.iqr_multiplier * iqr;
        let outliers_count = sorted.iter().filter(|&&v| v < lower || v > upper).count();

        NumericProfile {
            mean,
            std,
            min: sorted[0],
            max: sorted[count - 1],
            median,
            q1,
            q3,
            outliers_count,
            outliers_rate: outliers_count as f64 / count as f64,
        }
    }
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a column's dtype from its cell types.
///
/// Uniform non-missing cell types map to their category; mixed columns are
/// categorical. A column with no non-missing cells classifies as numeric,
/// matching how an all-missing numeric source column presents.
pub(crate) fn dtype_of(values: &[Value]) -> DtypeCategory {
    let mut category: Option<DtypeCategory> = None;
    for value in values {
        let cell = match value {
            Value::Number(_) => DtypeCategory::Numeric,
            Value::Bool(_) => DtypeCategory::Boolean,
            Value::DateTime(_) => DtypeCategory::Datetime,
            Value::Text(_) => DtypeCategory::Categorical,
            Value::Missing => continue,
        };
        match category {
            None => category = Some(cell),
            Some(seen) if seen == cell => {}
            Some(_) => return DtypeCategory::Categorical,
        }
    }
    category.unwrap_or(DtypeCategory::Numeric)
}

/// Sample standard deviation (ddof = 1). Zero for fewer than two values.
fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Quantile with linear interpolation over a sorted slice.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}
