//! Bucketed series types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Bucket width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Column header used by the table renderer
    pub fn column_label(&self) -> &'static str {
        match self {
            Self::Day => "Date",
            Self::Week => "Week of",
            Self::Month => "Month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Day),
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            other => Err(format!(
                "unknown granularity '{}' (expected day, week or month)",
                other
            )),
        }
    }
}

/// Canonical `YYYY-MM-DD` identity of a bucket's start date.
///
/// Keys sort lexicographically in calendar order for four-digit years.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketKey(String);

impl BucketKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metric names requested from an aggregation
pub type MetricFields = BTreeSet<String>;

/// Summed metrics for one bucket, keyed by metric name
pub type MetricSums = BTreeMap<String, f64>;

/// Sparse aggregation result: only buckets that received at least one record
pub type BucketMap = BTreeMap<BucketKey, MetricSums>;

/// One row of the output series.
///
/// Serialized shape: `{ "date": "2024-03-03", "revenue": 150.0, ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(rename = "date")]
    pub key: BucketKey,
    #[serde(flatten)]
    pub metrics: MetricSums,
}

impl Bucket {
    pub fn metric(&self, name: &str) -> f64 {
        self.metrics.get(name).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.values().all(|v| *v == 0.0)
    }
}

/// Ordered, gap-free sequence of buckets (ascending by key)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    buckets: Vec<Bucket>,
}

impl Series {
    pub(crate) fn from_buckets(buckets: Vec<Bucket>) -> Self {
        Self { buckets }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bucket> {
        self.buckets.iter()
    }

    pub fn into_buckets(self) -> Vec<Bucket> {
        self.buckets
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Bucket;
    type IntoIter = std::slice::Iter<'a, Bucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Summary figures over an assembled series
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeriesStats {
    pub bucket_count: usize,
    /// Buckets with at least one non-zero metric
    pub active_buckets: usize,
    pub totals: MetricSums,
    /// Highest bucket per metric; earliest bucket wins ties
    pub peaks: BTreeMap<String, (BucketKey, f64)>,
}

impl SeriesStats {
    pub fn from_series(series: &Series) -> Self {
        let mut stats = Self {
            bucket_count: series.len(),
            ..Self::default()
        };

        for bucket in series {
            if !bucket.is_empty() {
                stats.active_buckets += 1;
            }

            for (name, value) in &bucket.metrics {
                *stats.totals.entry(name.clone()).or_insert(0.0) += value;

                match stats.peaks.get(name) {
                    Some((_, peak)) if *value <= *peak => {}
                    _ => {
                        stats
                            .peaks
                            .insert(name.clone(), (bucket.key.clone(), *value));
                    }
                }
            }
        }

        stats
    }
}
