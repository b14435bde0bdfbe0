//! Raw input records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A metric value exactly as it arrived from the data source.
///
/// Numbers deserialize into `Number`; anything else (strings, booleans,
/// nulls, nested objects) is kept in `Other` so the aggregator can reject
/// it instead of the transport silently dropping it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Other(serde_json::Value),
}

impl MetricValue {
    /// Numeric value, if finite
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<serde_json::Value> for MetricValue {
    fn from(value: serde_json::Value) -> Self {
        match value.as_f64() {
            Some(v) if value.is_number() => Self::Number(v),
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", v),
            Self::Other(v) => write!(f, "{}", v),
        }
    }
}

/// One unaggregated record, e.g. a single payment or ticket sale.
///
/// Serialized shape: `{ "date": "2024-03-05", "revenue": 100, ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, MetricValue>,
}

impl RawRecord {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Builder-style metric setter
    pub fn with_metric(mut self, name: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(name.into(), value.into());
        self
    }

    pub fn metric(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.get(name)
    }
}
