//! Series assembly: zip the full period list with sparse bucket sums

use chrono::NaiveDate;

use crate::types::{Bucket, BucketKey, BucketMap, MetricFields, MetricSums, Series};

/// Builds gap-free series from periods and aggregated buckets
pub struct SeriesAssembler;

impl SeriesAssembler {
    /// One row per period, in period order.
    ///
    /// Periods missing from `bucket_map` get zero for every metric field;
    /// present buckets are also topped up with zeros for any field they lack.
    pub fn assemble<I>(periods: I, bucket_map: &BucketMap, metric_fields: &MetricFields) -> Series
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let buckets = periods
            .into_iter()
            .map(|period| {
                let key = BucketKey::from_date(period);
                let mut metrics: MetricSums = bucket_map.get(&key).cloned().unwrap_or_default();
                for field in metric_fields {
                    metrics.entry(field.clone()).or_insert(0.0);
                }
                Bucket { key, metrics }
            })
            .collect();

        Series::from_buckets(buckets)
    }
}
