//! Aggregator service: sum record metrics into calendar buckets

use chrono::NaiveDate;

use crate::services::{BucketAligner, DateCodec};
use crate::types::{
    BucketMap, Granularity, MetricFields, MetricSums, RawRecord, Result, SeriesError,
};

/// Aggregator for bucketing raw records
pub struct Aggregator;

impl Aggregator {
    /// Sum `metric_fields` per bucket, detecting each record's date encoding.
    ///
    /// All-or-nothing: the first bad date or metric value aborts the call.
    pub fn aggregate<'a, I>(
        records: I,
        granularity: Granularity,
        metric_fields: &MetricFields,
    ) -> Result<BucketMap>
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        Self::aggregate_with(&DateCodec::new(), records, granularity, metric_fields)
    }

    /// Same as [`Aggregator::aggregate`] with an explicit date codec
    pub fn aggregate_with<'a, I>(
        codec: &DateCodec,
        records: I,
        granularity: Granularity,
        metric_fields: &MetricFields,
    ) -> Result<BucketMap>
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let mut buckets = BucketMap::new();

        for record in records {
            let date = codec.parse(&record.date)?;
            let key = codec.format(BucketAligner::align(date, granularity));

            // Validate before touching the map so a bad record leaves no trace
            let mut contribution = Vec::with_capacity(metric_fields.len());
            for field in metric_fields {
                let value = match record.metric(field) {
                    None => 0.0,
                    Some(raw) => raw.as_finite().ok_or_else(|| SeriesError::InvalidMetric {
                        field: field.clone(),
                        date: record.date.clone(),
                        value: raw.to_string(),
                    })?,
                };
                contribution.push((field, value));
            }

            let sums = buckets.entry(key).or_insert_with(|| {
                metric_fields
                    .iter()
                    .map(|f| (f.clone(), 0.0))
                    .collect::<MetricSums>()
            });
            for (field, value) in contribution {
                *sums.entry(field.clone()).or_insert(0.0) += value;
            }
        }

        Ok(buckets)
    }

    /// Earliest and latest record dates, or `None` for no records
    pub fn date_extent<'a, I>(codec: &DateCodec, records: I) -> Result<Option<(NaiveDate, NaiveDate)>>
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let mut extent: Option<(NaiveDate, NaiveDate)> = None;

        for record in records {
            let date = codec.parse(&record.date)?;
            extent = Some(match extent {
                None => (date, date),
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
            });
        }

        Ok(extent)
    }

    /// Every field holding a number on at least one record
    pub fn numeric_fields<'a, I>(records: I) -> MetricFields
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        records
            .into_iter()
            .flat_map(|r| r.metrics.iter())
            .filter(|(_, v)| v.is_number())
            .map(|(name, _)| name.clone())
            .collect()
    }
}
