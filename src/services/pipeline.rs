//! End-to-end series building: the call boundary around the engine

use chrono::NaiveDate;
use tracing::debug;

use crate::services::date_codec::DateEncoding;
use crate::services::{Aggregator, DateCodec, PeriodSequencer, SeriesAssembler};
use crate::types::{Granularity, MetricFields, RawRecord, Result, Series, SeriesError};

/// Key every output row uses for its bucket date
pub const DATE_KEY: &str = "date";

/// Parameters for one series build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesRequest {
    /// Inclusive date range; `None` uses the extent of the records
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub granularity: Granularity,
    /// Metrics to sum; empty means every numeric field in the records
    pub metrics: MetricFields,
    pub encoding: DateEncoding,
}

impl SeriesRequest {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            ..Self::default()
        }
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.range = Some((start, end));
        self
    }

    pub fn with_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = metrics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_encoding(mut self, encoding: DateEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.metrics.contains(DATE_KEY) {
            return Err(SeriesError::Config(format!(
                "'{}' is reserved for the bucket date and cannot be a metric",
                DATE_KEY
            )));
        }
        if let Some((start, end)) = self.range {
            if start > end {
                return Err(SeriesError::InvalidRange { start, end });
            }
        }
        Ok(())
    }
}

/// Aggregate `records` and gap-fill them over the requested range
pub fn build_series(records: &[RawRecord], request: &SeriesRequest) -> Result<Series> {
    request.validate()?;

    let codec = DateCodec::with_encoding(request.encoding);
    let metrics = if request.metrics.is_empty() {
        // A record field named like the row key never becomes a metric
        let mut discovered = Aggregator::numeric_fields(records);
        discovered.remove(DATE_KEY);
        discovered
    } else {
        request.metrics.clone()
    };

    let range = match request.range {
        Some(range) => Some(range),
        None => Aggregator::date_extent(&codec, records)?,
    };

    let bucket_map = Aggregator::aggregate_with(&codec, records, request.granularity, &metrics)?;

    let Some((start, end)) = range else {
        debug!("no range and no records; returning empty series");
        return Ok(Series::default());
    };

    let periods = PeriodSequencer::generate(start, end, request.granularity)?;
    let series = SeriesAssembler::assemble(periods, &bucket_map, &metrics);

    debug!(
        records = records.len(),
        buckets_with_data = bucket_map.len(),
        rows = series.len(),
        granularity = %request.granularity,
        %start,
        %end,
        "built series"
    );

    Ok(series)
}
