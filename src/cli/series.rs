//! Shared arguments for `seriesfill series` and `seriesfill stats`

use chrono::NaiveDate;
use clap::Args;
use tracing::{debug, warn};

use seriesfill::loader::RecordLoader;
use seriesfill::services::{
    build_series, Aggregator, Config, ConfigService, DateCodec, DateEncoding, SeriesRequest,
};
use seriesfill::types::{Granularity, RawRecord, Result, Series};

/// Inputs and bucketing options
#[derive(Args, Debug)]
pub struct SeriesArgs {
    /// Input files or glob patterns (.json arrays, .jsonl/.ndjson lines)
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Bucket width: day, week (Sunday start) or month
    #[arg(short, long)]
    pub granularity: Option<Granularity>,

    /// First date of the range (defaults to the earliest record)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Last date of the range (defaults to the latest record)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Metric field to sum (repeatable; defaults to every numeric field)
    #[arg(short, long = "metric", value_name = "NAME")]
    pub metrics: Vec<String>,

    /// Date encoding of the inputs: auto, iso or day-first
    #[arg(long)]
    pub encoding: Option<DateEncoding>,

    /// Record field holding the date
    #[arg(long, value_name = "NAME")]
    pub date_field: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SeriesArgs {
    /// Load config and inputs, then build the series
    pub fn build(self) -> Result<(Series, Granularity)> {
        let config = load_config(ConfigService::new())?;
        let date_field = self
            .date_field
            .clone()
            .unwrap_or_else(|| config.date_field.clone());
        let records = RecordLoader::new()
            .with_date_field(date_field)
            .load(&self.inputs)?;

        let request = self.request(&config, &records)?;
        let series = build_series(&records, &request)?;
        Ok((series, request.granularity))
    }

    /// Merge flags over config. Flags win.
    fn request(&self, config: &Config, records: &[RawRecord]) -> Result<SeriesRequest> {
        let granularity = self.granularity.unwrap_or(config.granularity);
        let encoding = self.encoding.unwrap_or(config.encoding);
        let metrics = if self.metrics.is_empty() {
            config.metrics.clone()
        } else {
            self.metrics.clone()
        };

        let mut request = SeriesRequest::new(granularity)
            .with_encoding(encoding)
            .with_metrics(metrics);
        request.range = self.range(encoding, records)?;

        debug!(?request, "resolved series request");
        Ok(request)
    }

    /// Explicit bounds, with a missing side taken from the record extent
    fn range(
        &self,
        encoding: DateEncoding,
        records: &[RawRecord],
    ) -> Result<Option<(NaiveDate, NaiveDate)>> {
        // Range flags are always auto-detected, whatever the input encoding
        let flag_codec = DateCodec::new();
        let from = self.from.as_deref().map(|s| flag_codec.parse(s)).transpose()?;
        let to = self.to.as_deref().map(|s| flag_codec.parse(s)).transpose()?;

        Ok(match (from, to) {
            (Some(start), Some(end)) => Some((start, end)),
            (None, None) => None,
            (start, end) => {
                let extent = Aggregator::date_extent(&DateCodec::with_encoding(encoding), records)?;
                match (start, end, extent) {
                    (Some(start), None, Some((_, hi))) => Some((start, hi.max(start))),
                    (None, Some(end), Some((lo, _))) => Some((lo.min(end), end)),
                    (Some(d), None, None) | (None, Some(d), None) => Some((d, d)),
                    _ => None,
                }
            }
        })
    }
}

/// Config from the home directory; defaults when there is none
fn load_config(service: Result<ConfigService>) -> Result<Config> {
    match service {
        Ok(service) => service.load(),
        Err(e) => {
            warn!(error = %e, "no config directory; using defaults");
            Ok(Config::default())
        }
    }
}
