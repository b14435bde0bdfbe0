//! Services for date handling, aggregation and series assembly

pub mod aggregator;
pub mod assembler;
pub mod bucket;
pub mod config;
pub mod date_codec;
pub mod pipeline;
pub mod sequencer;

pub use aggregator::Aggregator;
pub use assembler::SeriesAssembler;
pub use bucket::BucketAligner;
pub use config::{Config, ConfigService};
pub use date_codec::{DateCodec, DateEncoding};
pub use pipeline::{build_series, SeriesRequest};
pub use sequencer::{PeriodSequence, PeriodSequencer};
