//! Gap-free, calendar-aligned series from sparse records.
//!
//! Records carrying a date and numeric metrics are summed into day, week
//! (Sunday-anchored) or month buckets, then laid over every period of a
//! date range so the result has one row per bucket and no holes.
//!
//! ```
//! use chrono::NaiveDate;
//! use seriesfill::services::{build_series, SeriesRequest};
//! use seriesfill::types::{Granularity, RawRecord};
//!
//! let records = vec![
//!     RawRecord::new("2024-03-05").with_metric("revenue", 100.0),
//!     RawRecord::new("05-03-2024").with_metric("revenue", 50.0),
//! ];
//! let request = SeriesRequest::new(Granularity::Day)
//!     .with_range(
//!         NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
//!     )
//!     .with_metrics(["revenue"]);
//!
//! let series = build_series(&records, &request).unwrap();
//! let revenue: Vec<f64> = series.iter().map(|b| b.metric("revenue")).collect();
//! assert_eq!(revenue, vec![0.0, 150.0, 0.0]);
//! ```

pub mod loader;
pub mod services;
pub mod types;
