//! Bucket alignment: map a date to the first day of its bucket

use chrono::{Datelike, Days, NaiveDate};

use crate::types::Granularity;

/// Aligns calendar dates to bucket starts.
///
/// Weeks start on Sunday. Months start on the 1st.
pub struct BucketAligner;

impl BucketAligner {
    /// Start date of the bucket containing `date`.
    ///
    /// A week whose Sunday precedes the calendar clamps to `NaiveDate::MIN`.
    pub fn align(date: NaiveDate, granularity: Granularity) -> NaiveDate {
        let back = match granularity {
            Granularity::Day => return date,
            Granularity::Week => date.weekday().num_days_from_sunday(),
            Granularity::Month => date.day0(),
        };
        date.checked_sub_days(Days::new(u64::from(back)))
            .unwrap_or(NaiveDate::MIN)
    }
}
