//! Period sequencing: every bucket start covering a date range, no gaps

use chrono::{Days, Months, NaiveDate};
use std::iter::FusedIterator;

use crate::services::BucketAligner;
use crate::types::{Granularity, Result, SeriesError};

/// Lazy, finite iterator over bucket starts.
///
/// Cloning yields an independent iterator resuming from the same cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSequence {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
    granularity: Granularity,
}

impl PeriodSequence {
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }
}

impl Iterator for PeriodSequence {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.cursor.filter(|c| *c <= self.end)?;
        // None at the end of the representable calendar stops the sequence
        self.cursor = match self.granularity {
            Granularity::Day => current.succ_opt(),
            Granularity::Week => current.checked_add_days(Days::new(7)),
            Granularity::Month => current.checked_add_months(Months::new(1)),
        };
        Some(current)
    }
}

impl FusedIterator for PeriodSequence {}

/// Generates bucket sequences over date ranges
pub struct PeriodSequencer;

impl PeriodSequencer {
    /// Bucket starts from the bucket containing `start` through `end`.
    ///
    /// The first bucket may begin before `start`.
    pub fn generate(
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
    ) -> Result<PeriodSequence> {
        if start > end {
            return Err(SeriesError::InvalidRange { start, end });
        }

        Ok(PeriodSequence {
            cursor: Some(BucketAligner::align(start, granularity)),
            end,
            granularity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn keys(seq: PeriodSequence) -> Vec<String> {
        seq.map(|d| d.format("%Y-%m-%d").to_string()).collect()
    }

    #[test]
    fn test_day_range_inclusive() {
        let seq =
            PeriodSequencer::generate(date(2024, 3, 1), date(2024, 3, 10), Granularity::Day)
                .unwrap();
        let out = keys(seq);
        assert_eq!(out.len(), 10);
        assert_eq!(out.first().unwrap(), "2024-03-01");
        assert_eq!(out.last().unwrap(), "2024-03-10");
    }

    #[test]
    fn test_single_day_range() {
        let d = date(2024, 3, 1);
        let out: Vec<_> = PeriodSequencer::generate(d, d, Granularity::Day)
            .unwrap()
            .collect();
        assert_eq!(out, vec![d]);
    }

    #[test]
    fn test_month_range_snaps_first_bucket() {
        let seq =
            PeriodSequencer::generate(date(2024, 1, 20), date(2024, 3, 5), Granularity::Month)
                .unwrap();
        assert_eq!(keys(seq), vec!["2024-01-01", "2024-02-01", "2024-03-01"]);
    }

    #[test]
    fn test_month_uses_calendar_months() {
        let seq =
            PeriodSequencer::generate(date(2023, 11, 30), date(2024, 4, 1), Granularity::Month)
                .unwrap();
        assert_eq!(
            keys(seq),
            vec![
                "2023-11-01",
                "2023-12-01",
                "2024-01-01",
                "2024-02-01",
                "2024-03-01",
                "2024-04-01"
            ]
        );
    }

    #[test]
    fn test_week_range_sunday_anchored() {
        // Wed 2024-03-06 .. Mon 2024-03-18
        let seq =
            PeriodSequencer::generate(date(2024, 3, 6), date(2024, 3, 18), Granularity::Week)
                .unwrap();
        assert_eq!(keys(seq), vec!["2024-03-03", "2024-03-10", "2024-03-17"]);
    }

    #[test]
    fn test_week_end_before_next_sunday_excluded() {
        // Ends Saturday; next cursor (Sunday 03-10) is past the end
        let seq =
            PeriodSequencer::generate(date(2024, 3, 3), date(2024, 3, 9), Granularity::Week)
                .unwrap();
        assert_eq!(keys(seq), vec!["2024-03-03"]);
    }

    #[test]
    fn test_inverted_range_errors() {
        let err =
            PeriodSequencer::generate(date(2024, 3, 10), date(2024, 3, 1), Granularity::Day)
                .unwrap_err();
        assert!(matches!(err, SeriesError::InvalidRange { .. }));
    }

    #[test]
    fn test_restartable_via_clone() {
        let mut seq =
            PeriodSequencer::generate(date(2024, 3, 1), date(2024, 3, 3), Granularity::Day)
                .unwrap();
        seq.next();
        let resumed = seq.clone();
        assert_eq!(seq.count(), 2);
        assert_eq!(resumed.count(), 2);
    }

    #[test]
    fn test_terminates_at_max_date() {
        let seq =
            PeriodSequencer::generate(NaiveDate::MAX, NaiveDate::MAX, Granularity::Day).unwrap();
        assert_eq!(seq.count(), 1);
    }

    #[test]
    fn test_week_at_min_date() {
        let out: Vec<_> =
            PeriodSequencer::generate(NaiveDate::MIN, NaiveDate::MIN, Granularity::Week)
                .unwrap()
                .collect();
        assert_eq!(out, vec![NaiveDate::MIN]);
    }

    #[test]
    fn test_multi_year_day_range_terminates() {
        let count =
            PeriodSequencer::generate(date(2000, 1, 1), date(2009, 12, 31), Granularity::Day)
                .unwrap()
                .count();
        assert_eq!(count, 3653);
    }

    fn any_range() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
        (0i64..20_000, 0i64..400).prop_map(|(offset, span)| {
            let start = date(1970, 1, 1) + chrono::Duration::days(offset);
            (start, start + chrono::Duration::days(span))
        })
    }

    fn any_granularity() -> impl Strategy<Value = Granularity> {
        prop_oneof![
            Just(Granularity::Day),
            Just(Granularity::Week),
            Just(Granularity::Month),
        ]
    }

    proptest! {
        #[test]
        fn sequence_is_strictly_increasing_and_aligned(
            (start, end) in any_range(),
            g in any_granularity(),
        ) {
            let out: Vec<_> = PeriodSequencer::generate(start, end, g).unwrap().collect();
            prop_assert!(!out.is_empty());
            prop_assert!(out[0] <= start);
            prop_assert!(*out.last().unwrap() <= end);
            for pair in out.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for d in &out {
                prop_assert_eq!(BucketAligner::align(*d, g), *d);
            }
        }

        #[test]
        fn sequence_covers_every_date_in_range(
            (start, end) in any_range(),
            g in any_granularity(),
        ) {
            let out: Vec<_> = PeriodSequencer::generate(start, end, g).unwrap().collect();
            let mut d = start;
            while d <= end {
                prop_assert!(out.contains(&BucketAligner::align(d, g)));
                d = d.succ_opt().unwrap();
            }
        }
    }
}
