//! Date codec for record dates
//!
//! Accepts two textual encodings and reduces both to a timezone-naive
//! calendar date:
//! - ISO-8601: `2024-03-05`, `2024-03-05T14:30:00Z`, `2024-03-05T14:30+05:30`,
//!   `2024-03-05 14:30:00`
//! - Day-first compact: `05-03-2024`
//!
//! Time-of-day and UTC offsets are discarded; the calendar date is taken
//! as written.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::types::{BucketKey, Result, SeriesError};

/// Time formats accepted after the `T`/space separator of an ISO timestamp
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Zoned timestamps RFC 3339 rejects, e.g. minutes-only `2024-03-05T14:30Z`
const ZONED_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
];

fn iso_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})(?:[T ](.+))?$").expect("valid regex")
    })
}

fn day_first_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").expect("valid regex"))
}

/// Which encoding a data source uses for its dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateEncoding {
    /// Detect from the length of the first `-` separated segment
    #[default]
    Auto,
    Iso,
    DayFirst,
}

impl fmt::Display for DateEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Iso => "iso",
            Self::DayFirst => "day-first",
        })
    }
}

impl FromStr for DateEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "iso" | "iso8601" | "iso-8601" => Ok(Self::Iso),
            "day-first" | "dayfirst" | "dmy" => Ok(Self::DayFirst),
            other => Err(format!(
                "unknown date encoding '{}' (expected auto, iso or day-first)",
                other
            )),
        }
    }
}

/// Parses record dates and formats bucket keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateCodec {
    encoding: DateEncoding,
}

impl DateCodec {
    /// Codec that detects the encoding of every input
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec bound to a declared encoding; no detection is attempted
    pub fn with_encoding(encoding: DateEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> DateEncoding {
        self.encoding
    }

    /// Parse a record date into a calendar date
    pub fn parse(&self, input: &str) -> Result<NaiveDate> {
        let trimmed = input.trim();
        match self.encoding {
            DateEncoding::Iso => parse_iso(trimmed),
            DateEncoding::DayFirst => parse_day_first(trimmed),
            DateEncoding::Auto => match trimmed.split('-').next().map(str::len) {
                Some(2) => parse_day_first(trimmed),
                Some(4) => parse_iso(trimmed),
                _ => Err(SeriesError::date_parse(input, "unrecognized date format")),
            },
        }
    }

    /// Zero-padded `YYYY-MM-DD` key for a date
    pub fn format(&self, date: NaiveDate) -> BucketKey {
        BucketKey::from_date(date)
    }
}

fn parse_iso(input: &str) -> Result<NaiveDate> {
    let caps = iso_re()
        .captures(input)
        .ok_or_else(|| SeriesError::date_parse(input, "expected an ISO-8601 date"))?;

    let date = ymd(input, &caps[1], &caps[2], &caps[3])?;

    // Validate the time part, then drop it
    if caps.get(4).is_some() && !is_valid_timestamp(input) {
        return Err(SeriesError::date_parse(input, "unrecognized time of day"));
    }

    Ok(date)
}

fn parse_day_first(input: &str) -> Result<NaiveDate> {
    let caps = day_first_re()
        .captures(input)
        .ok_or_else(|| SeriesError::date_parse(input, "expected a DD-MM-YYYY date"))?;

    ymd(input, &caps[3], &caps[2], &caps[1])
}

fn ymd(input: &str, year: &str, month: &str, day: &str) -> Result<NaiveDate> {
    let year: i32 = year
        .parse()
        .map_err(|_| SeriesError::date_parse(input, "invalid year"))?;
    let month: u32 = month
        .parse()
        .map_err(|_| SeriesError::date_parse(input, "invalid month"))?;
    let day: u32 = day
        .parse()
        .map_err(|_| SeriesError::date_parse(input, "invalid day"))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| SeriesError::date_parse(input, "not a valid calendar date"))
}

fn is_valid_timestamp(input: &str) -> bool {
    DateTime::parse_from_rfc3339(input).is_ok()
        || ZONED_TIMESTAMP_FORMATS
            .iter()
            .any(|fmt| DateTime::parse_from_str(input, fmt).is_ok())
        || NAIVE_TIMESTAMP_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(input, fmt).is_ok())
}
