use chrono::NaiveDate;
use thiserror::Error;

/// seriesfill error types
#[derive(Error, Debug)]
pub enum SeriesError {
    /// Record date matches neither supported encoding, or is not a real calendar date
    #[error("invalid date '{input}': {reason}")]
    DateParse { input: String, reason: String },

    /// Range start falls after range end
    #[error("invalid range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Requested metric holds something other than a finite number
    #[error("invalid value for metric '{field}' on record dated '{date}': {value}")]
    InvalidMetric {
        field: String,
        date: String,
        value: String,
    },

    /// Failed to parse an input file
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl SeriesError {
    pub(crate) fn date_parse(input: &str, reason: impl Into<String>) -> Self {
        Self::DateParse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for seriesfill
pub type Result<T> = std::result::Result<T, SeriesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SeriesError::Parse("invalid json".into());
        assert_eq!(err.to_string(), "parse error: invalid json");
    }

    #[test]
    fn test_date_parse_display() {
        let err = SeriesError::date_parse("13-13-2024", "month out of range");
        assert_eq!(
            err.to_string(),
            "invalid date '13-13-2024': month out of range"
        );
    }

    #[test]
    fn test_invalid_range_display() {
        let err = SeriesError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "invalid range: 2024-03-10 is after 2024-03-01"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SeriesError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
