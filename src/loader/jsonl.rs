//! JSON Lines exports: one record object per line

use crate::types::{RawRecord, Result, SeriesError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{into_record, RecordFormat, RecordObject};

/// Parser for `.jsonl` / `.ndjson` files
pub struct JsonLinesFormat;

impl JsonLinesFormat {
    /// Parse one line in place; `None` for blank lines
    fn parse_line(line: &mut [u8]) -> std::result::Result<Option<RecordObject>, String> {
        if line.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        simd_json::from_slice(line)
            .map(Some)
            .map_err(|e| e.to_string())
    }
}

impl RecordFormat for JsonLinesFormat {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn extensions(&self) -> &[&str] {
        &["jsonl", "ndjson"]
    }

    fn parse_file(&self, path: &Path, date_field: &str) -> Result<Vec<RawRecord>> {
        let reader = BufReader::new(File::open(path)?);
        let mut records = Vec::new();

        for (index, line) in reader.split(b'\n').enumerate() {
            let location = format!("{}:{}", path.display(), index + 1);
            let mut bytes = line?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }

            let object = Self::parse_line(&mut bytes)
                .map_err(|e| SeriesError::Parse(format!("{}: {}", location, e)))?;

            if let Some(object) = object {
                records.push(into_record(object, date_field, &location)?);
            }
        }

        Ok(records)
    }
}
