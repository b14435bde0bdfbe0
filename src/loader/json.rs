//! JSON array exports: `[{"date": "...", ...}, ...]`

use crate::types::{RawRecord, Result, SeriesError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{into_record, RecordFormat, RecordObject};

/// Parser for files holding a single JSON array of record objects
pub struct JsonArrayFormat;

impl RecordFormat for JsonArrayFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse_file(&self, path: &Path, date_field: &str) -> Result<Vec<RawRecord>> {
        let reader = BufReader::new(File::open(path)?);
        let objects: Vec<RecordObject> = serde_json::from_reader(reader)
            .map_err(|e| SeriesError::Parse(format!("{}: {}", path.display(), e)))?;

        objects
            .into_iter()
            .enumerate()
            .map(|(i, object)| {
                into_record(
                    object,
                    date_field,
                    &format!("{} record {}", path.display(), i + 1),
                )
            })
            .collect()
    }
}
