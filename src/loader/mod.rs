//! Record loading from JSON and JSONL exports

mod json;
mod jsonl;

pub use json::JsonArrayFormat;
pub use jsonl::JsonLinesFormat;

use crate::types::{MetricValue, RawRecord, Result, SeriesError};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One decoded object before its date field is split out
pub(crate) type RecordObject = BTreeMap<String, MetricValue>;

/// A file format records can be read from
pub trait RecordFormat: Send + Sync {
    /// Format name (e.g., "jsonl")
    fn name(&self) -> &str;

    /// File extensions handled by this format, lowercase without the dot
    fn extensions(&self) -> &[&str];

    /// Parse a single file into records
    fn parse_file(&self, path: &Path, date_field: &str) -> Result<Vec<RawRecord>>;
}

/// Split `date_field` out of a decoded object.
///
/// `location` names the file and record for error messages.
pub(crate) fn into_record(
    mut object: RecordObject,
    date_field: &str,
    location: &str,
) -> Result<RawRecord> {
    match object.remove(date_field) {
        Some(MetricValue::Other(serde_json::Value::String(date))) => Ok(RawRecord {
            date,
            metrics: object,
        }),
        Some(other) => Err(SeriesError::Parse(format!(
            "{}: field '{}' must be a string, found {}",
            location, date_field, other
        ))),
        None => Err(SeriesError::Parse(format!(
            "{}: missing date field '{}'",
            location, date_field
        ))),
    }
}

/// Loads records from files, globs, or a mix of both
pub struct RecordLoader {
    formats: Vec<Box<dyn RecordFormat>>,
    date_field: String,
}

impl RecordLoader {
    /// Loader for `.json` arrays and `.jsonl`/`.ndjson` files with a `date` field
    pub fn new() -> Self {
        Self {
            formats: vec![Box::new(JsonArrayFormat), Box::new(JsonLinesFormat)],
            date_field: "date".to_string(),
        }
    }

    pub fn with_date_field(mut self, date_field: impl Into<String>) -> Self {
        self.date_field = date_field.into();
        self
    }

    pub fn date_field(&self) -> &str {
        &self.date_field
    }

    /// Registered formats
    pub fn formats(&self) -> &[Box<dyn RecordFormat>] {
        &self.formats
    }

    /// Format for a path, chosen by extension
    pub fn format_for(&self, path: &Path) -> Option<&dyn RecordFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.formats
            .iter()
            .find(|f| f.extensions().contains(&ext.as_str()))
            .map(|f| f.as_ref())
    }

    /// Expand inputs into concrete file paths, preserving input order.
    ///
    /// Inputs containing `*`, `?` or `[` are treated as glob patterns and
    /// must match at least one file.
    pub fn resolve_inputs(&self, inputs: &[String]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for input in inputs {
            if input.contains(['*', '?', '[']) {
                let matches: Vec<PathBuf> = glob::glob(input)
                    .map_err(|e| SeriesError::Config(format!("bad pattern '{}': {}", input, e)))?
                    .filter_map(|e| e.ok())
                    .filter(|p| p.is_file())
                    .collect();
                if matches.is_empty() {
                    return Err(SeriesError::Config(format!(
                        "pattern '{}' matched no files",
                        input
                    )));
                }
                files.extend(matches);
            } else {
                let path = PathBuf::from(input);
                if !path.is_file() {
                    return Err(SeriesError::Config(format!("input not found: {}", input)));
                }
                files.push(path);
            }
        }

        Ok(files)
    }

    /// Load every record from `inputs`, files parsed in parallel.
    ///
    /// Records keep input order (file order, then position in file). Any
    /// unreadable or malformed file fails the whole load.
    pub fn load(&self, inputs: &[String]) -> Result<Vec<RawRecord>> {
        let files = self.resolve_inputs(inputs)?;
        self.load_files(&files)
    }

    pub fn load_files(&self, files: &[PathBuf]) -> Result<Vec<RawRecord>> {
        let per_file: Vec<Vec<RawRecord>> = files
            .par_iter()
            .map(|path| -> Result<Vec<RawRecord>> {
                let format = self.format_for(path).ok_or_else(|| {
                    SeriesError::Parse(format!(
                        "{}: unsupported file type (expected .json, .jsonl or .ndjson)",
                        path.display()
                    ))
                })?;
                let records = format.parse_file(path, &self.date_field)?;
                debug!(
                    file = %path.display(),
                    format = format.name(),
                    records = records.len(),
                    "parsed input file"
                );
                Ok(records)
            })
            .collect::<Result<_>>()?;

        let records: Vec<RawRecord> = per_file.into_iter().flatten().collect();
        info!(files = files.len(), records = records.len(), "loaded records");
        Ok(records)
    }
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new()
    }
}
