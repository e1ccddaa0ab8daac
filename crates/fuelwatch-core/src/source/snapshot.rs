//! Snapshot files exported from the tracking sheet.
//!
//! JSON snapshots are an array of rows, each an array of cells. Cells may be
//! strings, numbers, booleans or null, mirroring what a spreadsheet range
//! hands back. CSV snapshots are plain spreadsheet exports.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::csv::parse_csv;
use super::{DataSource, RawRow};
use crate::error::SourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    /// Pick the format from the file extension; no extension means JSON.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Self::Csv),
            Some(ext) => Err(SourceError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Reads snapshot files; the identifier passed to [`DataSource::fetch`] is
/// the file path.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnapshotFile {
    format: Option<SnapshotFormat>,
}

impl SnapshotFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore the file extension and always parse as `format`.
    pub fn with_format(format: SnapshotFormat) -> Self {
        Self {
            format: Some(format),
        }
    }

    pub fn parse(&self, path: &Path, content: &str) -> Result<Vec<RawRow>, SourceError> {
        let format = match self.format {
            Some(format) => format,
            None => SnapshotFormat::from_path(path)?,
        };
        match format {
            SnapshotFormat::Json => parse_json(path, content),
            SnapshotFormat::Csv => Ok(parse_csv(content)),
        }
    }
}

impl DataSource for SnapshotFile {
    fn fetch(&self, identifier: &str) -> Result<Vec<RawRow>, SourceError> {
        let path = PathBuf::from(identifier);
        let content = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(path.clone())
            } else {
                SourceError::Unreadable {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        let rows = self.parse(&path, &content)?;
        debug!(path = %path.display(), rows = rows.len(), "loaded snapshot");
        Ok(rows)
    }
}

fn parse_json(path: &Path, content: &str) -> Result<Vec<RawRow>, SourceError> {
    let malformed = |message: String| SourceError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let value: Value = serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;
    let Value::Array(rows) = value else {
        return Err(malformed("expected an array of rows".into()));
    };

    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| -> Result<RawRow, SourceError> {
            let Value::Array(cells) = row else {
                return Err(malformed(format!("row {} is not an array", idx + 1)));
            };
            cells
                .into_iter()
                .map(|cell| {
                    cell_text(cell).ok_or_else(|| {
                        malformed(format!("row {}: cells must be scalar values", idx + 1))
                    })
                })
                .collect()
        })
        .collect()
}

fn cell_text(cell: Value) -> Option<String> {
    match cell {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
