//! Where structure rows come from.
//!
//! A [`DataSource`] yields the raw tabular snapshot the report is built
//! from. Sources are read sequentially; callers that pull from a rate
//! limited remote API are responsible for pacing their calls.

mod csv;
mod snapshot;

pub use snapshot::{SnapshotFile, SnapshotFormat};

use std::collections::HashMap;

use crate::error::SourceError;

/// One snapshot row, cell values as text.
pub type RawRow = Vec<String>;

/// Read-only capability that yields snapshot rows for an identifier.
pub trait DataSource: Send + Sync {
    /// Fetch every row (metadata rows included) for `identifier`.
    fn fetch(&self, identifier: &str) -> Result<Vec<RawRow>, SourceError>;
}

/// Rows held in memory, keyed by identifier.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    rows: HashMap<String, Vec<RawRow>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, identifier: impl Into<String>, rows: Vec<RawRow>) -> Self {
        self.rows.insert(identifier.into(), rows);
        self
    }
}

impl DataSource for StaticSource {
    fn fetch(&self, identifier: &str) -> Result<Vec<RawRow>, SourceError> {
        self.rows
            .get(identifier)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(identifier.into()))
    }
}
