//! Status report builder.
//!
//! Turns a snapshot into chat messages:
//! 1. drop the metadata rows at the top of the snapshot
//! 2. stable-sort the rest by structure name (byte-wise, not locale aware)
//! 3. skip blank names, collect malformed rows as [`RecordError`]s
//! 4. format one markup line per structure, emphasising urgent ones
//! 5. pack the lines into messages under the platform limit
//!
//! [`StatusReportBuilder::render`] is pure; [`StatusReportBuilder::send`]
//! additionally hands each message to a [`Notifier`] in order.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::chunk::{char_len, chunk_lines};
use super::markup::{report_header, structure_line};
use super::record::StructureRecord;
use super::{DEFAULT_HEADER_ROWS, DEFAULT_URGENT_DAYS, MAX_MESSAGE_LEN, NAME_COLUMN};
use crate::error::{ConfigError, CoreError, RecordError, Result};
use crate::integrations::Notifier;
use crate::source::RawRow;
use crate::storage::ReportConfig;

#[derive(Debug, Clone)]
pub struct StatusReportBuilder {
    title: String,
    header_rows: usize,
    urgent_days: i64,
    max_message_len: usize,
}

/// A structure that made it into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub record: StructureRecord,
    pub expires_at: DateTime<Utc>,
    pub urgent: bool,
    pub text: String,
}

/// Output of [`StatusReportBuilder::render`].
#[derive(Debug, Clone, Serialize)]
pub struct RenderedReport {
    pub lines: Vec<ReportLine>,
    /// Messages in delivery order.
    pub chunks: Vec<String>,
    #[serde(serialize_with = "serialize_errors")]
    pub skipped: Vec<RecordError>,
}

/// Outcome of a delivered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub structures: usize,
    pub messages_sent: usize,
    pub skipped: Vec<RecordError>,
}

fn serialize_errors<S>(
    errors: &[RecordError],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

impl Default for StatusReportBuilder {
    fn default() -> Self {
        Self {
            title: "OPTM Fuel Status Update".to_string(),
            header_rows: DEFAULT_HEADER_ROWS,
            urgent_days: DEFAULT_URGENT_DAYS,
            max_message_len: MAX_MESSAGE_LEN,
        }
    }
}

impl StatusReportBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            title: config.title.clone(),
            header_rows: config.header_rows,
            urgent_days: config.urgent_days,
            max_message_len: config.max_message_len.min(MAX_MESSAGE_LEN),
        }
    }

    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }

    pub fn with_urgent_days(mut self, urgent_days: i64) -> Self {
        self.urgent_days = urgent_days;
        self
    }

    /// Clamped to [`MAX_MESSAGE_LEN`].
    pub fn with_max_message_len(mut self, max_message_len: usize) -> Self {
        self.max_message_len = max_message_len.min(MAX_MESSAGE_LEN);
        self
    }

    /// Sorted, validated report lines plus the rows that were rejected.
    pub fn lines(
        &self,
        rows: &[RawRow],
        now: DateTime<Utc>,
    ) -> (Vec<ReportLine>, Vec<RecordError>) {
        let mut body: Vec<(usize, &RawRow)> =
            rows.iter().enumerate().skip(self.header_rows).collect();
        body.sort_by(|(_, a), (_, b)| name_cell(a).cmp(name_cell(b)));

        let mut lines = Vec::with_capacity(body.len());
        let mut skipped = Vec::new();

        for (idx, cells) in body {
            let row = idx + 1;
            let record = match StructureRecord::from_row(row, cells) {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(err) => {
                    warn!(%err, "skipping structure row");
                    skipped.push(err);
                    continue;
                }
            };

            let Some(expires_at) = record.remaining.expires_from(now) else {
                let err = RecordError::MalformedRemaining {
                    row,
                    name: record.name.clone(),
                    value: format!(
                        "{} days {} hours",
                        record.remaining.days, record.remaining.hours
                    ),
                };
                warn!(%err, "skipping structure row");
                skipped.push(err);
                continue;
            };

            let urgent = record.remaining.days < self.urgent_days;
            let text = structure_line(&record.name, expires_at.timestamp(), urgent);

            let len = char_len(&text) + 1;
            if len > self.max_message_len {
                let err = RecordError::LineTooLong {
                    name: record.name.clone(),
                    len,
                    max: self.max_message_len,
                };
                warn!(%err, "skipping structure row");
                skipped.push(err);
                continue;
            }

            lines.push(ReportLine {
                record,
                expires_at,
                urgent,
                text,
            });
        }

        (lines, skipped)
    }

    /// Build every message of the report without sending anything.
    ///
    /// # Errors
    ///
    /// Fails only if the header alone does not fit in a message.
    pub fn render(
        &self,
        label: &str,
        rows: &[RawRow],
        now: DateTime<Utc>,
    ) -> Result<RenderedReport> {
        let header = report_header(&self.title, label);
        if char_len(&header) >= self.max_message_len {
            return Err(ConfigError::InvalidValue {
                key: "report.title".into(),
                message: format!(
                    "report header is {} characters, message limit is {}",
                    char_len(&header),
                    self.max_message_len
                ),
            }
            .into());
        }

        let (lines, skipped) = self.lines(rows, now);
        let chunks = chunk_lines(
            &header,
            lines.iter().map(|line| line.text.as_str()),
            self.max_message_len,
        );

        Ok(RenderedReport {
            lines,
            chunks,
            skipped,
        })
    }

    /// Render the report and deliver each message through `notifier`.
    ///
    /// Delivery stops at the first failed message; messages already sent
    /// stay sent. No retries are attempted.
    pub fn send(
        &self,
        label: &str,
        rows: &[RawRow],
        now: DateTime<Utc>,
        notifier: &dyn Notifier,
    ) -> Result<ReportSummary> {
        let report = self.render(label, rows, now)?;
        let total = report.chunks.len();

        for (idx, chunk) in report.chunks.iter().enumerate() {
            notifier.send(chunk).map_err(|source| CoreError::Delivery {
                index: idx + 1,
                total,
                source,
            })?;
        }

        info!(
            notifier = notifier.name(),
            structures = report.lines.len(),
            messages = total,
            skipped = report.skipped.len(),
            "fuel report delivered"
        );

        Ok(ReportSummary {
            structures: report.lines.len(),
            messages_sent: total,
            skipped: report.skipped,
        })
    }
}

/// Name as it will be displayed, so the sort matches the output.
fn name_cell(row: &RawRow) -> &str {
    row.get(NAME_COLUMN).map(|c| c.trim()).unwrap_or("")
}
