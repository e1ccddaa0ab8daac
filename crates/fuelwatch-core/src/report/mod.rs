//! Fuel status report: records, chat markup, message chunking and the
//! builder that ties them together.

mod builder;
mod chunk;
pub mod markup;
mod record;

pub use builder::{RenderedReport, ReportLine, ReportSummary, StatusReportBuilder};
pub use chunk::{char_len, chunk_lines};
pub use record::{Remaining, StructureRecord};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::source::RawRow;

/// Hard per-message limit of the chat platform, in characters.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Leading snapshot rows that hold metadata rather than structures.
///
/// Carried over as-is from the spreadsheet layout this tool replaces. That
/// layout has a title row, a timestamp row and a column-header row, but it
/// was never confirmed whether the first data row was being dropped too.
/// Override with `report.header_rows` if a snapshot is off by one.
pub const DEFAULT_HEADER_ROWS: usize = 3;

/// Structures with fewer whole days of fuel left than this are emphasised.
pub const DEFAULT_URGENT_DAYS: i64 = 7;

/// Column holding the structure name.
pub const NAME_COLUMN: usize = 0;
/// Column holding `"<days> days <hours> hours"`.
pub const REMAINING_COLUMN: usize = 1;
/// Column holding the structure state (e.g. `Anchored`).
pub const STATE_COLUMN: usize = 3;
/// Column of the first row that carries the snapshot timestamp.
pub const LABEL_COLUMN: usize = 4;

/// Timestamp label stored in the snapshot's first row, if any.
pub fn label_from_metadata(rows: &[RawRow]) -> Option<String> {
    rows.first()
        .and_then(|row| row.get(LABEL_COLUMN))
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
}

/// ISO-8601 UTC instant with millisecond precision, e.g.
/// `2024-05-01T12:00:00.000Z`. Used as the report label when the snapshot
/// carries none.
pub fn utc_timestamp_label(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn label_is_read_from_first_row_fifth_column() {
        let rows = vec![
            row(&["", "", "2024-05-01", "", "2024-05-01T06:00:00.000Z"]),
            row(&["Station-A", "1 days 0 hours"]),
        ];
        assert_eq!(
            label_from_metadata(&rows).as_deref(),
            Some("2024-05-01T06:00:00.000Z")
        );
    }

    #[test]
    fn label_missing_or_blank_is_none() {
        assert_eq!(label_from_metadata(&[]), None);
        assert_eq!(label_from_metadata(&[row(&["a", "b"])]), None);
        assert_eq!(label_from_metadata(&[row(&["", "", "", "", "  "])]), None);
    }

    #[test]
    fn utc_timestamp_label_uses_millis_and_z_suffix() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
        assert_eq!(utc_timestamp_label(now), "2024-05-01T12:30:05.000Z");
    }
}
