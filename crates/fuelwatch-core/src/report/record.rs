use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use super::{NAME_COLUMN, REMAINING_COLUMN, STATE_COLUMN};
use crate::error::RecordError;

/// Fuel left on a structure, in whole days plus whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
}

impl Remaining {
    /// Parse `"<days> days <hours> hours"`.
    ///
    /// Tokens are whitespace separated; the unit words accept singular and
    /// plural forms in any case. Anything else is rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let [days, day_unit, hours, hour_unit] = tokens.as_slice() else {
            return None;
        };
        if !is_unit(day_unit, "day") || !is_unit(hour_unit, "hour") {
            return None;
        }
        Some(Self {
            days: days.parse().ok()?,
            hours: hours.parse().ok()?,
        })
    }

    /// Instant the fuel runs out when counted from `now`.
    ///
    /// `None` if the offset does not fit in a timestamp.
    pub fn expires_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let offset =
            TimeDelta::try_days(self.days)?.checked_add(&TimeDelta::try_hours(self.hours)?)?;
        now.checked_add_signed(offset)
    }
}

fn is_unit(token: &str, singular: &str) -> bool {
    let token = token.to_ascii_lowercase();
    token == singular || token.strip_suffix('s') == Some(singular)
}

/// One structure row of a snapshot, validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureRecord {
    pub name: String,
    pub remaining: Remaining,
    pub state: String,
}

impl StructureRecord {
    /// Build a record from a raw snapshot row.
    ///
    /// `Ok(None)` for rows with a blank name, which are placeholders rather
    /// than errors. `row` is the 1-based snapshot row, used in diagnostics.
    pub fn from_row(row: usize, cells: &[String]) -> Result<Option<Self>, RecordError> {
        let cell = |idx: usize| cells.get(idx).map(|c| c.trim()).unwrap_or("");

        let name = cell(NAME_COLUMN);
        if name.is_empty() {
            return Ok(None);
        }

        let raw_remaining = cell(REMAINING_COLUMN);
        let remaining =
            Remaining::parse(raw_remaining).ok_or_else(|| RecordError::MalformedRemaining {
                row,
                name: name.to_string(),
                value: raw_remaining.to_string(),
            })?;

        Ok(Some(Self {
            name: name.to_string(),
            remaining,
            state: cell(STATE_COLUMN).to_string(),
        }))
    }
}
