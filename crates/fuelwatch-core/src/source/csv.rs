//! Minimal CSV reader for spreadsheet exports.

use super::RawRow;

/// Parse CSV text into rows. Blank lines become empty rows so row numbers
/// keep matching the spreadsheet.
pub(crate) fn parse_csv(content: &str) -> Vec<RawRow> {
    content.lines().map(parse_csv_line).collect()
}

/// Parse a single CSV line, handling quoted fields
pub(crate) fn parse_csv_line(line: &str) -> RawRow {
    if line.trim().is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => {
                    in_quotes = true;
                    field_was_quoted = true;
                }
                ',' => {
                    fields.push(finish_field(std::mem::take(&mut current), field_was_quoted));
                    field_was_quoted = false;
                }
                _ => current.push(c),
            }
        }
    }
    fields.push(finish_field(current, field_was_quoted));
    fields
}

fn finish_field(field: String, quoted: bool) -> String {
    if quoted {
        field
    } else {
        field.trim().to_string()
    }
}
