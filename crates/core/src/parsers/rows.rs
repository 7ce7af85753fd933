//! Semicolon-delimited interval rows: `name;start;end;group;thread`.
//!
//! One interval per line, times in epoch milliseconds. Times are read as
//! floats and rounded to whole milliseconds; values beyond `MAX_TIME` are
//! rejected.

use std::fmt::Write as _;

use thiserror::Error;

use crate::model::{Interval, IntervalError, MAX_TIME, Millis};

const FIELDS: usize = 5;

#[derive(Debug, Error)]
pub enum RowsParseError {
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("line {line}: expected 5 fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: invalid {field} time {value:?}")]
    Time {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: {source}")]
    Interval {
        line: usize,
        #[source]
        source: IntervalError,
    },
}

pub fn parse_rows(data: &[u8]) -> Result<Vec<Interval>, RowsParseError> {
    let text = std::str::from_utf8(data)?;
    let mut items = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = raw.split(';').collect();
        if fields.len() != FIELDS {
            return Err(RowsParseError::FieldCount {
                line,
                found: fields.len(),
            });
        }

        let start = parse_time(fields[1], line, "start")?;
        let end = parse_time(fields[2], line, "end")?;
        let interval = Interval::new(fields[0], start, end, fields[4], fields[3])
            .map_err(|source| RowsParseError::Interval { line, source })?;
        items.push(interval);
    }

    Ok(items)
}

fn parse_time(value: &str, line: usize, field: &'static str) -> Result<Millis, RowsParseError> {
    let invalid = || RowsParseError::Time {
        line,
        field,
        value: value.to_string(),
    };
    let parsed: f64 = value.trim().parse().map_err(|_| invalid())?;
    let rounded = parsed.round();
    if !rounded.is_finite() || rounded.abs() > MAX_TIME as f64 {
        return Err(invalid());
    }
    Ok(rounded as Millis)
}

/// Write intervals back as rows. Control characters and `;` are dropped
/// from the text fields so every row splits into exactly five fields.
pub fn to_rows(items: &[Interval]) -> String {
    let mut out = String::with_capacity(items.len() * 48);
    for item in items {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{};{};{};{};{}",
            sanitize(item.label()),
            item.start_time(),
            item.end_time(),
            sanitize(item.group_name()),
            sanitize(item.thread_name()),
        );
    }
    out
}

fn sanitize(field: &str) -> String {
    field
        .chars()
        .filter(|&ch| !ch.is_control() && ch != ';')
        .collect()
}
