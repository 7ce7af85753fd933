pub mod json;
pub mod rows;

use thiserror::Error;

use crate::model::Interval;

pub use json::parse_json;
pub use rows::{parse_rows, to_rows};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("json: {0}")]
    Json(#[from] json::JsonParseError),
    #[error("rows: {0}")]
    Rows(#[from] rows::RowsParseError),
}

/// Detect the dataset format and parse it.
///
/// A document whose first non-blank byte is `[` is a JSON array; anything
/// else is read as semicolon-delimited rows.
pub fn parse_auto(data: &[u8]) -> Result<Vec<Interval>, ParseError> {
    let first = data.iter().find(|b| !b.is_ascii_whitespace());
    if first == Some(&b'[') {
        return Ok(json::parse_json(data)?);
    }
    Ok(rows::parse_rows(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_json() {
        let data = br#"  [{"label": "a", "startTime": 1, "endTime": 2, "threadName": "A", "groupName": "X"}]"#;
        assert_eq!(parse_auto(data).map(|v| v.len()).ok(), Some(1));
    }

    #[test]
    fn falls_back_to_rows() {
        assert_eq!(parse_auto(b"a;1;2;X;A\n").map(|v| v.len()).ok(), Some(1));
    }

    #[test]
    fn empty_input_is_empty_rows() {
        assert_eq!(parse_auto(b"").map(|v| v.len()).ok(), Some(0));
    }

    #[test]
    fn errors_name_the_format() {
        let err = parse_auto(b"[{").expect_err("invalid input").to_string();
        assert!(err.starts_with("json:"), "{err}");
        let err = parse_auto(b"a;b").expect_err("invalid input").to_string();
        assert!(err.starts_with("rows:"), "{err}");
    }
}
