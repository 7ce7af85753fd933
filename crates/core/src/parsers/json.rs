use thiserror::Error;

use crate::model::Interval;

#[derive(Debug, Error)]
pub enum JsonParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a JSON array of intervals:
/// `[{"label", "startTime", "endTime", "threadName", "groupName"}, ...]`.
///
/// Each object goes through `Interval::new`, so reversed intervals are
/// rejected as a deserialization error.
pub fn parse_json(data: &[u8]) -> Result<Vec<Interval>, JsonParseError> {
    Ok(serde_json::from_slice(data)?)
}
