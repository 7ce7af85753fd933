use gantt_protocol::SharedStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain timestamp in integer milliseconds.
pub type Millis = i64;

/// Largest accepted timestamp magnitude: 100 million days either side of the
/// epoch. Every such value is exact as an `f64`, and sums of two stay far
/// from `i64` overflow.
pub const MAX_TIME: Millis = 8_640_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("interval `{label}` ends before it starts ({start} > {end})")]
    Reversed {
        label: String,
        start: Millis,
        end: Millis,
    },
    #[error("interval `{label}` has time {time} outside ±8640000000000000 ms")]
    OutOfRange { label: String, time: Millis },
}

/// One labeled time interval on a thread lane, colored by its group.
///
/// Fields are private: an interval is validated once (`start <= end`) and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IntervalFields", rename_all = "camelCase")]
pub struct Interval {
    label: SharedStr,
    start_time: Millis,
    end_time: Millis,
    thread_name: SharedStr,
    group_name: SharedStr,
}

impl Interval {
    pub fn new(
        label: impl Into<SharedStr>,
        start_time: Millis,
        end_time: Millis,
        thread_name: impl Into<SharedStr>,
        group_name: impl Into<SharedStr>,
    ) -> Result<Self, IntervalError> {
        let label = label.into();
        if let Some(time) = [start_time, end_time]
            .into_iter()
            .find(|t| t.unsigned_abs() > MAX_TIME.unsigned_abs())
        {
            return Err(IntervalError::OutOfRange {
                label: label.to_string(),
                time,
            });
        }
        if start_time > end_time {
            return Err(IntervalError::Reversed {
                label: label.to_string(),
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            label,
            start_time,
            end_time,
            thread_name: thread_name.into(),
            group_name: group_name.into(),
        })
    }

    pub fn label(&self) -> &SharedStr {
        &self.label
    }

    pub fn start_time(&self) -> Millis {
        self.start_time
    }

    pub fn end_time(&self) -> Millis {
        self.end_time
    }

    pub fn thread_name(&self) -> &SharedStr {
        &self.thread_name
    }

    pub fn group_name(&self) -> &SharedStr {
        &self.group_name
    }

    pub fn duration(&self) -> Millis {
        self.end_time - self.start_time
    }

    /// Inclusive on both ends.
    pub fn contains(&self, time: f64) -> bool {
        (self.start_time as f64) <= time && time <= (self.end_time as f64)
    }

    /// Whether any part of the interval lies within `[min, max]`.
    pub fn overlaps(&self, min: f64, max: f64) -> bool {
        (self.end_time as f64) >= min && (self.start_time as f64) <= max
    }
}

/// Unvalidated wire shape; `Interval` deserializes through it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntervalFields {
    label: SharedStr,
    start_time: Millis,
    end_time: Millis,
    thread_name: SharedStr,
    group_name: SharedStr,
}

impl TryFrom<IntervalFields> for Interval {
    type Error = IntervalError;

    fn try_from(f: IntervalFields) -> Result<Self, Self::Error> {
        Interval::new(f.label, f.start_time, f.end_time, f.thread_name, f.group_name)
    }
}

/// Smallest start and largest end across `items`, or `None` when empty.
pub fn time_bounds(items: &[Interval]) -> Option<(Millis, Millis)> {
    let min = items.iter().map(Interval::start_time).min()?;
    let max = items.iter().map(Interval::end_time).max()?;
    Some((min, max))
}
