//! Axis labels and human-readable times. All timestamps render in UTC.

use chrono::{DateTime, Utc};

use crate::model::Millis;

const SECOND: f64 = 1_000.0;
const HOUR: f64 = 3_600.0 * SECOND;

/// How much of the clock an x-axis label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPrecision {
    Minutes,
    Seconds,
    Milliseconds,
}

impl LabelPrecision {
    /// Coarser labels for wider views: more than 10h shows `HH:MM`, more
    /// than 30s shows `HH:MM:SS`, anything narrower adds milliseconds.
    pub fn for_span(span_ms: f64) -> Self {
        if span_ms > 10.0 * HOUR {
            Self::Minutes
        } else if span_ms > 30.0 * SECOND {
            Self::Seconds
        } else {
            Self::Milliseconds
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::Minutes => "%H:%M",
            Self::Seconds => "%H:%M:%S",
            Self::Milliseconds => "%H:%M:%S%.3f",
        }
    }
}

fn utc(ms: Millis) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms)
}

/// `YYYY.MM.DD`.
pub fn date_label(ms: Millis) -> String {
    utc(ms)
        .map(|dt| dt.format("%Y.%m.%d").to_string())
        .unwrap_or_default()
}

pub fn time_label(ms: Millis, precision: LabelPrecision) -> String {
    utc(ms)
        .map(|dt| dt.format(precision.pattern()).to_string())
        .unwrap_or_default()
}

/// `YYYY.MM.DD HH:MM:SS.mmm`, for detail panels.
pub fn format_timestamp(ms: Millis) -> String {
    utc(ms)
        .map(|dt| dt.format("%Y.%m.%d %H:%M:%S%.3f").to_string())
        .unwrap_or_default()
}

/// Approximate, relative phrasing of a duration ("3 minutes", "a day").
pub fn humanize_duration(ms: Millis) -> String {
    let seconds = (ms.unsigned_abs() as f64 / SECOND).round();
    let minutes = (seconds / 60.0).round();
    let hours = (minutes / 60.0).round();
    let days = (hours / 24.0).round();
    let months = (days / 30.4375).round();
    let years = (days / 365.25).round();

    if seconds < 45.0 {
        "a few seconds".to_string()
    } else if seconds < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{minutes} minutes")
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{hours} hours")
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{days} days")
    } else if days < 45.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{} months", months.max(2.0))
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{} years", years.max(2.0))
    }
}
