//! Calendar-aligned tick positions for a UTC time axis.
//!
//! The interval is picked from a fixed ladder (seconds up to months) by
//! comparing it against `span / count`; spans under a second fall back to
//! 1-2-5 millisecond steps and spans over a year to 1-2-5 year steps.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc, Weekday};

use crate::model::Millis;

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.0 * DAY;

/// Calendar unit a tick interval steps by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// A unit plus how many of them lie between consecutive ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInterval {
    pub unit: TickUnit,
    pub step: i64,
}

const LADDER: &[(TickUnit, i64, f64)] = &[
    (TickUnit::Second, 1, SECOND),
    (TickUnit::Second, 5, 5.0 * SECOND),
    (TickUnit::Second, 15, 15.0 * SECOND),
    (TickUnit::Second, 30, 30.0 * SECOND),
    (TickUnit::Minute, 1, MINUTE),
    (TickUnit::Minute, 5, 5.0 * MINUTE),
    (TickUnit::Minute, 15, 15.0 * MINUTE),
    (TickUnit::Minute, 30, 30.0 * MINUTE),
    (TickUnit::Hour, 1, HOUR),
    (TickUnit::Hour, 3, 3.0 * HOUR),
    (TickUnit::Hour, 6, 6.0 * HOUR),
    (TickUnit::Hour, 12, 12.0 * HOUR),
    (TickUnit::Day, 1, DAY),
    (TickUnit::Day, 2, 2.0 * DAY),
    (TickUnit::Week, 1, WEEK),
    (TickUnit::Month, 1, MONTH),
    (TickUnit::Month, 3, 3.0 * MONTH),
    (TickUnit::Year, 1, YEAR),
];

/// Upper bound on generated ticks, in case of a pathological domain.
const MAX_TICKS: usize = 1_000;

/// A "nice" step (1, 2 or 5 times a power of ten) splitting `[start, stop]`
/// into roughly `count` parts.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

/// Pick the tick interval for a domain and desired tick count.
pub fn tick_interval(start: f64, stop: f64, count: usize) -> TickInterval {
    let target = (stop - start).abs() / count.max(1) as f64;
    let i = LADDER.partition_point(|&(_, _, duration)| duration <= target);

    if i == LADDER.len() {
        let step = tick_step(start / YEAR, stop / YEAR, count).max(1.0);
        return TickInterval {
            unit: TickUnit::Year,
            step: step.round() as i64,
        };
    }
    if i == 0 {
        let step = tick_step(start, stop, count).max(1.0);
        return TickInterval {
            unit: TickUnit::Millisecond,
            step: step.round() as i64,
        };
    }

    let (below_unit, below_step, below) = LADDER[i - 1];
    let (above_unit, above_step, above) = LADDER[i];
    if target / below < above / target {
        TickInterval {
            unit: below_unit,
            step: below_step,
        }
    } else {
        TickInterval {
            unit: above_unit,
            step: above_step,
        }
    }
}

/// Tick timestamps within `[start, stop]` (both inclusive), ascending.
pub fn time_ticks(start: f64, stop: f64, count: usize) -> Vec<Millis> {
    let (start, stop) = if start <= stop { (start, stop) } else { (stop, start) };
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    let interval = tick_interval(start, stop, count);
    let first = start.ceil() as Millis;
    let last = stop.floor() as Millis;
    if first > last {
        return Vec::new();
    }

    match interval.unit {
        TickUnit::Millisecond => fixed_ticks(first, last, interval.step),
        TickUnit::Second => fixed_ticks(first, last, interval.step * SECOND as i64),
        TickUnit::Minute => fixed_ticks(first, last, interval.step * MINUTE as i64),
        TickUnit::Hour => fixed_ticks(first, last, interval.step * HOUR as i64),
        TickUnit::Day => day_ticks(first, last, interval.step),
        TickUnit::Week => week_ticks(first, last),
        TickUnit::Month => month_ticks(first, last, interval.step),
        TickUnit::Year => year_ticks(first, last, interval.step),
    }
}

/// Multiples of `step_ms` since the epoch. Sub-day steps on the ladder all
/// divide a day evenly, so these land on the same UTC boundaries as
/// clock-field alignment would.
fn fixed_ticks(first: Millis, last: Millis, step_ms: i64) -> Vec<Millis> {
    if step_ms <= 0 {
        return Vec::new();
    }
    let mut ticks = Vec::new();
    let Some(mut t) = first.div_euclid(step_ms).checked_mul(step_ms) else {
        return ticks;
    };
    if t < first {
        match t.checked_add(step_ms) {
            Some(next) => t = next,
            None => return ticks,
        }
    }
    while t <= last && ticks.len() < MAX_TICKS {
        ticks.push(t);
        match t.checked_add(step_ms) {
            Some(next) => t = next,
            None => break,
        }
    }
    ticks
}

fn midnight(date: NaiveDate) -> Option<Millis> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

fn date_of(ms: Millis) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.date_naive())
}

/// Midnights whose zero-based day of month is a multiple of `step`.
fn day_ticks(first: Millis, last: Millis, step: i64) -> Vec<Millis> {
    let mut ticks = Vec::new();
    let Some(mut date) = date_of(first) else {
        return ticks;
    };
    let step = step.max(1) as u32;
    while let Some(t) = midnight(date) {
        if t > last || ticks.len() >= MAX_TICKS {
            break;
        }
        if t >= first && date.day0() % step == 0 {
            ticks.push(t);
        }
        match date.checked_add_days(Days::new(1)) {
            Some(next) => date = next,
            None => break,
        }
    }
    ticks
}

/// Sunday midnights.
fn week_ticks(first: Millis, last: Millis) -> Vec<Millis> {
    let mut ticks = Vec::new();
    let Some(mut date) = date_of(first) else {
        return ticks;
    };
    while date.weekday() != Weekday::Sun {
        match date.checked_add_days(Days::new(1)) {
            Some(next) => date = next,
            None => return ticks,
        }
    }
    while let Some(t) = midnight(date) {
        if t > last || ticks.len() >= MAX_TICKS {
            break;
        }
        if t >= first {
            ticks.push(t);
        }
        match date.checked_add_days(Days::new(7)) {
            Some(next) => date = next,
            None => break,
        }
    }
    ticks
}

/// First-of-month midnights whose zero-based month is a multiple of `step`.
fn month_ticks(first: Millis, last: Millis, step: i64) -> Vec<Millis> {
    let mut ticks = Vec::new();
    let Some(start) = date_of(first) else {
        return ticks;
    };
    let Some(mut date) = NaiveDate::from_ymd_opt(start.year(), start.month(), 1) else {
        return ticks;
    };
    let step = step.max(1) as u32;
    while let Some(t) = midnight(date) {
        if t > last || ticks.len() >= MAX_TICKS {
            break;
        }
        if t >= first && date.month0() % step == 0 {
            ticks.push(t);
        }
        match date.checked_add_months(Months::new(1)) {
            Some(next) => date = next,
            None => break,
        }
    }
    ticks
}

/// January-first midnights of years that are multiples of `step`.
fn year_ticks(first: Millis, last: Millis, step: i64) -> Vec<Millis> {
    let mut ticks = Vec::new();
    let Some(start) = date_of(first) else {
        return ticks;
    };
    let step = step.clamp(1, i64::from(i32::MAX)) as i32;
    let Some(mut year) = start.year().div_euclid(step).checked_mul(step) else {
        return ticks;
    };
    while let Some(t) = NaiveDate::from_ymd_opt(year, 1, 1).and_then(midnight) {
        if t > last || ticks.len() >= MAX_TICKS {
            break;
        }
        if t >= first {
            ticks.push(t);
        }
        match year.checked_add(step) {
            Some(next) => year = next,
            None => break,
        }
    }
    ticks
}
