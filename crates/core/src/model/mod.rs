pub mod interval;

pub use interval::{Interval, IntervalError, MAX_TIME, Millis, time_bounds};
