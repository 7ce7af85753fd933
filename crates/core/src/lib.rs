//! Interactive Gantt timeline core.
//!
//! Intervals are laid out one lane per thread and colored per group. The
//! chart zooms and pans over time, tracks a cursor, reports click
//! selections and emits its frames as `RenderCommand` lists for a host
//! renderer.

pub mod chart;
pub mod color;
pub mod config;
pub mod format;
pub mod index;
pub mod interaction;
pub mod model;
pub mod parsers;
pub mod scale;
pub mod scheduler;
pub mod svg;
pub mod ticks;
pub mod viewport;
pub mod views;

pub use chart::{ChartOptions, GanttChart, IntervalCallback, create_chart};
pub use color::{ColorAssigner, HueSweep, LegendEntry, legend};
pub use config::ChartLayout;
pub use interaction::PointerButton;
pub use model::{Interval, IntervalError, Millis};
pub use scheduler::{FrameQueue, FrameRequester, FrameTask};
