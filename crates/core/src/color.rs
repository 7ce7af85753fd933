//! Deterministic color and index assignment for names.
//!
//! The chart colors blocks by group, and a legend panel next to it must
//! agree on the same colors, so the assignment is a pure function of the
//! set of names.

use std::collections::{BTreeMap, BTreeSet};

use gantt_protocol::{Color, SharedStr};
use palette::{FromColor, Hsl, Srgb};

use crate::model::Interval;

/// Maps a set of keys to colors. Must be deterministic for a given key set,
/// regardless of the order or repetition of `keys`.
pub trait ColorAssigner {
    fn assign_colors(&self, keys: &[SharedStr]) -> BTreeMap<SharedStr, Color>;
}

/// Sweeps the hue wheel over the sorted distinct keys: key `i` of `n` gets
/// hue `360 * i / n` at fixed saturation and lightness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueSweep {
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for HueSweep {
    fn default() -> Self {
        Self {
            saturation: 1.0,
            lightness: 0.7,
        }
    }
}

impl HueSweep {
    fn color_at(&self, rank: usize, count: usize) -> Color {
        let hue = 360.0 * rank as f32 / count as f32;
        let hsl: Hsl = Hsl::new(hue, self.saturation, self.lightness);
        let rgb: Srgb = Srgb::from_color(hsl);
        let rgb: Srgb<u8> = rgb.into_format();
        Color::rgb(rgb.red, rgb.green, rgb.blue)
    }
}

impl ColorAssigner for HueSweep {
    fn assign_colors(&self, keys: &[SharedStr]) -> BTreeMap<SharedStr, Color> {
        let sorted = sorted_unique(keys.iter().cloned());
        let count = sorted.len();
        sorted
            .into_iter()
            .enumerate()
            .map(|(rank, key)| {
                let color = self.color_at(rank, count);
                (key, color)
            })
            .collect()
    }
}

/// Distinct values in ascending order.
pub fn sorted_unique(values: impl IntoIterator<Item = SharedStr>) -> Vec<SharedStr> {
    values
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Ascending rank of every distinct value.
pub fn assign_indexes(values: impl IntoIterator<Item = SharedStr>) -> BTreeMap<SharedStr, usize> {
    sorted_unique(values)
        .into_iter()
        .enumerate()
        .map(|(index, name)| (name, index))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: SharedStr,
    pub color: Color,
}

/// Group names of `items` with the colors the chart gives them, sorted by
/// name.
pub fn legend(items: &[Interval], assigner: &dyn ColorAssigner) -> Vec<LegendEntry> {
    let groups: Vec<SharedStr> = items.iter().map(|i| i.group_name().clone()).collect();
    assigner
        .assign_colors(&groups)
        .into_iter()
        .map(|(name, color)| LegendEntry { name, color })
        .collect()
}
