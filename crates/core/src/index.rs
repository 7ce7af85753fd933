use std::collections::BTreeMap;

use gantt_protocol::{Color, SharedStr};

use crate::color::{ColorAssigner, assign_indexes};
use crate::model::Interval;

/// Thread name → lane index, lanes ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaneMap {
    index: BTreeMap<SharedStr, usize>,
    names: Vec<SharedStr>,
}

impl LaneMap {
    pub fn build(items: &[Interval]) -> Self {
        let index = assign_indexes(items.iter().map(|i| i.thread_name().clone()));
        // BTreeMap iteration is already ascending, matching the ranks.
        let names = index.keys().cloned().collect();
        Self { index, names }
    }

    pub fn lane_of(&self, thread_name: &str) -> Option<usize> {
        self.index.get(thread_name).copied()
    }

    /// Thread names in lane order.
    pub fn names(&self) -> &[SharedStr] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Group name → block color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorMap {
    colors: BTreeMap<SharedStr, Color>,
}

impl ColorMap {
    pub fn build(items: &[Interval], assigner: &dyn ColorAssigner) -> Self {
        let groups: Vec<SharedStr> = items.iter().map(|i| i.group_name().clone()).collect();
        Self {
            colors: assigner.assign_colors(&groups),
        }
    }

    pub fn color_of(&self, group_name: &str) -> Option<Color> {
        self.colors.get(group_name).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
