use gantt_protocol::{Rect, Surface};
use serde::{Deserialize, Serialize};

/// Smallest visible span, in milliseconds.
pub const MIN_SPAN: f64 = 10.0;

/// Wheel deltas below this magnitude are device noise.
pub const WHEEL_NOISE: f64 = 0.1;

/// Each wheel unit scales the visible span by this factor.
pub const ZOOM_BASE: f64 = 1.1;

/// Default number of ticks requested from the time scale.
pub const TICK_COUNT: usize = 10;

/// Chart geometry, in pixels.
///
/// Every field has a default, so a TOML override only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,

    /// Vertical pitch of one lane.
    pub lane_height: f64,
    /// Distance from the top of a lane's pitch to the top of its blocks.
    pub block_offset: f64,
    pub block_height: f64,

    pub font_size: f64,
    pub grid_width: f64,
    pub block_border_width: f64,

    pub y_tick_size: f64,
    pub y_label_shift: f64,
    pub y_label_offset: f64,

    pub x_tick_size: f64,
    pub x_date_label_offset: f64,
    pub x_time_label_offset: f64,

    pub cursor_halo_width: f64,
    pub cursor_core_width: f64,

    /// Blocks narrower than this are not drawn at all.
    pub draw_threshold: f64,
    /// Blocks narrower than this are outlined but not filled.
    pub fill_threshold: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            padding_left: 140.0,
            padding_right: 60.0,
            padding_top: 1.0,
            padding_bottom: 35.0,
            lane_height: 32.0,
            block_offset: 6.5,
            block_height: 21.0,
            font_size: 14.0,
            grid_width: 2.0,
            block_border_width: 1.0,
            y_tick_size: 5.0,
            y_label_shift: 3.0,
            y_label_offset: 21.0,
            x_tick_size: 5.0,
            x_date_label_offset: 20.0,
            x_time_label_offset: 35.0,
            cursor_halo_width: 3.0,
            cursor_core_width: 1.0,
            draw_threshold: 0.01,
            fill_threshold: 0.1,
        }
    }
}

impl ChartLayout {
    /// Surface height needed to show `lanes` lanes plus the axis margins.
    pub fn surface_height(&self, lanes: usize) -> f64 {
        self.padding_top + self.padding_bottom + self.lane_height * lanes as f64
    }

    /// The region between the axis margins where gridlines and blocks go.
    pub fn plot_rect(&self, surface: Surface) -> Rect {
        Rect::new(
            self.padding_left,
            self.padding_top,
            surface.width - self.padding_right - self.padding_left,
            surface.height - self.padding_bottom - self.padding_top,
        )
    }

    /// Horizontal pixel range the time scale maps onto.
    pub fn x_range(&self, width: f64) -> (f64, f64) {
        (self.padding_left, width - self.padding_right)
    }

    /// Y coordinate of the bottom edge of the last lane (the x axis line).
    pub fn lanes_bottom(&self, lanes: usize) -> f64 {
        self.padding_top + self.lane_height * lanes as f64
    }
}
