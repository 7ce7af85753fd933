use gantt_protocol::{Point, RenderCommand, SharedStr, TextAlign, ThemeToken};

use crate::config::ChartLayout;
use crate::format::{LabelPrecision, date_label, time_label};
use crate::index::LaneMap;
use crate::scale::TimeScale;

/// Lane gridlines, tick marks and thread labels, plus the left border.
pub fn render_y_axis(lanes: &LaneMap, layout: &ChartLayout, width: f64) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(lanes.len() * 3 + 3);
    commands.push(RenderCommand::BeginGroup {
        id: "y-axis".into(),
    });

    let left = layout.padding_left;
    let right = width - layout.padding_right;

    for (index, name) in lanes.names().iter().enumerate() {
        let y = layout.padding_top + layout.lane_height * index as f64;

        commands.push(RenderCommand::DrawLine {
            from: Point::new(left, y),
            to: Point::new(right, y),
            paint: ThemeToken::GridLine.into(),
            width: layout.grid_width,
        });

        commands.push(RenderCommand::DrawLine {
            from: Point::new(left - layout.y_tick_size, y),
            to: Point::new(left, y),
            paint: ThemeToken::AxisLine.into(),
            width: layout.grid_width,
        });

        commands.push(RenderCommand::DrawText {
            position: Point::new(left - layout.y_label_shift, y + layout.y_label_offset),
            text: name.clone(),
            paint: ThemeToken::AxisText.into(),
            font_size: layout.font_size,
            align: TextAlign::Right,
        });
    }

    commands.push(RenderCommand::DrawLine {
        from: Point::new(left, layout.padding_top),
        to: Point::new(left, layout.lanes_bottom(lanes.len())),
        paint: ThemeToken::AxisLine.into(),
        width: layout.grid_width,
    });

    commands.push(RenderCommand::EndGroup);
    commands
}

/// Time gridlines, ticks and two-line (date, time) labels under the plot,
/// plus the axis line itself.
pub fn render_x_axis(scale: &TimeScale, lane_count: usize, layout: &ChartLayout) -> Vec<RenderCommand> {
    let (view_min, view_max) = scale.domain();
    let precision = LabelPrecision::for_span(view_max - view_min);
    let ticks = scale.ticks();

    let lanes_height = layout.lane_height * lane_count as f64;
    let bottom = layout.lanes_bottom(lane_count);

    let mut commands = Vec::with_capacity(ticks.len() * 4 + 3);
    commands.push(RenderCommand::BeginGroup {
        id: "x-axis".into(),
    });

    for tick in ticks {
        let x = scale.map(tick as f64);

        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, layout.padding_top),
            to: Point::new(x, bottom),
            paint: ThemeToken::GridLine.into(),
            width: layout.grid_width,
        });

        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, bottom),
            to: Point::new(x, bottom + layout.x_tick_size),
            paint: ThemeToken::AxisLine.into(),
            width: layout.grid_width,
        });

        commands.push(RenderCommand::DrawText {
            position: Point::new(x, layout.x_date_label_offset + lanes_height),
            text: SharedStr::from(date_label(tick)),
            paint: ThemeToken::AxisText.into(),
            font_size: layout.font_size,
            align: TextAlign::Center,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x, layout.x_time_label_offset + lanes_height),
            text: SharedStr::from(time_label(tick, precision)),
            paint: ThemeToken::AxisText.into(),
            font_size: layout.font_size,
            align: TextAlign::Center,
        });
    }

    let (range_start, range_end) = scale.range();
    commands.push(RenderCommand::DrawLine {
        from: Point::new(range_start, bottom),
        to: Point::new(range_end, bottom),
        paint: ThemeToken::AxisLine.into(),
        width: layout.grid_width,
    });

    commands.push(RenderCommand::EndGroup);
    commands
}
