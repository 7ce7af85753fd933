use gantt_protocol::{Point, RenderCommand, ThemeToken};

use crate::config::ChartLayout;
use crate::scale::TimeScale;

/// Vertical cursor line across all lanes: a wide dark stroke with a thin
/// light one on top. Nothing while panning or without a cursor time.
pub fn render_cursor(
    scale: &TimeScale,
    cursor_time: Option<f64>,
    panning: bool,
    lane_count: usize,
    layout: &ChartLayout,
) -> Vec<RenderCommand> {
    let Some(time) = cursor_time else {
        return Vec::new();
    };
    if panning {
        return Vec::new();
    }

    // Half-pixel shift keeps the 1px core on a pixel column.
    let x = scale.map(time) - 0.5;
    let from = Point::new(x, layout.padding_top);
    let to = Point::new(x, layout.lanes_bottom(lane_count));

    vec![
        RenderCommand::BeginGroup {
            id: "cursor".into(),
        },
        RenderCommand::DrawLine {
            from,
            to,
            paint: ThemeToken::CursorHalo.into(),
            width: layout.cursor_halo_width,
        },
        RenderCommand::DrawLine {
            from,
            to,
            paint: ThemeToken::CursorCore.into(),
            width: layout.cursor_core_width,
        },
        RenderCommand::EndGroup,
    ]
}
