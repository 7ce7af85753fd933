use gantt_protocol::{Paint, Rect, RenderCommand, Stroke, ThemeToken};

use crate::config::ChartLayout;
use crate::viewport::LoadedView;

/// One block per visible interval, clipped to the plot rectangle.
///
/// Block edges are not pulled in to the plot edges; intervals that start
/// before or end after the view are left to the clip region.
pub fn render_blocks(view: &LoadedView, layout: &ChartLayout, plot: Rect) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(view.items.len() + 4);
    commands.push(RenderCommand::BeginGroup {
        id: "blocks".into(),
    });
    commands.push(RenderCommand::SetClip { rect: plot });

    let state = &view.state;
    let border = Stroke::new(ThemeToken::BlockBorder, layout.block_border_width);

    for item in &view.items {
        if !item.overlaps(state.view_min, state.view_max) {
            continue;
        }

        let start_x = view.scale.map(item.start_time() as f64);
        let end_x = view.scale.map(item.end_time() as f64);
        let width = end_x - start_x;
        if width < layout.draw_threshold {
            continue;
        }

        let Some(lane) = view.lanes.lane_of(item.thread_name()) else {
            continue;
        };
        let fill = if width > layout.fill_threshold {
            view.colors.color_of(item.group_name()).map(Paint::Color)
        } else {
            None
        };

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(
                start_x,
                layout.block_offset + layout.lane_height * lane as f64,
                width,
                layout.block_height,
            ),
            fill,
            stroke: Some(border),
        });
    }

    commands.push(RenderCommand::ClearClip);
    commands.push(RenderCommand::EndGroup);
    commands
}
