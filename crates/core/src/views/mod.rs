//! The render pipeline: state in, an ordered command list out.
//!
//! Each pass repaints the whole surface. Layers are emitted back to front:
//! clear, y axis, x axis, blocks, cursor.

pub mod axis;
pub mod blocks;
pub mod cursor;

use gantt_protocol::{RenderCommand, Surface};

use crate::config::ChartLayout;
use crate::interaction::InteractionState;
use crate::viewport::LoadedView;

pub use axis::{render_x_axis, render_y_axis};
pub use blocks::render_blocks;
pub use cursor::render_cursor;

pub fn render_chart(
    view: &LoadedView,
    layout: &ChartLayout,
    surface: Surface,
    interaction: &InteractionState,
) -> Vec<RenderCommand> {
    let lane_count = view.lanes.len();
    let mut commands = vec![RenderCommand::Clear {
        rect: surface.bounds(),
    }];
    commands.extend(render_y_axis(&view.lanes, layout, surface.width));
    commands.extend(render_x_axis(&view.scale, lane_count, layout));
    commands.extend(render_blocks(view, layout, layout.plot_rect(surface)));
    commands.extend(render_cursor(
        &view.scale,
        interaction.cursor_time,
        interaction.is_panning(),
        lane_count,
        layout,
    ));
    commands
}
