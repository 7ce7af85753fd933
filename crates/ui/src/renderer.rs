use egui::{Align2, CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind};
use gantt_protocol::{RenderCommand, TextAlign};

use crate::theme::{self, ThemeMode};

fn to_rect(rect: gantt_protocol::Rect, offset: Pos2) -> Rect {
    Rect::from_min_size(
        Pos2::new(rect.x as f32 + offset.x, rect.y as f32 + offset.y),
        egui::vec2(rect.w as f32, rect.h as f32),
    )
}

fn to_pos(point: gantt_protocol::Point, offset: Pos2) -> Pos2 {
    Pos2::new(point.x as f32 + offset.x, point.y as f32 + offset.y)
}

/// Paint a frame's commands with an egui `Painter`.
///
/// `offset` is the screen position of the surface's top-left corner. Clips
/// nest inside the painter's own clip rect and are restored on `ClearClip`.
pub fn render_commands(
    painter: &mut egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    mode: ThemeMode,
) {
    let mut clip_stack: Vec<Rect> = Vec::new();

    for cmd in commands {
        match cmd {
            RenderCommand::Clear { rect } => {
                painter.rect_filled(
                    to_rect(*rect, offset),
                    CornerRadius::ZERO,
                    theme::resolve(gantt_protocol::ThemeToken::Background, mode),
                );
            }

            RenderCommand::DrawRect { rect, fill, stroke } => {
                let egui_rect = to_rect(*rect, offset);

                // Cull off-screen
                if !painter.clip_rect().intersects(egui_rect.expand(1.0)) {
                    continue;
                }

                if let Some(fill) = fill {
                    painter.rect_filled(
                        egui_rect,
                        CornerRadius::ZERO,
                        theme::resolve_paint(*fill, mode),
                    );
                }
                if let Some(stroke) = stroke {
                    painter.rect_stroke(
                        egui_rect,
                        CornerRadius::ZERO,
                        Stroke::new(stroke.width as f32, theme::resolve_paint(stroke.paint, mode)),
                        StrokeKind::Middle,
                    );
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                paint,
                font_size,
                align,
            } => {
                let size = *font_size as f32;
                if size < 1.0 {
                    continue;
                }
                // Positions are baselines; bottom anchoring is close enough.
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_BOTTOM,
                    TextAlign::Center => Align2::CENTER_BOTTOM,
                    TextAlign::Right => Align2::RIGHT_BOTTOM,
                };
                painter.text(
                    to_pos(*position, offset),
                    anchor,
                    text.as_str(),
                    FontId::proportional(size),
                    theme::resolve_paint(*paint, mode),
                );
            }

            RenderCommand::DrawLine {
                from,
                to,
                paint,
                width,
            } => {
                painter.line_segment(
                    [to_pos(*from, offset), to_pos(*to, offset)],
                    Stroke::new(*width as f32, theme::resolve_paint(*paint, mode)),
                );
            }

            RenderCommand::SetClip { rect } => {
                clip_stack.push(painter.clip_rect());
                let intersected = painter.clip_rect().intersect(to_rect(*rect, offset));
                painter.set_clip_rect(intersected);
            }

            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    painter.set_clip_rect(prev);
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Groups have no visual effect in egui.
            }
        }
    }

    // An unbalanced SetClip must not leak into later painting.
    if let Some(first) = clip_stack.first() {
        painter.set_clip_rect(*first);
    }
}
