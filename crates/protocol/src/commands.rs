use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{Color, Point, Rect};

/// A single, stateless render instruction.
///
/// The chart emits a `Vec<RenderCommand>` for every painted frame. Renderers
/// consume the list in order; each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Erase a region of the surface back to the background.
    Clear { rect: Rect },

    /// Draw a rectangle. A block too thin to fill still gets its outline,
    /// so `fill` and `stroke` are independent.
    DrawRect {
        rect: Rect,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },

    /// Draw a text string. `position` is the baseline anchor point.
    DrawText {
        position: Point,
        text: SharedStr,
        paint: Paint,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        paint: Paint,
        width: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Begin a logical group (axes, blocks, cursor). Renderers may ignore it.
    BeginGroup { id: SharedStr },

    /// End the current group.
    EndGroup,
}

/// What a command is painted with: a theme-resolved token or a fixed color
/// (group colors are computed, not themed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Theme(ThemeToken),
    Color(Color),
}

impl From<ThemeToken> for Paint {
    fn from(token: ThemeToken) -> Self {
        Paint::Theme(token)
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Color(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
}

impl Stroke {
    pub fn new(paint: impl Into<Paint>, width: f64) -> Self {
        Self {
            paint: paint.into(),
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_from_token_and_color() {
        let token: Paint = ThemeToken::GridLine.into();
        assert_eq!(token, Paint::Theme(ThemeToken::GridLine));

        let color = Color::rgb(255, 102, 102);
        let paint: Paint = color.into();
        assert_eq!(paint, Paint::Color(color));
    }

    #[test]
    fn commands_serialize_as_tagged_json() {
        let cmd = RenderCommand::DrawLine {
            from: Point::new(0.0, 1.0),
            to: Point::new(10.0, 1.0),
            paint: ThemeToken::AxisLine.into(),
            width: 2.0,
        };
        let json = serde_json::to_string(&cmd).expect("serializes");
        assert!(json.starts_with("{\"DrawLine\""), "{json}");

        let back: Option<RenderCommand> = serde_json::from_str(&json).ok();
        assert_eq!(back, Some(cmd));
    }
}
