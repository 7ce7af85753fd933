use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,

    /// Faint lane and tick gridlines across the plot.
    GridLine,
    /// Axis borders and tick marks.
    AxisLine,
    AxisText,

    BlockBorder,

    /// Wide dark stroke under the cursor line.
    CursorHalo,
    /// Thin light stroke on top of the halo.
    CursorCore,
}
