mod app;
mod renderer;
mod theme;

pub use app::{AppConfig, GanttApp};
pub use theme::ThemeMode;
