use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use gantt_core::ChartLayout;
use gantt_ui::{AppConfig, GanttApp, ThemeMode};

#[derive(Parser)]
#[command(name = "gantt-viewer")]
#[command(about = "Interactive viewer for thread timelines")]
struct Cli {
    /// Dataset to open: `name;start;end;group;thread` rows or a JSON array
    dataset: Option<PathBuf>,

    /// Fixed chart width in pixels; follows the window when omitted
    #[arg(long)]
    width: Option<f32>,

    /// TOML file overriding chart geometry
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ThemeMode::Light)]
    theme: ThemeMode,
}

fn load_layout(path: &Path) -> Result<ChartLayout> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let layout = match &cli.config {
        Some(path) => load_layout(path)?,
        None => ChartLayout::default(),
    };
    let config = AppConfig {
        layout,
        theme: cli.theme,
        width: cli.width,
        dataset: cli.dataset,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "gantt-viewer",
        options,
        Box::new(|cc| Ok(Box::new(GanttApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start viewer: {e}"))
}
