use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context as _, Result};
use eframe::egui;
use gantt_core::format::{format_timestamp, humanize_duration};
use gantt_core::parsers;
use gantt_core::svg::render_svg_themed;
use gantt_core::{
    ChartLayout, ChartOptions, FrameQueue, FrameRequester, FrameTask, GanttChart, Interval,
    PointerButton, create_chart,
};
use gantt_protocol::RenderCommand;
use log::{info, warn};

use crate::renderer;
use crate::theme::ThemeMode;

/// Startup settings, usually from the command line.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub layout: ChartLayout,
    pub theme: ThemeMode,
    pub width: Option<f32>,
    pub dataset: Option<PathBuf>,
}

/// Queues the chart's frame requests and wakes egui so they run on the next
/// update.
struct RepaintRequester {
    queue: FrameQueue,
    ctx: egui::Context,
}

impl FrameRequester for RepaintRequester {
    fn request_frame(&self, task: FrameTask) {
        self.queue.request_frame(task);
        self.ctx.request_repaint();
    }
}

/// Convert an egui wheel delta into the chart's wheel units (positive zooms
/// out, one notch is one unit).
fn wheel_units(unit: egui::MouseWheelUnit, delta: egui::Vec2) -> f64 {
    let steps = match unit {
        egui::MouseWheelUnit::Line => delta.y,
        egui::MouseWheelUnit::Point => delta.y / 40.0,
        egui::MouseWheelUnit::Page => delta.y * 10.0,
    };
    -f64::from(steps)
}

fn to_button(button: egui::PointerButton) -> PointerButton {
    match button {
        egui::PointerButton::Primary => PointerButton::Primary,
        egui::PointerButton::Middle => PointerButton::Middle,
        _ => PointerButton::Secondary,
    }
}

/// Main application state.
pub struct GanttApp {
    chart: GanttChart,
    queue: FrameQueue,
    /// Commands of the last frame the chart painted.
    frame: Vec<RenderCommand>,
    selection: Rc<RefCell<Option<Vec<Interval>>>>,
    hovered: Rc<RefCell<Vec<Interval>>>,
    theme_mode: ThemeMode,
    fixed_width: Option<f32>,
    chart_width: f32,
    /// Whether the pointer was over the chart last update.
    pointer_inside: bool,
    source: Option<String>,
    error: Option<String>,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        cc.egui_ctx.set_visuals(config.theme.visuals());

        let queue = FrameQueue::new();
        let selection: Rc<RefCell<Option<Vec<Interval>>>> = Rc::default();
        let hovered: Rc<RefCell<Vec<Interval>>> = Rc::default();

        let width = config.width.unwrap_or(1024.0);
        let selection_sink = Rc::clone(&selection);
        let hover_sink = Rc::clone(&hovered);
        let options = ChartOptions::new(
            f64::from(width),
            RepaintRequester {
                queue: queue.clone(),
                ctx: cc.egui_ctx.clone(),
            },
        )
        .with_layout(config.layout)
        .on_select(move |items: &[Interval]| *selection_sink.borrow_mut() = Some(items.to_vec()))
        .on_highlight(move |items: &[Interval]| *hover_sink.borrow_mut() = items.to_vec());

        let mut app = Self {
            chart: create_chart(options),
            queue,
            frame: Vec::new(),
            selection,
            hovered,
            theme_mode: config.theme,
            fixed_width: config.width,
            chart_width: width,
            pointer_inside: false,
            source: None,
            error: None,
        };

        if let Some(path) = config.dataset {
            app.open_path(&path);
        }
        app
    }

    fn open_path(&mut self, path: &Path) {
        let result = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))
            .and_then(|data| self.load_bytes(&data, &path.display().to_string()));
        if let Err(e) = result {
            warn!("{e:#}");
            self.error = Some(format!("{e:#}"));
        }
    }

    fn load_bytes(&mut self, data: &[u8], source: &str) -> Result<()> {
        let items = parsers::parse_auto(data).with_context(|| format!("failed to parse {source}"))?;
        info!("{source}: {} intervals", items.len());
        self.chart.load_dataset(items);
        self.frame.clear();
        self.selection.borrow_mut().take();
        self.hovered.borrow_mut().clear();
        self.source = Some(source.to_string());
        self.error = None;
        Ok(())
    }

    fn export_svg(&mut self) -> Result<()> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_file_name("timeline.svg")
            .save_file()
        else {
            return Ok(());
        };
        let svg = render_svg_themed(&self.frame, self.chart.surface(), self.theme_mode.is_dark());
        std::fs::write(&path, svg).with_context(|| format!("failed to write {}", path.display()))?;
        info!("exported {}", path.display());
        Ok(())
    }

    /// Forward this update's pointer and wheel events, translated into
    /// surface coordinates of `chart_rect`.
    fn forward_input(&mut self, ctx: &egui::Context, chart_rect: egui::Rect) {
        let origin = chart_rect.min;
        let events = ctx.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    if chart_rect.contains(pos) {
                        self.pointer_inside = true;
                        let p = pos - origin;
                        self.chart.pointer_move(f64::from(p.x), f64::from(p.y));
                    } else if self.pointer_inside {
                        self.pointer_inside = false;
                        self.chart.pointer_leave();
                    }
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    let p = pos - origin;
                    let (x, y) = (f64::from(p.x), f64::from(p.y));
                    if pressed {
                        if chart_rect.contains(pos) {
                            self.chart.pointer_down(x, y, to_button(button));
                        }
                    } else {
                        self.chart.pointer_up();
                        if chart_rect.contains(pos) {
                            self.chart.click(x, y, to_button(button));
                        }
                    }
                }
                egui::Event::PointerGone => {
                    if self.pointer_inside {
                        self.pointer_inside = false;
                        self.chart.pointer_leave();
                    }
                }
                egui::Event::MouseWheel { unit, delta, .. } => {
                    if let Some(pos) = ctx.input(|i| i.pointer.hover_pos())
                        && chart_rect.contains(pos)
                    {
                        let p = pos - origin;
                        self.chart
                            .wheel(f64::from(p.x), f64::from(p.y), wheel_units(unit, delta));
                    }
                }
                _ => {}
            }
        }
    }

    fn run_frames(&mut self) {
        while let Some(task) = self.queue.pop() {
            if let Some(commands) = self.chart.run_frame(task) {
                self.frame = commands;
            }
        }
    }

    fn legend_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Groups");
        for entry in self.chart.legend() {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                let c = entry.color;
                ui.painter()
                    .rect_filled(rect, egui::CornerRadius::ZERO, egui::Color32::from_rgb(c.r, c.g, c.b));
                ui.label(entry.name.as_str());
            });
        }
    }

    fn selection_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Selection");
        let selection = self.selection.borrow();
        let Some(items) = selection.as_ref() else {
            ui.label("Click a block to select it.");
            return;
        };
        if items.is_empty() {
            ui.label("Nothing under the cursor.");
            return;
        }
        for item in items {
            ui.group(|ui| {
                ui.strong(item.label().as_str());
                ui.label(format!("{} / {}", item.thread_name(), item.group_name()));
                ui.label(format!("start  {}", format_timestamp(item.start_time())));
                ui.label(format!("end    {}", format_timestamp(item.end_time())));
                ui.label(format!("took   {}", humanize_duration(item.duration())));
            });
        }
        if ui.button("Copy as JSON").clicked() {
            match serde_json::to_string_pretty(items) {
                Ok(json) => ui.ctx().copy_text(json),
                Err(e) => warn!("failed to serialize selection: {e}"),
            }
        }
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("gantt");
                ui.separator();

                if ui.button("Open").clicked()
                    && let Some(path) = rfd::FileDialog::new()
                        .add_filter("Dataset", &["rows", "csv", "txt", "json"])
                        .pick_file()
                {
                    self.open_path(&path);
                }

                let can_export = !self.frame.is_empty();
                if ui
                    .add_enabled(can_export, egui::Button::new("Export SVG"))
                    .clicked()
                    && let Err(e) = self.export_svg()
                {
                    warn!("{e:#}");
                    self.error = Some(format!("{e:#}"));
                }

                ui.separator();

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "Dark",
                    ThemeMode::Light => "Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    ctx.set_visuals(self.theme_mode.visuals());
                }
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(err) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                } else if let Some(state) = self.chart.viewport() {
                    ui.label(format!(
                        "{} | {} intervals | viewing {} from {}",
                        self.source.as_deref().unwrap_or("dataset"),
                        self.chart.items().len(),
                        humanize_duration(state.span() as i64),
                        format_timestamp(state.view_min as i64),
                    ));
                } else {
                    ui.label("No dataset loaded. Click Open or drop a file.");
                }
            });
        });

        egui::SidePanel::right("details")
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.legend_panel(ui);
                    ui.separator();
                    self.selection_panel(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.chart.is_initialized() {
                ui.centered_and_justified(|ui| {
                    ui.label("Drop a dataset here or click Open");
                });
                return;
            }

            let width = self.fixed_width.unwrap_or_else(|| ui.available_width());
            if (width - self.chart_width).abs() >= 1.0 {
                self.chart_width = width;
                self.chart.resize(f64::from(width));
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                let surface = self.chart.surface();
                let size = egui::vec2(surface.width as f32, surface.height as f32);
                let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

                self.forward_input(ctx, rect);
                self.run_frames();

                let mut painter = ui.painter_at(rect);
                renderer::render_commands(&mut painter, &self.frame, rect.min, self.theme_mode);

                let hovered = self.hovered.borrow();
                if !hovered.is_empty() && !self.chart.interaction().is_panning() {
                    let _ = response.on_hover_ui_at_pointer(|ui| {
                        for item in hovered.iter() {
                            ui.label(format!(
                                "{} ({})",
                                item.label(),
                                humanize_duration(item.duration())
                            ));
                        }
                    });
                }
            });
        });

        // Handle file drop
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        if let Some(file) = dropped {
            if let Some(bytes) = &file.bytes {
                let name = if file.name.is_empty() { "dropped file" } else { file.name.as_str() };
                if let Err(e) = self.load_bytes(bytes, name) {
                    self.error = Some(format!("{e:#}"));
                }
            } else if let Some(path) = &file.path {
                self.open_path(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_down_zooms_out() {
        let down = egui::vec2(0.0, -1.0);
        assert_eq!(wheel_units(egui::MouseWheelUnit::Line, down), 1.0);
        assert_eq!(wheel_units(egui::MouseWheelUnit::Point, down * 40.0), 1.0);
        assert!(wheel_units(egui::MouseWheelUnit::Line, -down) < 0.0);
    }

    #[test]
    fn only_primary_maps_to_primary() {
        assert_eq!(to_button(egui::PointerButton::Primary), PointerButton::Primary);
        assert_eq!(to_button(egui::PointerButton::Secondary), PointerButton::Secondary);
        assert_eq!(to_button(egui::PointerButton::Extra1), PointerButton::Secondary);
    }
}
