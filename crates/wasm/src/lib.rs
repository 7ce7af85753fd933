//! Browser bindings. A page creates one `ChartHandle` per canvas, forwards
//! DOM events to it and paints the JSON command lists it returns from an
//! animation-frame loop.

use gantt_core::parsers::parse_auto;
use gantt_core::svg::render_svg;
use gantt_core::{
    ChartLayout, ChartOptions, FrameQueue, GanttChart, Interval, IntervalCallback, PointerButton,
    create_chart,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// DOM `MouseEvent.button` numbering.
fn dom_button(button: u8) -> PointerButton {
    match button {
        0 => PointerButton::Primary,
        1 => PointerButton::Middle,
        _ => PointerButton::Secondary,
    }
}

/// Call `callback` with the intervals as a JSON string.
fn json_callback(callback: js_sys::Function) -> impl FnMut(&[Interval]) + 'static {
    move |items: &[Interval]| {
        if let Ok(json) = serde_json::to_string(items) {
            // Exceptions thrown by the page's handler are its own business.
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
        }
    }
}

#[derive(Serialize)]
struct LegendItem<'a> {
    name: &'a str,
    color: String,
}

#[wasm_bindgen]
pub struct ChartHandle {
    chart: GanttChart,
    queue: FrameQueue,
}

#[wasm_bindgen]
impl ChartHandle {
    /// `layout_json` optionally overrides chart geometry; missing fields
    /// keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, layout_json: Option<String>) -> Result<ChartHandle, JsError> {
        let layout = match layout_json {
            Some(json) => serde_json::from_str::<ChartLayout>(&json).map_err(js_err)?,
            None => ChartLayout::default(),
        };
        let queue = FrameQueue::new();
        let chart = create_chart(ChartOptions::new(width, queue.clone()).with_layout(layout));
        Ok(ChartHandle { chart, queue })
    }

    /// Parse and load a dataset (rows or JSON). Returns the interval count.
    pub fn load(&mut self, data: &[u8]) -> Result<usize, JsError> {
        let items = parse_auto(data).map_err(js_err)?;
        let count = items.len();
        self.chart.load_dataset(items);
        Ok(count)
    }

    pub fn on_select(&mut self, callback: Option<js_sys::Function>) {
        self.chart
            .set_on_select(callback.map(|f| Box::new(json_callback(f)) as IntervalCallback));
    }

    pub fn on_highlight(&mut self, callback: Option<js_sys::Function>) {
        self.chart
            .set_on_highlight(callback.map(|f| Box::new(json_callback(f)) as IntervalCallback));
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, button: u8) {
        self.chart.pointer_down(x, y, dom_button(button));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.chart.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.chart.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.chart.pointer_leave();
    }

    pub fn click(&mut self, x: f64, y: f64, button: u8) {
        self.chart.click(x, y, dom_button(button));
    }

    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
        self.chart.wheel(x, y, delta_y);
    }

    pub fn resize(&mut self, width: f64) {
        self.chart.resize(width);
    }

    /// Whether the page should schedule an animation frame.
    pub fn frame_requested(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Run the requested frames and return the last one's render commands
    /// as JSON, or `None` when nothing needs painting.
    pub fn next_frame(&mut self) -> Result<Option<String>, JsError> {
        let mut last = None;
        while let Some(task) = self.queue.pop() {
            if let Some(commands) = self.chart.run_frame(task) {
                last = Some(commands);
            }
        }
        last.map(|commands| serde_json::to_string(&commands).map_err(js_err))
            .transpose()
    }

    /// Canvas height for the loaded dataset.
    pub fn surface_height(&self) -> f64 {
        self.chart.surface().height
    }

    pub fn legend(&self) -> Result<String, JsError> {
        let legend = self.chart.legend();
        let items: Vec<LegendItem<'_>> = legend
            .iter()
            .map(|entry| LegendItem {
                name: entry.name.as_str(),
                color: entry.color.to_hex(),
            })
            .collect();
        serde_json::to_string(&items).map_err(js_err)
    }

    /// The current state as an SVG document, if a dataset is loaded.
    pub fn export_svg(&self) -> Option<String> {
        let commands = self.chart.render()?;
        Some(render_svg(&commands, self.chart.surface()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_buttons() {
        assert_eq!(dom_button(0), PointerButton::Primary);
        assert_eq!(dom_button(1), PointerButton::Middle);
        assert_eq!(dom_button(2), PointerButton::Secondary);
    }

    #[test]
    fn frames_cross_as_json() {
        let mut handle = ChartHandle::new(800.0, None).ok().expect("handle");
        assert_eq!(handle.load(b"a;1000;2000;X;A\nb;1500;1800;Y;B\n").ok(), Some(2));
        assert!(handle.frame_requested());
        let json = handle.next_frame().ok().flatten().expect("frame json");
        assert!(json.starts_with('['));
        assert!(json.contains("\"Clear\""));
        assert!(!handle.frame_requested());
        assert_eq!(handle.surface_height(), 1.0 + 35.0 + 64.0);
    }

    #[test]
    fn layout_override_keeps_defaults() {
        let mut handle = ChartHandle::new(800.0, Some(r#"{"lane_height": 40.0}"#.into()))
            .ok()
            .expect("handle");
        assert_eq!(handle.load(b"a;0;100;X;A\n").ok(), Some(1));
        assert_eq!(handle.surface_height(), 1.0 + 35.0 + 40.0);
        assert!(handle.export_svg().is_some_and(|svg| svg.contains("<svg")));
    }
}
