//! Integration tests: drive a `GanttChart` through the public handle with a
//! queue-backed frame requester, the way a host would.

use std::cell::RefCell;
use std::rc::Rc;

use gantt_core::parsers::parse_auto;
use gantt_core::svg::render_svg;
use gantt_core::{
    ChartOptions, FrameQueue, FrameTask, GanttChart, Interval, PointerButton, create_chart,
};
use gantt_protocol::RenderCommand;

const EPS: f64 = 1e-6;

fn dataset_a() -> Vec<Interval> {
    vec![
        Interval::new("a", 1000, 2000, "A", "X").expect("valid interval"),
        Interval::new("b", 1500, 1800, "B", "Y").expect("valid interval"),
    ]
}

type Selections = Rc<RefCell<Vec<Vec<Interval>>>>;

fn chart_with_selection() -> (GanttChart, FrameQueue, Selections) {
    let queue = FrameQueue::new();
    let selections: Selections = Rc::default();
    let sink = Rc::clone(&selections);
    let options = ChartOptions::new(800.0, queue.clone())
        .on_select(move |items: &[Interval]| sink.borrow_mut().push(items.to_vec()));
    (create_chart(options), queue, selections)
}

/// Run every queued frame, returning the commands of the last one painted.
fn drain(chart: &mut GanttChart, queue: &FrameQueue) -> Option<Vec<RenderCommand>> {
    let mut last = None;
    while let Some(task) = queue.pop() {
        if let Some(commands) = chart.run_frame(task) {
            last = Some(commands);
        }
    }
    last
}

#[test]
fn load_sets_bounds_and_lanes() {
    let (mut chart, queue, _) = chart_with_selection();
    chart.load_dataset(dataset_a());

    let state = chart.viewport().expect("initialized");
    assert_eq!(state.data_min, 1000.0);
    assert_eq!(state.data_max, 2000.0);
    assert_eq!(state.view_min, 1000.0);
    assert_eq!(state.view_max, 2000.0);

    assert_eq!(queue.pop(), Some(FrameTask::Initial));
    let frame = chart.run_frame(FrameTask::Initial).expect("frame");
    let labels: Vec<String> = frame
        .iter()
        .filter_map(|c| match c {
            RenderCommand::DrawText { text, position, .. } if position.x < 140.0 => {
                Some(text.to_string())
            }
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["A", "B"]);
}

#[test]
fn zoom_out_past_bounds_collapses_to_extent() {
    let (mut chart, queue, _) = chart_with_selection();
    chart.load_dataset(dataset_a());
    drain(&mut chart, &queue);

    // x = 440 is domain time 1500.
    chart.wheel(440.0, 10.0, 10.0);
    let state = chart.viewport().expect("initialized");
    assert!((state.view_min - 1000.0).abs() < EPS);
    assert!((state.view_max - 2000.0).abs() < EPS);
    assert_eq!(queue.pop(), Some(FrameTask::Coalesced));
}

#[test]
fn click_selects_cursor_lane_only() {
    let (mut chart, queue, selections) = chart_with_selection();
    chart.load_dataset(dataset_a());
    drain(&mut chart, &queue);

    // Cursor into lane 0, then a press and release with no movement between.
    chart.pointer_move(500.0, 10.0);
    chart.pointer_down(500.0, 10.0, PointerButton::Primary);
    chart.pointer_up();
    chart.click(500.0, 10.0, PointerButton::Primary);

    let selections = selections.borrow();
    assert_eq!(selections.len(), 1);
    let selected = &selections[0];
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].thread_name(), &"A");
}

#[test]
fn drag_suppresses_selection() {
    let (mut chart, queue, selections) = chart_with_selection();
    chart.load_dataset(dataset_a());
    drain(&mut chart, &queue);

    chart.pointer_move(500.0, 10.0);
    chart.pointer_down(500.0, 10.0, PointerButton::Primary);
    chart.pointer_move(480.0, 10.0);
    chart.pointer_up();
    chart.click(480.0, 10.0, PointerButton::Primary);
    assert!(selections.borrow().is_empty());
}

#[test]
fn empty_click_is_still_reported() {
    let (mut chart, queue, selections) = chart_with_selection();
    chart.load_dataset(dataset_a());
    drain(&mut chart, &queue);

    // t = 1100 on lane B, which only covers 1500..1800.
    chart.pointer_move(200.0, 40.0);
    chart.pointer_down(200.0, 40.0, PointerButton::Primary);
    chart.pointer_up();
    chart.click(200.0, 40.0, PointerButton::Primary);
    assert_eq!(selections.borrow().as_slice(), &[Vec::<Interval>::new()]);
}

#[test]
fn empty_dataset_ignores_input() {
    let (mut chart, queue, selections) = chart_with_selection();
    chart.load_dataset(Vec::new());
    assert!(!chart.is_initialized());
    assert!(queue.is_empty());

    chart.pointer_move(440.0, 10.0);
    chart.pointer_down(440.0, 10.0, PointerButton::Primary);
    chart.pointer_up();
    chart.click(440.0, 10.0, PointerButton::Primary);
    chart.wheel(440.0, 10.0, 5.0);
    chart.pointer_leave();

    assert!(queue.is_empty());
    assert!(selections.borrow().is_empty());
    assert!(chart.run_frame(FrameTask::Coalesced).is_none());
}

#[test]
fn viewport_invariant_holds_under_random_input() {
    let (mut chart, queue, _) = chart_with_selection();
    chart.load_dataset(dataset_a());

    // Deterministic pseudo-random walk over wheel and drag input.
    let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };
    for _ in 0..500 {
        let x = 140.0 + (next() % 600) as f64;
        match next() % 3 {
            0 => chart.wheel(x, 10.0, (next() % 21) as f64 - 10.0),
            1 => {
                chart.pointer_down(x, 10.0, PointerButton::Primary);
                chart.pointer_move(140.0 + (next() % 600) as f64, 10.0);
                chart.pointer_up();
            }
            _ => chart.pointer_move(x, 40.0),
        }
        let s = chart.viewport().expect("initialized");
        assert!(s.data_min <= s.view_min + EPS, "{s:?}");
        assert!(s.view_min < s.view_max, "{s:?}");
        assert!(s.view_max <= s.data_max + EPS, "{s:?}");
        assert!(s.view_max - s.view_min >= 10.0 - EPS, "{s:?}");
        drain(&mut chart, &queue);
    }
}

#[test]
fn far_timestamps_render_without_panicking() {
    assert!(parse_auto(b"a;1e30;1e30;X;A\n").is_err());

    let items = parse_auto(b"a;-8640000000000000;8640000000000000;X;A\n").expect("in range");
    let queue = FrameQueue::new();
    let mut chart = create_chart(ChartOptions::new(800.0, queue.clone()));
    chart.load_dataset(items);
    assert!(drain(&mut chart, &queue).is_some());

    chart.wheel(140.0, 10.0, -50.0);
    chart.wheel(740.0, 10.0, 8000.0);
    drain(&mut chart, &queue);
    let s = chart.viewport().expect("initialized");
    assert!(s.view_min.is_finite() && s.view_max.is_finite(), "{s:?}");
    assert!(s.view_min < s.view_max, "{s:?}");
}

#[test]
fn fixture_loads_and_exports() {
    let data = include_bytes!("fixtures/stage.rows");
    let items = parse_auto(data).expect("fixture parses");
    assert_eq!(items.len(), 7);

    let queue = FrameQueue::new();
    let mut chart = create_chart(ChartOptions::new(1024.0, queue.clone()));
    chart.load_dataset(items);
    let frame = drain(&mut chart, &queue).expect("initial frame");

    let surface = chart.surface();
    assert_eq!(surface.height, 1.0 + 35.0 + 3.0 * 32.0);

    let legend: Vec<String> = chart.legend().iter().map(|e| e.name.to_string()).collect();
    assert_eq!(legend, vec!["extract", "load", "maintenance", "transform"]);

    let svg = render_svg(&frame, surface);
    assert!(svg.contains("worker-3"));
    assert!(svg.contains("clipPath"));
    assert!(svg.contains("2024.03.10"));
}
