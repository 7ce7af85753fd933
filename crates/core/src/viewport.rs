//! Viewport controller: owns the dataset, its lane/color maps, the visible
//! time window and the time↔pixel scale.
//!
//! An empty dataset leaves the controller uninitialized. Every query and
//! mutation checks for that one state and does nothing.

use gantt_protocol::{Point, Rect, Surface};
use log::debug;

use crate::color::ColorAssigner;
use crate::config::{ChartLayout, MIN_SPAN, WHEEL_NOISE, ZOOM_BASE};
use crate::index::{ColorMap, LaneMap};
use crate::model::{Interval, time_bounds};
use crate::scale::TimeScale;

/// Data bounds and the visible window, in domain milliseconds.
///
/// After every mutation: `data_min <= view_min < view_max <= data_max` and
/// `view_max - view_min >= MIN_SPAN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub data_min: f64,
    pub data_max: f64,
    pub view_min: f64,
    pub view_max: f64,
}

impl ViewportState {
    pub fn span(&self) -> f64 {
        self.view_max - self.view_min
    }

    /// Restore the invariants after a zoom or pan. `anchor` is the time that
    /// stays put if the span has to grow to `MIN_SPAN`.
    ///
    /// The steps run in a fixed order. When the requested span is wider than
    /// the data, the upper-bound shift pushes `view_min` below `data_min`
    /// again and the final step pins it, so the lower bound wins and the
    /// window collapses to the data extent.
    pub fn clamp(&mut self, anchor: f64) {
        if !self.view_min.is_finite() || !self.view_max.is_finite() {
            self.view_min = self.data_min;
            self.view_max = self.data_max;
            return;
        }

        let span = self.span();
        if span < MIN_SPAN {
            if span > 0.0 {
                let grow = MIN_SPAN / span;
                self.view_min = grow * (self.view_min - anchor) + anchor;
                self.view_max = grow * (self.view_max - anchor) + anchor;
            } else {
                self.view_min = anchor - MIN_SPAN / 2.0;
                self.view_max = anchor + MIN_SPAN / 2.0;
            }
        }

        if self.view_min < self.data_min {
            let span = self.span();
            self.view_min = self.data_min;
            self.view_max = self.data_min + span;
        }

        if self.view_max > self.data_max {
            let span = self.span();
            self.view_max = self.data_max;
            self.view_min = self.data_max - span;
        }

        if self.view_min < self.data_min {
            self.view_min = self.data_min;
        }
    }
}

/// Everything rebuilt together on a dataset load.
#[derive(Debug, Clone)]
pub struct LoadedView {
    pub items: Vec<Interval>,
    pub lanes: LaneMap,
    pub colors: ColorMap,
    pub state: ViewportState,
    pub scale: TimeScale,
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    layout: ChartLayout,
    width: f64,
    loaded: Option<LoadedView>,
}

impl ViewportController {
    pub fn new(layout: ChartLayout, width: f64) -> Self {
        Self {
            layout,
            width,
            loaded: None,
        }
    }

    /// Replace the dataset wholesale. Returns whether the controller ended up
    /// initialized (false for an empty dataset).
    pub fn load_dataset(&mut self, items: Vec<Interval>, assigner: &dyn ColorAssigner) -> bool {
        let Some((min, max)) = time_bounds(&items) else {
            debug!("empty dataset, chart left uninitialized");
            self.loaded = None;
            return false;
        };

        let lanes = LaneMap::build(&items);
        let colors = ColorMap::build(&items, assigner);

        let data_min = min as f64;
        // A dataset narrower than the minimum span still needs room for one.
        let data_max = (max as f64).max(data_min + MIN_SPAN);
        let state = ViewportState {
            data_min,
            data_max,
            view_min: data_min,
            view_max: data_max,
        };
        let scale = TimeScale::new((data_min, data_max), self.layout.x_range(self.width));

        debug!(
            "loaded {} intervals: {} lanes, {} groups, data {}..{}",
            items.len(),
            lanes.len(),
            colors.len(),
            min,
            max
        );

        self.loaded = Some(LoadedView {
            items,
            lanes,
            colors,
            state,
            scale,
        });
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn loaded(&self) -> Option<&LoadedView> {
        self.loaded.as_ref()
    }

    pub fn state(&self) -> Option<ViewportState> {
        self.loaded.as_ref().map(|l| l.state)
    }

    pub fn items(&self) -> &[Interval] {
        self.loaded.as_ref().map_or(&[], |l| &l.items)
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn lane_count(&self) -> usize {
        self.loaded.as_ref().map_or(0, |l| l.lanes.len())
    }

    /// Current surface size; the height follows the lane count.
    pub fn surface(&self) -> Surface {
        Surface::new(self.width, self.layout.surface_height(self.lane_count()))
    }

    pub fn plot_rect(&self) -> Rect {
        self.layout.plot_rect(self.surface())
    }

    /// Whether a surface point lies in the plot rectangle.
    pub fn in_plot(&self, x: f64, y: f64) -> bool {
        self.plot_rect().contains(Point::new(x, y))
    }

    /// Change the surface width. The view window is kept; only the pixel
    /// range of the scale moves.
    pub fn resize(&mut self, width: f64) {
        self.width = width;
        let range = self.layout.x_range(width);
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.scale.set_range(range.0, range.1);
        }
    }

    /// Pixel x → domain time, if initialized.
    pub fn invert(&self, x: f64) -> Option<f64> {
        self.loaded.as_ref().map(|l| l.scale.invert(x))
    }

    /// Zoom around the time under `pixel_x`. Positive `delta_y` zooms out.
    pub fn zoom(&mut self, pixel_x: f64, delta_y: f64) {
        if !delta_y.is_finite() || delta_y.abs() < WHEEL_NOISE {
            return;
        }
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        let anchor = loaded.scale.invert(pixel_x);
        let factor = ZOOM_BASE.powf(delta_y);
        if !factor.is_finite() || factor <= 0.0 || !anchor.is_finite() {
            return;
        }
        let state = &mut loaded.state;
        state.view_min = factor * (state.view_min - anchor) + anchor;
        state.view_max = factor * (state.view_max - anchor) + anchor;
        Self::apply_clamp(loaded, anchor);
    }

    /// Shift the window by `delta_time` ms.
    pub fn pan(&mut self, delta_time: f64, anchor: f64) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        loaded.state.view_min += delta_time;
        loaded.state.view_max += delta_time;
        Self::apply_clamp(loaded, anchor);
    }

    fn apply_clamp(loaded: &mut LoadedView, anchor: f64) {
        loaded.state.clamp(anchor);
        loaded
            .scale
            .set_domain(loaded.state.view_min, loaded.state.view_max);
    }

    /// Lane under surface y, counted from the top padding. May be negative
    /// or past the last lane; callers compare it with real lane indexes.
    pub fn lane_at(&self, y: f64) -> i64 {
        ((y - self.layout.padding_top) / self.layout.lane_height).floor() as i64
    }

    /// Intervals containing `time` on lane `lane`, in dataset order.
    pub fn hits(&self, time: f64, lane: i64) -> Vec<Interval> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Vec::new();
        };
        loaded
            .items
            .iter()
            .filter(|item| item.contains(time))
            .filter(|item| {
                loaded
                    .lanes
                    .lane_of(item.thread_name())
                    .is_some_and(|l| l as i64 == lane)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HueSweep;

    const EPS: f64 = 1e-6;

    fn two_lane_dataset() -> Vec<Interval> {
        vec![
            Interval::new("a", 1000, 2000, "A", "X").expect("valid interval"),
            Interval::new("b", 1500, 1800, "B", "Y").expect("valid interval"),
        ]
    }

    fn loaded_controller() -> ViewportController {
        let mut vc = ViewportController::new(ChartLayout::default(), 800.0);
        assert!(vc.load_dataset(two_lane_dataset(), &HueSweep::default()));
        vc
    }

    fn assert_invariants(s: ViewportState) {
        assert!(s.data_min <= s.view_min + EPS, "{s:?}");
        assert!(s.view_min < s.view_max, "{s:?}");
        assert!(s.view_max <= s.data_max + EPS, "{s:?}");
        assert!(s.span() >= MIN_SPAN - EPS, "{s:?}");
    }

    fn state(vc: &ViewportController) -> ViewportState {
        vc.state().expect("controller initialized")
    }

    #[test]
    fn load_sets_bounds_and_window() {
        let vc = loaded_controller();
        let s = state(&vc);
        assert_eq!((s.data_min, s.data_max), (1000.0, 2000.0));
        assert_eq!((s.view_min, s.view_max), (1000.0, 2000.0));
        assert_eq!(vc.surface(), Surface::new(800.0, 100.0));
        let loaded = vc.loaded().map(|l| (l.lanes.lane_of("A"), l.lanes.lane_of("B")));
        assert_eq!(loaded, Some((Some(0), Some(1))));
    }

    #[test]
    fn empty_load_stays_uninitialized() {
        let mut vc = loaded_controller();
        assert!(!vc.load_dataset(Vec::new(), &HueSweep::default()));
        assert!(!vc.is_initialized());
        vc.zoom(400.0, 3.0);
        vc.pan(100.0, 1500.0);
        assert!(vc.state().is_none());
        assert!(vc.invert(400.0).is_none());
    }

    #[test]
    fn zoom_out_past_bounds_collapses_to_data_extent() {
        let mut vc = loaded_controller();
        // x = 440 is t = 1500 on an 800px surface.
        vc.zoom(440.0, 10.0);
        let s = state(&vc);
        assert!((s.view_min - 1000.0).abs() < EPS);
        assert!((s.view_max - 2000.0).abs() < EPS);
    }

    #[test]
    fn clamp_order_lower_bound_wins() {
        let mut s = ViewportState {
            data_min: 1000.0,
            data_max: 2000.0,
            view_min: 203.1,
            view_max: 2796.9,
        };
        s.clamp(1500.0);
        assert!((s.view_min - 1000.0).abs() < EPS);
        assert!((s.view_max - 2000.0).abs() < EPS);
    }

    #[test]
    fn clamp_grows_tiny_span_around_anchor() {
        let mut s = ViewportState {
            data_min: 0.0,
            data_max: 1000.0,
            view_min: 499.0,
            view_max: 501.0,
        };
        s.clamp(500.0);
        assert!((s.view_min - 495.0).abs() < EPS);
        assert!((s.view_max - 505.0).abs() < EPS);
    }

    #[test]
    fn zoom_in_then_out_restores() {
        let mut vc = loaded_controller();
        vc.zoom(300.0, -5.0);
        let zoomed = state(&vc);
        assert!(zoomed.span() < 1000.0);
        vc.zoom(300.0, 5.0);
        let s = state(&vc);
        assert!((s.view_min - 1000.0).abs() < 1e-6);
        assert!((s.view_max - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn zoom_out_then_in_restores_inside_bounds() {
        let mut vc = loaded_controller();
        vc.zoom(440.0, -10.0);
        let before = state(&vc);
        vc.zoom(500.0, 2.0);
        vc.zoom(500.0, -2.0);
        let after = state(&vc);
        assert!((before.view_min - after.view_min).abs() < 1e-6);
        assert!((before.view_max - after.view_max).abs() < 1e-6);
    }

    #[test]
    fn wheel_noise_is_ignored() {
        let mut vc = loaded_controller();
        vc.zoom(440.0, -5.0);
        let before = state(&vc);
        vc.zoom(440.0, 0.05);
        vc.zoom(440.0, -0.09);
        assert_eq!(state(&vc), before);
    }

    #[test]
    fn pan_roundtrip_and_bounds() {
        let mut vc = loaded_controller();
        vc.zoom(440.0, -5.0);
        let before = state(&vc);
        vc.pan(50.0, 1500.0);
        vc.pan(-50.0, 1500.0);
        let after = state(&vc);
        assert!((before.view_min - after.view_min).abs() < EPS);
        assert!((before.view_max - after.view_max).abs() < EPS);

        vc.pan(10_000.0, 1500.0);
        let s = state(&vc);
        assert!((s.view_max - 2000.0).abs() < EPS);
        assert!((s.span() - before.span()).abs() < EPS);
        assert_invariants(s);
    }

    #[test]
    fn invariants_hold_under_random_walk() {
        let mut vc = loaded_controller();
        // Deterministic pseudo-random sequence of wheel and pan steps.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..2_000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let x = 140.0 + (seed % 600) as f64;
            let amount = ((seed >> 16) % 400) as f64 / 10.0 - 20.0;
            if seed % 2 == 0 {
                vc.zoom(x, amount);
            } else {
                vc.pan(amount * 37.0, 1000.0 + (seed % 1000) as f64);
            }
            assert_invariants(state(&vc));
        }
    }

    #[test]
    fn degenerate_dataset_gets_minimum_span() {
        let mut vc = ViewportController::new(ChartLayout::default(), 800.0);
        let items = vec![Interval::new("p", 500, 500, "T", "G").expect("valid interval")];
        assert!(vc.load_dataset(items, &HueSweep::default()));
        let s = state(&vc);
        assert_eq!((s.data_min, s.data_max), (500.0, 510.0));
        vc.zoom(300.0, -30.0);
        assert_invariants(state(&vc));
    }

    #[test]
    fn huge_wheel_at_plot_edge_keeps_window_finite() {
        let mut vc = loaded_controller();
        // x = 140 inverts to exactly view_min, so an infinite factor would
        // multiply zero.
        vc.zoom(140.0, 8000.0);
        assert_invariants(state(&vc));
        vc.zoom(440.0, -3.0);
        assert_invariants(state(&vc));
    }

    #[test]
    fn non_finite_wheel_is_ignored() {
        let mut vc = loaded_controller();
        let before = state(&vc);
        vc.zoom(440.0, f64::NAN);
        vc.zoom(440.0, f64::INFINITY);
        vc.zoom(440.0, f64::NEG_INFINITY);
        assert_eq!(state(&vc), before);
    }

    #[test]
    fn clamp_resets_non_finite_window() {
        let mut s = ViewportState {
            data_min: 1000.0,
            data_max: 2000.0,
            view_min: f64::NAN,
            view_max: 2000.0,
        };
        s.clamp(1500.0);
        assert_eq!((s.view_min, s.view_max), (1000.0, 2000.0));
        assert_invariants(s);
    }

    #[test]
    fn resize_keeps_window() {
        let mut vc = loaded_controller();
        vc.resize(1200.0);
        assert_eq!(vc.surface().width, 1200.0);
        let t = vc.invert(1140.0).expect("inside plot");
        assert!((t - 2000.0).abs() < EPS);
    }

    #[test]
    fn lane_hits() {
        let vc = loaded_controller();
        assert_eq!(vc.lane_at(1.0), 0);
        assert_eq!(vc.lane_at(33.0), 1);
        assert_eq!(vc.lane_at(0.0), -1);
        let hits = vc.hits(1600.0, 0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label(), &"a");
        assert!(vc.hits(1600.0, 2).is_empty());
        assert_eq!(vc.hits(1600.0, 1).len(), 1);
    }
}
