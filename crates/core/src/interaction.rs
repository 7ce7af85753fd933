//! Pointer and wheel handling.
//!
//! Two modes, `Idle` and `Panning`. A press inside the plot starts a pan and
//! arms a click; any movement inside the plot disarms it, so a release with
//! no movement in between is a selection click and anything else is a drag.

use log::{debug, trace};

use crate::config::WHEEL_NOISE;
use crate::model::Interval;
use crate::viewport::ViewportController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Panning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub mode: Mode,
    /// Domain time under the pointer when the pan last moved.
    pub pan_anchor: Option<f64>,
    pub cursor_time: Option<f64>,
    pub cursor_lane: Option<i64>,
    pub click_candidate: bool,
}

impl InteractionState {
    pub fn is_panning(&self) -> bool {
        self.mode == Mode::Panning
    }
}

/// What an event asks the chart to do next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    pub redraw: bool,
    /// Result of a selection click, possibly empty.
    pub selection: Option<Vec<Interval>>,
    /// Intervals under the cursor after an idle move.
    pub hover: Option<Vec<Interval>>,
}

impl Effects {
    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionHandler {
    state: InteractionState,
}

impl InteractionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Forget everything; used when a new dataset replaces the old one.
    pub fn reset(&mut self) {
        self.state = InteractionState::default();
    }

    pub fn pointer_down(
        &mut self,
        vc: &ViewportController,
        x: f64,
        y: f64,
        button: PointerButton,
    ) -> Effects {
        if button != PointerButton::Primary || !vc.in_plot(x, y) {
            return Effects::default();
        }
        let Some(time) = vc.invert(x) else {
            return Effects::default();
        };
        self.state.mode = Mode::Panning;
        self.state.pan_anchor = Some(time);
        self.state.click_candidate = true;
        Effects::default()
    }

    /// `track_hover` asks for the intervals under the cursor when idle.
    pub fn pointer_move(
        &mut self,
        vc: &mut ViewportController,
        x: f64,
        y: f64,
        track_hover: bool,
    ) -> Effects {
        if !vc.in_plot(x, y) {
            return Effects::default();
        }
        let Some(time) = vc.invert(x) else {
            return Effects::default();
        };

        self.state.click_candidate = false;

        if self.state.is_panning() {
            if let Some(anchor) = self.state.pan_anchor {
                vc.pan(anchor - time, time);
            }
            self.state.pan_anchor = vc.invert(x);
        }

        let lane = vc.lane_at(y);
        self.state.cursor_time = Some(time);
        self.state.cursor_lane = Some(lane);

        let mut effects = Effects::redraw();
        if track_hover && !self.state.is_panning() {
            effects.hover = Some(vc.hits(time, lane));
        }
        effects
    }

    /// Release or leave: stop panning and drop the cursor.
    pub fn pointer_up(&mut self, vc: &ViewportController) -> Effects {
        if !vc.is_initialized() {
            return Effects::default();
        }
        self.state.mode = Mode::Idle;
        self.state.pan_anchor = None;
        self.state.cursor_time = None;
        Effects::redraw()
    }

    /// `selectable` tells whether anyone listens for selections; without a
    /// listener the click is not evaluated at all.
    pub fn click(
        &mut self,
        vc: &ViewportController,
        x: f64,
        y: f64,
        button: PointerButton,
        selectable: bool,
    ) -> Effects {
        if !selectable
            || button != PointerButton::Primary
            || self.state.is_panning()
            || !self.state.click_candidate
            || !vc.in_plot(x, y)
        {
            return Effects::default();
        }
        let Some(time) = vc.invert(x) else {
            return Effects::default();
        };
        let selected = match self.state.cursor_lane {
            Some(lane) => vc.hits(time, lane),
            None => Vec::new(),
        };
        debug!(
            "click at t={time:.1} lane={:?}: {} selected",
            self.state.cursor_lane,
            selected.len()
        );
        Effects {
            selection: Some(selected),
            ..Effects::default()
        }
    }

    pub fn wheel(&mut self, vc: &mut ViewportController, x: f64, y: f64, delta_y: f64) -> Effects {
        if !vc.is_initialized()
            || !vc.in_plot(x, y)
            || !delta_y.is_finite()
            || delta_y.abs() < WHEEL_NOISE
        {
            return Effects::default();
        }
        vc.zoom(x, delta_y);
        trace!("wheel {delta_y} at x={x}: view {:?}", vc.state());
        Effects::redraw()
    }
}
