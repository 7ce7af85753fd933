//! The chart handle.
//!
//! `create_chart` builds one self-contained chart. The host keeps the
//! returned `GanttChart`, forwards input events to it and calls
//! `run_frame` whenever its `FrameRequester` fires. Nothing is shared
//! between handles.

use gantt_protocol::{RenderCommand, Surface};
use log::trace;

use crate::color::{ColorAssigner, HueSweep, LegendEntry, legend};
use crate::config::ChartLayout;
use crate::interaction::{Effects, InteractionHandler, InteractionState, PointerButton};
use crate::model::Interval;
use crate::scheduler::{FrameRequester, FrameScheduler, FrameTask};
use crate::viewport::{ViewportController, ViewportState};
use crate::views::render_chart;

/// Receives the intervals for a selection click or a hover.
pub type IntervalCallback = Box<dyn FnMut(&[Interval])>;

pub struct ChartOptions {
    pub width: f64,
    pub layout: ChartLayout,
    pub requester: Box<dyn FrameRequester>,
    pub assigner: Box<dyn ColorAssigner>,
    pub on_select: Option<IntervalCallback>,
    pub on_highlight: Option<IntervalCallback>,
}

impl ChartOptions {
    pub fn new(width: f64, requester: impl FrameRequester + 'static) -> Self {
        Self {
            width,
            layout: ChartLayout::default(),
            requester: Box::new(requester),
            assigner: Box::new(HueSweep::default()),
            on_select: None,
            on_highlight: None,
        }
    }

    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_assigner(mut self, assigner: impl ColorAssigner + 'static) -> Self {
        self.assigner = Box::new(assigner);
        self
    }

    pub fn on_select(mut self, callback: impl FnMut(&[Interval]) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn on_highlight(mut self, callback: impl FnMut(&[Interval]) + 'static) -> Self {
        self.on_highlight = Some(Box::new(callback));
        self
    }
}

pub fn create_chart(options: ChartOptions) -> GanttChart {
    GanttChart {
        viewport: ViewportController::new(options.layout, options.width),
        interaction: InteractionHandler::new(),
        scheduler: FrameScheduler::new(options.requester),
        assigner: options.assigner,
        on_select: options.on_select,
        on_highlight: options.on_highlight,
    }
}

pub struct GanttChart {
    viewport: ViewportController,
    interaction: InteractionHandler,
    scheduler: FrameScheduler,
    assigner: Box<dyn ColorAssigner>,
    on_select: Option<IntervalCallback>,
    on_highlight: Option<IntervalCallback>,
}

impl GanttChart {
    /// Replace the dataset. A non-empty dataset gets an unconditional first
    /// paint; an empty one leaves the chart inert until the next load.
    pub fn load_dataset(&mut self, items: Vec<Interval>) {
        self.interaction.reset();
        if self.viewport.load_dataset(items, self.assigner.as_ref()) {
            self.scheduler.request_initial();
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, button: PointerButton) {
        let fx = self.interaction.pointer_down(&self.viewport, x, y, button);
        self.apply(fx);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let track_hover = self.on_highlight.is_some();
        let fx = self
            .interaction
            .pointer_move(&mut self.viewport, x, y, track_hover);
        self.apply(fx);
    }

    pub fn pointer_up(&mut self) {
        let fx = self.interaction.pointer_up(&self.viewport);
        self.apply(fx);
    }

    /// Leaving the surface ends a pan the same way a release does.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    pub fn click(&mut self, x: f64, y: f64, button: PointerButton) {
        let selectable = self.on_select.is_some();
        let fx = self
            .interaction
            .click(&self.viewport, x, y, button, selectable);
        self.apply(fx);
    }

    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
        let fx = self.interaction.wheel(&mut self.viewport, x, y, delta_y);
        self.apply(fx);
    }

    pub fn resize(&mut self, width: f64) {
        self.viewport.resize(width);
        if self.viewport.is_initialized() {
            self.scheduler.request_redraw();
        }
    }

    /// Run the frame the requester was asked for. Returns `None` when there
    /// is nothing to paint.
    pub fn run_frame(&mut self, task: FrameTask) -> Option<Vec<RenderCommand>> {
        self.scheduler.frame_done(task);
        let commands = self.render()?;
        trace!("{task:?} frame: {} commands", commands.len());
        Some(commands)
    }

    /// Render the current state without touching the scheduler.
    pub fn render(&self) -> Option<Vec<RenderCommand>> {
        let view = self.viewport.loaded()?;
        Some(render_chart(
            view,
            self.viewport.layout(),
            self.viewport.surface(),
            self.interaction.state(),
        ))
    }

    pub fn is_initialized(&self) -> bool {
        self.viewport.is_initialized()
    }

    pub fn viewport(&self) -> Option<ViewportState> {
        self.viewport.state()
    }

    pub fn interaction(&self) -> &InteractionState {
        self.interaction.state()
    }

    pub fn surface(&self) -> Surface {
        self.viewport.surface()
    }

    pub fn items(&self) -> &[Interval] {
        self.viewport.items()
    }

    pub fn layout(&self) -> &ChartLayout {
        self.viewport.layout()
    }

    pub fn redraw_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Groups of the current dataset with their block colors.
    pub fn legend(&self) -> Vec<LegendEntry> {
        legend(self.viewport.items(), self.assigner.as_ref())
    }

    pub fn set_on_select(&mut self, callback: Option<IntervalCallback>) {
        self.on_select = callback;
    }

    pub fn set_on_highlight(&mut self, callback: Option<IntervalCallback>) {
        self.on_highlight = callback;
    }

    fn apply(&mut self, fx: Effects) {
        if fx.redraw && self.viewport.is_initialized() {
            self.scheduler.request_redraw();
        }
        if let (Some(selected), Some(callback)) = (fx.selection, self.on_select.as_mut()) {
            callback(&selected);
        }
        if let (Some(hovered), Some(callback)) = (fx.hover, self.on_highlight.as_mut()) {
            callback(&hovered);
        }
    }
}

impl std::fmt::Debug for GanttChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GanttChart")
            .field("viewport", &self.viewport)
            .field("interaction", &self.interaction)
            .field("scheduler", &self.scheduler)
            .field("on_select", &self.on_select.is_some())
            .field("on_highlight", &self.on_highlight.is_some())
            .finish_non_exhaustive()
    }
}
