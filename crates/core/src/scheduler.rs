//! One-paint-per-frame coalescing.
//!
//! The host owns the real frame clock (an egui repaint, a browser animation
//! frame). The chart only asks it for a frame through `FrameRequester` and
//! is told which request fired when the host calls back.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::trace;

/// Why a frame was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    /// First paint after a dataset load. Not subject to coalescing.
    Initial,
    /// A redraw for input. At most one is outstanding at a time.
    Coalesced,
}

/// Schedules a callback on the host's next frame.
pub trait FrameRequester {
    fn request_frame(&self, task: FrameTask);
}

/// A `FrameRequester` that records requests for the host to drain at its
/// next frame. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    tasks: Rc<RefCell<VecDeque<FrameTask>>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&self) -> Option<FrameTask> {
        self.tasks.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }
}

impl FrameRequester for FrameQueue {
    fn request_frame(&self, task: FrameTask) {
        self.tasks.borrow_mut().push_back(task);
    }
}

pub struct FrameScheduler {
    pending: bool,
    requester: Box<dyn FrameRequester>,
}

impl FrameScheduler {
    pub fn new(requester: Box<dyn FrameRequester>) -> Self {
        Self {
            pending: false,
            requester,
        }
    }

    /// Ask for a redraw. Dropped while one is already pending, since the
    /// pending frame reads the latest state anyway. Returns whether a frame
    /// was scheduled.
    pub fn request_redraw(&mut self) -> bool {
        if self.pending {
            trace!("redraw already pending, request dropped");
            return false;
        }
        self.pending = true;
        self.requester.request_frame(FrameTask::Coalesced);
        true
    }

    /// Schedule the first paint of a new dataset, bypassing the pending flag.
    pub fn request_initial(&mut self) {
        self.requester.request_frame(FrameTask::Initial);
    }

    /// Called once the host has run a frame for `task`.
    pub fn frame_done(&mut self, task: FrameTask) {
        if task == FrameTask::Coalesced {
            self.pending = false;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
