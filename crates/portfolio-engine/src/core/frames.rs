//! Frame scheduling abstraction.
//!
//! The browser's "run before next repaint" primitive sits behind
//! `FrameScheduler`, so the overlay's tick logic runs unchanged under a
//! manual stepper in tests.

use std::cell::{Cell, RefCell};

use crate::api::types::FrameHandle;

/// One-shot callback run on the next frame.
pub type FrameCallback = Box<dyn FnOnce()>;

pub trait FrameScheduler {
    /// Run `callback` once, at the next display refresh.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Drop a pending callback. Unknown or already-run handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Scheduler advanced by hand. Each `step` is one display refresh.
pub struct ManualFrames {
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    next_id: Cell<u32>,
    frame: Cell<u64>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self {
            pending: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            frame: Cell::new(0),
        }
    }

    /// Run every callback requested before this call.
    /// Callbacks requested while stepping wait for the next step.
    /// Returns the number of callbacks run.
    pub fn step(&self) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        self.frame.set(self.frame.get() + 1);
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }

    /// Number of callbacks waiting for the next step.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Number of steps taken so far.
    pub fn frame(&self) -> u64 {
        self.frame.get()
    }
}

impl Default for ManualFrames {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id.get());
        self.next_id.set(handle.0.wrapping_add(1));
        self.pending.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn step_runs_requested_callbacks_once() {
        let frames = ManualFrames::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        frames.request_frame(Box::new(move || h.set(h.get() + 1)));

        assert_eq!(frames.step(), 1);
        assert_eq!(frames.step(), 0);
        assert_eq!(hits.get(), 1);
        assert_eq!(frames.frame(), 2);
    }

    #[test]
    fn cancel_removes_pending_callback() {
        let frames = ManualFrames::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let handle = frames.request_frame(Box::new(move || h.set(h.get() + 1)));

        frames.cancel_frame(handle);
        frames.cancel_frame(handle);
        assert_eq!(frames.pending(), 0);
        frames.step();
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn rescheduling_waits_for_next_step() {
        let frames = Rc::new(ManualFrames::new());
        let hits = Rc::new(Cell::new(0));

        let f = Rc::clone(&frames);
        let h = Rc::clone(&hits);
        frames.request_frame(Box::new(move || {
            h.set(h.get() + 1);
            let h2 = Rc::clone(&h);
            f.request_frame(Box::new(move || h2.set(h2.get() + 1)));
        }));

        frames.step();
        assert_eq!(hits.get(), 1);
        assert_eq!(frames.pending(), 1);
        frames.step();
        assert_eq!(hits.get(), 2);
    }
}
