use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use portfolio_engine::{FrameCallback, FrameHandle, FrameScheduler};

/// Bookkeeping for closures handed to `requestAnimationFrame`.
///
/// A closure cannot be dropped while it runs, so a finished one is parked
/// in `spent` and freed on the next request. Cancelled ones are returned
/// to the caller and freed immediately.
struct FrameSlots<C> {
    next_id: u32,
    pending: HashMap<u32, (i32, C)>,
    spent: Vec<C>,
}

impl<C> FrameSlots<C> {
    fn new() -> Self {
        Self {
            next_id: 1,
            pending: HashMap::new(),
            spent: Vec::new(),
        }
    }

    /// Allocate an id for a new request and free closures that already ran.
    fn reserve(&mut self) -> u32 {
        self.spent.clear();
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    fn insert(&mut self, id: u32, raf_id: i32, closure: C) {
        self.pending.insert(id, (raf_id, closure));
    }

    /// Called from inside the closure when it fires.
    fn finish(&mut self, id: u32) -> Option<C> {
        self.pending.remove(&id).map(|(_, closure)| closure)
    }

    fn retire(&mut self, closure: C) {
        self.spent.push(closure);
    }

    fn cancel(&mut self, id: u32) -> Option<(i32, C)> {
        self.pending.remove(&id)
    }

    fn drain(&mut self) -> Vec<(i32, C)> {
        self.spent.clear();
        self.pending.drain().map(|(_, entry)| entry).collect()
    }

    /// Closures still held, pending or parked.
    #[cfg(test)]
    fn live(&self) -> usize {
        self.pending.len() + self.spent.len()
    }
}

type Slots = Rc<RefCell<FrameSlots<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame`-backed scheduler.
pub struct AnimationFrames {
    window: Window,
    slots: Slots,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            slots: Rc::new(RefCell::new(FrameSlots::new())),
        }
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let id = self.slots.borrow_mut().reserve();

        let slots = Rc::clone(&self.slots);
        let mut callback = Some(callback);
        let closure = Closure::<dyn FnMut()>::new(move || {
            let own = slots.borrow_mut().finish(id);
            if let Some(callback) = callback.take() {
                callback();
            }
            if let Some(own) = own {
                slots.borrow_mut().retire(own);
            }
        });

        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(raf_id) => {
                self.slots.borrow_mut().insert(id, raf_id, closure);
                FrameHandle(id)
            }
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {:?}", err);
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let Some((raf_id, closure)) = self.slots.borrow_mut().cancel(handle.0) else {
            return;
        };
        if let Err(err) = self.window.cancel_animation_frame(raf_id) {
            log::warn!("cancelAnimationFrame failed: {:?}", err);
        }
        drop(closure);
    }
}

impl Drop for AnimationFrames {
    fn drop(&mut self) {
        // Pending closures hold the slot table; break the cycle.
        let pending = self.slots.borrow_mut().drain();
        for (raf_id, _closure) in pending {
            let _ = self.window.cancel_animation_frame(raf_id);
        }
    }
}
