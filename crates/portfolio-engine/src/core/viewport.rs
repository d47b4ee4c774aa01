//! Viewport size source with resize observation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::types::ViewportSize;

pub type ResizeCallback = Box<dyn Fn(ViewportSize)>;

/// Removes a resize observer when dropped.
#[must_use = "dropping a ResizeGuard removes the observer"]
pub struct ResizeGuard {
    remove: Option<Box<dyn FnOnce()>>,
}

impl ResizeGuard {
    pub fn new(remove: impl FnOnce() + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// A guard with nothing to remove.
    pub fn noop() -> Self {
        Self { remove: None }
    }
}

impl Drop for ResizeGuard {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

pub trait Viewport {
    /// Current viewport size.
    fn size(&self) -> ViewportSize;

    /// Call `on_resize` with the new size every time the viewport changes,
    /// until the returned guard is dropped.
    fn observe_resize(&self, on_resize: ResizeCallback) -> ResizeGuard;
}

struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Rc<dyn Fn(ViewportSize)>)>>,
}

/// Viewport whose size is set by hand. Resizes notify observers synchronously.
pub struct ManualViewport {
    size: Cell<ViewportSize>,
    listeners: Rc<Listeners>,
}

impl ManualViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Cell::new(ViewportSize::new(width, height)),
            listeners: Rc::new(Listeners {
                next_id: Cell::new(1),
                entries: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn resize_to(&self, width: f32, height: f32) {
        let size = ViewportSize::new(width, height);
        self.size.set(size);
        let snapshot: Vec<_> = self
            .listeners
            .entries
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in snapshot {
            callback(size);
        }
    }

    /// Number of live resize observers.
    pub fn observer_count(&self) -> usize {
        self.listeners.entries.borrow().len()
    }
}

impl Viewport for ManualViewport {
    fn size(&self) -> ViewportSize {
        self.size.get()
    }

    fn observe_resize(&self, on_resize: ResizeCallback) -> ResizeGuard {
        let id = self.listeners.next_id.get();
        self.listeners.next_id.set(id + 1);
        self.listeners
            .entries
            .borrow_mut()
            .push((id, Rc::from(on_resize)));

        let listeners = Rc::downgrade(&self.listeners);
        ResizeGuard::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.entries.borrow_mut().retain(|(i, _)| *i != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_sees_resizes_until_guard_dropped() {
        let viewport = ManualViewport::new(100.0, 100.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let guard = viewport.observe_resize(Box::new(move |s| sink.borrow_mut().push(s)));

        viewport.resize_to(300.0, 200.0);
        assert_eq!(viewport.observer_count(), 1);
        drop(guard);
        viewport.resize_to(50.0, 50.0);

        assert_eq!(*seen.borrow(), vec![ViewportSize::new(300.0, 200.0)]);
        assert_eq!(viewport.observer_count(), 0);
        assert_eq!(viewport.size(), ViewportSize::new(50.0, 50.0));
    }

    #[test]
    fn noop_guard_drops_cleanly() {
        drop(ResizeGuard::noop());
    }
}
