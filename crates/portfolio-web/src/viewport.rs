use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use portfolio_engine::{ResizeCallback, ResizeGuard, Viewport, ViewportSize};

/// Browser window viewport; resize observation via the `resize` event.
pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

fn read_size(window: &Window) -> ViewportSize {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    ViewportSize::new(dim(window.inner_width()), dim(window.inner_height()))
}

impl Viewport for WindowViewport {
    fn size(&self) -> ViewportSize {
        read_size(&self.window)
    }

    fn observe_resize(&self, on_resize: ResizeCallback) -> ResizeGuard {
        let source = self.window.clone();
        let closure = Closure::<dyn FnMut()>::new(move || on_resize(read_size(&source)));

        if let Err(err) = self
            .window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        {
            log::warn!("cannot observe window resize: {:?}", err);
            return ResizeGuard::noop();
        }

        let window = self.window.clone();
        ResizeGuard::new(move || {
            let _ = window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            drop(closure);
        })
    }
}
