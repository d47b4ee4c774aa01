use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use portfolio_engine::{OverlayStyle, Surface, Teardrop, ViewportSize};

/// Canvas 2D implementation of the overlay surface.
///
/// Owns a `<canvas>` appended to `<body>`; the element is removed when the
/// surface is dropped.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    style: OverlayStyle,
    size: ViewportSize,
}

impl CanvasSurface {
    /// Create the overlay canvas. Returns `None` when the page has no body
    /// or the browser cannot provide a 2D context.
    pub fn acquire(document: &Document, style: OverlayStyle) -> Option<Self> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .ok()?
            .dyn_into()
            .ok()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into()
            .ok()?;

        canvas.set_attribute("aria-hidden", "true").ok()?;
        document.body()?.append_child(&canvas).ok()?;

        let mut surface = Self {
            canvas,
            ctx,
            style,
            size: ViewportSize::ZERO,
        };
        surface.apply_style(false);
        Some(surface)
    }

    fn apply_style(&mut self, visible: bool) {
        let css = self.canvas.style();
        for (property, value) in self.style.declarations(visible) {
            if let Err(err) = css.set_property(property, &value) {
                log::warn!("overlay canvas: cannot set {}: {:?}", property, err);
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn resize(&mut self, size: ViewportSize) {
        self.size = size;
        self.canvas.set_width(size.width.max(0.0) as u32);
        self.canvas.set_height(size.height.max(0.0) as u32);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_teardrop(&mut self, drop: &Teardrop) {
        let (c1, c2) = drop.control_points();
        let tip = drop.tip;
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&drop.color.to_css());
        self.ctx.move_to(tip.x as f64, tip.y as f64);
        self.ctx.bezier_curve_to(
            c1.x as f64,
            c1.y as f64,
            c2.x as f64,
            c2.y as f64,
            tip.x as f64,
            tip.y as f64,
        );
        self.ctx.fill();
    }

    fn set_visible(&mut self, visible: bool) {
        self.apply_style(visible);
    }
}

impl Drop for CanvasSurface {
    fn drop(&mut self) {
        self.canvas.remove();
    }
}
