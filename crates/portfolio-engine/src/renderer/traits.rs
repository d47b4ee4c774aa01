//! Drawing-surface contract for the particle overlay.
//!
//! The engine never touches a real canvas. The web bridge implements
//! `Surface` over a Canvas 2D context; tests use `RecordingSurface`;
//! GPU-style hosts can use `MeshSurface`, which tessellates into a flat
//! vertex buffer.

use serde::{Deserialize, Serialize};

use crate::api::types::ViewportSize;
use crate::systems::teardrop::Teardrop;

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string, as accepted by `fillStyle`.
    pub fn to_css(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }

    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

/// A 2D target the overlay repaints every frame.
///
/// Implementations own their pixel storage; the overlay only issues
/// commands. All calls happen on the UI thread.
pub trait Surface {
    /// Current drawing-buffer size.
    fn size(&self) -> ViewportSize;

    /// Resize the drawing buffer. Existing content may be discarded.
    fn resize(&mut self, size: ViewportSize);

    /// Erase the whole surface.
    fn clear(&mut self);

    /// Fill one teardrop silhouette.
    fn fill_teardrop(&mut self, drop: &Teardrop);

    /// Show or hide the host element. Hidden surfaces take no layout space.
    fn set_visible(&mut self, _visible: bool) {}
}

/// Host-element styling for the overlay.
///
/// Fixed to the viewport, above everything, never a pointer target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    pub z_index: i32,
}

impl OverlayStyle {
    pub const TOPMOST: Self = Self { z_index: 9999 };

    /// Inline CSS declarations as `(property, value)` pairs.
    pub fn declarations(&self, visible: bool) -> Vec<(&'static str, String)> {
        vec![
            ("position", "fixed".to_string()),
            ("top", "0".to_string()),
            ("left", "0".to_string()),
            ("width", "100vw".to_string()),
            ("height", "100vh".to_string()),
            ("pointer-events", "none".to_string()),
            ("z-index", self.z_index.to_string()),
            ("display", if visible { "block" } else { "none" }.to_string()),
        ]
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::TOPMOST
    }
}
