//! Lyon-based teardrop tessellation.
//!
//! Converts `Teardrop` outlines into a flat triangle-list vertex buffer
//! (6 floats per vertex: x, y, r, g, b, a) for hosts that render through a
//! GPU pipeline instead of a Canvas 2D context. Fed by
//! `ParticleOverlay::paint_into`.

use bytemuck::{Pod, Zeroable};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    VertexBuffers,
};

use crate::api::types::ViewportSize;
use crate::renderer::traits::{Color, Surface};
use crate::systems::teardrop::Teardrop;

/// Per-vertex data for filled shapes.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Build the closed lyon path for a drop.
pub fn teardrop_path(drop: &Teardrop) -> Path {
    let (c1, c2) = drop.control_points();
    let mut builder = Path::builder();
    builder.begin(point(drop.tip.x, drop.tip.y));
    builder.cubic_bezier_to(point(c1.x, c1.y), point(c2.x, c2.y), point(drop.tip.x, drop.tip.y));
    builder.close();
    builder.build()
}

/// Tessellator plus output buffer. Cleared each frame, filled by drops.
pub struct TeardropMesh {
    fill_tess: FillTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl TeardropMesh {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(4096 * VectorVertex::FLOATS),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Flat float view of the buffer.
    pub fn vertices(&self) -> &[f32] {
        &self.buffer
    }

    /// Tessellate one drop and append its triangles.
    pub fn fill_teardrop(&mut self, drop: &Teardrop) {
        if drop.size <= 0.0 {
            return;
        }
        let path = teardrop_path(drop);
        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.1),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color: drop.color }),
        );

        match result {
            Ok(()) => self.flush_geometry(),
            Err(err) => {
                log::debug!("teardrop tessellation failed: {:?}", err);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(bytemuck::cast_slice(std::slice::from_ref(v)));
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }
}

impl Default for TeardropMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Surface that tessellates into a `TeardropMesh` instead of drawing pixels.
pub struct MeshSurface {
    size: ViewportSize,
    mesh: TeardropMesh,
}

impl MeshSurface {
    pub fn new() -> Self {
        Self {
            size: ViewportSize::ZERO,
            mesh: TeardropMesh::new(),
        }
    }

    pub fn mesh(&self) -> &TeardropMesh {
        &self.mesh
    }
}

impl Default for MeshSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MeshSurface {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn resize(&mut self, size: ViewportSize) {
        self.size = size;
        self.mesh.clear();
    }

    fn clear(&mut self) {
        self.mesh.clear();
    }

    fn fill_teardrop(&mut self, drop: &Teardrop) {
        self.mesh.fill_teardrop(drop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::mem::size_of;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn teardrop_produces_triangles() {
        let mut mesh = TeardropMesh::new();
        mesh.fill_teardrop(&Teardrop::new(Vec2::new(50.0, 50.0), 5.0, Color::RED));
        assert!(mesh.vertex_count() >= 3);
        assert_eq!(mesh.vertex_count() % 3, 0);
    }

    #[test]
    fn vertices_carry_drop_color() {
        let mut mesh = TeardropMesh::new();
        let color = Color::RED.with_alpha(0.8);
        mesh.fill_teardrop(&Teardrop::new(Vec2::new(0.0, 0.0), 3.0, color));
        for v in mesh.vertices().chunks(VectorVertex::FLOATS) {
            assert_eq!(&v[2..], &[1.0, 0.0, 0.0, 0.8]);
        }
    }

    #[test]
    fn vertices_stay_above_tip() {
        let mut mesh = TeardropMesh::new();
        mesh.fill_teardrop(&Teardrop::new(Vec2::new(20.0, 40.0), 4.0, Color::RED));
        for v in mesh.vertices().chunks(VectorVertex::FLOATS) {
            assert!(v[1] <= 40.0 + 1e-3, "vertex below tip: {}", v[1]);
        }
    }

    #[test]
    fn zero_size_draws_nothing() {
        let mut mesh = TeardropMesh::new();
        mesh.fill_teardrop(&Teardrop::new(Vec2::ZERO, 0.0, Color::RED));
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn mesh_surface_clear_resets_buffer() {
        let mut surface = MeshSurface::new();
        surface.resize(ViewportSize::new(100.0, 100.0));
        surface.fill_teardrop(&Teardrop::new(Vec2::new(10.0, 10.0), 3.0, Color::RED));
        assert!(surface.mesh().vertex_count() > 0);
        surface.clear();
        assert_eq!(surface.mesh().vertex_count(), 0);
    }
}
