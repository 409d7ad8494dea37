//! CPU-side vertex batch implementing `DrawSurface`

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::shapes;
use super::surface::DrawSurface;
use crate::Color;

/// One corner of a filled triangle. Positions are canvas pixels in the
/// batch and clip space once the pipeline has converted them.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Buffer layout matching `shader.wgsl` (location 0 position, 1 color)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Collects one frame of triangles in pixel coordinates
#[derive(Debug, Clone, Default)]
pub struct VertexBatch {
    size: Vec2,
    vertices: Vec<Vertex>,
    alpha_stack: Vec<f32>,
}

impl VertexBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            vertices: Vec::new(),
            alpha_stack: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Drop the previous frame, keeping the allocation
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.alpha_stack.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Current alpha multiplier from the scope stack
    pub fn alpha(&self) -> f32 {
        self.alpha_stack.last().copied().unwrap_or(1.0)
    }

    fn tinted(&self, mut color: Color) -> Color {
        color[3] = (color[3] * self.alpha()).clamp(0.0, 1.0);
        color
    }

    fn extend(&mut self, vertices: Vec<Vertex>) {
        self.vertices.extend(vertices);
    }
}

impl DrawSurface for VertexBatch {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fade(&mut self, alpha: f32) {
        let color = self.tinted([0.0, 0.0, 0.0, alpha]);
        self.extend(shapes::rect(Vec2::ZERO, self.size, color));
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let color = self.tinted(color);
        self.extend(shapes::circle(
            center,
            radius,
            color,
            shapes::segments_for(radius),
        ));
    }

    fn pixel_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let color = self.tinted(color);
        self.extend(shapes::pixel_circle(center, radius, color));
    }

    fn rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        let color = self.tinted(color);
        self.extend(shapes::rect(min, size, color));
    }

    fn sprite(&mut self, center: Vec2, half_extent: f32, rotation: f32, color: Color) {
        let color = self.tinted(color);
        self.extend(shapes::bolt(center, half_extent, rotation, color));
    }

    fn push_alpha(&mut self, alpha: f32) {
        let combined = self.alpha() * alpha.clamp(0.0, 1.0);
        self.alpha_stack.push(combined);
    }

    fn pop_alpha(&mut self) {
        self.alpha_stack.pop();
    }
}
