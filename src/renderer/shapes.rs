//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::batch::Vertex;
use crate::Color;

/// Edge length of one block in a pixel circle
pub const PIXEL_BLOCK: f32 = 4.0;

/// Lightning bolt as two overlapping blades, unit half-extent, y down
const BOLT_TRIANGLES: [[f32; 2]; 6] = [
    // Upper blade
    [0.35, -1.0],
    [-0.6, 0.15],
    [0.2, 0.15],
    // Lower blade
    [-0.2, -0.15],
    [0.6, -0.15],
    [-0.35, 1.0],
];

/// Segment count that keeps circles smooth without wasting triangles
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(8, 48)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: Color) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a circle built from `PIXEL_BLOCK` squares
///
/// Walks a block grid anchored at `center - radius` and keeps every block whose
/// corner lies inside the radius.
pub fn pixel_circle(center: Vec2, radius: f32, color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    if radius <= 0.0 {
        return vertices;
    }

    let mut y = -radius;
    while y <= radius {
        let mut x = -radius;
        while x <= radius {
            if (x * x + y * y).sqrt() <= radius {
                vertices.extend(rect(
                    center + Vec2::new(x, y),
                    Vec2::splat(PIXEL_BLOCK),
                    color,
                ));
            }
            x += PIXEL_BLOCK;
        }
        y += PIXEL_BLOCK;
    }

    vertices
}

/// Generate vertices for the rotated lightning-bolt sprite
pub fn bolt(center: Vec2, half_extent: f32, rotation: f32, color: Color) -> Vec<Vertex> {
    let rot = Vec2::from_angle(rotation);
    BOLT_TRIANGLES
        .iter()
        .map(|[x, y]| {
            let p = center + rot.rotate(Vec2::new(*x, *y) * half_extent);
            Vertex::new(p.x, p.y, color)
        })
        .collect()
}
