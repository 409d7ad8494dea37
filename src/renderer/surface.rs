//! Drawing primitives the scene is expressed in
//!
//! Coordinates are canvas pixels, origin top-left, y down.

use glam::Vec2;

use crate::Color;

/// Something the scene can be drawn onto
pub trait DrawSurface {
    /// Surface size in pixels
    fn size(&self) -> Vec2;

    /// Wash the whole surface with translucent black, leaving motion trails
    fn fade(&mut self, alpha: f32);

    /// Filled circle
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Circle made of square pixel blocks
    fn pixel_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Axis-aligned filled rectangle from its top-left corner
    fn rect(&mut self, min: Vec2, size: Vec2, color: Color);

    /// Lightning-bolt sprite centered at `center`, rotated by `rotation` radians
    fn sprite(&mut self, center: Vec2, half_extent: f32, rotation: f32, color: Color);

    /// Multiply the alpha of everything drawn until the matching `pop_alpha`
    fn push_alpha(&mut self, alpha: f32);

    fn pop_alpha(&mut self);

    /// Run `draw` with an alpha scope around it
    fn with_alpha<F>(&mut self, alpha: f32, draw: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        self.push_alpha(alpha);
        draw(self);
        self.pop_alpha();
    }
}
