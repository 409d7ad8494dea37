//! Circle contact checks
//!
//! Every entity is treated as a circle. Two circles touch when the gap
//! between their rims is under `CONTACT_EPSILON`.

use glam::Vec2;

use crate::consts::CONTACT_EPSILON;

/// Signed gap between two circle rims (negative when overlapping)
#[inline]
pub fn rim_gap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> f32 {
    a_pos.distance(b_pos) - a_radius - b_radius
}

/// Whether two circles are in contact
#[inline]
pub fn circles_touch(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    rim_gap(a_pos, a_radius, b_pos, b_radius) < CONTACT_EPSILON
}
