//! Attract-mode pilot
//!
//! Holds position, swings the nose toward the closest enemy and fires once
//! roughly lined up.

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::ROTATION_SPEED;
use crate::normalize_angle;

/// Maximum heading error (radians) at which the pilot pulls the trigger
const AIM_TOLERANCE: f32 = 0.15;
/// Frames between autopilot shots
const FIRE_EVERY: u64 = 8;

/// Replace the steering part of `input` with the pilot's choice
pub fn drive(state: &GameState, input: &mut TickInput) {
    let player = &state.player;
    input.left = false;
    input.right = false;
    input.thrust = false;
    input.brake = true;
    input.fire = false;

    let Some(target) = state.enemies.iter().min_by(|a, b| {
        a.pos
            .distance_squared(player.pos)
            .total_cmp(&b.pos.distance_squared(player.pos))
    }) else {
        return;
    };

    let to_target = target.pos - player.pos;
    let error = normalize_angle(to_target.y.atan2(to_target.x) - player.rotation);
    if error < -ROTATION_SPEED / 2.0 {
        input.left = true;
    } else if error > ROTATION_SPEED / 2.0 {
        input.right = true;
    }

    input.fire = error.abs() < AIM_TOLERANCE && state.frames % FIRE_EVERY == 0;
}
