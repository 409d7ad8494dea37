//! Pixel Blaster - a neon pixel-art arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, difficulty)
//! - `renderer`: Draw surface abstraction and WebGPU backend
//! - `platform`: Browser input mapping
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `audio`: Named sound cues

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Milliseconds of simulation clock per step
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Distance slack for all circle contact checks
    pub const CONTACT_EPSILON: f32 = 1.0;

    /// Player ship
    pub const PLAYER_RADIUS: f32 = 10.0;
    /// Velocity retained each frame (player and particles)
    pub const FRICTION: f32 = 0.99;
    /// Radians per frame while a turn key is held
    pub const ROTATION_SPEED: f32 = 0.08;
    /// Acceleration per frame while thrusting
    pub const THRUST: f32 = 0.15;
    /// Velocity scale per frame while braking
    pub const BRAKE: f32 = 0.96;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 5.0;

    /// Enemy spawn radius range [min, max)
    pub const ENEMY_SPAWN_MIN_RADIUS: f32 = 4.0;
    pub const ENEMY_SPAWN_MAX_RADIUS: f32 = 30.0;
    /// Radius lost per projectile hit
    pub const ENEMY_HIT_SHRINK: f32 = 10.0;
    /// A hit that would leave the radius at or below this destroys the enemy
    pub const ENEMY_MIN_RADIUS: f32 = 5.0;
    /// Homing speed (pixels per frame)
    pub const HOMING_SPEED: f32 = 1.0;
    /// Spinning enemies orbit their drifting center
    pub const ORBIT_RADIUS: f32 = 30.0;
    pub const ORBIT_STEP: f32 = 0.1;
    /// Shrink animation length
    pub const SHRINK_MS: f32 = 500.0;

    /// Scoring
    pub const SCORE_HIT: u64 = 100;
    pub const SCORE_KILL: u64 = 150;
    /// Floating score label lifetime and rise distance
    pub const SCORE_LABEL_MS: f32 = 750.0;
    pub const SCORE_LABEL_RISE: f32 = 30.0;

    /// Explosion particles
    pub const PARTICLE_MAX_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_SPEED: f32 = 6.0;
    pub const PARTICLE_FADE: f32 = 0.01;

    /// Background grid
    pub const BG_SPACING: f32 = 30.0;
    pub const BG_RADIUS: f32 = 3.0;
    pub const BG_REST_ALPHA: f32 = 0.1;
    pub const BG_ALPHA_STEP: f32 = 0.01;
    pub const BG_HIDE_DISTANCE: f32 = 70.0;
    pub const BG_RIM_DISTANCE: f32 = 100.0;
    pub const BG_RIM_ALPHA: f32 = 0.5;
    /// Kill flash recolor length
    pub const BG_FLASH_MS: f32 = 500.0;

    /// Power-ups
    pub const POWERUP_INTERVAL_MS: f32 = 10_000.0;
    pub const POWERUP_DURATION_MS: f32 = 5_000.0;
    pub const POWERUP_RADIUS: f32 = 15.0;
    pub const POWERUP_SPAWN_X: f32 = -30.0;
    /// Half period of the alpha blink
    pub const POWERUP_BLINK_MS: f32 = 200.0;
    pub const POWERUP_SPIN: f32 = 0.01;
    /// Machine gun cadence in frames
    pub const MACHINE_GUN_FIRE_EVERY: u64 = 2;
    pub const MACHINE_GUN_SOUND_EVERY: u64 = 5;

    /// Canvas trail fade (alpha of the black wash drawn each frame)
    pub const TRAIL_FADE: f32 = 0.2;
}

/// Straight RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Named colors used by the game
pub mod colors {
    use super::Color;

    pub const PLAYER: Color = [0.0, 1.0, 0.0, 1.0];
    pub const PLAYER_POWERED: Color = [1.0, 1.0, 0.0, 1.0];
    pub const PROJECTILE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const PROJECTILE_POWERED: Color = [1.0, 1.0, 0.0, 1.0];
    pub const BACKGROUND_DOT: Color = [0.0, 0x11 as f32 / 255.0, 0.0, 1.0];
    pub const FLASH: Color = [1.0, 1.0, 1.0, 1.0];
    pub const SCORE_LABEL: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BOLT: Color = [1.0, 0.85, 0.1, 1.0];
}

/// CSS-style `hsl()` to RGBA. Hue in degrees, saturation/lightness in 0..=1.
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, 1.0]
}

/// Component-wise linear blend between two colors
#[inline]
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Unit vector for a heading angle
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl(0.0, 1.0, 0.5), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsl(120.0, 1.0, 0.5), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(hsl(240.0, 1.0, 0.5), [0.0, 0.0, 1.0, 1.0]));
        assert!(close(hsl(360.0, 1.0, 0.5), [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_hsl_half_saturation() {
        // hsl(0, 50%, 50%) == rgb(191, 64, 64)
        assert!(close(hsl(0.0, 0.5, 0.5), [0.75, 0.25, 0.25, 1.0]));
    }

    #[test]
    fn test_lerp_color_clamps() {
        let a = [0.0, 0.0, 0.0, 0.0];
        let b = [1.0, 1.0, 1.0, 1.0];
        assert!(close(lerp_color(a, b, 0.5), [0.5, 0.5, 0.5, 0.5]));
        assert!(close(lerp_color(a, b, 2.0), b));
    }

    #[test]
    fn test_normalize_angle() {
        use std::f32::consts::PI;
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-2.5 * PI) + 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
    }
}
