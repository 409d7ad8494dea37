//! Timer-driven spawning of enemies and power-ups
//!
//! Timers run on the simulation clock: `tick` advances them by one frame, so
//! a timer fire is always interleaved between two frame updates.

use glam::Vec2;
use rand::Rng;

use super::difficulty::{DifficultyConfig, EnemyKind, difficulty_config};
use super::state::{BackgroundParticle, Enemy, EnemyBehavior, PowerUp};
use crate::consts::*;
use crate::{heading, hsl};

/// Repeating timer that can be stopped, paused and resumed
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    pub period_ms: f32,
    elapsed_ms: f32,
    running: bool,
    paused: bool,
}

impl IntervalTimer {
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
            running: false,
            paused: false,
        }
    }

    /// (Re)arm from zero
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.running = true;
        self.paused = false;
    }

    /// Cancel; a later `start` begins a fresh interval
    pub fn stop(&mut self) {
        self.elapsed_ms = 0.0;
        self.running = false;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        if self.running {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance the clock; returns how many times the timer fired
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        if !self.running || self.paused || self.period_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let mut fired = 0;
        while self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            fired += 1;
        }
        fired
    }
}

/// What the spawn timers asked for during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnRequests {
    pub enemies: u32,
    pub power_ups: u32,
}

/// The two spawn timers
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub enemy_timer: IntervalTimer,
    pub power_up_timer: IntervalTimer,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            enemy_timer: IntervalTimer::new(difficulty_config(0).spawn_rate_ms as f32),
            power_up_timer: IntervalTimer::new(POWERUP_INTERVAL_MS),
        }
    }

    pub fn start(&mut self) {
        self.enemy_timer.period_ms = difficulty_config(0).spawn_rate_ms as f32;
        self.enemy_timer.start();
        self.power_up_timer.start();
    }

    pub fn stop(&mut self) {
        self.enemy_timer.stop();
        self.power_up_timer.stop();
    }

    pub fn pause(&mut self) {
        self.enemy_timer.pause();
        self.power_up_timer.pause();
    }

    pub fn resume(&mut self) {
        self.enemy_timer.resume();
        self.power_up_timer.resume();
    }

    pub fn is_running(&self) -> bool {
        self.enemy_timer.is_running() && self.power_up_timer.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.enemy_timer.is_paused() && self.power_up_timer.is_paused()
    }

    pub fn advance(&mut self, dt_ms: f32) -> SpawnRequests {
        SpawnRequests {
            enemies: self.enemy_timer.advance(dt_ms),
            power_ups: self.power_up_timer.advance(dt_ms),
        }
    }

    /// Re-arm the enemy cadence from the current difficulty
    pub fn retune(&mut self, config: &DifficultyConfig) {
        self.enemy_timer.period_ms = config.spawn_rate_ms as f32;
    }
}

/// A new enemy just outside a random canvas edge, aimed at the center
pub fn spawn_enemy<R: Rng>(rng: &mut R, bounds: Vec2, config: &DifficultyConfig) -> Enemy {
    let radius = rng.random_range(ENEMY_SPAWN_MIN_RADIUS..ENEMY_SPAWN_MAX_RADIUS);

    let pos = if rng.random_bool(0.5) {
        let x = if rng.random_bool(0.5) {
            -radius
        } else {
            bounds.x + radius
        };
        Vec2::new(x, rng.random::<f32>() * bounds.y)
    } else {
        let y = if rng.random_bool(0.5) {
            -radius
        } else {
            bounds.y + radius
        };
        Vec2::new(rng.random::<f32>() * bounds.x, y)
    };

    let color = hsl(rng.random::<f32>() * 360.0, 0.5, 0.5);
    let to_center = bounds / 2.0 - pos;
    let vel = heading(to_center.y.atan2(to_center.x)) * config.speed_multiplier;

    let behavior = match config.type_chances.sample(rng.random::<f64>()) {
        EnemyKind::Linear => EnemyBehavior::Linear,
        EnemyKind::Homing => EnemyBehavior::Homing,
        EnemyKind::Spinning => EnemyBehavior::Spinning {
            center: pos,
            angle: 0.0,
        },
        EnemyKind::HomingSpinning => EnemyBehavior::HomingSpinning {
            center: pos,
            angle: 0.0,
        },
    };

    Enemy::new(pos, radius, color, vel, behavior)
}

/// A power-up entering from the left edge at a random height
pub fn spawn_power_up<R: Rng>(rng: &mut R, bounds: Vec2, now_ms: f64) -> PowerUp {
    let pos = Vec2::new(POWERUP_SPAWN_X, rng.random::<f32>() * bounds.y);
    let vel = Vec2::new(rng.random::<f32>() + 2.0, 0.0);
    PowerUp::new(pos, vel, now_ms)
}

/// One dot per grid cell, covering the canvas plus one spacing of overscan
pub fn background_grid(bounds: Vec2) -> Vec<BackgroundParticle> {
    let mut dots = Vec::new();
    let mut x = 0.0;
    while x < bounds.x + BG_SPACING {
        let mut y = 0.0;
        while y < bounds.y + BG_SPACING {
            dots.push(BackgroundParticle::new(Vec2::new(x, y)));
            y += BG_SPACING;
        }
        x += BG_SPACING;
    }
    dots
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_interval_timer_fires_on_period() {
        let mut timer = IntervalTimer::new(100.0);
        assert_eq!(timer.advance(1000.0), 0, "not started");
        timer.start();
        assert_eq!(timer.advance(99.0), 0);
        assert_eq!(timer.advance(1.0), 1);
        assert_eq!(timer.advance(250.0), 2);
    }

    #[test]
    fn test_interval_timer_pause_keeps_progress() {
        let mut timer = IntervalTimer::new(100.0);
        timer.start();
        timer.advance(60.0);
        timer.pause();
        assert_eq!(timer.advance(500.0), 0);
        timer.resume();
        assert_eq!(timer.advance(40.0), 1);
    }

    #[test]
    fn test_interval_timer_stop_cancels() {
        let mut timer = IntervalTimer::new(100.0);
        timer.start();
        timer.advance(90.0);
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.advance(500.0), 0);
        timer.start();
        assert_eq!(timer.advance(90.0), 0);
    }

    #[test]
    fn test_spawner_cadence() {
        let mut spawner = Spawner::new();
        spawner.start();
        let requests = spawner.advance(1500.0);
        assert_eq!(requests, SpawnRequests { enemies: 1, power_ups: 0 });
        let requests = spawner.advance(8500.0);
        assert_eq!(requests.power_ups, 1);

        spawner.retune(&difficulty_config(60_000));
        assert_eq!(spawner.enemy_timer.period_ms, 600.0);
    }

    #[test]
    fn test_spawned_enemy_starts_outside_and_aims_at_center() {
        let mut rng = Pcg32::seed_from_u64(42);
        let config = difficulty_config(0);
        for _ in 0..200 {
            let enemy = spawn_enemy(&mut rng, BOUNDS, &config);
            assert!(enemy.radius >= ENEMY_SPAWN_MIN_RADIUS && enemy.radius < ENEMY_SPAWN_MAX_RADIUS);
            let p = enemy.pos;
            let outside = p.x <= 0.0 || p.x >= BOUNDS.x || p.y <= 0.0 || p.y >= BOUNDS.y;
            assert!(outside, "spawned inside the canvas at {p:?}");
            assert!((enemy.vel.length() - config.speed_multiplier).abs() < 1e-4);
            let to_center = (BOUNDS / 2.0 - p).normalize();
            assert!(enemy.vel.normalize().dot(to_center) > 0.999);
            assert_eq!(enemy.behavior, EnemyBehavior::Linear);
        }
    }

    #[test]
    fn test_master_stage_spawns_every_variant() {
        let mut rng = Pcg32::seed_from_u64(3);
        let config = difficulty_config(80_000);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let idx = match spawn_enemy(&mut rng, BOUNDS, &config).behavior {
                EnemyBehavior::Linear => 0,
                EnemyBehavior::Homing => 1,
                EnemyBehavior::Spinning { .. } => 2,
                EnemyBehavior::HomingSpinning { .. } => 3,
            };
            seen[idx] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_power_up_enters_from_left() {
        let mut rng = Pcg32::seed_from_u64(9);
        let p = spawn_power_up(&mut rng, BOUNDS, 0.0);
        assert_eq!(p.pos.x, POWERUP_SPAWN_X);
        assert!(p.pos.y >= 0.0 && p.pos.y <= BOUNDS.y);
        assert!(p.vel.x >= 2.0 && p.vel.x < 3.0);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn test_background_grid_covers_canvas() {
        let dots = background_grid(Vec2::new(90.0, 60.0));
        // x: 0,30,60,90  y: 0,30,60
        assert_eq!(dots.len(), 12);
        assert!(dots.iter().all(|d| d.alpha == BG_REST_ALPHA));
    }
}
