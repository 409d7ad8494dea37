//! Game state and entity types
//!
//! Every entity collection is owned by `GameState`; update rules live on the
//! entities themselves and are driven by `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawner::{Spawner, background_grid};
use super::tween::{Ease, Tween};
use crate::consts::*;
use crate::{Color, colors, heading, lerp_color};

/// Lifecycle phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen, nothing simulated yet
    Idle,
    /// Active run
    Running,
    /// Run ended by an enemy collision
    GameOver,
}

/// Time-limited player upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    MachineGun,
}

/// Things that happened during a tick, for audio/HUD/persistence adapters
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A projectile left the ship (manual shot or machine-gun sound cadence)
    Shot,
    /// An enemy survived a hit and shrank
    EnemyHit { pos: Vec2, points: u64 },
    /// An enemy was destroyed
    EnemyDestroyed { pos: Vec2, points: u64 },
    PowerUpCollected,
    PowerUpExpired,
    /// The run ended; `new_high_score` is set when the score beat the best
    GameOver { score: u64, new_high_score: bool },
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub vel: Vec2,
    /// Heading in radians (0 = +x, screen y points down)
    pub rotation: f32,
    pub power_up: Option<PowerUpKind>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            color: colors::PLAYER,
            vel: Vec2::ZERO,
            rotation: 0.0,
            power_up: None,
        }
    }

    /// Friction, then per-axis integration that stops at the canvas edges
    pub fn update(&mut self, bounds: Vec2) {
        self.vel *= FRICTION;

        let next_x = self.pos.x + self.vel.x;
        if next_x + self.radius <= bounds.x && next_x - self.radius >= 0.0 {
            self.pos.x = next_x;
        } else {
            self.vel.x = 0.0;
        }

        let next_y = self.pos.y + self.vel.y;
        if next_y + self.radius <= bounds.y && next_y - self.radius >= 0.0 {
            self.pos.y = next_y;
        } else {
            self.vel.y = 0.0;
        }
    }

    /// Apply held turn/thrust/brake input
    pub fn steer(&mut self, left: bool, right: bool, thrust: bool, brake: bool) {
        if left {
            self.rotation -= ROTATION_SPEED;
        }
        if right {
            self.rotation += ROTATION_SPEED;
        }
        if thrust {
            self.vel += heading(self.rotation) * THRUST;
        }
        if brake {
            self.vel *= BRAKE;
        }
    }

    /// Nose of the ship, where projectiles appear
    pub fn tip(&self) -> Vec2 {
        self.pos + heading(self.rotation) * self.radius
    }

    pub fn grant(&mut self, kind: PowerUpKind) {
        self.power_up = Some(kind);
        self.color = colors::PLAYER_POWERED;
    }

    pub fn revoke_power_up(&mut self) {
        self.power_up = None;
        self.color = colors::PLAYER;
    }
}

/// A shot fired by the player
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub vel: Vec2,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, color: Color) -> Self {
        Self {
            pos,
            radius: PROJECTILE_RADIUS,
            color,
            vel,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// True once the whole circle is outside the canvas on any edge
    pub fn is_offscreen(&self, bounds: Vec2) -> bool {
        self.pos.x + self.radius < 0.0
            || self.pos.x - self.radius > bounds.x
            || self.pos.y + self.radius < 0.0
            || self.pos.y - self.radius > bounds.y
    }
}

/// Enemy movement variant with its own state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyBehavior {
    /// Straight line at the spawn velocity
    Linear,
    /// Re-aims at the player every frame
    Homing,
    /// Orbits a center that drifts at the spawn velocity
    Spinning { center: Vec2, angle: f32 },
    /// Orbits a center that homes on the player
    HomingSpinning { center: Vec2, angle: f32 },
}

/// A hostile blob
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    /// Current (possibly animating) radius
    pub radius: f32,
    pub color: Color,
    pub vel: Vec2,
    pub behavior: EnemyBehavior,
    /// Active shrink animation after a hit
    pub shrink: Option<Tween>,
}

impl Enemy {
    pub fn new(pos: Vec2, radius: f32, color: Color, vel: Vec2, behavior: EnemyBehavior) -> Self {
        Self {
            pos,
            radius,
            color,
            vel,
            behavior,
            shrink: None,
        }
    }

    /// Radius the enemy is settling toward
    pub fn target_radius(&self) -> f32 {
        self.shrink.map(|t| t.to).unwrap_or(self.radius)
    }

    /// Whether another hit would destroy it rather than shrink it
    pub fn survives_hit(&self) -> bool {
        self.target_radius() - ENEMY_HIT_SHRINK > ENEMY_MIN_RADIUS
    }

    /// Start shrinking toward the post-hit radius
    pub fn take_hit(&mut self) {
        let to = self.target_radius() - ENEMY_HIT_SHRINK;
        self.shrink = Some(Tween::new(self.radius, to, SHRINK_MS));
    }

    pub fn update(&mut self, player_pos: Vec2, dt_ms: f32) {
        if let Some(tween) = self.shrink.as_mut() {
            tween.advance(dt_ms);
            self.radius = tween.value();
            if tween.is_finished() {
                self.shrink = None;
            }
        }

        match &mut self.behavior {
            EnemyBehavior::Linear => {
                self.pos += self.vel;
            }
            EnemyBehavior::Homing => {
                self.vel = home_toward(self.pos, player_pos);
                self.pos += self.vel;
            }
            EnemyBehavior::Spinning { center, angle } => {
                *angle += ORBIT_STEP;
                *center += self.vel;
                self.pos = *center + heading(*angle) * ORBIT_RADIUS;
            }
            EnemyBehavior::HomingSpinning { center, angle } => {
                *angle += ORBIT_STEP;
                self.vel = home_toward(*center, player_pos);
                *center += self.vel;
                self.pos = *center + heading(*angle) * ORBIT_RADIUS;
            }
        }
    }
}

/// Unit-speed velocity from `from` toward `target`
fn home_toward(from: Vec2, target: Vec2) -> Vec2 {
    let delta = target - from;
    heading(delta.y.atan2(delta.x)) * HOMING_SPEED
}

/// Explosion debris
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub vel: Vec2,
    pub alpha: f32,
}

impl Particle {
    pub fn new(pos: Vec2, radius: f32, color: Color, vel: Vec2) -> Self {
        Self {
            pos,
            radius,
            color,
            vel,
            alpha: 1.0,
        }
    }

    pub fn update(&mut self) {
        self.vel *= FRICTION;
        self.pos += self.vel;
        self.alpha -= PARTICLE_FADE;
    }

    pub fn is_expired(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Recolor animation triggered by a kill
#[derive(Debug, Clone, Copy)]
pub struct Flash {
    pub to_color: Color,
    pub tween: Tween,
}

/// Decorative grid dot reacting to the player
#[derive(Debug, Clone)]
pub struct BackgroundParticle {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub alpha: f32,
    pub flash: Option<Flash>,
}

impl BackgroundParticle {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: BG_RADIUS,
            color: colors::BACKGROUND_DOT,
            alpha: BG_REST_ALPHA,
            flash: None,
        }
    }

    /// Jump to white and fade into `to_color` at resting alpha
    pub fn flash(&mut self, to_color: Color) {
        self.color = colors::FLASH;
        self.alpha = 1.0;
        self.flash = Some(Flash {
            to_color,
            tween: Tween::new(1.0, BG_REST_ALPHA, BG_FLASH_MS),
        });
    }

    pub fn update(&mut self, player_pos: Vec2, dt_ms: f32) {
        if let Some(flash) = self.flash.as_mut() {
            flash.tween.advance(dt_ms);
            self.alpha = flash.tween.value();
            self.color = lerp_color(colors::FLASH, flash.to_color, flash.tween.progress());
            if flash.tween.is_finished() {
                self.color = flash.to_color;
                self.flash = None;
            }
            return;
        }

        let dist = self.pos.distance(player_pos);
        if dist < BG_RIM_DISTANCE {
            self.alpha = if dist > BG_HIDE_DISTANCE { BG_RIM_ALPHA } else { 0.0 };
        } else if dist > BG_RIM_DISTANCE {
            self.alpha = approach(self.alpha, BG_REST_ALPHA, BG_ALPHA_STEP);
        }
    }
}

/// Step `value` toward `target` by at most `step`
fn approach(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}

/// Collectible that grants a `PowerUpKind`
#[derive(Debug, Clone)]
pub struct PowerUp {
    /// Sprite center
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    pub kind: PowerUpKind,
    pub rotation: f32,
    /// Simulation time of spawn, drives the blink
    pub born_ms: f64,
}

impl PowerUp {
    pub fn new(pos: Vec2, vel: Vec2, born_ms: f64) -> Self {
        Self {
            pos,
            radius: POWERUP_RADIUS,
            vel,
            kind: PowerUpKind::MachineGun,
            rotation: 0.0,
            born_ms,
        }
    }

    pub fn update(&mut self) {
        self.rotation += POWERUP_SPIN;
        self.pos.x += self.vel.x;
    }

    /// Linear yoyo 1 → 0 → 1 on the simulation clock
    pub fn alpha(&self, now_ms: f64) -> f32 {
        let age = (now_ms - self.born_ms).max(0.0) as f32;
        let phase = (age / POWERUP_BLINK_MS) % 2.0;
        if phase < 1.0 { 1.0 - phase } else { phase - 1.0 }
    }

    /// Past the right edge of the canvas
    pub fn is_offscreen(&self, bounds: Vec2) -> bool {
        self.pos.x - self.radius > bounds.x
    }
}

/// Floating "+points" label at an impact point
#[derive(Debug, Clone)]
pub struct ScoreLabel {
    pub origin: Vec2,
    pub points: u64,
    pub tween: Tween,
}

impl ScoreLabel {
    pub fn new(origin: Vec2, points: u64) -> Self {
        Self {
            origin,
            points,
            tween: Tween::new(0.0, 1.0, SCORE_LABEL_MS).with_ease(Ease::QuadOut),
        }
    }

    pub fn update(&mut self, dt_ms: f32) {
        self.tween.advance(dt_ms);
    }

    pub fn pos(&self) -> Vec2 {
        self.origin - Vec2::new(0.0, SCORE_LABEL_RISE * self.tween.value())
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.tween.value()
    }

    pub fn is_finished(&self) -> bool {
        self.tween.is_finished()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the game was created with; restarts continue the same stream
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Canvas size in pixels
    pub bounds: Vec2,
    pub score: u64,
    /// Best score known to the persistence layer
    pub high_score: u64,
    /// Frames simulated in this run
    pub frames: u64,
    /// Simulation clock in milliseconds
    pub time_ms: f64,
    /// Spawn timers are paused while the page is hidden
    pub visible: bool,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub background: Vec<BackgroundParticle>,
    pub power_ups: Vec<PowerUp>,
    pub score_labels: Vec<ScoreLabel>,
    pub spawner: Spawner,
    /// Remaining milliseconds of each pending power-up expiry
    pub power_up_timers: Vec<f32>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game for a canvas of the given size
    pub fn new(width: f32, height: f32, seed: u64, high_score: u64) -> Self {
        let bounds = Vec2::new(width, height);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            bounds,
            score: 0,
            high_score,
            frames: 0,
            time_ms: 0.0,
            visible: true,
            player: Player::new(bounds / 2.0),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            background: Vec::new(),
            power_ups: Vec::new(),
            score_labels: Vec::new(),
            spawner: Spawner::new(),
            power_up_timers: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Reset everything for a fresh run and start the spawn timers
    pub fn start(&mut self) {
        self.player = Player::new(self.bounds / 2.0);
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.power_ups.clear();
        self.score_labels.clear();
        self.power_up_timers.clear();
        self.score = 0;
        self.frames = 0;
        self.time_ms = 0.0;
        self.background = background_grid(self.bounds);
        self.phase = GamePhase::Running;
        self.spawner.start();
        if !self.visible {
            self.spawner.pause();
        }
        log::info!(
            "Run started ({}x{}, {} background dots)",
            self.bounds.x,
            self.bounds.y,
            self.background.len()
        );
    }

    /// Start again after a game over (same initialization as the first start)
    pub fn restart(&mut self) {
        self.start();
    }

    /// Canvas was resized; an active run is re-initialized at the new size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
        if self.phase == GamePhase::Running {
            self.start();
        } else {
            self.player.pos = self.bounds / 2.0;
        }
    }

    /// Page visibility changed; spawn timers pause while hidden
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if self.phase != GamePhase::Running {
            return;
        }
        if visible {
            self.spawner.resume();
        } else {
            self.spawner.pause();
        }
        log::info!("Spawners {}", if visible { "resumed" } else { "paused" });
    }

    /// Fire one projectile from the ship's nose
    pub fn shoot(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        let vel = heading(self.player.rotation) * PROJECTILE_SPEED;
        self.projectiles
            .push(Projectile::new(self.player.tip(), vel, colors::PROJECTILE));
        self.events.push(GameEvent::Shot);
    }

    /// Award points; score only ever grows within a run
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// End the run: stop the timers and settle the high score
    pub fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.spawner.stop();
        self.power_up_timers.clear();
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        log::info!(
            "Game over with score {} (high score {}{})",
            self.score,
            self.high_score,
            if new_high_score { ", new" } else { "" }
        );
        self.events.push(GameEvent::GameOver {
            score: self.score,
            new_high_score,
        });
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_player_friction_before_integration() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.vel = Vec2::new(10.0, 0.0);
        player.update(BOUNDS);
        assert!((player.pos.x - (100.0 + 10.0 * 0.99)).abs() < 1e-4);
        assert_eq!(player.pos.y, 100.0);
    }

    #[test]
    fn test_player_stops_at_edge_without_bouncing() {
        let mut player = Player::new(Vec2::new(BOUNDS.x - PLAYER_RADIUS - 1.0, 100.0));
        player.vel = Vec2::new(10.0, 3.0);
        let before = player.pos;
        player.update(BOUNDS);
        assert_eq!(player.vel.x, 0.0);
        assert_eq!(player.pos.x, before.x);
        // The other axis is unaffected
        assert!((player.pos.y - (100.0 + 3.0 * 0.99)).abs() < 1e-4);
    }

    #[test]
    fn test_player_steering() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.steer(false, true, true, false);
        assert!((player.rotation - ROTATION_SPEED).abs() < 1e-6);
        assert!((player.vel.length() - THRUST).abs() < 1e-6);

        player.vel = Vec2::new(1.0, 0.0);
        player.steer(false, false, false, true);
        assert!((player.vel.x - BRAKE).abs() < 1e-6);
    }

    #[test]
    fn test_projectile_leaves_past_right_edge_plus_radius() {
        let width = 100.0;
        let bounds = Vec2::new(width, 100.0);
        let mut p = Projectile::new(Vec2::ZERO, Vec2::new(5.0, 0.0), colors::PROJECTILE);
        let mut removed_at = None;
        for _ in 0..100 {
            p.update();
            if p.is_offscreen(bounds) {
                removed_at = Some(p.pos.x);
                break;
            }
            assert!(p.pos.x <= width + p.radius);
        }
        let x = removed_at.expect("projectile should leave the canvas");
        assert!(x > width + PROJECTILE_RADIUS);
        assert!(x - 5.0 <= width + PROJECTILE_RADIUS);
    }

    #[test]
    fn test_homing_enemy_moves_at_unit_speed_toward_player() {
        let mut enemy = Enemy::new(
            Vec2::new(0.0, 0.0),
            10.0,
            colors::FLASH,
            Vec2::new(5.0, 5.0),
            EnemyBehavior::Homing,
        );
        enemy.update(Vec2::new(0.0, 50.0), FRAME_MS);
        assert!((enemy.vel.length() - 1.0).abs() < 1e-5);
        assert!(enemy.pos.x.abs() < 1e-5);
        assert!((enemy.pos.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_spinning_enemy_orbits_drifting_center() {
        let start = Vec2::new(50.0, 50.0);
        let mut enemy = Enemy::new(
            start,
            10.0,
            colors::FLASH,
            Vec2::new(1.0, 0.0),
            EnemyBehavior::Spinning { center: start, angle: 0.0 },
        );
        enemy.update(Vec2::ZERO, FRAME_MS);
        let EnemyBehavior::Spinning { center, angle } = enemy.behavior else {
            panic!("behavior changed");
        };
        assert_eq!(center, Vec2::new(51.0, 50.0));
        assert!((angle - ORBIT_STEP).abs() < 1e-6);
        assert!((enemy.pos.distance(center) - ORBIT_RADIUS).abs() < 1e-3);
        // Spawn velocity is kept for the drift
        assert_eq!(enemy.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_homing_spinning_center_homes() {
        let start = Vec2::new(0.0, 0.0);
        let mut enemy = Enemy::new(
            start,
            10.0,
            colors::FLASH,
            Vec2::new(-3.0, 0.0),
            EnemyBehavior::HomingSpinning { center: start, angle: 0.0 },
        );
        enemy.update(Vec2::new(100.0, 0.0), FRAME_MS);
        let EnemyBehavior::HomingSpinning { center, .. } = enemy.behavior else {
            panic!("behavior changed");
        };
        assert!((center.x - 1.0).abs() < 1e-5);
        assert!((enemy.pos.distance(center) - ORBIT_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_shrink_animates_to_target() {
        let mut enemy = Enemy::new(
            Vec2::ZERO,
            30.0,
            colors::FLASH,
            Vec2::ZERO,
            EnemyBehavior::Linear,
        );
        assert!(enemy.survives_hit());
        enemy.take_hit();
        assert_eq!(enemy.target_radius(), 20.0);
        assert_eq!(enemy.radius, 30.0);
        enemy.update(Vec2::ZERO, FRAME_MS);
        assert!(enemy.radius < 30.0 && enemy.radius > 20.0);
        for _ in 0..40 {
            enemy.update(Vec2::ZERO, FRAME_MS);
        }
        assert_eq!(enemy.radius, 20.0);
        assert!(enemy.shrink.is_none());
    }

    #[test]
    fn test_particle_fades_out() {
        let mut p = Particle::new(Vec2::ZERO, 1.0, colors::FLASH, Vec2::new(1.0, 0.0));
        let mut frames = 0;
        while !p.is_expired() {
            p.update();
            frames += 1;
            assert!(frames < 200);
        }
        assert!((99..=101).contains(&frames));
        assert!(p.vel.x < 1.0);
    }

    #[test]
    fn test_background_particle_proximity() {
        let mut dot = BackgroundParticle::new(Vec2::ZERO);
        dot.update(Vec2::new(50.0, 0.0), FRAME_MS);
        assert_eq!(dot.alpha, 0.0);
        dot.update(Vec2::new(80.0, 0.0), FRAME_MS);
        assert_eq!(dot.alpha, BG_RIM_ALPHA);
        dot.update(Vec2::new(300.0, 0.0), FRAME_MS);
        assert!((dot.alpha - (BG_RIM_ALPHA - BG_ALPHA_STEP)).abs() < 1e-6);
        for _ in 0..100 {
            dot.update(Vec2::new(300.0, 0.0), FRAME_MS);
        }
        assert_eq!(dot.alpha, BG_REST_ALPHA);
    }

    #[test]
    fn test_background_flash_settles_on_enemy_color() {
        let red = [1.0, 0.0, 0.0, 1.0];
        let mut dot = BackgroundParticle::new(Vec2::ZERO);
        dot.flash(red);
        assert_eq!(dot.alpha, 1.0);
        assert_eq!(dot.color, colors::FLASH);
        for _ in 0..40 {
            dot.update(Vec2::new(500.0, 0.0), FRAME_MS);
        }
        assert!(dot.flash.is_none());
        assert_eq!(dot.color, red);
        assert_eq!(dot.alpha, BG_REST_ALPHA);
    }

    #[test]
    fn test_power_up_blink_is_a_yoyo() {
        let p = PowerUp::new(Vec2::ZERO, Vec2::new(2.0, 0.0), 1000.0);
        assert!((p.alpha(1000.0) - 1.0).abs() < 1e-6);
        assert!((p.alpha(1100.0) - 0.5).abs() < 1e-4);
        assert!(p.alpha(1200.0) < 1e-3);
        assert!((p.alpha(1300.0) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_score_label_rises_and_fades() {
        let mut label = ScoreLabel::new(Vec2::new(10.0, 100.0), SCORE_HIT);
        assert_eq!(label.alpha(), 1.0);
        for _ in 0..60 {
            label.update(FRAME_MS);
        }
        assert!(label.is_finished());
        assert_eq!(label.alpha(), 0.0);
        assert_eq!(label.pos(), Vec2::new(10.0, 100.0 - SCORE_LABEL_RISE));
    }

    #[test]
    fn test_start_resets_run() {
        let mut state = GameState::new(800.0, 600.0, 7, 0);
        assert_eq!(state.phase, GamePhase::Idle);
        state.score = 500;
        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert!(!state.background.is_empty());
        assert!(state.spawner.is_running());
    }

    #[test]
    fn test_shoot_only_while_running() {
        let mut state = GameState::new(800.0, 600.0, 7, 0);
        state.shoot();
        assert!(state.projectiles.is_empty());
        state.start();
        state.shoot();
        assert_eq!(state.projectiles.len(), 1);
        let p = &state.projectiles[0];
        assert_eq!(p.pos, Vec2::new(400.0 + PLAYER_RADIUS, 300.0));
        assert_eq!(p.vel, Vec2::new(PROJECTILE_SPEED, 0.0));
        assert_eq!(state.drain_events(), vec![GameEvent::Shot]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_end_run_updates_high_score() {
        let mut state = GameState::new(800.0, 600.0, 7, 200);
        state.start();
        state.add_score(250);
        state.end_run();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 250);
        assert!(!state.spawner.is_running());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver { score: 250, new_high_score: true }]
        );

        state.restart();
        state.add_score(100);
        state.end_run();
        assert_eq!(state.high_score, 250);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver { score: 100, new_high_score: false }]
        );
    }

    #[test]
    fn test_hidden_page_pauses_spawners() {
        let mut state = GameState::new(800.0, 600.0, 7, 0);
        state.start();
        state.set_visible(false);
        assert!(state.spawner.is_paused());
        state.set_visible(true);
        assert!(!state.spawner.is_paused());
        assert!(state.spawner.is_running());
    }

    #[test]
    fn test_resize_while_running_reinitializes() {
        let mut state = GameState::new(800.0, 600.0, 7, 0);
        state.start();
        state.add_score(400);
        state.shoot();
        state.enemies.push(Enemy::new(
            Vec2::new(20.0, 20.0),
            20.0,
            colors::FLASH,
            Vec2::ZERO,
            EnemyBehavior::Linear,
        ));
        state.particles.push(Particle::new(Vec2::ZERO, 1.0, colors::FLASH, Vec2::ZERO));
        state.power_ups.push(PowerUp::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 0.0));
        state.power_up_timers.push(1000.0);
        state.player.pos = Vec2::new(30.0, 40.0);

        state.resize(400.0, 300.0);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.projectiles.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.particles.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(state.power_up_timers.is_empty());
        assert_eq!(state.player.pos, Vec2::new(200.0, 150.0));
        assert_eq!(
            state.background.len(),
            background_grid(Vec2::new(400.0, 300.0)).len()
        );
        assert!(state.spawner.is_running());
    }
}
