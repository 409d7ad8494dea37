//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one display frame.

use glam::Vec2;
use rand::Rng;

use super::autopilot;
use super::collision::circles_touch;
use super::difficulty::difficulty_config;
use super::spawner::{spawn_enemy, spawn_power_up};
use super::state::{GameEvent, GamePhase, GameState, Particle, PowerUpKind, Projectile, ScoreLabel};
use crate::consts::*;
use crate::{Color, colors, heading};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Turn counter-clockwise (held)
    pub left: bool,
    /// Turn clockwise (held)
    pub right: bool,
    /// Accelerate along the heading (held)
    pub thrust: bool,
    /// Slow down (held)
    pub brake: bool,
    /// Fire once (key press / tap), cleared by the caller after the tick
    pub fire: bool,
    /// Attract mode - the ship flies itself
    pub autopilot: bool,
}

/// Outcome of a projectile striking an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitOutcome {
    Shrunk,
    Destroyed,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        autopilot::drive(state, &mut input);
    }
    let input = &input;

    let dt_ms = FRAME_MS;
    state.frames += 1;
    state.time_ms += f64::from(dt_ms);

    if input.fire {
        state.shoot();
    }

    let player_pos = state.player.pos;
    for dot in &mut state.background {
        dot.update(player_pos, dt_ms);
    }

    state.player.update(state.bounds);
    state
        .player
        .steer(input.left, input.right, input.thrust, input.brake);

    update_power_ups(state);
    fire_machine_gun(state);

    state.particles.retain_mut(|p| {
        if p.is_expired() {
            return false;
        }
        p.update();
        true
    });

    let bounds = state.bounds;
    state.projectiles.retain_mut(|p| {
        p.update();
        !p.is_offscreen(bounds)
    });

    // Back to front so removals never skip an element
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        state.enemies[i].update(state.player.pos, dt_ms);

        let enemy = &state.enemies[i];
        if circles_touch(state.player.pos, state.player.radius, enemy.pos, enemy.radius) {
            state.end_run();
            return;
        }

        let mut j = state.projectiles.len();
        while j > 0 {
            j -= 1;
            let projectile = &state.projectiles[j];
            let enemy = &state.enemies[i];
            if !circles_touch(projectile.pos, projectile.radius, enemy.pos, enemy.radius) {
                continue;
            }
            let impact = state.projectiles.remove(j).pos;
            if resolve_hit(state, i, impact) == HitOutcome::Destroyed {
                break;
            }
        }
    }

    for label in &mut state.score_labels {
        label.update(dt_ms);
    }
    state.score_labels.retain(|l| !l.is_finished());

    expire_power_ups(state, dt_ms);
    run_spawners(state, dt_ms);
}

/// Drift power-ups, drop the ones that left, collect the ones touched
fn update_power_ups(state: &mut GameState) {
    let mut i = state.power_ups.len();
    while i > 0 {
        i -= 1;
        if state.power_ups[i].is_offscreen(state.bounds) {
            state.power_ups.remove(i);
            continue;
        }
        state.power_ups[i].update();

        let power_up = &state.power_ups[i];
        if circles_touch(
            state.player.pos,
            state.player.radius,
            power_up.pos,
            power_up.radius,
        ) {
            let kind = state.power_ups.remove(i).kind;
            state.player.grant(kind);
            state.power_up_timers.push(POWERUP_DURATION_MS);
            state.push_event(GameEvent::PowerUpCollected);
            log::debug!("Power-up collected: {:?}", kind);
        }
    }
}

/// Auto-fire while the machine gun is active
fn fire_machine_gun(state: &mut GameState) {
    if state.player.power_up != Some(PowerUpKind::MachineGun) {
        return;
    }
    if state.frames % MACHINE_GUN_FIRE_EVERY == 0 {
        let vel = heading(state.player.rotation) * PROJECTILE_SPEED;
        state.projectiles.push(Projectile::new(
            state.player.tip(),
            vel,
            colors::PROJECTILE_POWERED,
        ));
    }
    if state.frames % MACHINE_GUN_SOUND_EVERY == 0 {
        state.push_event(GameEvent::Shot);
    }
}

/// Apply a projectile hit to `state.enemies[index]`
fn resolve_hit(state: &mut GameState, index: usize, impact: Vec2) -> HitOutcome {
    let (radius, color) = {
        let enemy = &state.enemies[index];
        (enemy.radius, enemy.color)
    };
    explode(state, impact, radius, color);

    if state.enemies[index].survives_hit() {
        state.enemies[index].take_hit();
        state.add_score(SCORE_HIT);
        state.score_labels.push(ScoreLabel::new(impact, SCORE_HIT));
        state.push_event(GameEvent::EnemyHit {
            pos: impact,
            points: SCORE_HIT,
        });
        HitOutcome::Shrunk
    } else {
        state.enemies.remove(index);
        state.add_score(SCORE_KILL);
        state.score_labels.push(ScoreLabel::new(impact, SCORE_KILL));
        for dot in &mut state.background {
            dot.flash(color);
        }
        state.push_event(GameEvent::EnemyDestroyed {
            pos: impact,
            points: SCORE_KILL,
        });
        HitOutcome::Destroyed
    }
}

/// Burst of debris sized by the enemy radius
fn explode(state: &mut GameState, at: Vec2, radius: f32, color: Color) {
    let count = (radius * 2.0).ceil() as usize;
    state.particles.reserve(count);
    for _ in 0..count {
        let rng = &mut state.rng;
        let size = rng.random::<f32>() * PARTICLE_MAX_RADIUS;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * (rng.random::<f32>() * PARTICLE_MAX_SPEED),
            (rng.random::<f32>() - 0.5) * (rng.random::<f32>() * PARTICLE_MAX_SPEED),
        );
        state.particles.push(Particle::new(at, size, color, vel));
    }
}

/// Count down pickup timers; the first one to run out reverts the upgrade
fn expire_power_ups(state: &mut GameState, dt_ms: f32) {
    if state.power_up_timers.is_empty() {
        return;
    }
    for remaining in &mut state.power_up_timers {
        *remaining -= dt_ms;
    }
    let before = state.power_up_timers.len();
    state.power_up_timers.retain(|remaining| *remaining > 0.0);
    if state.power_up_timers.len() < before {
        state.player.revoke_power_up();
        state.push_event(GameEvent::PowerUpExpired);
    }
}

/// Fire the spawn timers; difficulty is looked up from the score on each fire
fn run_spawners(state: &mut GameState, dt_ms: f32) {
    let requests = state.spawner.advance(dt_ms);

    for _ in 0..requests.enemies {
        let config = difficulty_config(state.score);
        let enemy = spawn_enemy(&mut state.rng, state.bounds, &config);
        log::debug!(
            "Spawned {:?} enemy r={:.1} ({})",
            enemy.behavior,
            enemy.radius,
            config.stage.as_str()
        );
        state.enemies.push(enemy);
        state.spawner.retune(&config);
    }

    for _ in 0..requests.power_ups {
        let power_up = spawn_power_up(&mut state.rng, state.bounds, state.time_ms);
        state.power_ups.push(power_up);
    }
}
