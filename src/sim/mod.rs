//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per display frame)
//! - Seeded RNG only
//! - Timers advance on the simulation clock
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod tween;

pub use collision::{circles_touch, rim_gap};
pub use difficulty::{DifficultyConfig, EnemyKind, Stage, TypeChances, difficulty_config};
pub use spawner::{IntervalTimer, SpawnRequests, Spawner, background_grid};
pub use state::{
    BackgroundParticle, Enemy, EnemyBehavior, GameEvent, GamePhase, GameState, Particle, Player,
    PowerUp, PowerUpKind, Projectile, ScoreLabel,
};
pub use tick::{TickInput, tick};
pub use tween::{Ease, Tween};
