//! Score-driven difficulty curve
//!
//! Five stages keyed purely by score. Nothing here is stored in the game
//! state; callers look the config up from the current score every time.

use serde::{Deserialize, Serialize};

/// Enemy behavior variants as seen by the spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Linear,
    Homing,
    Spinning,
    HomingSpinning,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Linear,
        EnemyKind::Homing,
        EnemyKind::Spinning,
        EnemyKind::HomingSpinning,
    ];
}

/// Difficulty stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
}

impl Stage {
    /// Lower score bound of each stage, in stage order
    const THRESHOLDS: [(u64, Stage); 5] = [
        (0, Stage::Beginner),
        (5_000, Stage::Intermediate),
        (10_000, Stage::Advanced),
        (20_000, Stage::Expert),
        (50_000, Stage::Master),
    ];

    /// Stage for a score; bands are half-open `[lower, next_lower)`
    pub fn for_score(score: u64) -> Stage {
        Self::THRESHOLDS
            .iter()
            .rev()
            .find(|(lower, _)| score >= *lower)
            .map(|(_, stage)| *stage)
            .unwrap_or(Stage::Beginner)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Beginner => "Beginner",
            Stage::Intermediate => "Intermediate",
            Stage::Advanced => "Advanced",
            Stage::Expert => "Expert",
            Stage::Master => "Master",
        }
    }
}

/// Probability of each enemy kind, in `EnemyKind::ALL` order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeChances {
    pub linear: f64,
    pub homing: f64,
    pub spinning: f64,
    pub homing_spinning: f64,
}

impl TypeChances {
    pub fn get(&self, kind: EnemyKind) -> f64 {
        match kind {
            EnemyKind::Linear => self.linear,
            EnemyKind::Homing => self.homing,
            EnemyKind::Spinning => self.spinning,
            EnemyKind::HomingSpinning => self.homing_spinning,
        }
    }

    pub fn total(&self) -> f64 {
        EnemyKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    /// Pick a kind from a uniform roll in [0, 1)
    pub fn sample(&self, roll: f64) -> EnemyKind {
        let mut cumulative = 0.0;
        let mut last_allowed = EnemyKind::Linear;
        for kind in EnemyKind::ALL {
            let chance = self.get(kind);
            if chance <= 0.0 {
                continue;
            }
            cumulative += chance;
            last_allowed = kind;
            if roll < cumulative {
                return kind;
            }
        }
        // Rounding can leave the cumulative sum a hair under 1.0
        last_allowed
    }
}

/// Spawn parameters for one difficulty stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub stage: Stage,
    /// Enemy spawn interval in milliseconds
    pub spawn_rate_ms: u32,
    /// Scale applied to the initial speed of new enemies
    pub speed_multiplier: f32,
    pub type_chances: TypeChances,
}

impl DifficultyConfig {
    /// Kinds that can appear at this stage
    pub fn allowed_types(&self) -> Vec<EnemyKind> {
        EnemyKind::ALL
            .into_iter()
            .filter(|k| self.type_chances.get(*k) > 0.0)
            .collect()
    }
}

const fn chances(linear: f64, homing: f64, spinning: f64, homing_spinning: f64) -> TypeChances {
    TypeChances {
        linear,
        homing,
        spinning,
        homing_spinning,
    }
}

const BEGINNER: DifficultyConfig = DifficultyConfig {
    stage: Stage::Beginner,
    spawn_rate_ms: 1500,
    speed_multiplier: 0.5,
    type_chances: chances(1.0, 0.0, 0.0, 0.0),
};

const INTERMEDIATE: DifficultyConfig = DifficultyConfig {
    stage: Stage::Intermediate,
    spawn_rate_ms: 1200,
    speed_multiplier: 0.75,
    type_chances: chances(0.6, 0.4, 0.0, 0.0),
};

const ADVANCED: DifficultyConfig = DifficultyConfig {
    stage: Stage::Advanced,
    spawn_rate_ms: 1000,
    speed_multiplier: 1.0,
    type_chances: chances(0.5, 0.3, 0.2, 0.0),
};

const EXPERT: DifficultyConfig = DifficultyConfig {
    stage: Stage::Expert,
    spawn_rate_ms: 800,
    speed_multiplier: 1.2,
    type_chances: chances(0.4, 0.3, 0.2, 0.1),
};

const MASTER: DifficultyConfig = DifficultyConfig {
    stage: Stage::Master,
    spawn_rate_ms: 600,
    speed_multiplier: 1.5,
    type_chances: chances(0.3, 0.35, 0.25, 0.1),
};

/// Difficulty parameters for the current score
pub fn difficulty_config(score: u64) -> DifficultyConfig {
    match Stage::for_score(score) {
        Stage::Beginner => BEGINNER,
        Stage::Intermediate => INTERMEDIATE,
        Stage::Advanced => ADVANCED,
        Stage::Expert => EXPERT,
        Stage::Master => MASTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_band_boundaries_are_half_open() {
        assert_eq!(difficulty_config(0).stage, Stage::Beginner);
        assert_eq!(difficulty_config(4999).stage, Stage::Beginner);
        assert_eq!(difficulty_config(5000).stage, Stage::Intermediate);
        assert_eq!(difficulty_config(9999).stage, Stage::Intermediate);
        assert_eq!(difficulty_config(10_000).stage, Stage::Advanced);
        assert_eq!(difficulty_config(19_999).stage, Stage::Advanced);
        assert_eq!(difficulty_config(20_000).stage, Stage::Expert);
        assert_eq!(difficulty_config(49_999).stage, Stage::Expert);
        assert_eq!(difficulty_config(50_000).stage, Stage::Master);
        assert_eq!(difficulty_config(u64::MAX).stage, Stage::Master);
    }

    #[test]
    fn test_spawn_rates_per_stage() {
        let rates: Vec<u32> = [0, 5_000, 10_000, 20_000, 50_000]
            .iter()
            .map(|s| difficulty_config(*s).spawn_rate_ms)
            .collect();
        assert_eq!(rates, vec![1500, 1200, 1000, 800, 600]);
    }

    #[test]
    fn test_allowed_types_follow_chances() {
        assert_eq!(difficulty_config(0).allowed_types(), vec![EnemyKind::Linear]);
        assert_eq!(
            difficulty_config(7_000).allowed_types(),
            vec![EnemyKind::Linear, EnemyKind::Homing]
        );
        assert_eq!(difficulty_config(60_000).allowed_types().len(), 4);
    }

    #[test]
    fn test_sample_walks_cumulative_distribution() {
        let c = difficulty_config(25_000).type_chances; // 0.4 / 0.3 / 0.2 / 0.1
        assert_eq!(c.sample(0.0), EnemyKind::Linear);
        assert_eq!(c.sample(0.39), EnemyKind::Linear);
        assert_eq!(c.sample(0.41), EnemyKind::Homing);
        assert_eq!(c.sample(0.75), EnemyKind::Spinning);
        assert_eq!(c.sample(0.95), EnemyKind::HomingSpinning);
        assert_eq!(c.sample(0.999_999_999_9), EnemyKind::HomingSpinning);
    }

    #[test]
    fn test_sample_skips_disallowed_kinds() {
        let c = difficulty_config(0).type_chances;
        assert_eq!(c.sample(0.999), EnemyKind::Linear);
        let c = difficulty_config(12_000).type_chances;
        assert_ne!(c.sample(0.9999), EnemyKind::HomingSpinning);
    }

    proptest! {
        #[test]
        fn prop_chances_sum_to_one(score in any::<u64>()) {
            let total = difficulty_config(score).type_chances.total();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_spawn_rate_never_increases(a in 0u64..200_000, b in 0u64..200_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                difficulty_config(hi).spawn_rate_ms <= difficulty_config(lo).spawn_rate_ms
            );
            prop_assert!(
                difficulty_config(hi).speed_multiplier >= difficulty_config(lo).speed_multiplier
            );
        }

        #[test]
        fn prop_sample_only_returns_allowed(score in 0u64..100_000, roll in 0.0f64..1.0) {
            let config = difficulty_config(score);
            let kind = config.type_chances.sample(roll);
            prop_assert!(config.allowed_types().contains(&kind));
        }
    }
}
