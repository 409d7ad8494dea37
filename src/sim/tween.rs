//! Explicit per-entity easing
//!
//! Animated values (enemy shrink, background flash, score labels) carry their
//! own `Tween` and are advanced by the simulation step.

use serde::{Deserialize, Serialize};

/// Easing curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out
    #[default]
    QuadOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Interpolation from `from` to `to` over `duration_ms`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub elapsed_ms: f32,
    pub duration_ms: f32,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: f32) -> Self {
        Self {
            from,
            to,
            elapsed_ms: 0.0,
            duration_ms,
            ease: Ease::default(),
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
    }

    /// Eased progress in 0..=1
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        self.ease.apply(self.elapsed_ms / self.duration_ms)
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.progress()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_target_exactly() {
        let mut t = Tween::new(30.0, 20.0, 500.0);
        assert_eq!(t.value(), 30.0);
        for _ in 0..40 {
            t.advance(1000.0 / 60.0);
        }
        assert!(t.is_finished());
        assert_eq!(t.value(), 20.0);
    }

    #[test]
    fn test_quad_out_front_loads_motion() {
        let mut t = Tween::new(0.0, 1.0, 100.0);
        t.advance(50.0);
        assert!((t.value() - 0.75).abs() < 1e-6);

        let mut linear = Tween::new(0.0, 1.0, 100.0).with_ease(Ease::Linear);
        linear.advance(50.0);
        assert!((linear.value() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let t = Tween::new(1.0, 5.0, 0.0);
        assert!(t.is_finished());
        assert_eq!(t.value(), 5.0);
    }
}
