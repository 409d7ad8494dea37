//! Audio system
//!
//! Named sound cues, synthesized with the Web Audio API on wasm32. No sample
//! files needed. Native builds only get the cue mapping.

use crate::sim::GameEvent;

/// Base output volume for every cue
pub const BASE_VOLUME: f32 = 0.5;

/// Sound cues the game can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Projectile fired
    Shoot,
    /// Enemy survived a hit
    DamageTaken,
    /// Enemy destroyed
    Explode,
    /// Player collided with an enemy
    Death,
    /// Power-up collected
    PowerUpNoise,
    /// Menu button pressed
    Select,
}

impl Cue {
    /// Cue to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::Shot => Some(Cue::Shoot),
            GameEvent::EnemyHit { .. } => Some(Cue::DamageTaken),
            GameEvent::EnemyDestroyed { .. } => Some(Cue::Explode),
            GameEvent::PowerUpCollected => Some(Cue::PowerUpNoise),
            GameEvent::GameOver { .. } => Some(Cue::Death),
            GameEvent::PowerUpExpired => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{BASE_VOLUME, Cue};

    /// Nodes of the running background drone
    struct BackgroundLoop {
        osc: OscillatorNode,
        lfo: OscillatorNode,
    }

    impl BackgroundLoop {
        fn stop(self) {
            self.osc.stop().ok();
            self.lfo.stop().ok();
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
        /// Set by the first pointer/touch interaction
        unlocked: bool,
        background: Option<BackgroundLoop>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: BASE_VOLUME,
                muted: false,
                unlocked: false,
                background: None,
            }
        }

        /// First user gesture: resume the context and start the background loop once
        pub fn unlock(&mut self) {
            if self.unlocked {
                return;
            }
            self.unlocked = true;
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
            self.start_background();
        }

        /// Set the output level; a running drone restarts at the new level
        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
            if self.background_playing() {
                self.pause_background();
                self.start_background();
            }
        }

        /// Mute/unmute every cue; the background loop pauses while muted
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            if muted {
                self.pause_background();
            } else if self.unlocked {
                self.start_background();
            }
        }

        pub fn background_playing(&self) -> bool {
            self.background.is_some()
        }

        /// Play a cue (no-op while muted)
        pub fn play(&mut self, cue: Cue) {
            if self.muted || self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let vol = self.volume;
            match cue {
                Cue::Shoot => play_shoot(ctx, vol),
                Cue::DamageTaken => play_damage(ctx, vol),
                Cue::Explode => play_explode(ctx, vol),
                Cue::Death => play_death(ctx, vol),
                Cue::PowerUpNoise => play_power_up(ctx, vol),
                Cue::Select => play_select(ctx, vol),
            }
        }

        /// Start the looping drone unless it is already running
        pub fn start_background(&mut self) {
            if self.muted || self.background_playing() {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            self.background = start_drone(ctx, self.volume);
            if self.background.is_some() {
                log::info!("Background audio started");
            }
        }

        pub fn pause_background(&mut self) {
            if let Some(background) = self.background.take() {
                background.stop();
                log::info!("Background audio paused");
            }
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single oscillator sweeping `from` → `to` with a decaying envelope
    fn sweep(
        ctx: &AudioContext,
        osc_type: OscillatorType,
        from: f32,
        to: f32,
        level: f32,
        duration: f64,
    ) {
        let Some((osc, gain)) = create_osc(ctx, from, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration + 0.02).ok();
    }

    /// Shoot - short laser zap
    fn play_shoot(ctx: &AudioContext, vol: f32) {
        sweep(ctx, OscillatorType::Square, 880.0, 220.0, vol * 0.2, 0.08);
    }

    /// Damage - dull knock
    fn play_damage(ctx: &AudioContext, vol: f32) {
        sweep(ctx, OscillatorType::Triangle, 300.0, 120.0, vol * 0.4, 0.12);
    }

    /// Explosion - boom plus a crack on top
    fn play_explode(ctx: &AudioContext, vol: f32) {
        sweep(ctx, OscillatorType::Sawtooth, 100.0, 30.0, vol * 0.5, 0.4);

        let t = ctx.current_time();
        if let Some((osc, gain)) = create_osc(ctx, 1500.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Death - long descending wail over a sub rumble
    fn play_death(ctx: &AudioContext, vol: f32) {
        sweep(ctx, OscillatorType::Sawtooth, 400.0, 40.0, vol * 0.5, 0.8);
        sweep(ctx, OscillatorType::Sine, 80.0, 30.0, vol * 0.4, 0.9);
    }

    /// Power-up - rising arpeggio
    fn play_power_up(ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [523.25, 659.25, 783.99, 1046.5].iter().enumerate() {
            let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Square) else {
                continue;
            };
            let start = t + i as f64 * 0.06;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.2, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.1)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.12).ok();
        }
    }

    /// Select - UI blip
    fn play_select(ctx: &AudioContext, vol: f32) {
        sweep(ctx, OscillatorType::Sine, 660.0, 990.0, vol * 0.3, 0.08);
    }

    /// Low sawtooth drone with a slow vibrato
    fn start_drone(ctx: &AudioContext, vol: f32) -> Option<BackgroundLoop> {
        let (osc, gain) = create_osc(ctx, 55.0, OscillatorType::Sawtooth)?;
        gain.gain().set_value(vol * 0.08);

        let lfo = ctx.create_oscillator().ok()?;
        let depth = ctx.create_gain().ok()?;
        lfo.set_type(OscillatorType::Sine);
        lfo.frequency().set_value(0.25);
        depth.gain().set_value(6.0);
        lfo.connect_with_audio_node(&depth).ok()?;
        depth.connect_with_audio_param(&osc.frequency()).ok()?;

        osc.start().ok()?;
        lfo.start().ok()?;
        Some(BackgroundLoop { osc, lfo })
    }
}
