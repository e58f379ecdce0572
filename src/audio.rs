//! Sound cues
//!
//! Short square-wave beeps generated on the fly - no audio files. Audio is
//! strictly best effort: every failure is swallowed and never reaches the
//! simulation.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Enemy hit but still standing
    Hit,
    /// Enemy destroyed
    EnemyDeath,
    /// Player took a hit
    PlayerHit,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shoot => Some(SoundEffect::Shoot),
            GameEvent::Hit => Some(SoundEffect::Hit),
            GameEvent::EnemyDeath { .. } => Some(SoundEffect::EnemyDeath),
            GameEvent::PlayerHit => Some(SoundEffect::PlayerHit),
            _ => None,
        }
    }

    /// (frequency Hz, duration seconds)
    pub fn tone(self) -> (f32, f64) {
        match self {
            SoundEffect::Shoot => (800.0, 0.05),
            SoundEffect::Hit => (300.0, 0.1),
            SoundEffect::EnemyDeath => (150.0, 0.2),
            SoundEffect::PlayerHit => (200.0, 0.3),
        }
    }
}

/// Peak gain of a cue before volume scaling
const BASE_GAIN: f32 = 0.1;
/// Gain the envelope decays to
const TAIL_GAIN: f32 = 0.01;

/// (start gain, end gain) of a cue at `volume`; the cue always fades out
pub fn envelope(volume: f32) -> (f32, f32) {
    (BASE_GAIN * volume, TAIL_GAIN * volume)
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
    volume: f32,
    /// Cues requested since creation (diagnostics)
    played: u64,
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: web::create_context(),
            volume: volume.clamp(0.0, 1.0),
            played: 0,
        }
    }

    /// Effective volume (0.0 - 1.0), already including mute
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn played(&self) -> u64 {
        self.played
    }

    /// Play the cue for each event that has one
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        self.played += 1;

        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            web::beep(ctx, effect, self.volume);
        }

        #[cfg(not(target_arch = "wasm32"))]
        log::trace!("sound cue {:?} {:?}", effect, effect.tone());
    }

    /// Resume audio context (browsers require a user gesture first)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, OscillatorType};

    use super::{SoundEffect, envelope};

    pub(super) fn create_context() -> Option<AudioContext> {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        ctx
    }

    pub(super) fn beep(ctx: &AudioContext, effect: SoundEffect, volume: f32) {
        let _ = try_beep(ctx, effect, volume);
    }

    fn try_beep(ctx: &AudioContext, effect: SoundEffect, volume: f32) -> Option<()> {
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let (freq, duration) = effect.tone();
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        osc.set_type(OscillatorType::Square);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let (start, end) = envelope(volume);
        let t = ctx.current_time();
        osc.frequency().set_value_at_time(freq, t).ok()?;
        gain.gain().set_value_at_time(start, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(end, t + duration)
            .ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(t + duration).ok()
    }
}
