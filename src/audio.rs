//! Audio feedback using the Web Audio API
//!
//! Two-tone oscillator blips, no sound files needed. Every call is
//! fire-and-forget: when the browser refuses audio (no context, autoplay
//! policy) the blip is silently skipped.

use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Correct tap
    Good,
    /// Wrong tap
    Bad,
}

/// One tone of a blip
struct Tone {
    freq: f32,
    duration: f64,
    osc_type: OscillatorType,
    gain: f32,
    delay: f64,
}

impl Tone {
    fn new(freq: f32, duration: f64, osc_type: OscillatorType, gain: f32, delay: f64) -> Self {
        Self {
            freq,
            duration,
            osc_type,
            gain,
            delay,
        }
    }
}

/// Ask the context to resume; a rejected promise (autoplay policy) is logged and dropped
fn resume_context(ctx: &AudioContext) {
    match ctx.resume() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("AudioContext resume refused: {:?}", e);
            }
        }),
        Err(e) => log::warn!("AudioContext resume failed: {:?}", e),
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
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
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volume and mute from the player's settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    /// Resume audio context (call from a user gesture such as the play button)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            resume_context(ctx);
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            resume_context(ctx);
        }

        let tones = match effect {
            SoundEffect::Good => [
                Tone::new(880.0, 0.08, OscillatorType::Triangle, 0.25, 0.0),
                Tone::new(1320.0, 0.06, OscillatorType::Triangle, 0.2, 0.06),
            ],
            SoundEffect::Bad => [
                Tone::new(200.0, 0.12, OscillatorType::Sawtooth, 0.25, 0.0),
                Tone::new(140.0, 0.14, OscillatorType::Sawtooth, 0.22, 0.08),
            ],
        };
        for tone in &tones {
            self.beep(ctx, tone, vol);
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    /// Single tone with an exponential decay
    fn beep(&self, ctx: &AudioContext, tone: &Tone, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, tone.freq, tone.osc_type) else {
            return;
        };
        let t = ctx.current_time() + tone.delay;

        gain.gain().set_value_at_time(vol * tone.gain, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + tone.duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + tone.duration).ok();
    }
}
