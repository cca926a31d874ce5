//! Audio system using Web Audio API
//!
//! Procedurally generated - no external files needed. A soft looping piano-ish
//! arpeggio plays as background music; short stings mark game over and a new
//! best time.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run ended
    GameOver,
    /// Run beat the stored best time
    NewBest,
}

/// Background tempo: eighth notes at 96 bpm
const STEP_SECS: f64 = 60.0 / 96.0 / 2.0;
/// How far ahead music is queued on the audio clock
const LOOKAHEAD_SECS: f64 = 1.0;

/// Four bars of eighth notes (MIDI note numbers), looped
const MELODY: [[u8; 8]; 4] = [
    [60, 64, 67, 72, 67, 64, 60, 64],
    [57, 60, 64, 69, 64, 60, 57, 60],
    [53, 57, 60, 65, 60, 57, 53, 57],
    [55, 59, 62, 67, 62, 59, 55, 59],
];

fn midi_to_hz(note: u8) -> f32 {
    440.0 * 2f32.powf((note as f32 - 69.0) / 12.0)
}

/// Music currently queued on the audio clock
struct MusicTrack {
    bus: GainNode,
    next_note_at: f64,
    step: usize,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    settings: Settings,
    blurred: bool,
    music: Option<MusicTrack>,
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings,
            blurred: false,
            music: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Window focus changed; honors `mute_on_blur`
    pub fn set_blurred(&mut self, blurred: bool) {
        self.blurred = blurred && self.settings.mute_on_blur;
        self.apply_music_gain();
    }

    fn music_gain(&self) -> f32 {
        if self.blurred {
            0.0
        } else {
            self.settings.music_gain()
        }
    }

    fn sfx_gain(&self) -> f32 {
        if self.blurred {
            0.0
        } else {
            self.settings.sfx_gain()
        }
    }

    fn apply_music_gain(&self) {
        if let Some(track) = &self.music {
            track.bus.gain().set_value(self.music_gain());
        }
    }

    /// Start the background loop from the top, replacing any playing loop
    pub fn restart_music(&mut self) {
        self.stop_music();
        let Some(ctx) = &self.ctx else { return };
        self.resume();

        let Ok(bus) = ctx.create_gain() else { return };
        if bus.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        self.music = Some(MusicTrack {
            bus,
            next_note_at: ctx.current_time() + 0.05,
            step: 0,
        });
        self.apply_music_gain();
        self.update();
    }

    pub fn stop_music(&mut self) {
        if let Some(track) = self.music.take() {
            let _ = track.bus.disconnect();
        }
    }

    /// Queue music up to the lookahead window. Call once per frame.
    pub fn update(&mut self) {
        let Some(ctx) = &self.ctx else { return };
        let Some(track) = &mut self.music else { return };

        let horizon = ctx.current_time() + LOOKAHEAD_SECS;
        // After a long stall (tab hidden) skip ahead instead of bursting
        if track.next_note_at < ctx.current_time() {
            track.next_note_at = ctx.current_time() + 0.05;
        }

        while track.next_note_at < horizon {
            let bar = &MELODY[(track.step / 8) % MELODY.len()];
            let note = bar[track.step % 8];
            play_piano_note(ctx, &track.bus, midi_to_hz(note), track.next_note_at);
            track.next_note_at += STEP_SECS;
            track.step = (track.step + 1) % (MELODY.len() * 8);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.sfx_gain();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };
        self.resume();

        match effect {
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
            SoundEffect::NewBest => self.play_new_best(ctx, vol),
        }
    }

    // === Sound generators ===

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

    /// Game over - descending sad tones
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let notes = [392.0, 349.0, 311.0, 262.0];

        for (i, &freq) in notes.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                continue;
            };
            let start = t + i as f64 * 0.22;

            gain.gain().set_value_at_time(0.0, start).ok();
            gain.gain().linear_ramp_to_value_at_time(vol * 0.35, start + 0.03).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.3)
                .ok();

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.35).ok();
        }
    }

    /// New best - ascending fanfare
    fn play_new_best(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time() + 0.9;
        let notes = [523.0, 659.0, 784.0, 1047.0];

        for (i, &freq) in notes.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                continue;
            };
            let start = t + i as f64 * 0.1;

            gain.gain().set_value_at_time(0.0, start).ok();
            gain.gain().linear_ramp_to_value_at_time(vol * 0.15, start + 0.02).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.25)
                .ok();

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.3).ok();
        }
    }
}

/// A soft plucked tone routed into the music bus
fn play_piano_note(ctx: &AudioContext, bus: &GainNode, freq: f32, at: f64) {
    let (Ok(osc), Ok(gain)) = (ctx.create_oscillator(), ctx.create_gain()) else {
        return;
    };
    osc.set_type(OscillatorType::Triangle);
    osc.frequency().set_value(freq);
    if osc.connect_with_audio_node(&gain).is_err() || gain.connect_with_audio_node(bus).is_err() {
        return;
    }

    let length = STEP_SECS * 1.8;
    gain.gain().set_value_at_time(0.0, at).ok();
    gain.gain().linear_ramp_to_value_at_time(0.25, at + 0.01).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.001, at + length)
        .ok();

    osc.start_with_when(at).ok();
    osc.stop_with_when(at + length + 0.05).ok();
}
