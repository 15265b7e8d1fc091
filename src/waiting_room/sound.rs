//! Alert chime description and audio backends.
//!
//! The notifier never talks to an audio device directly. It hands a [`Chime`]
//! to an [`AlertSounder`], and any error coming back is logged and dropped.

use std::f32::consts::TAU;
use std::io::{ErrorKind, IsTerminal, Write};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{AudioBackend, AudioConfig};

/// Audio output errors. Never propagated past the notifier.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),

    #[error("Audio IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One sine tone inside a chime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    /// Start time relative to the beginning of the chime.
    pub offset: Duration,
    pub duration: Duration,
    /// Peak gain, 0.0 to 1.0.
    pub volume: f32,
}

const C5: f32 = 523.25;
const E5: f32 = 659.25;
const G5: f32 = 783.99;

impl Tone {
    const fn new(frequency_hz: f32, offset_ms: u64, duration_ms: u64, volume: f32) -> Self {
        Self {
            frequency_hz,
            offset: Duration::from_millis(offset_ms),
            duration: Duration::from_millis(duration_ms),
            volume,
        }
    }

    /// Time at which this tone stops, relative to the chime start.
    pub fn end(&self) -> Duration {
        self.offset + self.duration
    }

    /// Envelope gain at `at` (relative to the chime start).
    ///
    /// 100 ms linear attack to full volume, linear sag to 80% until 200 ms
    /// before the end, then an exponential fade to 0.01. Zero outside the tone.
    pub fn gain_at(&self, at: Duration) -> f32 {
        if at < self.offset || at >= self.end() || self.volume <= 0.0 {
            return 0.0;
        }
        let t = (at - self.offset).as_secs_f32();
        let d = self.duration.as_secs_f32();
        let attack = ATTACK.as_secs_f32().min(d);
        let release_start = (d - RELEASE.as_secs_f32()).max(attack);
        let sustain = self.volume * 0.8;

        if t < attack {
            self.volume * t / attack
        } else if t < release_start {
            let x = (t - attack) / (release_start - attack);
            self.volume + (sustain - self.volume) * x
        } else {
            let x = (t - release_start) / (d - release_start);
            sustain * (FADE_FLOOR / sustain).powf(x)
        }
    }

    /// Envelope-shaped sine sample at `at`.
    pub fn sample_at(&self, at: Duration) -> f32 {
        let gain = self.gain_at(at);
        if gain == 0.0 {
            return 0.0;
        }
        let t = (at - self.offset).as_secs_f32();
        gain * (TAU * self.frequency_hz * t).sin()
    }
}

const ATTACK: Duration = Duration::from_millis(100);
const RELEASE: Duration = Duration::from_millis(200);
const FADE_FLOOR: f32 = 0.01;

/// Which part of the alert a chime belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChimeKind {
    Primary,
    Reinforcement,
}

/// A short sequence of overlapping tones.
#[derive(Debug, Clone, PartialEq)]
pub struct Chime {
    pub kind: ChimeKind,
    pub tones: Vec<Tone>,
}

impl Chime {
    /// Rising C5-E5-G5 arpeggio played as soon as a patient is called.
    pub fn primary() -> Self {
        Self {
            kind: ChimeKind::Primary,
            tones: vec![
                Tone::new(C5, 0, 800, 0.4),
                Tone::new(E5, 300, 800, 0.4),
                Tone::new(G5, 600, 1200, 0.4),
            ],
        }
    }

    /// Quieter, faster repeat of the arpeggio.
    pub fn reinforcement() -> Self {
        Self {
            kind: ChimeKind::Reinforcement,
            tones: vec![
                Tone::new(C5, 0, 600, 0.3),
                Tone::new(E5, 200, 600, 0.3),
                Tone::new(G5, 400, 800, 0.3),
            ],
        }
    }

    /// Scale every tone by a master volume.
    pub fn with_volume(mut self, master: f32) -> Self {
        let master = master.clamp(0.0, 1.0);
        for tone in &mut self.tones {
            tone.volume *= master;
        }
        self
    }

    /// Time until the last tone stops.
    pub fn total_duration(&self) -> Duration {
        self.tones.iter().map(Tone::end).max().unwrap_or_default()
    }

    pub fn is_audible(&self) -> bool {
        self.tones.iter().any(|t| t.volume > 0.0)
    }

    /// Mix all tones into mono samples, clipped to -1.0..=1.0.
    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        let rate = u128::from(sample_rate);
        let len = (self.total_duration().as_nanos() * rate).div_ceil(1_000_000_000) as usize;
        (0..len)
            .map(|i| {
                let at = Duration::from_nanos((i as u128 * 1_000_000_000 / rate) as u64);
                let mixed: f32 = self.tones.iter().map(|tone| tone.sample_at(at)).sum();
                mixed.clamp(-1.0, 1.0)
            })
            .collect()
    }

    /// Signed 16-bit little-endian PCM of [`Chime::render`].
    pub fn to_pcm_s16le(&self, sample_rate: u32) -> Vec<u8> {
        self.render(sample_rate)
            .into_iter()
            .flat_map(|s| ((s * f32::from(i16::MAX)) as i16).to_le_bytes())
            .collect()
    }
}

/// Capability to make the waiting room hear a chime.
///
/// Implementations must return quickly; the notifier calls `play` on the
/// thread that issued the call.
pub trait AlertSounder: Send + Sync {
    fn play(&self, chime: &Chime) -> Result<(), AudioError>;
}

/// Backend that only logs.
#[derive(Debug, Default)]
pub struct SilentSounder;

impl AlertSounder for SilentSounder {
    fn play(&self, chime: &Chime) -> Result<(), AudioError> {
        debug!(
            "Silent chime: {:?}, {} tones over {:?}",
            chime.kind,
            chime.tones.len(),
            chime.total_duration()
        );
        Ok(())
    }
}

/// Backend that rings the terminal bell on stderr.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AlertSounder for TerminalBell {
    fn play(&self, chime: &Chime) -> Result<(), AudioError> {
        if !chime.is_audible() {
            return Ok(());
        }

        let mut stderr = std::io::stderr();
        if !stderr.is_terminal() {
            return Err(AudioError::Unavailable("stderr is not a terminal".to_string()));
        }

        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}

/// Backend that synthesizes the chime and streams it to a raw PCM player.
///
/// The default player is ALSA's `aplay`. Rendering and piping happen on a
/// short-lived thread so `play` returns right away.
#[derive(Debug, Clone)]
pub struct SynthSounder {
    pub sample_rate: u32,
    pub program: String,
}

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

impl Default for SynthSounder {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            program: "aplay".to_string(),
        }
    }
}

impl SynthSounder {
    fn player_args(&self) -> Vec<String> {
        vec![
            "-q".to_string(),
            "-t".to_string(),
            "raw".to_string(),
            "-f".to_string(),
            "S16_LE".to_string(),
            "-c".to_string(),
            "1".to_string(),
            "-r".to_string(),
            self.sample_rate.to_string(),
        ]
    }
}

impl AlertSounder for SynthSounder {
    fn play(&self, chime: &Chime) -> Result<(), AudioError> {
        if !chime.is_audible() {
            return Ok(());
        }

        let mut child = Command::new(&self.program)
            .args(self.player_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AudioError::Unavailable(format!("{} not found", self.program)),
                _ => AudioError::Io(e),
            })?;

        let Some(mut stdin) = child.stdin.take() else {
            let _ = child.kill();
            return Err(AudioError::Unavailable("player stdin not captured".to_string()));
        };

        let pcm = chime.to_pcm_s16le(self.sample_rate);
        let kind = chime.kind;
        let program = self.program.clone();
        std::thread::spawn(move || {
            if let Err(e) = stdin.write_all(&pcm) {
                warn!("{} rejected {:?} chime: {}", program, kind, e);
            }
            drop(stdin);
            match child.wait() {
                Ok(status) if !status.success() => warn!("{} exited with {} ({:?} chime)", program, status, kind),
                Ok(_) => {}
                Err(e) => warn!("Failed to wait for {}: {}", program, e),
            }
        });
        Ok(())
    }
}

/// Build the sounder selected in config.
pub fn sounder_for(config: &AudioConfig) -> Arc<dyn AlertSounder> {
    if !config.enabled {
        return Arc::new(SilentSounder);
    }
    match config.backend {
        AudioBackend::Synth => Arc::new(SynthSounder::default()),
        AudioBackend::Bell => Arc::new(TerminalBell),
        AudioBackend::Silent => Arc::new(SilentSounder),
    }
}
