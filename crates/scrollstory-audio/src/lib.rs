//! Scrollstory: Sound Feedback.
//!
//! `SoundBank` keeps the registered cues behind a gesture gate and hands
//! them to an [`AudioSink`]. Playback is fire-and-forget: failures are logged
//! and dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use scrollstory_core::error::DomainError;
use scrollstory_core::sound::{AudioSink, Cue, SoundFeedback};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Volume used when a cue is registered without one.
pub const DEFAULT_VOLUME: f64 = 0.3;

/// Sink that only logs the cues it is asked to play.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAudioSink;

impl AudioSink for TracingAudioSink {
    fn play(&self, cue: &Cue) -> Result<(), DomainError> {
        info!(cue = %cue.name, url = %cue.url, volume = cue.volume, "sound cue played");
        Ok(())
    }
}

fn play_now(sink: &dyn AudioSink, cue: &Cue) {
    if let Err(e) = sink.play(cue) {
        debug!(cue = %cue.name, error = %e, "sound cue playback failed");
    }
}

/// Registered cues behind a one-way gesture gate.
pub struct SoundBank {
    cues: HashMap<String, Cue>,
    enabled: bool,
    sink: Arc<dyn AudioSink>,
    pending: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for SoundBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundBank")
            .field("cues", &self.cues)
            .field("enabled", &self.enabled)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl SoundBank {
    /// Creates an empty, muted bank.
    #[must_use]
    pub fn new(sink: Arc<dyn AudioSink>) -> Self {
        Self {
            cues: HashMap::new(),
            enabled: false,
            sink,
            pending: Vec::new(),
        }
    }

    /// Creates a muted bank with `cues` registered.
    #[must_use]
    pub fn with_cues(sink: Arc<dyn AudioSink>, cues: impl IntoIterator<Item = Cue>) -> Self {
        let mut bank = Self::new(sink);
        for cue in cues {
            bank.cues.insert(cue.name.clone(), cue);
        }
        bank
    }

    /// Returns a registered cue.
    #[must_use]
    pub fn cue(&self, name: &str) -> Option<&Cue> {
        self.cues.get(name)
    }

    /// Number of delayed cues that have not fired yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }
}

impl SoundFeedback for SoundBank {
    fn play(&mut self, name: &str, delay: Duration) {
        if !self.enabled {
            debug!(cue = name, "sound muted until first gesture");
            return;
        }
        let Some(cue) = self.cues.get(name).cloned() else {
            debug!(cue = name, "sound cue not registered");
            return;
        };

        if delay.is_zero() {
            play_now(self.sink.as_ref(), &cue);
            return;
        }
        match Handle::try_current() {
            Ok(runtime) => {
                self.pending.retain(|h| !h.is_finished());
                let sink = Arc::clone(&self.sink);
                self.pending.push(runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    play_now(sink.as_ref(), &cue);
                }));
            }
            Err(_) => play_now(self.sink.as_ref(), &cue),
        }
    }

    fn enable_audio(&mut self) {
        if !self.enabled {
            self.enabled = true;
            info!("audio enabled");
        }
    }

    fn add_sound(&mut self, name: &str, url: &str, volume: f64) {
        self.cues.insert(
            name.to_owned(),
            Cue {
                name: name.to_owned(),
                url: url.to_owned(),
                volume: volume.clamp(0.0, 1.0),
            },
        );
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn release(&mut self) -> Result<(), DomainError> {
        for handle in self.pending.drain(..) {
            handle.abort();
        }
        Ok(())
    }
}
