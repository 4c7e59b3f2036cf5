//! Recording sound collaborators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use scrollstory_core::error::DomainError;
use scrollstory_core::sound::{AudioSink, Cue, SoundFeedback};

#[derive(Debug, Default)]
struct SoundLog {
    volumes: HashMap<String, f64>,
    enabled: bool,
    played: Vec<(String, Duration)>,
    released: bool,
}

/// A `SoundFeedback` that honours the gesture gate and records accepted cues.
/// Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSounds {
    log: Arc<Mutex<SoundLog>>,
}

impl RecordingSounds {
    /// Creates a collaborator with the `hover`, `click` and `textChange`
    /// cues registered.
    #[must_use]
    pub fn with_default_cues() -> Self {
        let mut sounds = Self::default();
        for (name, volume) in [("hover", 0.15), ("click", 0.3), ("textChange", 0.3)] {
            sounds.add_sound(name, "memory://cue", volume);
        }
        sounds
    }

    /// Returns the names and delays of cues that passed the gate.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn played(&self) -> Vec<(String, Duration)> {
        self.log.lock().unwrap().played.clone()
    }

    /// Returns the names of cues that passed the gate.
    #[must_use]
    pub fn played_names(&self) -> Vec<String> {
        self.played().into_iter().map(|(name, _)| name).collect()
    }

    /// Returns the registered volume of a cue.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn volume_of(&self, name: &str) -> Option<f64> {
        self.log.lock().unwrap().volumes.get(name).copied()
    }

    /// Returns whether `release` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn was_released(&self) -> bool {
        self.log.lock().unwrap().released
    }
}

impl SoundFeedback for RecordingSounds {
    fn play(&mut self, name: &str, delay: Duration) {
        let mut log = self.log.lock().unwrap();
        if log.enabled && log.volumes.contains_key(name) {
            log.played.push((name.to_owned(), delay));
        }
    }

    fn enable_audio(&mut self) {
        self.log.lock().unwrap().enabled = true;
    }

    fn add_sound(&mut self, name: &str, _url: &str, volume: f64) {
        self.log
            .lock()
            .unwrap()
            .volumes
            .insert(name.to_owned(), volume);
    }

    fn is_enabled(&self) -> bool {
        self.log.lock().unwrap().enabled
    }

    fn release(&mut self) -> Result<(), DomainError> {
        self.log.lock().unwrap().released = true;
        Ok(())
    }
}

/// An `AudioSink` that records cue names, optionally failing every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudioSink {
    played: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingAudioSink {
    /// Creates a sink that accepts every cue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that rejects every cue with a playback error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Returns the names of cues the sink was asked to play.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn played(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }
}

impl AudioSink for RecordingAudioSink {
    fn play(&self, cue: &Cue) -> Result<(), DomainError> {
        self.played.lock().unwrap().push(cue.name.clone());
        if self.fail {
            return Err(DomainError::Playback(format!("{} was interrupted", cue.name)));
        }
        Ok(())
    }
}
