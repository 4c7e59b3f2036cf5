//! Sound feedback seams.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Cue played when hovering a list item.
pub const HOVER: &str = "hover";
/// Cue played on a list-item click.
pub const CLICK: &str = "click";
/// Cue played shortly after a caption starts changing.
pub const TEXT_CHANGE: &str = "textChange";

/// A registered sound cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Name the cue is played by.
    pub name: String,
    /// Audio source URL.
    pub url: String,
    /// Playback volume in `[0, 1]`.
    pub volume: f64,
}

/// Fire-and-forget sound collaborator, muted until a user gesture.
pub trait SoundFeedback: Send {
    /// Plays `name` after `delay`. No-op while audio is disabled or when the
    /// cue is not registered.
    fn play(&mut self, name: &str, delay: Duration);

    /// Flips the gesture gate. Idempotent.
    fn enable_audio(&mut self);

    /// Registers or replaces a cue.
    fn add_sound(&mut self, name: &str, url: &str, volume: f64);

    /// Returns whether the gesture gate has been flipped.
    fn is_enabled(&self) -> bool;

    /// Cancels pending delayed cues.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if pending cues could not be cancelled.
    fn release(&mut self) -> Result<(), DomainError>;
}

/// Audio backend that actually renders a cue.
pub trait AudioSink: Send + Sync {
    /// Plays a cue once.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Playback` if the backend rejects the cue.
    fn play(&self, cue: &Cue) -> Result<(), DomainError>;
}
