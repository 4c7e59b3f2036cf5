//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// None of these reach the reader of the page: every caller degrades to
/// "that enhancement is skipped" and keeps navigation working.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A section index outside `0..SECTION_COUNT`.
    #[error("section index out of range: {0}")]
    SectionOutOfRange(usize),

    /// A visual layer or its word tokens could not be found.
    #[error("missing {layer} for section {section}")]
    MissingLayer {
        /// The section whose layer was looked up.
        section: usize,
        /// Human-readable layer name.
        layer: &'static str,
    },

    /// Page content could not be parsed or split.
    #[error("content error: {0}")]
    Content(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The audio backend failed to play a cue.
    #[error("playback error: {0}")]
    Playback(String),

    /// An infrastructure error (timers, files, collaborators).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
