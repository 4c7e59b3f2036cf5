//! Shared test mocks and utilities for the Scrollstory page.

mod animation;
mod clock;
mod rng;
mod scroll;
mod sound;

pub use animation::RecordingAnimationEngine;
pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
pub use scroll::RecordingSmoothScroll;
pub use sound::{RecordingAudioSink, RecordingSounds};
