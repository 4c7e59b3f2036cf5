//! One section-to-section move as seen by the animators.

use std::time::Duration;

use scrollstory_core::section::{ScrollDirection, SectionIndex};
use uuid::Uuid;

/// Duration shared by the dominant layers of a transition.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(640);

/// Parameters every animator receives for one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionStep {
    /// Identifier carried by completion messages.
    pub transition: Uuid,
    /// Section being left.
    pub previous: SectionIndex,
    /// Section being entered.
    pub next: SectionIndex,
    /// Duration of the dominant layers.
    pub duration: Duration,
}

impl TransitionStep {
    /// Creates a step with the standard duration.
    #[must_use]
    pub fn new(transition: Uuid, previous: SectionIndex, next: SectionIndex) -> Self {
        Self {
            transition,
            previous,
            next,
            duration: TRANSITION_DURATION,
        }
    }

    /// Direction of travel.
    #[must_use]
    pub fn direction(&self) -> ScrollDirection {
        ScrollDirection::between(self.previous, self.next)
    }

    /// Returns `true` when moving towards higher indices.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.direction().is_down()
    }

    /// A fraction of the dominant duration.
    #[must_use]
    pub fn share(&self, fraction: f64) -> Duration {
        self.duration.mul_f64(fraction)
    }
}

/// Delay of the `slot`-th element in a staggered group.
#[must_use]
pub fn stagger(step: Duration, slot: usize) -> Duration {
    step.saturating_mul(u32::try_from(slot).unwrap_or(u32::MAX))
}
