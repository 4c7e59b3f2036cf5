//! Result of a navigation request.

use scrollstory_core::section::SectionIndex;
use serde::Serialize;
use uuid::Uuid;

/// Why a request left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The requested section is already current.
    AlreadyCurrent,
    /// A transition is still animating.
    Animating,
    /// A forced scroll is in flight.
    Snapping,
    /// The index names no section.
    OutOfRange(usize),
    /// A completion for a transition or snap that is no longer active.
    Stale,
    /// A message the navigation context does not handle.
    Unrelated,
}

/// What a request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A transition towards `section` began.
    Started {
        /// Transition identifier.
        transition: Uuid,
        /// Section being entered.
        section: SectionIndex,
    },
    /// A completion was applied and nothing new began.
    Settled,
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl Outcome {
    /// Returns `true` if a transition began.
    #[must_use]
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}
