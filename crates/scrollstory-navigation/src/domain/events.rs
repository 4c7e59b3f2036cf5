//! Domain events for the Navigation context.

use scrollstory_core::event::{DomainEvent, EventMetadata};
use scrollstory_core::section::{ScrollDirection, SectionIndex};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What caused a forced scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapOrigin {
    /// The mapper asked for the next single step.
    Scroll,
    /// A list item was clicked.
    Click,
}

/// Emitted for every scroll frame the mapper processes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSampled {
    /// Sanitized progress in `[0, 1]`.
    pub progress: f64,
    /// Direction after the sample.
    pub direction: ScrollDirection,
    /// Section the progress quantizes to.
    pub target: SectionIndex,
}

/// Emitted when a section transition begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionStarted {
    /// Transition identifier.
    pub transition: Uuid,
    /// Section being left.
    pub from: SectionIndex,
    /// Section being entered.
    pub to: SectionIndex,
}

/// Emitted when the dominant layer of a transition has settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionSettled {
    /// Transition identifier.
    pub transition: Uuid,
    /// Section that is now current.
    pub section: SectionIndex,
}

/// Emitted when a forced scroll begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapStarted {
    /// Snap identifier.
    pub snap: Uuid,
    /// Section the scroll heads to.
    pub target: SectionIndex,
    /// Scroll offset the scroll heads to.
    pub offset: f64,
    /// What caused the snap.
    pub origin: SnapOrigin,
}

/// Emitted when a forced scroll has arrived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapSettled {
    /// Snap identifier.
    pub snap: Uuid,
}

/// Emitted when a click replaces the sampled scroll progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollIntentReset {
    /// Progress the page now considers the user's position.
    pub progress: f64,
    /// Section that progress quantizes to.
    pub section: SectionIndex,
}

/// Event payload variants for the Navigation context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NavigationEventKind {
    /// A scroll frame was sampled.
    ProgressSampled(ProgressSampled),
    /// A transition began.
    TransitionStarted(TransitionStarted),
    /// A transition settled.
    TransitionSettled(TransitionSettled),
    /// A forced scroll began.
    SnapStarted(SnapStarted),
    /// A forced scroll arrived.
    SnapSettled(SnapSettled),
    /// The sampled progress was replaced by a click target.
    ScrollIntentReset(ScrollIntentReset),
}

/// Domain event envelope for the Navigation context.
#[derive(Debug, Clone)]
pub struct NavigationEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: NavigationEventKind,
}

impl NavigationEventKind {
    /// Journal name of the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ProgressSampled(_) => "navigation.progress_sampled",
            Self::TransitionStarted(_) => "navigation.transition_started",
            Self::TransitionSettled(_) => "navigation.transition_settled",
            Self::SnapStarted(_) => "navigation.snap_started",
            Self::SnapSettled(_) => "navigation.snap_settled",
            Self::ScrollIntentReset(_) => "navigation.scroll_intent_reset",
        }
    }
}

impl DomainEvent for NavigationEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("NavigationEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
