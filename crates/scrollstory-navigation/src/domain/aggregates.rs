//! Aggregate roots for the Navigation context.

use scrollstory_core::aggregate::AggregateRoot;
use scrollstory_core::clock::Clock;
use scrollstory_core::event::EventMetadata;
use scrollstory_core::section::{ScrollDirection, SectionIndex};
use uuid::Uuid;

use super::events::{NavigationEvent, NavigationEventKind};

/// The page's navigation state.
///
/// `current_section` always names the last completed or in-progress target.
/// Transition events are recorded only by the controller, snap and sample
/// events only by the scheduler.
#[derive(Debug)]
pub struct Navigation {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    pub(crate) current_section: SectionIndex,
    pub(crate) is_animating: bool,
    pub(crate) is_snapping: bool,
    pub(crate) last_progress: f64,
    /// Section the last sampled progress quantizes to; `None` until the
    /// first scroll frame or click.
    pub(crate) sampled_target: Option<SectionIndex>,
    pub(crate) scroll_direction: ScrollDirection,
    pub(crate) active_transition: Option<Uuid>,
    pub(crate) active_snap: Option<Uuid>,
    /// Uncommitted events pending journaling.
    uncommitted_events: Vec<NavigationEvent>,
}

impl Navigation {
    /// Creates the state for a freshly mounted page, resting on section 0.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            current_section: SectionIndex::FIRST,
            is_animating: false,
            is_snapping: false,
            last_progress: 0.0,
            sampled_target: None,
            scroll_direction: ScrollDirection::Idle,
            active_transition: None,
            active_snap: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// The section being shown or entered.
    #[must_use]
    pub fn current_section(&self) -> SectionIndex {
        self.current_section
    }

    /// Whether a transition holds the guard.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    /// Whether a forced scroll is in flight.
    #[must_use]
    pub fn is_snapping(&self) -> bool {
        self.is_snapping
    }

    /// Last sampled progress.
    #[must_use]
    pub fn last_progress(&self) -> f64 {
        self.last_progress
    }

    /// Section the last sampled progress quantizes to.
    #[must_use]
    pub fn sampled_target(&self) -> Option<SectionIndex> {
        self.sampled_target
    }

    /// Direction of the last significant scroll movement.
    #[must_use]
    pub fn scroll_direction(&self) -> ScrollDirection {
        self.scroll_direction
    }

    /// Identifier of the transition holding the guard.
    #[must_use]
    pub fn active_transition(&self) -> Option<Uuid> {
        self.active_transition
    }

    /// Builds, applies and queues an event.
    pub(crate) fn record(
        &mut self,
        kind: NavigationEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let event = NavigationEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.version + 1,
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };

        self.apply(&event);
        self.uncommitted_events.push(event);
    }
}

impl AggregateRoot for Navigation {
    type Event = NavigationEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            NavigationEventKind::ProgressSampled(payload) => {
                self.last_progress = payload.progress;
                self.sampled_target = Some(payload.target);
                self.scroll_direction = payload.direction;
            }
            NavigationEventKind::TransitionStarted(payload) => {
                self.current_section = payload.to;
                self.is_animating = true;
                self.active_transition = Some(payload.transition);
            }
            NavigationEventKind::TransitionSettled(_) => {
                self.is_animating = false;
                self.active_transition = None;
            }
            NavigationEventKind::SnapStarted(payload) => {
                self.is_snapping = true;
                self.active_snap = Some(payload.snap);
            }
            NavigationEventKind::SnapSettled(_) => {
                self.is_snapping = false;
                self.active_snap = None;
            }
            NavigationEventKind::ScrollIntentReset(payload) => {
                self.last_progress = payload.progress;
                self.sampled_target = Some(payload.section);
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{SnapOrigin, SnapStarted, TransitionStarted};
    use chrono::{TimeZone, Utc};
    use scrollstory_core::event::DomainEvent;
    use scrollstory_test_support::FixedClock;

    #[test]
    fn test_record_applies_and_queues_event() {
        // Arrange
        let navigation_id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();
        let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = FixedClock(fixed_now);
        let mut navigation = Navigation::new(navigation_id);
        let transition = Uuid::new_v4();

        // Act
        navigation.record(
            NavigationEventKind::TransitionStarted(TransitionStarted {
                transition,
                from: SectionIndex::FIRST,
                to: SectionIndex::saturating(1),
            }),
            correlation_id,
            &clock,
        );

        // Assert
        assert_eq!(navigation.current_section().get(), 1);
        assert!(navigation.is_animating());
        assert_eq!(navigation.active_transition(), Some(transition));
        assert_eq!(navigation.version(), 1);

        let events = navigation.uncommitted_events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.event_type(), "navigation.transition_started");

        let meta = event.metadata();
        assert_eq!(meta.aggregate_id, navigation_id);
        assert_eq!(meta.sequence_number, 1);
        assert_eq!(meta.correlation_id, correlation_id);
        assert_eq!(meta.occurred_at, fixed_now);
    }

    #[test]
    fn test_sequence_numbers_continue_after_clearing() {
        // Arrange
        let clock = FixedClock::default();
        let mut navigation = Navigation::new(Uuid::new_v4());
        let snap = |target: usize| {
            NavigationEventKind::SnapStarted(SnapStarted {
                snap: Uuid::new_v4(),
                target: SectionIndex::saturating(target),
                offset: 0.0,
                origin: SnapOrigin::Scroll,
            })
        };
        navigation.record(snap(1), Uuid::new_v4(), &clock);
        navigation.clear_uncommitted_events();

        // Act
        navigation.record(snap(2), Uuid::new_v4(), &clock);

        // Assert
        let events = navigation.uncommitted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].metadata().sequence_number, 2);
        assert!(navigation.is_snapping());
    }

    #[test]
    fn test_payload_serializes_with_variant_name() {
        let clock = FixedClock::default();
        let mut navigation = Navigation::new(Uuid::new_v4());

        navigation.record(
            NavigationEventKind::SnapStarted(SnapStarted {
                snap: Uuid::nil(),
                target: SectionIndex::saturating(4),
                offset: 4_000.0,
                origin: SnapOrigin::Click,
            }),
            Uuid::new_v4(),
            &clock,
        );

        let payload = navigation.uncommitted_events()[0].to_payload();
        assert_eq!(payload["SnapStarted"]["target"], 4);
        assert_eq!(payload["SnapStarted"]["origin"], "click");
    }
}
