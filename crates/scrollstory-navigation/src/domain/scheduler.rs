//! Snap Scheduler.
//!
//! Serializes section changes to one step at a time and drives the forced
//! scroll towards the entered section's boundary. While a forced scroll is in
//! flight, scroll frames are ignored so the scroll it causes cannot re-enter
//! the mapper.

use std::time::Duration;

use scrollstory_core::animation::{Completion, Ease, ScrollRequest};
use scrollstory_core::section::SectionIndex;
use scrollstory_core::sound::CLICK;
use tracing::debug;
use uuid::Uuid;

use super::aggregates::Navigation;
use super::context::NavigationContext;
use super::events::{
    NavigationEventKind, ProgressSampled, ScrollIntentReset, SnapOrigin, SnapSettled, SnapStarted,
};
use super::mapper;
use super::outcome::{IgnoreReason, Outcome};

impl SnapOrigin {
    /// Duration of the forced scroll.
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::Scroll => Duration::from_millis(600),
            Self::Click => Duration::from_millis(800),
        }
    }
}

impl Navigation {
    /// Starts a transition to `target` and a forced scroll to its offset.
    ///
    /// No-op when `target` is out of range, already current, or a transition
    /// is animating.
    pub fn snap_to_section(
        &mut self,
        target: usize,
        origin: SnapOrigin,
        ctx: &mut NavigationContext<'_>,
        correlation_id: Uuid,
    ) -> Outcome {
        let Some(target) = SectionIndex::new(target) else {
            debug!(target, "snap ignored, no such section");
            return Outcome::Ignored(IgnoreReason::OutOfRange(target));
        };
        if target == self.current_section {
            return Outcome::Ignored(IgnoreReason::AlreadyCurrent);
        }
        if self.is_animating {
            debug!(target = target.get(), "snap ignored, transition in flight");
            return Outcome::Ignored(IgnoreReason::Animating);
        }

        let snap = Uuid::new_v4();
        let offset = ctx.layers.stage.registry().offset(target);
        self.record(
            NavigationEventKind::SnapStarted(SnapStarted {
                snap,
                target,
                offset,
                origin,
            }),
            correlation_id,
            ctx.clock,
        );

        let outcome = self.change_section(target, ctx, correlation_id);
        ctx.scroll.scroll_to(ScrollRequest {
            offset,
            duration: origin.duration(),
            ease: Ease::CubicOut,
            lock: true,
            on_complete: Some(Completion::SnapSettled { snap }),
        });
        debug!(%snap, target = target.get(), offset, ?origin, "forced scroll started");
        outcome
    }

    /// Discrete jump requested by clicking a list item.
    ///
    /// Guarded like [`Navigation::snap_to_section`] and additionally ignored
    /// while a forced scroll is in flight. A jump enables audio, plays the
    /// click cue and replaces the sampled progress with the jumped section's
    /// boundary.
    pub fn navigate_to_section(
        &mut self,
        index: usize,
        ctx: &mut NavigationContext<'_>,
        correlation_id: Uuid,
    ) -> Outcome {
        let Some(target) = SectionIndex::new(index) else {
            return Outcome::Ignored(IgnoreReason::OutOfRange(index));
        };
        if target == self.current_section {
            return Outcome::Ignored(IgnoreReason::AlreadyCurrent);
        }
        if self.is_animating {
            debug!(target = index, "navigation ignored, transition in flight");
            return Outcome::Ignored(IgnoreReason::Animating);
        }
        if self.is_snapping {
            debug!(target = index, "navigation ignored, forced scroll in flight");
            return Outcome::Ignored(IgnoreReason::Snapping);
        }

        ctx.layers.sounds.enable_audio();
        ctx.layers.sounds.play(CLICK, Duration::ZERO);

        let outcome = self.snap_to_section(index, SnapOrigin::Click, ctx, correlation_id);
        if outcome.is_started() {
            self.record(
                NavigationEventKind::ScrollIntentReset(ScrollIntentReset {
                    progress: target.boundary_progress(),
                    section: target,
                }),
                correlation_id,
                ctx.clock,
            );
        }
        outcome
    }

    /// Handles one scroll frame: samples direction, quantizes the progress
    /// and takes at most one step towards it.
    pub fn on_scroll_frame(
        &mut self,
        progress: f64,
        ctx: &mut NavigationContext<'_>,
        correlation_id: Uuid,
    ) -> Outcome {
        if self.is_snapping {
            return Outcome::Ignored(IgnoreReason::Snapping);
        }

        let progress = mapper::sanitize(progress);
        let direction = mapper::direction(self.last_progress, progress, self.scroll_direction);
        let target = mapper::target_section(progress);

        let outcome = match mapper::next_step(self.current_section, target) {
            None => Outcome::Ignored(IgnoreReason::AlreadyCurrent),
            Some(_) if self.is_animating => Outcome::Ignored(IgnoreReason::Animating),
            Some(step) => self.snap_to_section(step.get(), SnapOrigin::Scroll, ctx, correlation_id),
        };

        self.record(
            NavigationEventKind::ProgressSampled(ProgressSampled {
                progress,
                direction,
                target,
            }),
            correlation_id,
            ctx.clock,
        );
        ctx.layers.stage.set_progress(self.current_section);
        outcome
    }

    /// Releases the snapping guard when the active forced scroll arrives,
    /// then resumes any pending catch-up.
    pub fn on_snap_settled(
        &mut self,
        snap: Uuid,
        ctx: &mut NavigationContext<'_>,
        correlation_id: Uuid,
    ) -> Outcome {
        if self.active_snap != Some(snap) {
            debug!(%snap, "snap settle ignored, snap not active");
            return Outcome::Ignored(IgnoreReason::Stale);
        }

        self.record(
            NavigationEventKind::SnapSettled(SnapSettled { snap }),
            correlation_id,
            ctx.clock,
        );
        self.resume(ctx, correlation_id)
    }

    /// Takes the next catch-up step once both guards are free.
    ///
    /// Frames that arrive while a step is in flight cannot advance the
    /// section, so when the later of a transition's and its snap's settle
    /// arrives, the last sampled target is re-evaluated and at most one more
    /// step is started towards it.
    pub(crate) fn resume(&mut self, ctx: &mut NavigationContext<'_>, correlation_id: Uuid) -> Outcome {
        if self.is_animating || self.is_snapping {
            return Outcome::Settled;
        }
        let Some(target) = self.sampled_target else {
            return Outcome::Settled;
        };
        match mapper::next_step(self.current_section, target) {
            None => Outcome::Settled,
            Some(step) => {
                debug!(
                    from = self.current_section.get(),
                    to = step.get(),
                    target = target.get(),
                    "catching up with sampled progress"
                );
                self.snap_to_section(step.get(), SnapOrigin::Scroll, ctx, correlation_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::Harness;
    use scrollstory_core::aggregate::AggregateRoot;
    use scrollstory_core::sound::SoundFeedback;

    #[test]
    fn test_scroll_frame_takes_a_single_step_even_for_large_jumps() {
        // Arrange
        let mut h = Harness::new();

        // Act
        let outcome = h.scroll(0.75);

        // Assert
        assert!(outcome.is_started());
        assert_eq!(h.navigation.current_section().get(), 1);
        assert!(h.navigation.is_snapping());
        let request = &h.scroll_engine.requests()[0];
        assert!((request.offset - 1_000.0).abs() < 1e-9);
        assert_eq!(request.duration, Duration::from_millis(600));
        assert_eq!(request.ease, Ease::CubicOut);
        assert!(request.lock);
    }

    #[test]
    fn test_frames_are_ignored_while_snapping() {
        // Arrange
        let mut h = Harness::new();
        h.scroll(0.15);
        let version = h.navigation.version;

        // Act
        let outcome = h.scroll(0.55);

        // Assert
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::Snapping));
        assert_eq!(h.navigation.version, version);
        assert!((h.navigation.last_progress() - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_catch_up_walks_every_section_to_the_sampled_target() {
        // Arrange
        let mut h = Harness::new();
        h.scroll(0.45);

        // Act
        let visited = h.settle_everything();

        // Assert
        let visited: Vec<usize> = visited.iter().map(|s| s.get()).collect();
        assert_eq!(visited, [2, 3, 4]);
        assert_eq!(h.navigation.current_section().get(), 4);
        assert!(!h.navigation.is_animating());
        assert!(!h.navigation.is_snapping());
    }

    #[test]
    fn test_snap_to_out_of_range_section_is_ignored() {
        let mut h = Harness::new();

        let outcome = h.snap(12);

        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::OutOfRange(12)));
        assert!(h.scroll_engine.requests().is_empty());
    }

    #[test]
    fn test_navigate_plays_click_and_resets_sampled_progress() {
        // Arrange
        let mut h = Harness::new();
        h.scroll(0.02);

        // Act
        let outcome = h.navigate(7);

        // Assert
        assert!(outcome.is_started());
        assert_eq!(h.navigation.current_section().get(), 7);
        assert!(h.sounds.is_enabled());
        assert_eq!(h.sounds.played_names()[0], "click");
        assert_eq!(h.navigation.sampled_target(), SectionIndex::new(7));
        assert_eq!(h.scroll_engine.requests()[0].duration, Duration::from_millis(800));

        let visited = h.settle_everything();
        assert!(visited.is_empty());
        assert_eq!(h.navigation.current_section().get(), 7);
    }

    #[test]
    fn test_navigate_to_current_section_is_a_no_op() {
        let mut h = Harness::new();

        let outcome = h.navigate(0);

        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::AlreadyCurrent));
        assert!(!h.sounds.is_enabled());
        assert!(h.navigation.uncommitted_events().is_empty());
    }

    #[test]
    fn test_navigate_is_ignored_while_only_snapping() {
        // Arrange
        let mut h = Harness::new();
        h.scroll(0.15);
        h.fire_animation_completions();
        assert!(!h.navigation.is_animating());

        // Act
        let outcome = h.navigate(5);

        // Assert
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::Snapping));
    }

    #[test]
    fn test_stale_snap_settle_is_ignored() {
        let mut h = Harness::new();
        h.scroll(0.15);

        let outcome = h.acknowledge(Completion::SnapSettled {
            snap: Uuid::new_v4(),
        });

        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::Stale));
        assert!(h.navigation.is_snapping());
    }
}
