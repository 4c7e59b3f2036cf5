//! Section Transition Controller.
//!
//! Owns `current_section` and the animating guard. A transition is released
//! only by the outgoing background's `BackgroundSettled` completion, so a
//! second transition cannot start before the slowest dominant layer has
//! finished.

use scrollstory_core::animation::{LayerProps, LayerTarget, ListSide};
use scrollstory_core::section::SectionIndex;
use scrollstory_layers::{TransitionStep, background, list, text_mask};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::aggregates::Navigation;
use super::context::NavigationContext;
use super::events::{NavigationEventKind, TransitionSettled, TransitionStarted};
use super::outcome::{IgnoreReason, Outcome};

impl Navigation {
    /// Moves to `next`, fanning out to the four layer animators.
    ///
    /// No-op when `next` is already current or a transition is animating.
    /// An animator that fails is logged and skipped; the others still run.
    pub fn change_section(
        &mut self,
        next: SectionIndex,
        ctx: &mut NavigationContext<'_>,
        correlation_id: Uuid,
    ) -> Outcome {
        if next == self.current_section {
            debug!(section = next.get(), "change ignored, already current");
            return Outcome::Ignored(IgnoreReason::AlreadyCurrent);
        }
        if self.is_animating {
            debug!(section = next.get(), "change ignored, transition in flight");
            return Outcome::Ignored(IgnoreReason::Animating);
        }

        let previous = self.current_section;
        let transition = Uuid::new_v4();
        self.record(
            NavigationEventKind::TransitionStarted(TransitionStarted {
                transition,
                from: previous,
                to: next,
            }),
            correlation_id,
            ctx.clock,
        );
        let step = TransitionStep::new(transition, previous, next);
        info!(
            %transition,
            from = previous.get(),
            to = next.get(),
            direction = ?step.direction(),
            "section transition started"
        );

        let layers = &mut ctx.layers;
        layers.stage.set_progress(next);
        for section in SectionIndex::all().filter(|s| *s != previous && *s != next) {
            layers.set(
                LayerTarget::Caption { section },
                LayerProps::new().visible(false).opacity(0.0),
            );
        }

        if let Err(e) = text_mask::reveal(layers, &step) {
            warn!(%transition, error = %e, "text reveal skipped");
        }
        background::crossfade(layers, &step);
        list::highlight(layers, ListSide::Left, next);
        list::highlight(layers, ListSide::Right, next);

        Outcome::Started {
            transition,
            section: next,
        }
    }

    /// Hides a caption whose words finished leaving, unless the page has
    /// come back to that section in the meantime.
    pub fn on_caption_exited(
        &mut self,
        transition: Uuid,
        section: SectionIndex,
        ctx: &mut NavigationContext<'_>,
    ) -> Outcome {
        if section == self.current_section {
            debug!(%transition, section = section.get(), "caption exit ignored, section is current again");
            return Outcome::Ignored(IgnoreReason::Stale);
        }
        text_mask::on_exited(&mut ctx.layers, section);
        Outcome::Settled
    }

    /// Releases the animating guard when the active transition's outgoing
    /// background has settled, then resumes any pending catch-up.
    pub fn on_background_settled(
        &mut self,
        transition: Uuid,
        section: SectionIndex,
        ctx: &mut NavigationContext<'_>,
        correlation_id: Uuid,
    ) -> Outcome {
        if self.active_transition != Some(transition) {
            debug!(%transition, "background settle ignored, transition not active");
            return Outcome::Ignored(IgnoreReason::Stale);
        }

        background::on_settled(&mut ctx.layers, section);
        self.record(
            NavigationEventKind::TransitionSettled(TransitionSettled {
                transition,
                section: self.current_section,
            }),
            correlation_id,
            ctx.clock,
        );
        info!(%transition, section = self.current_section.get(), "section transition settled");

        self.resume(ctx, correlation_id)
    }
}
