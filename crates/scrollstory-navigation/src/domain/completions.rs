//! Routing of completion messages back into the state machine.

use scrollstory_core::animation::Completion;
use uuid::Uuid;

use super::aggregates::Navigation;
use super::context::NavigationContext;
use super::outcome::{IgnoreReason, Outcome};

impl Navigation {
    /// Applies a completion delivered by the animation or smooth-scroll
    /// engine. Completions that belong to the loading splash are not
    /// navigation's concern and are ignored.
    pub fn acknowledge(
        &mut self,
        completion: Completion,
        ctx: &mut NavigationContext<'_>,
        correlation_id: Uuid,
    ) -> Outcome {
        match completion {
            Completion::CaptionExited {
                transition,
                section,
            } => self.on_caption_exited(transition, section, ctx),
            Completion::BackgroundSettled {
                transition,
                section,
            } => self.on_background_settled(transition, section, ctx, correlation_id),
            Completion::SnapSettled { snap } => self.on_snap_settled(snap, ctx, correlation_id),
            Completion::LoadingLabelHidden | Completion::LoadingOverlayLifted => {
                Outcome::Ignored(IgnoreReason::Unrelated)
            }
        }
    }
}
