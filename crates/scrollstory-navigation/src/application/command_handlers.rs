//! Command handlers for the Navigation context.
//!
//! Each handler runs one command against the aggregate and drains the events
//! it produced, so the caller can journal them.

use scrollstory_core::aggregate::AggregateRoot;
use scrollstory_core::command::Command;
use tracing::{debug, instrument};

use crate::domain::aggregates::Navigation;
use crate::domain::commands::{
    AcknowledgeCompletion, NavigateToSection, SampleScroll, SnapToSection,
};
use crate::domain::context::NavigationContext;
use crate::domain::events::{NavigationEvent, SnapOrigin};
use crate::domain::outcome::Outcome;

/// What a handled command did and the events it recorded.
#[derive(Debug)]
pub struct Handled {
    /// Result of the command.
    pub outcome: Outcome,
    /// Events recorded while handling it.
    pub events: Vec<NavigationEvent>,
}

fn drain(navigation: &mut Navigation, command: &dyn Command, outcome: Outcome) -> Handled {
    let events = navigation.uncommitted_events().to_vec();
    navigation.clear_uncommitted_events();
    debug!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        ?outcome,
        events = events.len(),
        "command handled"
    );
    Handled { outcome, events }
}

/// Handles the `SampleScroll` command.
#[instrument(skip_all, fields(progress = command.progress))]
pub fn handle_sample_scroll(
    command: &SampleScroll,
    navigation: &mut Navigation,
    ctx: &mut NavigationContext<'_>,
) -> Handled {
    let outcome = navigation.on_scroll_frame(command.progress, ctx, command.correlation_id);
    drain(navigation, command, outcome)
}

/// Handles the `NavigateToSection` command.
#[instrument(skip_all, fields(index = command.index))]
pub fn handle_navigate_to_section(
    command: &NavigateToSection,
    navigation: &mut Navigation,
    ctx: &mut NavigationContext<'_>,
) -> Handled {
    let outcome = navigation.navigate_to_section(command.index, ctx, command.correlation_id);
    drain(navigation, command, outcome)
}

/// Handles the `SnapToSection` command.
#[instrument(skip_all, fields(index = command.index))]
pub fn handle_snap_to_section(
    command: &SnapToSection,
    navigation: &mut Navigation,
    ctx: &mut NavigationContext<'_>,
) -> Handled {
    let outcome = navigation.snap_to_section(
        command.index,
        SnapOrigin::Scroll,
        ctx,
        command.correlation_id,
    );
    drain(navigation, command, outcome)
}

/// Handles the `AcknowledgeCompletion` command.
#[instrument(skip_all, fields(completion = ?command.completion))]
pub fn handle_acknowledge_completion(
    command: &AcknowledgeCompletion,
    navigation: &mut Navigation,
    ctx: &mut NavigationContext<'_>,
) -> Handled {
    let outcome = navigation.acknowledge(command.completion, ctx, command.correlation_id);
    drain(navigation, command, outcome)
}
