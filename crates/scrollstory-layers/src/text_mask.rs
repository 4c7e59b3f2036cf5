//! Text-mask reveal animator.
//!
//! Outgoing words slide out of their masks in the direction of travel while
//! incoming words slide in from the opposite side. Staggers follow the
//! direction of travel, so scrolling up plays each group last word first.

use std::time::Duration;

use scrollstory_core::animation::{Completion, Ease, LayerProps, LayerTarget, TweenSpec};
use scrollstory_core::error::DomainError;
use scrollstory_core::section::SectionIndex;
use scrollstory_core::sound::TEXT_CHANGE;
use tracing::debug;

use crate::context::LayerContext;
use crate::step::{TransitionStep, stagger};

/// Per-word delay of the outgoing group.
pub const OUT_STAGGER: Duration = Duration::from_millis(30);
/// Per-word delay of the incoming group.
pub const IN_STAGGER: Duration = Duration::from_millis(50);
/// Delay of the text change cue after the step begins.
pub const TEXT_CUE_DELAY: Duration = Duration::from_millis(250);

const EXIT_SHARE: f64 = 0.6;
const MASK_OFFSET: f64 = 100.0;

fn slot(word: usize, count: usize, down: bool) -> usize {
    if down { word } else { count - 1 - word }
}

/// Animates the previous caption out and the next caption in.
///
/// # Errors
///
/// Returns `DomainError::MissingLayer` if the next section has no word
/// tokens. The outgoing caption has been dispatched by then.
pub fn reveal(ctx: &mut LayerContext<'_>, step: &TransitionStep) -> Result<(), DomainError> {
    exit(ctx, step);
    enter(ctx, step)
}

fn exit(ctx: &mut LayerContext<'_>, step: &TransitionStep) {
    let section = step.previous;
    let count = ctx.stage.words(section).len();
    if count == 0 {
        debug!(section = section.get(), "caption has no words, hiding at once");
        ctx.set(LayerTarget::Caption { section }, LayerProps::new().visible(false));
        return;
    }

    let down = step.is_down();
    let to = LayerProps::new()
        .y_percent(if down { -MASK_OFFSET } else { MASK_OFFSET })
        .opacity(0.0);
    for word in 0..count {
        let slot = slot(word, count, down);
        let mut spec = TweenSpec::new(
            LayerTarget::Word { section, word },
            to,
            step.share(EXIT_SHARE),
            Ease::Custom,
        )
        .delayed(stagger(OUT_STAGGER, slot));
        if slot == count - 1 {
            spec = spec.notify(Completion::CaptionExited {
                transition: step.transition,
                section,
            });
        }
        ctx.animate(spec);
    }
}

fn enter(ctx: &mut LayerContext<'_>, step: &TransitionStep) -> Result<(), DomainError> {
    let section = step.next;
    let count = ctx.stage.words(section).len();
    if count == 0 {
        return Err(DomainError::MissingLayer {
            section: section.get(),
            layer: "caption words",
        });
    }

    ctx.sounds.play(TEXT_CHANGE, TEXT_CUE_DELAY);
    ctx.set(
        LayerTarget::Caption { section },
        LayerProps::new().visible(true).opacity(1.0),
    );

    let down = step.is_down();
    let parked = LayerProps::new()
        .y_percent(if down { MASK_OFFSET } else { -MASK_OFFSET })
        .opacity(0.0);
    for word in 0..count {
        let target = LayerTarget::Word { section, word };
        ctx.set(target, parked);
        ctx.animate(
            TweenSpec::new(
                target,
                LayerProps::new().y_percent(0.0).opacity(1.0),
                step.duration,
                Ease::Custom,
            )
            .delayed(stagger(IN_STAGGER, slot(word, count, down))),
        );
    }
    Ok(())
}

/// Hides a caption whose words have finished leaving.
pub fn on_exited(ctx: &mut LayerContext<'_>, section: SectionIndex) {
    ctx.set(LayerTarget::Caption { section }, LayerProps::new().visible(false));
}
