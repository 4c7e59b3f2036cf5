//! Background crossfade animator.

use scrollstory_core::animation::{
    ClipInset, Completion, Ease, LayerProps, LayerTarget, TweenSpec,
};
use scrollstory_core::section::SectionIndex;

use crate::context::LayerContext;
use crate::stage::BackgroundRole;
use crate::step::TransitionStep;

/// Parallax shift of the outgoing background, in percent of the viewport.
pub const PARALLAX_PERCENT: f64 = 5.0;

const IDLE_FADE_SHARE: f64 = 0.3;

/// Reveals the next background with a directional clip, pushes the previous
/// one away with parallax and fades every other background out.
///
/// The previous background's fade-out carries the `BackgroundSettled`
/// completion, which is what releases the transition guard.
pub fn crossfade(ctx: &mut LayerContext<'_>, step: &TransitionStep) {
    let down = step.is_down();
    for section in SectionIndex::all() {
        let target = LayerTarget::Background { section };
        if section == step.next {
            ctx.stage.set_background_role(section, BackgroundRole::Active);
            let closed = if down {
                ClipInset::CLOSED_AT_TOP
            } else {
                ClipInset::CLOSED_AT_BOTTOM
            };
            ctx.set(
                target,
                LayerProps::new().opacity(1.0).y_percent(0.0).clip(closed),
            );
            ctx.animate(TweenSpec::new(
                target,
                LayerProps::new().clip(ClipInset::OPEN),
                step.duration,
                Ease::Custom,
            ));
        } else if section == step.previous {
            ctx.stage.set_background_role(section, BackgroundRole::Previous);
            let shift = if down { PARALLAX_PERCENT } else { -PARALLAX_PERCENT };
            ctx.animate(TweenSpec::new(
                target,
                LayerProps::new().y_percent(shift),
                step.duration,
                Ease::Custom,
            ));
            ctx.animate(
                TweenSpec::new(
                    target,
                    LayerProps::new().opacity(0.0),
                    step.share(0.5),
                    Ease::Custom,
                )
                .delayed(step.share(0.5))
                .notify(Completion::BackgroundSettled {
                    transition: step.transition,
                    section,
                }),
            );
        } else {
            ctx.stage.set_background_role(section, BackgroundRole::Idle);
            ctx.animate(TweenSpec::new(
                target,
                LayerProps::new().opacity(0.0),
                step.share(IDLE_FADE_SHARE),
                Ease::Custom,
            ));
        }
    }
}

/// Resets a background that finished fading out.
pub fn on_settled(ctx: &mut LayerContext<'_>, section: SectionIndex) {
    if ctx.stage.background(section).role == BackgroundRole::Previous {
        ctx.stage.set_background_role(section, BackgroundRole::Idle);
    }
    ctx.set(
        LayerTarget::Background { section },
        LayerProps::new().y_percent(0.0),
    );
}
