//! Left/right list highlighting.

use std::time::Duration;

use scrollstory_core::animation::{Ease, LayerProps, LayerTarget, ListSide, TweenSpec};
use scrollstory_core::section::SectionIndex;

use crate::context::LayerContext;
use crate::stage::DIMMED_OPACITY;

/// Fade duration of list highlights.
pub const LIST_FADE: Duration = Duration::from_millis(300);

/// Marks the item for `next` active at full opacity and dims all others.
pub fn highlight(ctx: &mut LayerContext<'_>, side: ListSide, next: SectionIndex) {
    for section in SectionIndex::all() {
        let active = section == next;
        ctx.stage.set_list_active(side, section, active);
        ctx.animate(TweenSpec::new(
            LayerTarget::ListItem { side, section },
            LayerProps::new().opacity(if active { 1.0 } else { DIMMED_OPACITY }),
            LIST_FADE,
            Ease::Power2Out,
        ));
    }
}
