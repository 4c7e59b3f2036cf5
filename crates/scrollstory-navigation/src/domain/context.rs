//! Collaborators the navigation state machine drives.

use scrollstory_core::animation::SmoothScroll;
use scrollstory_core::clock::Clock;
use scrollstory_layers::LayerContext;

/// Everything one navigation step may touch, passed explicitly.
pub struct NavigationContext<'a> {
    /// Visual layers and their animation engine.
    pub layers: LayerContext<'a>,
    /// Smooth-scroll engine used for forced scrolls.
    pub scroll: &'a mut dyn SmoothScroll,
    /// Time source for event metadata.
    pub clock: &'a dyn Clock,
}
