//! Handles the animators work through.

use scrollstory_core::animation::{AnimationEngine, LayerProps, LayerTarget, TweenSpec};
use scrollstory_core::sound::SoundFeedback;

use crate::stage::Stage;

/// Explicit references to everything an animator may touch.
pub struct LayerContext<'a> {
    /// Visual state of the section layers.
    pub stage: &'a mut Stage,
    /// Tween engine.
    pub engine: &'a mut dyn AnimationEngine,
    /// Sound collaborator.
    pub sounds: &'a mut dyn SoundFeedback,
}

impl LayerContext<'_> {
    /// Applies properties immediately.
    pub fn set(&mut self, target: LayerTarget, props: LayerProps) {
        self.stage.apply(target, &props);
        self.engine.set(target, props);
    }

    /// Starts a tween and records its resting value on the stage.
    pub fn animate(&mut self, spec: TweenSpec) {
        self.stage.apply(spec.target, &spec.to);
        self.engine.tween(spec);
    }
}
