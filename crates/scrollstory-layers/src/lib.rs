//! Scrollstory: Visual Layers bounded context.
//!
//! Holds the visual state of every per-section layer (`Stage`) and the four
//! animators the transition controller fans out to. Animators are plain
//! functions over a [`LayerContext`]; they keep no state of their own beyond
//! what they leave on the stage.

pub mod background;
pub mod context;
pub mod list;
pub mod stage;
pub mod step;
pub mod text_mask;

pub use context::LayerContext;
pub use stage::Stage;
pub use step::TransitionStep;
