//! Scrollstory: End-of-Content Unpin Handler.
//!
//! Observes progress through the trailing end region and collapses the pinned
//! container as it goes. It shares nothing with the section state machine.

use std::time::Duration;

use scrollstory_core::animation::{
    AnimationEngine, ChromeLayer, Ease, LayerProps, LayerTarget, TweenSpec,
};
use serde::Serialize;
use tracing::debug;

/// Progress into the end region after which the page starts collapsing.
/// Reaching it exactly does not collapse.
pub const COLLAPSE_THRESHOLD: f64 = 0.1;

/// Duration of each chrome follow-up tween.
pub const FOLLOW_DURATION: Duration = Duration::from_millis(100);

const MAX_TRAVEL_PX: f64 = 200.0;
const HEADER_RATE: f64 = 1.5;
const CONTENT_RATE: f64 = 1.0;
const FOOTER_RATE: f64 = 0.5;
const CONTENT_CENTERING_PERCENT: f64 = -50.0;

const BLURRED_LAYERS: [ChromeLayer; 4] = [
    ChromeLayer::Footer,
    ChromeLayer::LeftColumn,
    ChromeLayer::RightColumn,
    ChromeLayer::Featured,
];

/// State of the page chrome for one end-region progress value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChromeState {
    /// Progress into the end region.
    pub progress: f64,
    /// Whether footer, side columns and captions are blurred.
    pub blurred: bool,
    /// Height of the pinned container in viewport units.
    pub container_height_vh: f64,
    /// Header offset in pixels.
    pub header_y_px: f64,
    /// Content offset in pixels, on top of its -50% centring.
    pub content_y_px: f64,
    /// Footer offset in pixels.
    pub footer_y_px: f64,
}

impl Default for ChromeState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            blurred: false,
            container_height_vh: 100.0,
            header_y_px: 0.0,
            content_y_px: 0.0,
            footer_y_px: 0.0,
        }
    }
}

/// Chrome state for `progress` through the end region.
///
/// Past the threshold the container shrinks linearly from 100vh to 0 and
/// header, content and footer drift up at 1.5x, 1x and 0.5x of a shared
/// travel of up to 200px.
#[must_use]
pub fn frame_for(progress: f64) -> ChromeState {
    let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    if progress <= COLLAPSE_THRESHOLD {
        return ChromeState {
            progress,
            ..ChromeState::default()
        };
    }

    let span = (progress - COLLAPSE_THRESHOLD) / (1.0 - COLLAPSE_THRESHOLD);
    let travel = -span * MAX_TRAVEL_PX;
    ChromeState {
        progress,
        blurred: true,
        container_height_vh: (100.0 - span * 100.0).max(0.0),
        header_y_px: travel * HEADER_RATE,
        content_y_px: travel * CONTENT_RATE,
        footer_y_px: travel * FOOTER_RATE,
    }
}

/// Tracks and drives the chrome state.
#[derive(Debug, Default)]
pub struct UnpinHandler {
    state: ChromeState,
}

impl UnpinHandler {
    /// Creates a handler resting at the top of the end region.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current chrome state.
    #[must_use]
    pub fn state(&self) -> &ChromeState {
        &self.state
    }

    /// Applies one progress update through `engine`.
    pub fn on_progress(&mut self, progress: f64, engine: &mut dyn AnimationEngine) -> &ChromeState {
        let next = frame_for(progress);

        if next.blurred != self.state.blurred {
            debug!(blurred = next.blurred, progress = next.progress, "end region blur toggled");
        }
        for part in BLURRED_LAYERS {
            engine.set(
                LayerTarget::Chrome { part },
                LayerProps::new().blurred(next.blurred),
            );
        }

        let follow = |part: ChromeLayer, props: LayerProps| {
            TweenSpec::new(LayerTarget::Chrome { part }, props, FOLLOW_DURATION, Ease::Power1Out)
        };
        engine.tween(follow(
            ChromeLayer::FixedContainer,
            LayerProps::new().height_vh(next.container_height_vh),
        ));
        engine.tween(follow(ChromeLayer::Header, LayerProps::new().y_px(next.header_y_px)));
        engine.tween(follow(
            ChromeLayer::Content,
            LayerProps::new()
                .y_px(next.content_y_px)
                .y_percent(CONTENT_CENTERING_PERCENT),
        ));
        engine.tween(follow(ChromeLayer::Footer, LayerProps::new().y_px(next.footer_y_px)));

        self.state = next;
        &self.state
    }
}
