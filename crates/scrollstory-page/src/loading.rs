//! Loading splash: a counter to 100, an exit animation, then the column
//! entrance.

use std::time::Duration;

use scrollstory_core::animation::{
    AnimationEngine, Completion, Ease, LayerProps, LayerTarget, ListSide, LoadingLayer, TweenSpec,
};
use scrollstory_core::rng::DeterministicRng;
use scrollstory_core::section::SectionIndex;
use serde::Serialize;
use tracing::{debug, info};

/// Interval between counter increments.
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);
/// Pause between reaching 100 and the exit animation.
pub const EXIT_DELAY: Duration = Duration::from_millis(200);
/// Delay between consecutive items of a column entrance.
pub const COLUMN_STAGGER: Duration = Duration::from_millis(60);
/// Extra delay of the right column relative to the left one.
pub const CATEGORY_OFFSET: Duration = Duration::from_millis(200);

const LABEL_FADE: Duration = Duration::from_millis(600);
const LABEL_RISE_PX: f64 = -20.0;
const OVERLAY_LIFT: Duration = Duration::from_millis(1200);
const OVERLAY_LIFT_DELAY: Duration = Duration::from_millis(300);

/// Where the splash is in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingPhase {
    /// The counter is ticking.
    Counting,
    /// The counter is full and the label fade is pending or running.
    Exiting,
    /// The overlay is lifting off the page.
    Lifting,
    /// The overlay is gone.
    Revealed,
}

/// Serializable state of the splash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadingView {
    /// Sequence phase.
    pub phase: LoadingPhase,
    /// Counter text.
    pub label: String,
}

/// The loading counter and its exit.
pub struct LoadingSequence {
    counter: f64,
    phase: LoadingPhase,
    rng: Box<dyn DeterministicRng>,
}

impl std::fmt::Debug for LoadingSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingSequence")
            .field("counter", &self.counter)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl LoadingSequence {
    /// A counter at zero.
    #[must_use]
    pub fn new(rng: Box<dyn DeterministicRng>) -> Self {
        Self {
            counter: 0.0,
            phase: LoadingPhase::Counting,
            rng,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    /// Whether the counter still ticks.
    #[must_use]
    pub fn is_counting(&self) -> bool {
        self.phase == LoadingPhase::Counting
    }

    /// Raw counter value in `[0, 100]`.
    #[must_use]
    pub fn counter(&self) -> f64 {
        self.counter
    }

    /// Counter text, e.g. `[07]`.
    #[must_use]
    pub fn label(&self) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let shown = self.counter.round().clamp(0.0, 100.0) as u32;
        format!("[{shown:02}]")
    }

    /// Serializable view.
    #[must_use]
    pub fn view(&self) -> LoadingView {
        LoadingView {
            phase: self.phase,
            label: self.label(),
        }
    }

    /// Adds a random increment of 1 to 4. Returns `true` on the tick that
    /// fills the counter; the caller then schedules [`Self::hide_label`]
    /// after [`EXIT_DELAY`].
    pub fn tick(&mut self) -> bool {
        if !self.is_counting() {
            return false;
        }
        self.counter += self.rng.next_f64() * 3.0 + 1.0;
        if self.counter < 100.0 {
            return false;
        }
        self.counter = 100.0;
        self.phase = LoadingPhase::Exiting;
        info!("loading counter full");
        true
    }

    /// Fades the counter and label up and out. The label carries
    /// [`Completion::LoadingLabelHidden`].
    pub fn hide_label(&mut self, engine: &mut dyn AnimationEngine) {
        if self.phase != LoadingPhase::Exiting {
            debug!(phase = ?self.phase, "label fade ignored");
            return;
        }
        let faded = LayerProps::new().opacity(0.0).y_px(LABEL_RISE_PX);
        engine.tween(TweenSpec::new(
            LayerTarget::Loading {
                part: LoadingLayer::Counter,
            },
            faded,
            LABEL_FADE,
            Ease::Power2InOut,
        ));
        engine.tween(
            TweenSpec::new(
                LayerTarget::Loading {
                    part: LoadingLayer::Label,
                },
                faded,
                LABEL_FADE,
                Ease::Power2InOut,
            )
            .notify(Completion::LoadingLabelHidden),
        );
    }

    /// Lifts the overlay once the label is gone. Returns whether the lift
    /// started.
    pub fn on_label_hidden(&mut self, engine: &mut dyn AnimationEngine) -> bool {
        if self.phase != LoadingPhase::Exiting {
            return false;
        }
        self.phase = LoadingPhase::Lifting;
        engine.tween(
            TweenSpec::new(
                LayerTarget::Loading {
                    part: LoadingLayer::Overlay,
                },
                LayerProps::new().y_percent(-100.0),
                OVERLAY_LIFT,
                Ease::Power3InOut,
            )
            .delayed(OVERLAY_LIFT_DELAY)
            .notify(Completion::LoadingOverlayLifted),
        );
        true
    }

    /// Hides the lifted overlay. Returns whether the page was revealed, in
    /// which case the caller starts the column entrance.
    pub fn on_overlay_lifted(&mut self, engine: &mut dyn AnimationEngine) -> bool {
        if self.phase != LoadingPhase::Lifting {
            return false;
        }
        self.phase = LoadingPhase::Revealed;
        engine.set(
            LayerTarget::Loading {
                part: LoadingLayer::Overlay,
            },
            LayerProps::new().visible(false),
        );
        info!("loading overlay removed");
        true
    }
}

/// When each list item is revealed, relative to the end of the splash.
#[must_use]
pub fn column_entrance_schedule() -> Vec<(Duration, ListSide, SectionIndex)> {
    let mut schedule: Vec<_> = SectionIndex::all()
        .flat_map(|section| {
            #[allow(clippy::cast_possible_truncation)]
            let at = COLUMN_STAGGER * section.get() as u32;
            [
                (at, ListSide::Left, section),
                (at + CATEGORY_OFFSET, ListSide::Right, section),
            ]
        })
        .collect();
    schedule.sort_by_key(|(at, _, _)| *at);
    schedule
}
