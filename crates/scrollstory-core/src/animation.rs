//! Seams towards the external animation and smooth-scroll engines.
//!
//! The domain never interpolates values itself. It describes the resting
//! state a layer should reach (`LayerProps`), how long that should take and
//! which message should come back when it is done (`Completion`). Engines
//! own the frames in between.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::section::SectionIndex;

/// Easing profiles used by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// `cubic-bezier(0.86, 0, 0.07, 1)`, shared by the dominant layers.
    Custom,
    /// Quadratic ease-out.
    Power1Out,
    /// Cubic ease-out, used for list highlights.
    Power2Out,
    /// Cubic ease-in-out.
    Power2InOut,
    /// Quartic ease-in-out.
    Power3InOut,
    /// `1 - (1 - t)^3`, used for forced scroll.
    CubicOut,
}

impl Ease {
    /// Samples the curve at `t`, clamped to `[0, 1]`. Engines use it to place
    /// the frames between a request and its resting state.
    #[must_use]
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Custom => cubic_bezier(0.86, 0.0, 0.07, 1.0, t),
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power2Out | Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::Power3InOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
        }
    }
}

/// Evaluates a CSS-style cubic bezier with endpoints (0,0) and (1,1).
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    let bezier = |a: f64, b: f64, t: f64| {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    };

    // Bisection on x(t); the curve is monotonic in x for valid control points.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    let mut t = x;
    for _ in 0..40 {
        let estimate = bezier(x1, x2, t);
        if (estimate - x).abs() < 1e-7 {
            break;
        }
        if estimate < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    bezier(y1, y2, t)
}

/// Which side list a list item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSide {
    /// The left column.
    Left,
    /// The right column.
    Right,
}

/// Page chrome outside the per-section layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromeLayer {
    /// The pinned full-viewport container.
    FixedContainer,
    /// Header row.
    Header,
    /// Centre content column.
    Content,
    /// Footer row.
    Footer,
    /// Left list column.
    LeftColumn,
    /// Right list column.
    RightColumn,
    /// Caption stack in the middle of the viewport.
    Featured,
}

/// Layers of the loading splash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingLayer {
    /// Full-screen overlay.
    Overlay,
    /// The "Loading" label.
    Label,
    /// The `[NN]` counter.
    Counter,
}

/// Addressable visual element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum LayerTarget {
    /// A section's background image.
    Background {
        /// Owning section.
        section: SectionIndex,
    },
    /// A section's caption container.
    Caption {
        /// Owning section.
        section: SectionIndex,
    },
    /// One word token of a caption.
    Word {
        /// Owning section.
        section: SectionIndex,
        /// Position within the caption.
        word: usize,
    },
    /// A list item in one of the side columns.
    ListItem {
        /// Column.
        side: ListSide,
        /// Section the item navigates to.
        section: SectionIndex,
    },
    /// Page chrome.
    Chrome {
        /// Which part.
        part: ChromeLayer,
    },
    /// Loading splash.
    Loading {
        /// Which part.
        part: LoadingLayer,
    },
}

/// Vertical reveal clip expressed as percentages hidden from the top and the
/// bottom of the element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipInset {
    /// Percent hidden from the top edge.
    pub top: f64,
    /// Percent hidden from the bottom edge.
    pub bottom: f64,
}

impl ClipInset {
    /// Fully revealed.
    pub const OPEN: Self = Self {
        top: 0.0,
        bottom: 0.0,
    };

    /// Fully hidden by the top inset. Opening it uncovers the element from
    /// its bottom edge upwards.
    pub const CLOSED_AT_TOP: Self = Self {
        top: 100.0,
        bottom: 0.0,
    };

    /// Fully hidden by the bottom inset. Opening it uncovers the element from
    /// its top edge downwards.
    pub const CLOSED_AT_BOTTOM: Self = Self {
        top: 0.0,
        bottom: 100.0,
    };
}

/// Animatable properties. `None` leaves the property untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerProps {
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f64>,
    /// Whether the element is displayed at all.
    pub visible: Option<bool>,
    /// Vertical offset in percent of the element's own height.
    pub y_percent: Option<f64>,
    /// Vertical offset in pixels.
    pub y_px: Option<f64>,
    /// Reveal clip.
    pub clip: Option<ClipInset>,
    /// Height in viewport-height units.
    pub height_vh: Option<f64>,
    /// Whether a blur filter is applied.
    pub blurred: Option<bool>,
}

impl LayerProps {
    /// Empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the opacity.
    #[must_use]
    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Sets visibility.
    #[must_use]
    pub fn visible(mut self, value: bool) -> Self {
        self.visible = Some(value);
        self
    }

    /// Sets the vertical offset in percent.
    #[must_use]
    pub fn y_percent(mut self, value: f64) -> Self {
        self.y_percent = Some(value);
        self
    }

    /// Sets the vertical offset in pixels.
    #[must_use]
    pub fn y_px(mut self, value: f64) -> Self {
        self.y_px = Some(value);
        self
    }

    /// Sets the reveal clip.
    #[must_use]
    pub fn clip(mut self, value: ClipInset) -> Self {
        self.clip = Some(value);
        self
    }

    /// Sets the height in viewport units.
    #[must_use]
    pub fn height_vh(mut self, value: f64) -> Self {
        self.height_vh = Some(value);
        self
    }

    /// Sets the blur flag.
    #[must_use]
    pub fn blurred(mut self, value: bool) -> Self {
        self.blurred = Some(value);
        self
    }
}

/// Message delivered back to the page when a tween or forced scroll ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Completion {
    /// The last outgoing word of a caption finished leaving.
    CaptionExited {
        /// Transition that started the exit.
        transition: Uuid,
        /// Section whose caption left.
        section: SectionIndex,
    },
    /// The outgoing background finished fading out.
    BackgroundSettled {
        /// Transition that started the fade.
        transition: Uuid,
        /// Section whose background faded.
        section: SectionIndex,
    },
    /// A forced scroll reached its offset.
    SnapSettled {
        /// Snap identifier.
        snap: Uuid,
    },
    /// The loading label and counter finished fading.
    LoadingLabelHidden,
    /// The loading overlay finished lifting.
    LoadingOverlayLifted,
}

/// One tween request: animate `target` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSpec {
    /// Element to animate.
    pub target: LayerTarget,
    /// Resting properties at the end of the tween.
    pub to: LayerProps,
    /// Tween duration.
    pub duration: Duration,
    /// Delay before the tween starts.
    pub delay: Duration,
    /// Easing profile.
    pub ease: Ease,
    /// Message to deliver when the tween ends.
    pub on_complete: Option<Completion>,
}

impl TweenSpec {
    /// Creates an undelayed tween with no completion message.
    #[must_use]
    pub fn new(target: LayerTarget, to: LayerProps, duration: Duration, ease: Ease) -> Self {
        Self {
            target,
            to,
            duration,
            delay: Duration::ZERO,
            ease,
            on_complete: None,
        }
    }

    /// Delays the start of the tween.
    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Attaches a completion message.
    #[must_use]
    pub fn notify(mut self, completion: Completion) -> Self {
        self.on_complete = Some(completion);
        self
    }

    /// Time from dispatch until the tween ends.
    #[must_use]
    pub fn ends_after(&self) -> Duration {
        self.delay + self.duration
    }
}

/// Tween execution engine.
pub trait AnimationEngine: Send {
    /// Applies properties immediately.
    fn set(&mut self, target: LayerTarget, props: LayerProps);

    /// Starts a tween.
    fn tween(&mut self, spec: TweenSpec);

    /// Stops every running tween and releases engine handles.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if handles could not be released.
    fn kill_all(&mut self) -> Result<(), DomainError>;
}

/// A forced scroll repositioning.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    /// Absolute scroll offset to reach.
    pub offset: f64,
    /// Scroll duration.
    pub duration: Duration,
    /// Easing profile.
    pub ease: Ease,
    /// Whether user input is ignored until the scroll completes.
    pub lock: bool,
    /// Message to deliver on arrival.
    pub on_complete: Option<Completion>,
}

/// Smooth-scroll engine.
pub trait SmoothScroll: Send {
    /// Starts a forced scroll.
    fn scroll_to(&mut self, request: ScrollRequest);

    /// Tears the engine down.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the engine could not be released.
    fn destroy(&mut self) -> Result<(), DomainError>;
}
