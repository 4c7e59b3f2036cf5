//! Timer-backed animation and smooth-scroll engines.
//!
//! Neither engine renders anything. Each logs what it was asked to do and
//! delivers the request's completion message on the page's completion
//! channel once the requested time has elapsed. The smooth scroll also
//! tracks where its eased glide currently is.

use std::time::Duration;

use scrollstory_core::animation::{
    AnimationEngine, Completion, Ease, LayerProps, LayerTarget, ScrollRequest, SmoothScroll,
    TweenSpec,
};
use scrollstory_core::error::DomainError;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, trace};

/// Sending half of the page's completion channel.
pub type CompletionSender = UnboundedSender<Completion>;

/// Delivers `completion` after `after`. Without a runtime the completion is
/// delivered at once.
fn deliver_after(
    completions: &CompletionSender,
    after: Duration,
    completion: Completion,
) -> Option<JoinHandle<()>> {
    let completions = completions.clone();
    match Handle::try_current() {
        Ok(handle) => Some(handle.spawn(async move {
            tokio::time::sleep(after).await;
            if completions.send(completion).is_err() {
                debug!(?completion, "completion dropped, page stopped listening");
            }
        })),
        Err(_) => {
            if completions.send(completion).is_err() {
                debug!(?completion, "completion dropped, page stopped listening");
            }
            None
        }
    }
}

fn abort_all(timers: &mut Vec<JoinHandle<()>>) -> usize {
    let aborted = timers.iter().filter(|t| !t.is_finished()).count();
    for timer in timers.drain(..) {
        timer.abort();
    }
    aborted
}

/// Animation engine that resolves tweens on tokio timers.
#[derive(Debug)]
pub struct TimerAnimationEngine {
    completions: CompletionSender,
    timers: Vec<JoinHandle<()>>,
}

impl TimerAnimationEngine {
    /// Engine reporting on `completions`.
    #[must_use]
    pub fn new(completions: CompletionSender) -> Self {
        Self {
            completions,
            timers: Vec::new(),
        }
    }

    /// Number of completions still waiting on their timer.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.timers.iter().filter(|t| !t.is_finished()).count()
    }
}

impl AnimationEngine for TimerAnimationEngine {
    fn set(&mut self, target: LayerTarget, props: LayerProps) {
        trace!(?target, ?props, "layer set");
    }

    fn tween(&mut self, spec: TweenSpec) {
        trace!(
            target = ?spec.target,
            to = ?spec.to,
            duration_ms = spec.duration.as_millis(),
            delay_ms = spec.delay.as_millis(),
            ease = ?spec.ease,
            "tween started"
        );
        self.timers.retain(|t| !t.is_finished());
        if let Some(completion) = spec.on_complete {
            if let Some(timer) = deliver_after(&self.completions, spec.ends_after(), completion) {
                self.timers.push(timer);
            }
        }
    }

    fn kill_all(&mut self) -> Result<(), DomainError> {
        let aborted = abort_all(&mut self.timers);
        debug!(aborted, "animation timers killed");
        Ok(())
    }
}

/// One forced scroll in progress.
#[derive(Debug, Clone, Copy)]
struct Glide {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
    ease: Ease,
}

impl Glide {
    fn position(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = now.saturating_duration_since(self.started).as_secs_f64()
            / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.ease.sample(t)
    }
}

/// Smooth-scroll engine that glides to the requested offset along the
/// request's ease and reports arrival after the requested duration.
#[derive(Debug)]
pub struct TimerSmoothScroll {
    completions: CompletionSender,
    glide: Option<Glide>,
    timers: Vec<JoinHandle<()>>,
    destroyed: bool,
}

impl TimerSmoothScroll {
    /// Engine reporting on `completions`.
    #[must_use]
    pub fn new(completions: CompletionSender) -> Self {
        Self {
            completions,
            glide: None,
            timers: Vec::new(),
            destroyed: false,
        }
    }

    /// Current scroll offset; mid-glide it follows the request's ease.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.glide
            .map_or(0.0, |glide| glide.position(Instant::now()))
    }
}

impl SmoothScroll for TimerSmoothScroll {
    fn scroll_to(&mut self, request: ScrollRequest) {
        if self.destroyed {
            debug!(offset = request.offset, "forced scroll ignored, engine destroyed");
            return;
        }
        info!(
            offset = request.offset,
            duration_ms = request.duration.as_millis(),
            lock = request.lock,
            "forced scroll"
        );
        self.glide = Some(Glide {
            from: self.offset(),
            to: request.offset,
            started: Instant::now(),
            duration: request.duration,
            ease: request.ease,
        });
        self.timers.retain(|t| !t.is_finished());
        if let Some(completion) = request.on_complete {
            if let Some(timer) = deliver_after(&self.completions, request.duration, completion) {
                self.timers.push(timer);
            }
        }
    }

    fn destroy(&mut self) -> Result<(), DomainError> {
        if self.destroyed {
            return Err(DomainError::Infrastructure(
                "smooth scroll already destroyed".into(),
            ));
        }
        self.destroyed = true;
        let aborted = abort_all(&mut self.timers);
        debug!(aborted, "smooth scroll destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollstory_core::section::SectionIndex;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    fn settle_tween(delay: Duration) -> (TweenSpec, Completion) {
        let completion = Completion::BackgroundSettled {
            transition: Uuid::new_v4(),
            section: SectionIndex::FIRST,
        };
        let spec = TweenSpec::new(
            LayerTarget::Background {
                section: SectionIndex::FIRST,
            },
            LayerProps::new().opacity(0.0),
            Duration::from_millis(320),
            Ease::Custom,
        )
        .delayed(delay)
        .notify(completion);
        (spec, completion)
    }

    #[tokio::test(start_paused = true)]
    async fn test_tween_completion_arrives_when_the_tween_ends() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut engine = TimerAnimationEngine::new(tx);
        let (spec, completion) = settle_tween(Duration::from_millis(320));
        let start = Instant::now();

        // Act
        engine.tween(spec);
        let received = rx.recv().await;

        // Assert
        assert_eq!(received, Some(completion));
        assert!(start.elapsed() >= Duration::from_millis(640));
    }

    #[tokio::test(start_paused = true)]
    async fn test_kill_all_drops_pending_completions() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut engine = TimerAnimationEngine::new(tx);
        engine.tween(settle_tween(Duration::ZERO).0);
        assert_eq!(engine.in_flight(), 1);

        // Act
        engine.kill_all().unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;

        // Assert
        assert!(rx.try_recv().is_err());
        assert_eq!(engine.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_forced_scroll_reports_arrival_after_its_duration() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scroll = TimerSmoothScroll::new(tx);
        let snap = Uuid::new_v4();
        let start = Instant::now();

        // Act
        scroll.scroll_to(ScrollRequest {
            offset: 3000.0,
            duration: Duration::from_millis(600),
            ease: Ease::CubicOut,
            lock: true,
            on_complete: Some(Completion::SnapSettled { snap }),
        });

        // Assert
        assert!(scroll.offset().abs() < f64::EPSILON);
        assert_eq!(rx.recv().await, Some(Completion::SnapSettled { snap }));
        assert!(start.elapsed() >= Duration::from_millis(600));
        assert!((scroll.offset() - 3000.0).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_forced_scroll_follows_its_ease_mid_glide() {
        // Arrange
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scroll = TimerSmoothScroll::new(tx);
        scroll.scroll_to(ScrollRequest {
            offset: 1000.0,
            duration: Duration::from_millis(800),
            ease: Ease::CubicOut,
            lock: true,
            on_complete: None,
        });

        // Act
        tokio::time::sleep(Duration::from_millis(400)).await;
        let halfway = scroll.offset();
        scroll.scroll_to(ScrollRequest {
            offset: 0.0,
            duration: Duration::ZERO,
            ease: Ease::CubicOut,
            lock: true,
            on_complete: None,
        });

        // Assert
        assert!((halfway - 875.0).abs() < 1e-6, "{halfway}");
        assert!(scroll.offset().abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroyed_scroll_ignores_requests_and_rejects_second_destroy() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scroll = TimerSmoothScroll::new(tx);

        scroll.destroy().unwrap();
        scroll.scroll_to(ScrollRequest {
            offset: 900.0,
            duration: Duration::from_millis(600),
            ease: Ease::CubicOut,
            lock: true,
            on_complete: Some(Completion::SnapSettled {
                snap: Uuid::new_v4(),
            }),
        });
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(rx.try_recv().is_err());
        assert!(scroll.offset().abs() < f64::EPSILON);
        assert!(scroll.destroy().is_err());
    }

    #[test]
    fn test_without_a_runtime_completions_are_delivered_at_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut engine = TimerAnimationEngine::new(tx);
        let (spec, completion) = settle_tween(Duration::ZERO);

        engine.tween(spec);

        assert_eq!(rx.try_recv().ok(), Some(completion));
        assert_eq!(engine.in_flight(), 0);
    }
}
