//! Recording animation engine: captures every `set` and `tween` so tests
//! can inspect them and fire completions on demand.

use std::sync::{Arc, Mutex};

use scrollstory_core::animation::{
    AnimationEngine, Completion, LayerProps, LayerTarget, TweenSpec,
};
use scrollstory_core::error::DomainError;

/// How `kill_all` behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum KillBehavior {
    #[default]
    Succeed,
    Fail,
    Panic,
}

#[derive(Debug, Default)]
struct AnimationLog {
    sets: Vec<(LayerTarget, LayerProps)>,
    tweens: Vec<TweenSpec>,
    pending: Vec<TweenSpec>,
    killed: bool,
}

/// An animation engine that records every call. Clones share the same log,
/// so a test can keep a handle after boxing the engine into the page.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnimationEngine {
    log: Arc<Mutex<AnimationLog>>,
    kill: KillBehavior,
}

impl RecordingAnimationEngine {
    /// Creates an engine whose `kill_all` succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine whose `kill_all` returns an infrastructure error.
    #[must_use]
    pub fn failing_on_kill() -> Self {
        Self {
            kill: KillBehavior::Fail,
            ..Self::default()
        }
    }

    /// Creates an engine whose `kill_all` panics.
    #[must_use]
    pub fn panicking_on_kill() -> Self {
        Self {
            kill: KillBehavior::Panic,
            ..Self::default()
        }
    }

    /// Returns every immediate `set` recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn sets(&self) -> Vec<(LayerTarget, LayerProps)> {
        self.log.lock().unwrap().sets.clone()
    }

    /// Returns every tween recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn tweens(&self) -> Vec<TweenSpec> {
        self.log.lock().unwrap().tweens.clone()
    }

    /// Returns the tweens recorded for one target.
    #[must_use]
    pub fn tweens_for(&self, target: LayerTarget) -> Vec<TweenSpec> {
        self.tweens()
            .into_iter()
            .filter(|spec| spec.target == target)
            .collect()
    }

    /// Drains the completions of every tween dispatched so far, in the order
    /// their tweens would end. Ties keep dispatch order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn take_completions(&self) -> Vec<Completion> {
        let mut pending = std::mem::take(&mut self.log.lock().unwrap().pending);
        pending.sort_by_key(TweenSpec::ends_after);
        pending.into_iter().filter_map(|spec| spec.on_complete).collect()
    }

    /// Forgets recorded sets and tweens. Pending completions are kept.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn clear(&self) {
        let mut log = self.log.lock().unwrap();
        log.sets.clear();
        log.tweens.clear();
    }

    /// Returns whether `kill_all` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn was_killed(&self) -> bool {
        self.log.lock().unwrap().killed
    }
}

impl AnimationEngine for RecordingAnimationEngine {
    fn set(&mut self, target: LayerTarget, props: LayerProps) {
        self.log.lock().unwrap().sets.push((target, props));
    }

    fn tween(&mut self, spec: TweenSpec) {
        let mut log = self.log.lock().unwrap();
        if spec.on_complete.is_some() {
            log.pending.push(spec.clone());
        }
        log.tweens.push(spec);
    }

    fn kill_all(&mut self) -> Result<(), DomainError> {
        self.log.lock().unwrap().killed = true;
        match self.kill {
            KillBehavior::Succeed => Ok(()),
            KillBehavior::Fail => Err(DomainError::Infrastructure(
                "animation engine already detached".into(),
            )),
            KillBehavior::Panic => panic!("animation engine poisoned"),
        }
    }
}
