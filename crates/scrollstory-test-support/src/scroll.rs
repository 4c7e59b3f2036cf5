//! Recording smooth scroll: captures forced scroll requests.

use std::sync::{Arc, Mutex};

use scrollstory_core::animation::{Completion, ScrollRequest, SmoothScroll};
use scrollstory_core::error::DomainError;

#[derive(Debug, Default)]
struct ScrollLog {
    requests: Vec<ScrollRequest>,
    pending: Vec<Completion>,
    destroyed: bool,
}

/// A smooth-scroll engine that records every request. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSmoothScroll {
    log: Arc<Mutex<ScrollLog>>,
    fail_destroy: bool,
}

impl RecordingSmoothScroll {
    /// Creates an engine whose `destroy` succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine whose `destroy` fails.
    #[must_use]
    pub fn failing_on_destroy() -> Self {
        Self {
            fail_destroy: true,
            ..Self::default()
        }
    }

    /// Returns every scroll request recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<ScrollRequest> {
        self.log.lock().unwrap().requests.clone()
    }

    /// Drains the completions of every request dispatched so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn take_completions(&self) -> Vec<Completion> {
        std::mem::take(&mut self.log.lock().unwrap().pending)
    }

    /// Returns whether `destroy` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn was_destroyed(&self) -> bool {
        self.log.lock().unwrap().destroyed
    }
}

impl SmoothScroll for RecordingSmoothScroll {
    fn scroll_to(&mut self, request: ScrollRequest) {
        let mut log = self.log.lock().unwrap();
        if let Some(completion) = request.on_complete {
            log.pending.push(completion);
        }
        log.requests.push(request);
    }

    fn destroy(&mut self) -> Result<(), DomainError> {
        self.log.lock().unwrap().destroyed = true;
        if self.fail_destroy {
            return Err(DomainError::Infrastructure("scroll engine gone".into()));
        }
        Ok(())
    }
}
