//! Best-effort release of page resources.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use scrollstory_core::error::DomainError;
use serde::Serialize;
use tracing::{debug, warn};

/// A release step that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedStep {
    /// Step name.
    pub step: &'static str,
    /// Error or panic message.
    pub reason: String,
}

/// Outcome of every release step attempted during teardown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeardownReport {
    /// Steps that released cleanly, in order.
    pub released: Vec<&'static str>,
    /// Steps that returned an error or panicked, in order.
    pub failed: Vec<FailedStep>,
}

impl TeardownReport {
    /// Runs one release step. Errors and panics are logged and recorded;
    /// they never stop the caller from running the next step.
    pub fn run(&mut self, step: &'static str, release: impl FnOnce() -> Result<(), DomainError>) {
        match catch_unwind(AssertUnwindSafe(release)) {
            Ok(Ok(())) => {
                debug!(step, "released");
                self.released.push(step);
            }
            Ok(Err(e)) => {
                warn!(step, error = %e, "release failed");
                self.failed.push(FailedStep {
                    step,
                    reason: e.to_string(),
                });
            }
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                warn!(step, reason = %reason, "release panicked");
                self.failed.push(FailedStep { step, reason });
            }
        }
    }

    /// Whether every step released cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}
