//! Page runtime: initialization and the single-task event loop.
//!
//! Inputs, completion messages, page timers and loading ticks are all
//! handled on one task, one at a time, so the page never needs a lock.

use std::time::Duration;

use scrollstory_core::animation::Completion;
use scrollstory_core::error::DomainError;
use tokio::sync::mpsc::{Receiver, UnboundedReceiver};
use tokio::task::JoinSet;
use tokio::time::{MissedTickBehavior, interval, sleep};
use tracing::{debug, info, warn};

use crate::assets::AssetGate;
use crate::input::PageInput;
use crate::loading::{LoadingPhase, TICK_INTERVAL};
use crate::page::{Page, PageTimer};
use crate::teardown::TeardownReport;

/// How long the runtime waits without any message, once inputs are closed
/// and the page has settled, before it tears the page down.
pub const QUIET_PERIOD: Duration = Duration::from_millis(1500);

/// Waits `delay`, then for `gate`, then wires the page with `build`.
///
/// A failing gate is logged and initialization proceeds.
///
/// # Errors
///
/// Returns whatever `build` returns.
pub async fn initialize(
    delay: Duration,
    gate: &dyn AssetGate,
    build: impl FnOnce() -> Result<Page, DomainError>,
) -> Result<Page, DomainError> {
    sleep(delay).await;
    if let Err(e) = gate.ready().await {
        warn!(error = %e, "asset gate failed, initializing anyway");
    }
    let page = build()?;
    info!("page initialized");
    Ok(page)
}

/// Drives a page until its inputs close and it settles.
#[derive(Debug)]
pub struct PageRuntime {
    page: Page,
    completions: UnboundedReceiver<Completion>,
    timers: JoinSet<PageTimer>,
}

impl PageRuntime {
    /// Runtime for `page`, receiving engine completions on `completions`.
    #[must_use]
    pub fn new(page: Page, completions: UnboundedReceiver<Completion>) -> Self {
        Self {
            page,
            completions,
            timers: JoinSet::new(),
        }
    }

    /// Handles messages until `inputs` is closed and the page has been
    /// quiet for [`QUIET_PERIOD`], then tears down and returns the page.
    pub async fn run(mut self, mut inputs: Receiver<PageInput>) -> (Page, TeardownReport) {
        let mut ticker = interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut inputs_open = true;

        loop {
            self.schedule_timers();
            let idle = !inputs_open && self.is_idle();
            let counting = self.page.loading().is_counting();

            tokio::select! {
                input = inputs.recv(), if inputs_open => match input {
                    Some(input) => {
                        self.page.handle_input(input);
                    }
                    None => {
                        debug!("input channel closed");
                        inputs_open = false;
                    }
                },
                Some(completion) = self.completions.recv() => {
                    self.page.handle_completion(completion);
                }
                Some(joined) = self.timers.join_next() => match joined {
                    Ok(timer) => self.page.handle_timer(timer),
                    Err(e) => debug!(error = %e, "page timer did not complete"),
                },
                _ = ticker.tick(), if counting => {
                    self.page.tick_loading();
                }
                () = sleep(QUIET_PERIOD), if idle => {
                    debug!("page quiet");
                    break;
                }
                else => break,
            }
        }

        let report = self.teardown(&mut inputs);
        (self.page, report)
    }

    fn schedule_timers(&mut self) {
        for (delay, timer) in self.page.take_scheduled() {
            self.timers.spawn(async move {
                sleep(delay).await;
                timer
            });
        }
    }

    fn is_idle(&self) -> bool {
        self.page.is_settled()
            && self.page.loading().phase() == LoadingPhase::Revealed
            && self.timers.is_empty()
    }

    fn teardown(&mut self, inputs: &mut Receiver<PageInput>) -> TeardownReport {
        let mut report = self.page.teardown();
        report.run("loading timers", || {
            self.timers.abort_all();
            Ok(())
        });
        report.run("input listeners", || {
            inputs.close();
            Ok(())
        });
        report.run("completion channel", || {
            self.completions.close();
            Ok(())
        });
        info!(clean = report.is_clean(), "runtime stopped");
        report
    }
}
