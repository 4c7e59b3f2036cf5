//! The page: every component wired behind one input surface.
//!
//! `Page` owns the navigation aggregate, the stage and the collaborators.
//! Inputs and completion messages are handled synchronously, one at a time;
//! work that must happen later is queued as a [`PageTimer`] for the runtime
//! to schedule.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use scrollstory_audio::DEFAULT_VOLUME;
use scrollstory_core::animation::{AnimationEngine, Completion, ListSide, SmoothScroll};
use scrollstory_core::clock::Clock;
use scrollstory_core::error::DomainError;
use scrollstory_core::event::DomainEvent;
use scrollstory_core::rng::DeterministicRng;
use scrollstory_core::section::{ScrollDirection, SectionIndex};
use scrollstory_core::sound::{HOVER, SoundFeedback};
use scrollstory_layers::stage::StageSnapshot;
use scrollstory_layers::{LayerContext, Stage};
use scrollstory_navigation::application::command_handlers::{
    Handled, handle_acknowledge_completion, handle_navigate_to_section, handle_sample_scroll,
};
use scrollstory_navigation::application::query_handlers::{NavigationView, get_navigation_view};
use scrollstory_navigation::domain::aggregates::Navigation;
use scrollstory_navigation::domain::commands::{
    AcknowledgeCompletion, NavigateToSection, SampleScroll,
};
use scrollstory_navigation::domain::context::NavigationContext;
use scrollstory_navigation::domain::events::{NavigationEvent, NavigationEventKind};
use scrollstory_navigation::domain::mapper;
use scrollstory_navigation::domain::outcome::{IgnoreReason, Outcome};
use scrollstory_sections::content::PageContent;
use scrollstory_sections::registry::ScrollGeometry;
use scrollstory_unpin::{ChromeState, UnpinHandler};
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::debug::DebugOverlay;
use crate::input::PageInput;
use crate::loading::{self, LoadingSequence, LoadingView};
use crate::teardown::TeardownReport;

/// Most recent transition and snap events the page keeps.
pub const JOURNAL_CAPACITY: usize = 256;

/// External collaborators the page drives.
pub struct Collaborators {
    /// Tween engine.
    pub engine: Box<dyn AnimationEngine>,
    /// Smooth-scroll engine.
    pub scroll: Box<dyn SmoothScroll>,
    /// Sound feedback.
    pub sounds: Box<dyn SoundFeedback>,
    /// Time source for event metadata.
    pub clock: Arc<dyn Clock>,
    /// Randomness for the loading counter.
    pub rng: Box<dyn DeterministicRng>,
}

/// Delayed page work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTimer {
    /// Start the loading label fade.
    HideLoadingLabel,
    /// Reveal one list item as part of the column entrance.
    RevealListItem {
        /// Column.
        side: ListSide,
        /// Item position.
        section: SectionIndex,
    },
}

/// Serializable view of the whole page.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    /// Navigation state.
    pub navigation: NavigationView,
    /// Section-bound layers.
    pub stage: StageSnapshot,
    /// End-region chrome.
    pub chrome: ChromeState,
    /// Debug overlay.
    pub debug: DebugOverlay,
    /// Loading splash.
    pub loading: LoadingView,
    /// Whether the audio gate is open.
    pub audio_enabled: bool,
    /// Number of navigation events recorded since the page was wired.
    pub events: usize,
}

/// A mounted page.
pub struct Page {
    navigation: Navigation,
    stage: Stage,
    engine: Box<dyn AnimationEngine>,
    scroll: Box<dyn SmoothScroll>,
    sounds: Box<dyn SoundFeedback>,
    clock: Arc<dyn Clock>,
    unpin: UnpinHandler,
    debug: DebugOverlay,
    loading: LoadingSequence,
    journal: VecDeque<NavigationEvent>,
    events_recorded: usize,
    scheduled: Vec<(Duration, PageTimer)>,
    torn_down: bool,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("navigation", &self.navigation)
            .field("loading", &self.loading)
            .field("journal", &self.journal.len())
            .field("events_recorded", &self.events_recorded)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Wires a page over `content`, registers its sound cues and starts
    /// the loading counter.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the content is invalid.
    pub fn new(
        content: &PageContent,
        geometry: ScrollGeometry,
        collaborators: Collaborators,
    ) -> Result<Self, DomainError> {
        let stage = Stage::from_content(content, geometry)?;
        let Collaborators {
            engine,
            scroll,
            mut sounds,
            clock,
            rng,
        } = collaborators;
        for cue in &content.sounds {
            sounds.add_sound(&cue.name, &cue.url, cue.volume);
        }
        let navigation = Navigation::new(Uuid::new_v4());
        info!(
            navigation_id = %navigation.id,
            title = %content.title,
            cues = content.sounds.len(),
            "page wired"
        );
        Ok(Self {
            navigation,
            stage,
            engine,
            scroll,
            sounds,
            clock,
            unpin: UnpinHandler::new(),
            debug: DebugOverlay::new(),
            loading: LoadingSequence::new(rng),
            journal: VecDeque::with_capacity(JOURNAL_CAPACITY),
            events_recorded: 0,
            scheduled: Vec::new(),
            torn_down: false,
        })
    }

    /// Handles one input. Returns the navigation outcome when the input
    /// reached the navigation state machine.
    #[instrument(skip_all, fields(input = ?input))]
    pub fn handle_input(&mut self, input: PageInput) -> Option<Outcome> {
        if self.torn_down {
            debug!("input ignored, page torn down");
            return None;
        }
        match input {
            PageInput::Scroll { progress } => Some(self.on_scroll(progress)),
            PageInput::EndScroll { progress } => {
                let progress = mapper::sanitize(progress);
                let height = self
                    .unpin
                    .on_progress(progress, self.engine.as_mut())
                    .container_height_vh;
                self.debug.show_end(height, progress);
                None
            }
            PageInput::Click { item } => {
                self.sounds.enable_audio();
                item.map(|item| self.navigate(item.index))
            }
            PageInput::Hover { item } => {
                debug!(side = ?item.side, index = item.index, "list item hovered");
                self.sounds.play(HOVER, Duration::ZERO);
                None
            }
            PageInput::Key { key } => {
                self.debug.handle_key(&key);
                None
            }
        }
    }

    /// Handles a completion message from an engine.
    pub fn handle_completion(&mut self, completion: Completion) -> Option<Outcome> {
        if self.torn_down {
            debug!(?completion, "completion ignored, page torn down");
            return None;
        }
        match completion {
            Completion::LoadingLabelHidden => {
                self.loading.on_label_hidden(self.engine.as_mut());
                None
            }
            Completion::LoadingOverlayLifted => {
                if self.loading.on_overlay_lifted(self.engine.as_mut()) {
                    self.scheduled.extend(loading::column_entrance_schedule().into_iter().map(
                        |(at, side, section)| (at, PageTimer::RevealListItem { side, section }),
                    ));
                }
                None
            }
            Completion::CaptionExited { .. }
            | Completion::BackgroundSettled { .. }
            | Completion::SnapSettled { .. } => {
                let command = AcknowledgeCompletion {
                    correlation_id: Uuid::new_v4(),
                    completion,
                };
                Some(self.dispatch(|navigation, ctx| {
                    handle_acknowledge_completion(&command, navigation, ctx)
                }))
            }
        }
    }

    /// Advances the loading counter by one tick. Returns whether the counter
    /// keeps ticking.
    pub fn tick_loading(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        if self.loading.tick() {
            self.scheduled
                .push((loading::EXIT_DELAY, PageTimer::HideLoadingLabel));
        }
        self.loading.is_counting()
    }

    /// Runs delayed work whose timer has fired.
    pub fn handle_timer(&mut self, timer: PageTimer) {
        if self.torn_down {
            return;
        }
        match timer {
            PageTimer::HideLoadingLabel => self.loading.hide_label(self.engine.as_mut()),
            PageTimer::RevealListItem { side, section } => self.stage.mark_loaded(side, section),
        }
    }

    /// Drains the delayed work queued since the last call.
    pub fn take_scheduled(&mut self) -> Vec<(Duration, PageTimer)> {
        std::mem::take(&mut self.scheduled)
    }

    /// Registers or replaces a sound cue. `volume` defaults to 0.3.
    pub fn add_sound(&mut self, name: &str, url: &str, volume: Option<f64>) {
        self.sounds
            .add_sound(name, url, volume.unwrap_or(DEFAULT_VOLUME));
    }

    /// The most recent transition and snap events, oldest first. Progress
    /// samples are logged but not kept.
    #[must_use]
    pub fn events(&self) -> &VecDeque<NavigationEvent> {
        &self.journal
    }

    /// Current navigation state.
    #[must_use]
    pub fn navigation(&self) -> NavigationView {
        get_navigation_view(&self.navigation)
    }

    /// Section-bound layers.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// End-region chrome.
    #[must_use]
    pub fn chrome(&self) -> &ChromeState {
        self.unpin.state()
    }

    /// Debug overlay.
    #[must_use]
    pub fn debug_overlay(&self) -> &DebugOverlay {
        &self.debug
    }

    /// Loading splash.
    #[must_use]
    pub fn loading(&self) -> &LoadingSequence {
        &self.loading
    }

    /// Whether no transition or forced scroll is in flight.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.navigation.is_animating() && !self.navigation.is_snapping()
    }

    /// Serializable copy of the page state.
    #[must_use]
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            navigation: self.navigation(),
            stage: self.stage.snapshot(),
            chrome: *self.unpin.state(),
            debug: self.debug.clone(),
            loading: self.loading.view(),
            audio_enabled: self.sounds.is_enabled(),
            events: self.events_recorded,
        }
    }

    /// Releases the animation engine, the smooth scroll and pending sound
    /// cues. After teardown the page ignores inputs, completions and timers.
    pub fn teardown(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();
        report.run("animation engine", || self.engine.kill_all());
        report.run("smooth scroll", || self.scroll.destroy());
        report.run("sound cues", || self.sounds.release());
        report.run("page timers", || {
            self.scheduled.clear();
            Ok(())
        });
        self.torn_down = true;
        info!(
            released = report.released.len(),
            failed = report.failed.len(),
            "page torn down"
        );
        report
    }

    fn on_scroll(&mut self, progress: f64) -> Outcome {
        let command = SampleScroll {
            correlation_id: Uuid::new_v4(),
            progress,
        };
        let outcome =
            self.dispatch(|navigation, ctx| handle_sample_scroll(&command, navigation, ctx));
        if outcome != Outcome::Ignored(IgnoreReason::Snapping) {
            let progress = mapper::sanitize(progress);
            self.debug.show_frame(
                self.navigation.current_section(),
                mapper::target_section(progress),
                progress,
                self.navigation.scroll_direction(),
            );
        }
        outcome
    }

    fn navigate(&mut self, index: usize) -> Outcome {
        let command = NavigateToSection {
            correlation_id: Uuid::new_v4(),
            index,
        };
        self.dispatch(|navigation, ctx| handle_navigate_to_section(&command, navigation, ctx))
    }

    /// Runs a navigation command handler against the page's collaborators,
    /// logs the events it recorded, keeps the transition and snap ones, and
    /// reflects a started transition on the debug overlay.
    fn dispatch(
        &mut self,
        handler: impl FnOnce(&mut Navigation, &mut NavigationContext<'_>) -> Handled,
    ) -> Outcome {
        let before = self.navigation.current_section();
        let mut ctx = NavigationContext {
            layers: LayerContext {
                stage: &mut self.stage,
                engine: self.engine.as_mut(),
                sounds: self.sounds.as_mut(),
            },
            scroll: self.scroll.as_mut(),
            clock: self.clock.as_ref(),
        };
        let Handled { outcome, events } = handler(&mut self.navigation, &mut ctx);

        for event in events {
            debug!(
                event_type = event.event_type(),
                sequence_number = event.metadata().sequence_number,
                correlation_id = %event.metadata().correlation_id,
                payload = %event.to_payload(),
                "navigation event"
            );
            self.events_recorded += 1;
            if matches!(event.kind, NavigationEventKind::ProgressSampled(_)) {
                continue;
            }
            if self.journal.len() == JOURNAL_CAPACITY {
                self.journal.pop_front();
            }
            self.journal.push_back(event);
        }
        if let Outcome::Started { section, .. } = outcome {
            self.debug
                .show_change(section, ScrollDirection::between(before, section));
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollstory_core::animation::{LayerTarget, LoadingLayer};
    use scrollstory_core::sound::CLICK;
    use scrollstory_test_support::{
        FixedClock, MockRng, RecordingAnimationEngine, RecordingSmoothScroll, RecordingSounds,
    };

    use crate::input::ItemRef;
    use crate::loading::LoadingPhase;

    struct Fixture {
        page: Page,
        engine: RecordingAnimationEngine,
        scroll: RecordingSmoothScroll,
        sounds: RecordingSounds,
    }

    fn fixture() -> Fixture {
        let engine = RecordingAnimationEngine::new();
        let scroll = RecordingSmoothScroll::new();
        let sounds = RecordingSounds::default();
        let page = Page::new(
            &PageContent::builtin().unwrap(),
            ScrollGeometry {
                pinned_top: 0.0,
                pinned_height: 10_000.0,
            },
            Collaborators {
                engine: Box::new(engine.clone()),
                scroll: Box::new(scroll.clone()),
                sounds: Box::new(sounds.clone()),
                clock: Arc::new(FixedClock::default()),
                rng: Box::new(MockRng),
            },
        )
        .unwrap();
        Fixture {
            page,
            engine,
            scroll,
            sounds,
        }
    }

    #[test]
    fn test_new_page_registers_content_cues() {
        // Act
        let fixture = fixture();

        // Assert
        assert_eq!(fixture.sounds.volume_of(HOVER), Some(0.15));
        assert_eq!(fixture.sounds.volume_of(CLICK), Some(0.3));
        assert!(!fixture.sounds.is_enabled());
        assert_eq!(
            fixture.page.debug_overlay().text(),
            "Current Section: 0 (Initial)"
        );
    }

    #[test]
    fn test_scroll_frame_journals_events_and_updates_the_overlay() {
        // Arrange
        let mut fixture = fixture();

        // Act
        let outcome = fixture
            .page
            .handle_input(PageInput::Scroll { progress: 0.15 });

        // Assert
        assert!(outcome.is_some_and(|o| o.is_started()));
        let types: Vec<_> = fixture.page.events().iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            ["navigation.snap_started", "navigation.transition_started"]
        );
        assert_eq!(fixture.page.snapshot().events, 3);
        assert_eq!(
            fixture.page.debug_overlay().text(),
            "Section: 1, Target: 1, Progress: 0.150, Direction: 1"
        );
    }

    #[test]
    fn test_suppressed_frame_leaves_the_overlay_on_the_change_text() {
        let mut fixture = fixture();
        fixture
            .page
            .handle_input(PageInput::Click {
                item: Some(ItemRef {
                    side: ListSide::Left,
                    index: 4,
                }),
            });

        let outcome = fixture
            .page
            .handle_input(PageInput::Scroll { progress: 0.9 });

        assert_eq!(outcome, Some(Outcome::Ignored(IgnoreReason::Snapping)));
        assert_eq!(
            fixture.page.debug_overlay().text(),
            "Changing to Section: 4 (Down)"
        );
    }

    #[test]
    fn test_idle_scroll_frames_are_counted_but_not_kept() {
        // Arrange
        let mut fixture = fixture();

        // Act
        for _ in 0..10_000 {
            fixture
                .page
                .handle_input(PageInput::Scroll { progress: 0.05 });
        }

        // Assert
        assert!(fixture.page.events().is_empty());
        assert_eq!(fixture.page.snapshot().events, 10_000);
    }

    #[test]
    fn test_journal_keeps_only_the_most_recent_events() {
        // Arrange
        let mut fixture = fixture();

        // Act
        for round in 0..200 {
            let progress = if round % 2 == 0 { 0.15 } else { 0.05 };
            fixture.page.handle_input(PageInput::Scroll { progress });
            loop {
                let mut pending = fixture.engine.take_completions();
                pending.extend(fixture.scroll.take_completions());
                if pending.is_empty() {
                    break;
                }
                for completion in pending {
                    fixture.page.handle_completion(completion);
                }
            }
        }

        // Assert
        let journal = fixture.page.events();
        assert_eq!(journal.len(), JOURNAL_CAPACITY);
        assert!(fixture.page.snapshot().events > JOURNAL_CAPACITY);
        let sequence: Vec<_> = journal.iter().map(|e| e.metadata().sequence_number).collect();
        assert!(sequence.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_plain_click_only_opens_the_audio_gate() {
        let mut fixture = fixture();

        let outcome = fixture.page.handle_input(PageInput::Click { item: None });

        assert_eq!(outcome, None);
        assert!(fixture.sounds.is_enabled());
        assert!(fixture.sounds.played().is_empty());
        assert!(fixture.page.events().is_empty());
    }

    #[test]
    fn test_loading_runs_from_counter_to_column_entrance() {
        // Arrange
        let mut fixture = fixture();

        // Act: count to 100.
        while fixture.page.tick_loading() {}
        let scheduled = fixture.page.take_scheduled();

        // Assert
        assert_eq!(
            scheduled,
            [(Duration::from_millis(200), PageTimer::HideLoadingLabel)]
        );

        // Act: fire the exit chain.
        fixture.page.handle_timer(PageTimer::HideLoadingLabel);
        for completion in fixture.engine.take_completions() {
            fixture.page.handle_completion(completion);
        }
        for completion in fixture.engine.take_completions() {
            fixture.page.handle_completion(completion);
        }

        // Assert
        assert_eq!(fixture.page.loading().phase(), LoadingPhase::Revealed);
        assert!(fixture.engine.sets().contains(&(
            LayerTarget::Loading {
                part: LoadingLayer::Overlay
            },
            scrollstory_core::animation::LayerProps::new().visible(false)
        )));
        let entrance = fixture.page.take_scheduled();
        assert_eq!(entrance.len(), 20);
        for (_, timer) in entrance {
            fixture.page.handle_timer(timer);
        }
        assert!(
            fixture
                .page
                .stage()
                .list(ListSide::Right)
                .iter()
                .all(|item| item.loaded)
        );
    }

    #[test]
    fn test_teardown_releases_collaborators_and_silences_the_page() {
        // Arrange
        let mut fixture = fixture();

        // Act
        let report = fixture.page.teardown();
        let outcome = fixture
            .page
            .handle_input(PageInput::Scroll { progress: 0.5 });

        // Assert
        assert!(report.is_clean());
        assert_eq!(
            report.released,
            ["animation engine", "smooth scroll", "sound cues", "page timers"]
        );
        assert!(fixture.engine.was_killed());
        assert!(fixture.scroll.was_destroyed());
        assert!(fixture.sounds.was_released());
        assert_eq!(outcome, None);
        assert!(!fixture.page.tick_loading());
    }
}
