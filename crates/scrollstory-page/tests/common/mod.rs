//! Shared test helpers for page integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use scrollstory_core::animation::ListSide;
use scrollstory_core::section::SectionIndex;
use scrollstory_navigation::domain::events::NavigationEventKind;
use scrollstory_navigation::domain::outcome::Outcome;
use scrollstory_page::input::{ItemRef, PageInput};
use scrollstory_page::page::{Collaborators, Page};
use scrollstory_sections::content::PageContent;
use scrollstory_sections::registry::ScrollGeometry;
use scrollstory_test_support::{
    FixedClock, MockRng, RecordingAnimationEngine, RecordingSmoothScroll, RecordingSounds,
};

/// Pinned region used across all integration tests.
pub const GEOMETRY: ScrollGeometry = ScrollGeometry {
    pinned_top: 0.0,
    pinned_height: 10_000.0,
};

/// A page over the built-in content, wired to recording collaborators whose
/// completions the test fires explicitly.
pub struct TestPage {
    pub page: Page,
    pub engine: RecordingAnimationEngine,
    pub scroll: RecordingSmoothScroll,
    pub sounds: RecordingSounds,
}

impl TestPage {
    pub fn new() -> Self {
        Self::with_collaborators(
            RecordingAnimationEngine::new(),
            RecordingSmoothScroll::new(),
            RecordingSounds::default(),
        )
    }

    pub fn with_collaborators(
        engine: RecordingAnimationEngine,
        scroll: RecordingSmoothScroll,
        sounds: RecordingSounds,
    ) -> Self {
        let page = Page::new(
            &PageContent::builtin().unwrap(),
            GEOMETRY,
            Collaborators {
                engine: Box::new(engine.clone()),
                scroll: Box::new(scroll.clone()),
                sounds: Box::new(sounds.clone()),
                clock: Arc::new(FixedClock::default()),
                rng: Box::new(MockRng),
            },
        )
        .unwrap();
        Self {
            page,
            engine,
            scroll,
            sounds,
        }
    }

    pub fn scroll(&mut self, progress: f64) -> Outcome {
        self.page
            .handle_input(PageInput::Scroll { progress })
            .unwrap()
    }

    pub fn click(&mut self, side: ListSide, index: usize) -> Outcome {
        self.page
            .handle_input(PageInput::Click {
                item: Some(ItemRef { side, index }),
            })
            .unwrap()
    }

    pub fn hover(&mut self, side: ListSide, index: usize) {
        self.page.handle_input(PageInput::Hover {
            item: ItemRef { side, index },
        });
    }

    /// Fires only the pending forced-scroll completions.
    pub fn finish_snaps(&mut self) {
        for completion in self.scroll.take_completions() {
            self.page.handle_completion(completion);
        }
    }

    /// Fires tween and scroll completions until nothing is pending and
    /// returns the sections entered along the way.
    pub fn settle(&mut self) -> Vec<SectionIndex> {
        let mut entered = Vec::new();
        loop {
            let mut pending = self.engine.take_completions();
            pending.extend(self.scroll.take_completions());
            if pending.is_empty() {
                return entered;
            }
            for completion in pending {
                if let Some(Outcome::Started { section, .. }) =
                    self.page.handle_completion(completion)
                {
                    entered.push(section);
                }
            }
        }
    }

    pub fn current(&self) -> usize {
        self.page.navigation().current_section.get()
    }

    /// `(from, to)` of every transition journaled so far.
    pub fn transitions(&self) -> Vec<(usize, usize)> {
        self.page
            .events()
            .iter()
            .filter_map(|event| match &event.kind {
                NavigationEventKind::TransitionStarted(started) => {
                    Some((started.from.get(), started.to.get()))
                }
                _ => None,
            })
            .collect()
    }

    /// The stage, serialized for whole-state comparisons.
    pub fn stage_json(&self) -> serde_json::Value {
        serde_json::to_value(self.page.stage().snapshot()).unwrap()
    }
}
