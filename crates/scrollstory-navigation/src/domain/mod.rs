//! Domain layer for the Navigation context.

pub mod aggregates;
pub mod commands;
pub mod completions;
pub mod context;
pub mod controller;
pub mod events;
pub mod mapper;
pub mod outcome;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod test_fixtures {
    use scrollstory_core::animation::Completion;
    use scrollstory_core::section::SectionIndex;
    use scrollstory_layers::{LayerContext, Stage};
    use scrollstory_sections::content::PageContent;
    use scrollstory_sections::registry::ScrollGeometry;
    use scrollstory_test_support::{
        FixedClock, RecordingAnimationEngine, RecordingSmoothScroll, RecordingSounds,
    };
    use uuid::Uuid;

    use super::aggregates::Navigation;
    use super::context::NavigationContext;
    use super::outcome::Outcome;

    const GEOMETRY: ScrollGeometry = ScrollGeometry {
        pinned_top: 0.0,
        pinned_height: 10_000.0,
    };

    /// Navigation wired to recording collaborators.
    pub(crate) struct Harness {
        pub navigation: Navigation,
        pub stage: Stage,
        pub engine: RecordingAnimationEngine,
        pub scroll_engine: RecordingSmoothScroll,
        pub sounds: RecordingSounds,
        pub clock: FixedClock,
    }

    impl Harness {
        pub fn new() -> Self {
            Self::from_content(&PageContent::builtin().unwrap())
        }

        pub fn with_blank_caption(section: usize) -> Self {
            let mut content = PageContent::builtin().unwrap();
            content.sections[section].caption = String::new();
            Self::from_content(&content)
        }

        fn from_content(content: &PageContent) -> Self {
            Self {
                navigation: Navigation::new(Uuid::new_v4()),
                stage: Stage::from_content(content, GEOMETRY).unwrap(),
                engine: RecordingAnimationEngine::new(),
                scroll_engine: RecordingSmoothScroll::new(),
                sounds: RecordingSounds::with_default_cues(),
                clock: FixedClock::default(),
            }
        }

        fn with<R>(&mut self, f: impl FnOnce(&mut Navigation, &mut NavigationContext<'_>) -> R) -> R {
            let mut ctx = NavigationContext {
                layers: LayerContext {
                    stage: &mut self.stage,
                    engine: &mut self.engine,
                    sounds: &mut self.sounds,
                },
                scroll: &mut self.scroll_engine,
                clock: &self.clock,
            };
            f(&mut self.navigation, &mut ctx)
        }

        pub fn change_section(&mut self, section: SectionIndex) -> Outcome {
            self.with(|nav, ctx| nav.change_section(section, ctx, Uuid::new_v4()))
        }

        pub fn scroll(&mut self, progress: f64) -> Outcome {
            self.with(|nav, ctx| nav.on_scroll_frame(progress, ctx, Uuid::new_v4()))
        }

        pub fn snap(&mut self, index: usize) -> Outcome {
            self.with(|nav, ctx| {
                nav.snap_to_section(index, super::events::SnapOrigin::Scroll, ctx, Uuid::new_v4())
            })
        }

        pub fn navigate(&mut self, index: usize) -> Outcome {
            self.with(|nav, ctx| nav.navigate_to_section(index, ctx, Uuid::new_v4()))
        }

        pub fn acknowledge(&mut self, completion: Completion) -> Outcome {
            self.with(|nav, ctx| nav.acknowledge(completion, ctx, Uuid::new_v4()))
        }

        /// Fires every pending tween completion, in end-time order.
        pub fn fire_animation_completions(&mut self) -> Vec<Outcome> {
            self.engine
                .take_completions()
                .into_iter()
                .map(|c| self.acknowledge(c))
                .collect()
        }

        /// Fires tween and scroll completions until nothing is pending and
        /// returns the sections entered along the way.
        pub fn settle_everything(&mut self) -> Vec<SectionIndex> {
            let mut entered = Vec::new();
            loop {
                let mut pending = self.engine.take_completions();
                pending.extend(self.scroll_engine.take_completions());
                if pending.is_empty() {
                    return entered;
                }
                for completion in pending {
                    if let Outcome::Started { section, .. } = self.acknowledge(completion) {
                        entered.push(section);
                    }
                }
            }
        }
    }
}
