//! Layer Visual State for every section-bound layer.
//!
//! The stage stores the resting value of each property as soon as a set or
//! tween is dispatched. It is the page's model of what is on screen once all
//! running tweens have ended.

use scrollstory_core::animation::{ClipInset, LayerProps, LayerTarget, ListSide};
use scrollstory_core::error::DomainError;
use scrollstory_core::section::SectionIndex;
use scrollstory_sections::content::{PageContent, SectionContent};
use scrollstory_sections::registry::{ScrollGeometry, SectionRegistry};
use scrollstory_sections::splitter::WordToken;
use serde::Serialize;

/// Opacity of list items that are not active.
pub const DIMMED_OPACITY: f64 = 0.3;

/// Stacking role of a background image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundRole {
    /// The current section's background.
    Active,
    /// The background being faded out.
    Previous,
    /// Any other background.
    Idle,
}

/// Visual state of a background image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundLayer {
    /// Image URL.
    pub url: String,
    /// Opacity.
    pub opacity: f64,
    /// Parallax offset in percent of the viewport.
    pub y_percent: f64,
    /// Reveal clip.
    pub clip: ClipInset,
    /// Stacking role.
    pub role: BackgroundRole,
}

/// Visual state of a caption container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaptionLayer {
    /// Whether the caption is displayed.
    pub visible: bool,
    /// Opacity.
    pub opacity: f64,
}

/// Visual state of a side-list item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    /// Label.
    pub label: String,
    /// Whether the item is highlighted as the current section.
    pub active: bool,
    /// Opacity.
    pub opacity: f64,
    /// Whether the column entrance has revealed this item.
    pub loaded: bool,
}

/// The section counter and fill bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressDisplay {
    /// Fill width in percent, `100 * current / 9`.
    pub fill_percent: f64,
    /// One-based, zero-padded section number.
    pub label: String,
}

impl ProgressDisplay {
    fn at(section: SectionIndex) -> Self {
        Self {
            fill_percent: section.completion() * 100.0,
            label: section.display_number(),
        }
    }
}

/// Serializable view of the stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageSnapshot {
    /// Background layers in section order.
    pub backgrounds: Vec<BackgroundLayer>,
    /// Caption layers in section order.
    pub captions: Vec<CaptionLayer>,
    /// Word tokens in section order.
    pub words: Vec<Vec<WordToken>>,
    /// Left list.
    pub left: Vec<ListItem>,
    /// Right list.
    pub right: Vec<ListItem>,
    /// Progress display.
    pub progress: ProgressDisplay,
}

/// All section-bound layers, indexed by section.
#[derive(Debug, Clone)]
pub struct Stage {
    registry: SectionRegistry,
    backgrounds: Vec<BackgroundLayer>,
    captions: Vec<CaptionLayer>,
    left: Vec<ListItem>,
    right: Vec<ListItem>,
    progress: ProgressDisplay,
}

impl Stage {
    /// Builds the stage in its initial state: section 0 shown and active,
    /// everything else hidden or dimmed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the content is invalid.
    pub fn from_content(content: &PageContent, geometry: ScrollGeometry) -> Result<Self, DomainError> {
        content.validate()?;
        let registry = SectionRegistry::from_content(content, geometry)?;

        let first = |index: SectionIndex| index == SectionIndex::FIRST;
        let backgrounds = SectionIndex::all()
            .map(|index| BackgroundLayer {
                url: content.sections[index.get()].background.clone(),
                opacity: if first(index) { 1.0 } else { 0.0 },
                y_percent: 0.0,
                clip: ClipInset::OPEN,
                role: if first(index) {
                    BackgroundRole::Active
                } else {
                    BackgroundRole::Idle
                },
            })
            .collect();
        let captions = SectionIndex::all()
            .map(|index| CaptionLayer {
                visible: first(index),
                opacity: if first(index) { 1.0 } else { 0.0 },
            })
            .collect();
        Ok(Self {
            registry,
            backgrounds,
            captions,
            left: list_items(content, |s| s.left.as_str()),
            right: list_items(content, |s| s.right.as_str()),
            progress: ProgressDisplay::at(SectionIndex::FIRST),
        })
    }

    /// Records the resting value of `props` on `target`. Targets outside the
    /// per-section layers are not tracked here and are ignored.
    pub fn apply(&mut self, target: LayerTarget, props: &LayerProps) {
        match target {
            LayerTarget::Background { section } => {
                let layer = &mut self.backgrounds[section.get()];
                if let Some(opacity) = props.opacity {
                    layer.opacity = opacity;
                }
                if let Some(y) = props.y_percent {
                    layer.y_percent = y;
                }
                if let Some(clip) = props.clip {
                    layer.clip = clip;
                }
            }
            LayerTarget::Caption { section } => {
                let layer = &mut self.captions[section.get()];
                if let Some(visible) = props.visible {
                    layer.visible = visible;
                }
                if let Some(opacity) = props.opacity {
                    layer.opacity = opacity;
                }
            }
            LayerTarget::Word { section, word } => {
                if let Some(token) = self.registry.word_mut(section, word) {
                    if let Some(y) = props.y_percent {
                        token.translation_percent = y;
                    }
                    if let Some(opacity) = props.opacity {
                        token.opacity = opacity;
                        token.visible = opacity > 0.0;
                    }
                    if let Some(visible) = props.visible {
                        token.visible = visible;
                    }
                }
            }
            LayerTarget::ListItem { side, section } => {
                if let Some(opacity) = props.opacity {
                    self.list_mut(side)[section.get()].opacity = opacity;
                }
            }
            LayerTarget::Chrome { .. } | LayerTarget::Loading { .. } => {}
        }
    }

    /// Updates the progress display for the current section.
    pub fn set_progress(&mut self, current: SectionIndex) {
        self.progress = ProgressDisplay::at(current);
    }

    /// Sets a background's stacking role.
    pub fn set_background_role(&mut self, section: SectionIndex, role: BackgroundRole) {
        self.backgrounds[section.get()].role = role;
    }

    /// Marks a list item active or inactive.
    pub fn set_list_active(&mut self, side: ListSide, section: SectionIndex, active: bool) {
        self.list_mut(side)[section.get()].active = active;
    }

    /// Marks a list item as revealed by the column entrance.
    pub fn mark_loaded(&mut self, side: ListSide, section: SectionIndex) {
        self.list_mut(side)[section.get()].loaded = true;
    }

    /// The section registry.
    #[must_use]
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Word tokens of a section.
    #[must_use]
    pub fn words(&self, section: SectionIndex) -> &[WordToken] {
        self.registry.words(section)
    }

    /// A background layer.
    #[must_use]
    pub fn background(&self, section: SectionIndex) -> &BackgroundLayer {
        &self.backgrounds[section.get()]
    }

    /// A caption layer.
    #[must_use]
    pub fn caption(&self, section: SectionIndex) -> CaptionLayer {
        self.captions[section.get()]
    }

    /// A side list.
    #[must_use]
    pub fn list(&self, side: ListSide) -> &[ListItem] {
        match side {
            ListSide::Left => &self.left,
            ListSide::Right => &self.right,
        }
    }

    /// Sections whose item is marked active in a side list.
    #[must_use]
    pub fn active_items(&self, side: ListSide) -> Vec<SectionIndex> {
        SectionIndex::all()
            .filter(|index| self.list(side)[index.get()].active)
            .collect()
    }

    /// Sections whose caption is displayed.
    #[must_use]
    pub fn visible_captions(&self) -> Vec<SectionIndex> {
        SectionIndex::all()
            .filter(|index| self.captions[index.get()].visible)
            .collect()
    }

    /// The progress display.
    #[must_use]
    pub fn progress(&self) -> &ProgressDisplay {
        &self.progress
    }

    /// Serializable copy of the whole stage.
    #[must_use]
    pub fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            backgrounds: self.backgrounds.clone(),
            captions: self.captions.clone(),
            words: self.registry.iter().map(|s| s.words.clone()).collect(),
            left: self.left.clone(),
            right: self.right.clone(),
            progress: self.progress.clone(),
        }
    }

    fn list_mut(&mut self, side: ListSide) -> &mut [ListItem] {
        match side {
            ListSide::Left => &mut self.left,
            ListSide::Right => &mut self.right,
        }
    }
}

fn list_items(content: &PageContent, label: impl Fn(&SectionContent) -> &str) -> Vec<ListItem> {
    content
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| ListItem {
            label: label(section).to_owned(),
            active: i == 0,
            opacity: if i == 0 { 1.0 } else { DIMMED_OPACITY },
            loaded: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> Stage {
        let content = PageContent::builtin().unwrap();
        Stage::from_content(
            &content,
            ScrollGeometry {
                pinned_top: 0.0,
                pinned_height: 10_000.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_initial_stage_shows_only_the_first_section() {
        // Act
        let stage = stage();

        // Assert
        assert_eq!(stage.visible_captions(), [SectionIndex::FIRST]);
        assert_eq!(stage.active_items(ListSide::Left), [SectionIndex::FIRST]);
        assert_eq!(stage.active_items(ListSide::Right), [SectionIndex::FIRST]);
        assert_eq!(stage.background(SectionIndex::FIRST).role, BackgroundRole::Active);
        assert!(stage.background(SectionIndex::LAST).opacity.abs() < f64::EPSILON);
        assert_eq!(stage.progress().label, "01");
        assert!(stage.progress().fill_percent.abs() < f64::EPSILON);
        assert_eq!(stage.list(ListSide::Right)[3].label, "Resonance");
    }

    #[test]
    fn test_word_opacity_drives_word_visibility() {
        // Arrange
        let mut stage = stage();
        let target = LayerTarget::Word {
            section: SectionIndex::FIRST,
            word: 1,
        };

        // Act
        stage.apply(target, &LayerProps::new().opacity(0.0).y_percent(-100.0));

        // Assert
        let word = &stage.words(SectionIndex::FIRST)[1];
        assert!(!word.visible);
        assert!((word.translation_percent + 100.0).abs() < f64::EPSILON);
        assert!(stage.words(SectionIndex::FIRST)[0].visible);
    }

    #[test]
    fn test_out_of_range_word_is_ignored() {
        let mut stage = stage();
        let before = stage.snapshot().words;

        stage.apply(
            LayerTarget::Word {
                section: SectionIndex::FIRST,
                word: 40,
            },
            &LayerProps::new().opacity(0.0),
        );

        assert_eq!(stage.snapshot().words, before);
    }

    #[test]
    fn test_progress_fill_follows_current_section() {
        let mut stage = stage();

        stage.set_progress(SectionIndex::LAST);

        assert!((stage.progress().fill_percent - 100.0).abs() < 1e-9);
        assert_eq!(stage.progress().label, "10");
    }
}
