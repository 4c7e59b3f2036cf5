//! Section Registry.

use scrollstory_core::error::DomainError;
use scrollstory_core::section::{SECTION_COUNT, SectionIndex};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::content::PageContent;
use crate::splitter::{WordToken, split_caption};

/// Placement of the pinned region inside the scrollable document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollGeometry {
    /// Document offset of the pinned region's top edge.
    pub pinned_top: f64,
    /// Scrollable height of the pinned region.
    pub pinned_height: f64,
}

impl ScrollGeometry {
    /// Scroll offset of a section's leading boundary.
    #[must_use]
    pub fn offset_of(&self, section: SectionIndex) -> f64 {
        self.pinned_top + self.pinned_height * section.boundary_progress()
    }
}

/// A section as it exists at runtime.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    /// Identity.
    pub index: SectionIndex,
    /// Scroll offset the section snaps to.
    pub scroll_offset: f64,
    /// Animatable words of the caption. Empty when splitting failed.
    pub words: Vec<WordToken>,
}

/// All sections, indexed by `SectionIndex`.
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    sections: [Section; SECTION_COUNT],
}

impl SectionRegistry {
    /// Builds the registry from one caption per section.
    ///
    /// A caption that cannot be split is logged and leaves its section
    /// without words; the other sections are unaffected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `captions` does not hold exactly
    /// one entry per section.
    pub fn build(captions: &[&str], geometry: ScrollGeometry) -> Result<Self, DomainError> {
        if captions.len() != SECTION_COUNT {
            return Err(DomainError::Validation(format!(
                "expected {SECTION_COUNT} captions, found {}",
                captions.len()
            )));
        }

        let sections: Vec<Section> = SectionIndex::all()
            .zip(captions)
            .map(|(index, caption)| {
                let words = split_caption(caption, index == SectionIndex::FIRST)
                    .unwrap_or_else(|e| {
                        warn!(section = index.get(), error = %e, "caption split failed");
                        Vec::new()
                    });
                Section {
                    index,
                    scroll_offset: geometry.offset_of(index),
                    words,
                }
            })
            .collect();

        let sections: [Section; SECTION_COUNT] = sections.try_into().map_err(|v: Vec<Section>| {
            DomainError::Validation(format!("expected {SECTION_COUNT} sections, built {}", v.len()))
        })?;

        debug!(
            words = sections.iter().map(|s| s.words.len()).sum::<usize>(),
            "section registry built"
        );
        Ok(Self { sections })
    }

    /// Builds the registry from authored content.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the content has the wrong number
    /// of sections.
    pub fn from_content(content: &PageContent, geometry: ScrollGeometry) -> Result<Self, DomainError> {
        Self::build(&content.captions(), geometry)
    }

    /// Returns a section.
    #[must_use]
    pub fn section(&self, index: SectionIndex) -> &Section {
        &self.sections[index.get()]
    }

    /// Scroll offset a section snaps to.
    #[must_use]
    pub fn offset(&self, index: SectionIndex) -> f64 {
        self.section(index).scroll_offset
    }

    /// Word tokens of a section's caption.
    #[must_use]
    pub fn words(&self, index: SectionIndex) -> &[WordToken] {
        &self.section(index).words
    }

    /// Mutable access to one word token.
    pub fn word_mut(&mut self, index: SectionIndex, word: usize) -> Option<&mut WordToken> {
        self.sections[index.get()].words.get_mut(word)
    }

    /// Iterates over every section in order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}
