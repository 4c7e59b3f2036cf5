//! Authored page content.

use scrollstory_core::error::DomainError;
use scrollstory_core::section::SECTION_COUNT;
use scrollstory_core::sound::Cue;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const BUILTIN_PAGE: &str = include_str!("../content/page.yaml");

/// Content of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionContent {
    /// Label in the left list.
    pub left: String,
    /// Caption shown in the centre; may contain inline Markdown.
    pub caption: String,
    /// Label in the right list.
    pub right: String,
    /// Background image URL.
    pub background: String,
}

/// The whole page as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page title.
    pub title: String,
    /// Header rows.
    #[serde(default)]
    pub header: Vec<String>,
    /// Footer rows.
    #[serde(default)]
    pub footer: Vec<String>,
    /// Text shown in the trailing end region.
    #[serde(default)]
    pub end_label: String,
    /// Exactly one entry per section, in order.
    pub sections: Vec<SectionContent>,
    /// Sound cues registered at startup.
    #[serde(default)]
    pub sounds: Vec<Cue>,
}

impl PageContent {
    /// Parses and validates YAML content.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` if the YAML is malformed, or
    /// `DomainError::Validation` if it fails [`PageContent::validate`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DomainError> {
        let content: Self = serde_yaml::from_str(yaml)
            .map_err(|e| DomainError::Content(format!("page content is not valid YAML: {e}")))?;
        content.validate()?;
        Ok(content)
    }

    /// The page shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the bundled YAML is invalid.
    pub fn builtin() -> Result<Self, DomainError> {
        Self::from_yaml_str(BUILTIN_PAGE)
    }

    /// Checks the structural rules the rest of the page relies on.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` describing the first violation.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.sections.len() != SECTION_COUNT {
            return Err(DomainError::Validation(format!(
                "expected {SECTION_COUNT} sections, found {}",
                self.sections.len()
            )));
        }

        for (index, section) in self.sections.iter().enumerate() {
            let fields = [
                ("left", &section.left),
                ("right", &section.right),
                ("background", &section.background),
            ];
            if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
                return Err(DomainError::Validation(format!(
                    "section {index} has an empty {name}"
                )));
            }
        }

        for cue in &self.sounds {
            if cue.name.trim().is_empty() {
                return Err(DomainError::Validation("sound cue without a name".into()));
            }
            if !(0.0..=1.0).contains(&cue.volume) {
                return Err(DomainError::Validation(format!(
                    "sound cue {} has volume {} outside [0, 1]",
                    cue.name, cue.volume
                )));
            }
        }

        Ok(())
    }

    /// Captions in section order.
    #[must_use]
    pub fn captions(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.caption.as_str()).collect()
    }

    /// SHA-256 hex digest of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` if the content cannot be serialized.
    pub fn fingerprint(&self) -> Result<String, DomainError> {
        let canonical = serde_json::to_vec(self)
            .map_err(|e| DomainError::Content(format!("cannot serialize content: {e}")))?;
        let digest = Sha256::digest(&canonical);
        Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_content_has_ten_sections_and_default_cues() {
        // Act
        let content = PageContent::builtin().unwrap();

        // Assert
        assert_eq!(content.sections.len(), SECTION_COUNT);
        assert_eq!(content.sections[0].left, "Silence");
        assert_eq!(content.sections[9].caption, "Pure Essence");
        assert_eq!(content.sections[9].right, "Minimalism");

        let names: Vec<&str> = content.sounds.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["hover", "click", "textChange"]);
        assert!((content.sounds[0].volume - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wrong_section_count_is_rejected() {
        // Arrange
        let mut content = PageContent::builtin().unwrap();
        content.sections.pop();

        // Act
        let result = content.validate();

        // Assert
        match result {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("found 9")),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_list_label_is_rejected() {
        let mut content = PageContent::builtin().unwrap();
        content.sections[4].right = "  ".into();

        let result = content.validate();

        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg.contains("section 4")));
    }

    #[test]
    fn test_loud_cue_is_rejected() {
        let mut content = PageContent::builtin().unwrap();
        content.sounds[1].volume = 1.5;

        assert!(content.validate().is_err());
    }

    #[test]
    fn test_malformed_yaml_is_a_content_error() {
        let result = PageContent::from_yaml_str("sections: [unterminated");

        assert!(matches!(result, Err(DomainError::Content(_))));
    }

    #[test]
    fn test_fingerprint_is_stable_and_content_sensitive() {
        // Arrange
        let content = PageContent::builtin().unwrap();
        let mut edited = content.clone();
        edited.sections[2].caption = "Deeper Knowing".into();

        // Act
        let first = content.fingerprint().unwrap();
        let second = content.fingerprint().unwrap();
        let changed = edited.fingerprint().unwrap();

        // Assert
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert_ne!(first, changed);
    }
}
