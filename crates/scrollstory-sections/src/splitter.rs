//! Word-Mask Splitter.
//!
//! Turns a caption into independently animatable word tokens. Inline
//! Markdown is flattened to plain text first so emphasis markers never show
//! up as words.

use pulldown_cmark::{Event, Parser, TagEnd};
use scrollstory_core::error::DomainError;
use serde::Serialize;

/// Offset, in percent of the word's height, of a word parked below its mask.
pub const HIDDEN_OFFSET_PERCENT: f64 = 100.0;

/// One animatable word of a caption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordToken {
    /// The word itself.
    pub text: String,
    /// Whether the word is currently displayed.
    pub visible: bool,
    /// Vertical offset within its mask, in percent.
    pub translation_percent: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl WordToken {
    /// Creates a token either at rest or parked below its mask.
    #[must_use]
    pub fn new(text: impl Into<String>, shown: bool) -> Self {
        Self {
            text: text.into(),
            visible: shown,
            translation_percent: if shown { 0.0 } else { HIDDEN_OFFSET_PERCENT },
            opacity: if shown { 1.0 } else { 0.0 },
        }
    }
}

/// Flattens inline Markdown to its text content.
fn plain_text(caption: &str) -> String {
    let mut text = String::with_capacity(caption.len());
    for event in Parser::new(caption) {
        match event {
            Event::Text(chunk) | Event::Code(chunk) => text.push_str(&chunk),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                text.push(' ');
            }
            _ => {}
        }
    }
    text
}

/// Splits a caption into word tokens. Tokens start shown when `shown` is
/// set, otherwise parked below their masks.
///
/// # Errors
///
/// Returns `DomainError::Content` if the caption contains no words.
pub fn split_caption(caption: &str, shown: bool) -> Result<Vec<WordToken>, DomainError> {
    let words: Vec<WordToken> = plain_text(caption)
        .split_whitespace()
        .map(|word| WordToken::new(word, shown))
        .collect();

    if words.is_empty() {
        return Err(DomainError::Content(format!(
            "caption {caption:?} has no words to split"
        )));
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_caption_yields_one_token_per_word() {
        // Act
        let words = split_caption("Let Go  Control", false).unwrap();

        // Assert
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["Let", "Go", "Control"]);
        assert!(words.iter().all(|w| !w.visible));
        assert!(words.iter().all(|w| (w.translation_percent - 100.0).abs() < f64::EPSILON));
        assert!(words.iter().all(|w| w.opacity == 0.0));
    }

    #[test]
    fn test_shown_tokens_start_at_rest() {
        let words = split_caption("Creative Elements", true).unwrap();

        assert!(words.iter().all(|w| w.visible && w.opacity == 1.0));
        assert!(words.iter().all(|w| w.translation_percent == 0.0));
    }

    #[test]
    fn test_inline_markdown_is_flattened() {
        let words = split_caption("**Deep** _Knowing_ `now`", true).unwrap();

        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["Deep", "Knowing", "now"]);
    }

    #[test]
    fn test_line_breaks_separate_words() {
        let words = split_caption("Calm\nWaiting", true).unwrap();

        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_blank_caption_is_a_content_error() {
        let result = split_caption("   ", true);

        assert!(matches!(result, Err(DomainError::Content(_))));
    }
}
