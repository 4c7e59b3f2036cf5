//! Debug overlay with live navigation state.

use scrollstory_core::section::{ScrollDirection, SectionIndex};
use serde::Serialize;

/// Text panel toggled with `h`. Diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugOverlay {
    visible: bool,
    text: String,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugOverlay {
    /// A visible overlay showing the initial section.
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: true,
            text: "Current Section: 0 (Initial)".to_owned(),
        }
    }

    /// Whether the overlay is displayed.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Toggles visibility on `h` or `H`. Returns whether the key was used.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key.eq_ignore_ascii_case("h") {
            self.visible = !self.visible;
            true
        } else {
            false
        }
    }

    /// A transition towards `section` began.
    pub fn show_change(&mut self, section: SectionIndex, direction: ScrollDirection) {
        let direction = if direction.is_down() { "Down" } else { "Up" };
        self.text = format!("Changing to Section: {section} ({direction})");
    }

    /// A pinned-region scroll frame was processed.
    pub fn show_frame(
        &mut self,
        current: SectionIndex,
        target: SectionIndex,
        progress: f64,
        direction: ScrollDirection,
    ) {
        self.text = format!(
            "Section: {current}, Target: {target}, Progress: {progress:.3}, Direction: {}",
            direction.signum()
        );
    }

    /// An end-region scroll frame was processed.
    pub fn show_end(&mut self, height_vh: f64, progress: f64) {
        self.text = format!("End Section - Height: {height_vh}vh, Progress: {progress:.2}");
    }
}
