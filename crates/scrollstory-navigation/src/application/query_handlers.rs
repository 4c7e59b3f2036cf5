//! Query handlers for the Navigation context.

use scrollstory_core::section::{ScrollDirection, SectionIndex};
use serde::Serialize;

use crate::domain::aggregates::Navigation;

/// Read-only view of the navigation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationView {
    /// Section being shown or entered.
    pub current_section: SectionIndex,
    /// Whether a transition holds the guard.
    pub is_animating: bool,
    /// Whether a forced scroll is in flight.
    pub is_snapping: bool,
    /// Last sampled progress.
    pub last_progress: f64,
    /// Direction of the last significant movement.
    pub scroll_direction: ScrollDirection,
    /// Width of the progress fill in percent.
    pub progress_fill_percent: f64,
    /// Number of events applied.
    pub version: i64,
}

/// Returns the current navigation view.
#[must_use]
pub fn get_navigation_view(navigation: &Navigation) -> NavigationView {
    NavigationView {
        current_section: navigation.current_section(),
        is_animating: navigation.is_animating(),
        is_snapping: navigation.is_snapping(),
        last_progress: navigation.last_progress(),
        scroll_direction: navigation.scroll_direction(),
        progress_fill_percent: navigation.current_section().completion() * 100.0,
        version: navigation.version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_fresh_navigation_view_rests_on_first_section() {
        // Arrange
        let navigation = Navigation::new(Uuid::new_v4());

        // Act
        let view = get_navigation_view(&navigation);

        // Assert
        assert_eq!(view.current_section, SectionIndex::FIRST);
        assert!(!view.is_animating);
        assert!(!view.is_snapping);
        assert_eq!(view.scroll_direction, ScrollDirection::Idle);
        assert!(view.progress_fill_percent.abs() < f64::EPSILON);
        assert_eq!(view.version, 0);
    }
}
