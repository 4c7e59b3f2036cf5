//! Progress-to-Section Mapper.

use scrollstory_core::section::{SECTION_COUNT, ScrollDirection, SectionIndex};

/// Minimum progress change that updates the scroll direction.
pub const DIRECTION_THRESHOLD: f64 = 0.001;

/// Clamps progress to `[0, 1]`; NaN becomes `0`.
#[must_use]
pub fn sanitize(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// `min(9, floor(progress * 10))`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn target_section(progress: f64) -> SectionIndex {
    let scaled = (sanitize(progress) * SECTION_COUNT as f64).floor() as usize;
    SectionIndex::saturating(scaled)
}

/// Direction after moving from `last` to `progress`. Changes below the
/// threshold keep the previous direction.
#[must_use]
pub fn direction(last: f64, progress: f64, previous: ScrollDirection) -> ScrollDirection {
    let delta = progress - last;
    if delta.abs() <= DIRECTION_THRESHOLD {
        previous
    } else if delta > 0.0 {
        ScrollDirection::Down
    } else {
        ScrollDirection::Up
    }
}

/// The single step to take from `current` towards `target`, if any.
#[must_use]
pub fn next_step(current: SectionIndex, target: SectionIndex) -> Option<SectionIndex> {
    (current != target).then(|| current.step_toward(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_section_floors_tenths() {
        assert_eq!(target_section(0.0).get(), 0);
        assert_eq!(target_section(0.099).get(), 0);
        assert_eq!(target_section(0.1).get(), 1);
        assert_eq!(target_section(0.31).get(), 3);
        assert_eq!(target_section(0.95).get(), 9);
    }

    #[test]
    fn test_full_progress_maps_to_last_section() {
        assert_eq!(target_section(1.0), SectionIndex::LAST);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(target_section(-0.4), SectionIndex::FIRST);
        assert_eq!(target_section(3.0), SectionIndex::LAST);
        assert_eq!(target_section(f64::NAN), SectionIndex::FIRST);
    }

    #[test]
    fn test_direction_is_sticky_below_threshold() {
        let down = direction(0.2, 0.25, ScrollDirection::Idle);
        let noise = direction(0.25, 0.2505, down);
        let up = direction(0.25, 0.1, noise);

        assert_eq!(down, ScrollDirection::Down);
        assert_eq!(noise, ScrollDirection::Down);
        assert_eq!(up, ScrollDirection::Up);
        assert_eq!(direction(0.5, 0.5, ScrollDirection::Idle), ScrollDirection::Idle);
    }

    #[test]
    fn test_next_step_never_skips_sections() {
        let first = SectionIndex::FIRST;

        assert_eq!(next_step(first, SectionIndex::LAST), SectionIndex::new(1));
        assert_eq!(next_step(SectionIndex::LAST, first), SectionIndex::new(8));
        assert_eq!(next_step(first, first), None);
    }
}
