//! Section identity and scroll direction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Number of discrete narrative sections in the pinned region.
pub const SECTION_COUNT: usize = 10;

/// Index of one of the [`SECTION_COUNT`] sections. The index is the sole
/// identity of a section; construction validates the range so lookups keyed
/// by it never miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SectionIndex(u8);

impl SectionIndex {
    /// The first section.
    pub const FIRST: Self = Self(0);
    /// The last section.
    #[allow(clippy::cast_possible_truncation)]
    pub const LAST: Self = Self((SECTION_COUNT - 1) as u8);

    /// Returns the index if it names an existing section.
    #[must_use]
    pub fn new(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|i| usize::from(*i) < SECTION_COUNT)
            .map(Self)
    }

    /// Returns the index, clamped to the last section.
    #[must_use]
    pub fn saturating(index: usize) -> Self {
        Self::new(index).unwrap_or(Self::LAST)
    }

    /// Returns the raw index.
    #[must_use]
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// Returns the neighbour one step from `self` towards `target`, or `self`
    /// when they are equal.
    #[must_use]
    pub fn step_toward(self, target: Self) -> Self {
        match self.0.cmp(&target.0) {
            std::cmp::Ordering::Less => Self(self.0 + 1),
            std::cmp::Ordering::Greater => Self(self.0 - 1),
            std::cmp::Ordering::Equal => self,
        }
    }

    /// Iterates over every section in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SECTION_COUNT).filter_map(Self::new)
    }

    /// Fraction of the narrative completed at this section: `index / 9`.
    #[must_use]
    pub fn completion(self) -> f64 {
        f64::from(self.0) / f64::from(Self::LAST.0)
    }

    /// Scroll progress at this section's leading boundary: `index / 10`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn boundary_progress(self) -> f64 {
        f64::from(self.0) / SECTION_COUNT as f64
    }

    /// One-based, zero-padded label shown in the progress counter.
    #[must_use]
    pub fn display_number(self) -> String {
        format!("{:02}", self.0 + 1)
    }
}

impl TryFrom<u8> for SectionIndex {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(usize::from(value)).ok_or(DomainError::SectionOutOfRange(usize::from(value)))
    }
}

impl From<SectionIndex> for u8 {
    fn from(value: SectionIndex) -> Self {
        value.0
    }
}

impl fmt::Display for SectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of the most recent significant scroll movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Towards lower section indices.
    Up,
    /// No movement observed yet.
    #[default]
    Idle,
    /// Towards higher section indices.
    Down,
}

impl ScrollDirection {
    /// Direction of travel from one section to another.
    #[must_use]
    pub fn between(from: SectionIndex, to: SectionIndex) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Self::Down,
            std::cmp::Ordering::Less => Self::Up,
            std::cmp::Ordering::Equal => Self::Idle,
        }
    }

    /// `-1`, `0` or `1`.
    #[must_use]
    pub fn signum(self) -> i8 {
        match self {
            Self::Up => -1,
            Self::Idle => 0,
            Self::Down => 1,
        }
    }

    /// Returns `true` for [`ScrollDirection::Down`].
    #[must_use]
    pub fn is_down(self) -> bool {
        self == Self::Down
    }
}
