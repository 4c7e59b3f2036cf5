//! Test RNG: deterministic `DeterministicRng` implementations for tests.

use scrollstory_core::rng::DeterministicRng;

/// A no-op RNG that always returns `0.0`. Suitable for tests that do not
/// depend on specific random values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted. Used in tests that need specific, repeatable random
/// outcomes (e.g., loading counter increments).
#[derive(Debug, Default)]
pub struct SequenceRng {
    floats: Vec<f64>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given unit-interval values.
    #[must_use]
    pub fn floats(floats: Vec<f64>) -> Self {
        Self {
            floats,
            ..Self::default()
        }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let val = self.floats[self.index];
        self.index += 1;
        val
    }
}
