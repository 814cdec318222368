//! Sources of cycle durations.
//!
//! The cycle thread asks a [`CycleSource`] how long each phase should last. Production code uses
//! [`RandomCycle`]; tests pin the timing with [`FixedCycle`] or a closure.

use std::ops::Range;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces the length of the next signal phase.
pub trait CycleSource: Send + 'static {
    /// Returns the duration of the next cycle.
    fn next_cycle(&mut self) -> Duration;
}

impl<F> CycleSource for F
where
    F: FnMut() -> Duration + Send + 'static,
{
    fn next_cycle(&mut self) -> Duration {
        self()
    }
}

/// Cycle lengths drawn uniformly from a millisecond range.
///
/// The range is half-open: `RandomCycle::new(4000..6000)` yields values in `[4000, 6000)` ms.
#[derive(Debug, Clone)]
pub struct RandomCycle {
    range: Range<u64>,
    rng: StdRng,
}

impl RandomCycle {
    /// Creates a source seeded from the OS.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty.
    pub fn new(range: Range<u64>) -> Self {
        Self::with_rng(range, StdRng::from_entropy())
    }

    /// Creates a deterministic source.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty.
    pub fn seeded(range: Range<u64>, seed: u64) -> Self {
        Self::with_rng(range, StdRng::seed_from_u64(seed))
    }

    fn with_rng(range: Range<u64>, rng: StdRng) -> Self {
        assert!(!range.is_empty(), "cycle range must not be empty");
        RandomCycle { range, rng }
    }
}

impl CycleSource for RandomCycle {
    fn next_cycle(&mut self) -> Duration {
        Duration::from_millis(self.rng.gen_range(self.range.clone()))
    }
}

/// The same cycle length every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCycle(pub Duration);

impl CycleSource for FixedCycle {
    fn next_cycle(&mut self) -> Duration {
        self.0
    }
}
