//! Simulated time.
//!
//! The clock is a single counter advanced by fixed per-operation costs as
//! accesses flow through the hierarchy. It never decreases except through an
//! explicit [`Clock::reset`], which is independent of cache and memory
//! contents.

/// Elapsed simulated time in cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    elapsed: u64,
}

impl Clock {
    /// Creates a clock at zero.
    pub const fn new() -> Self {
        Self { elapsed: 0 }
    }

    /// Adds `cycles` to the counter, saturating at `u64::MAX`.
    #[inline(always)]
    pub const fn advance(&mut self, cycles: u64) {
        self.elapsed = self.elapsed.saturating_add(cycles);
    }

    /// Returns the cycles elapsed since creation or the last reset.
    #[inline(always)]
    pub const fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Sets the counter back to zero.
    pub const fn reset(&mut self) {
        self.elapsed = 0;
    }
}
