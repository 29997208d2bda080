//! Most Recently Used (MRU) Replacement Policy.
//!
//! This policy evicts the line that was accessed most recently. Lab reference
//! timings were produced by an "oldest line" scan that kept the largest
//! timestamp, which is this rule; it exists to reproduce those numbers.
//!
//! On a cold set every stamp is 0 and way 0 is chosen; from then on way 0
//! holds the newest stamp and keeps being chosen, so the remaining ways of a
//! set are never filled.

use super::ReplacementPolicy;
use crate::cache::CacheLine;

/// MRU victim selection.
#[derive(Clone, Copy, Debug, Default)]
pub struct MruPolicy;

impl ReplacementPolicy for MruPolicy {
    /// Returns the way with the largest stamp; the lowest such way on ties.
    fn get_victim(&self, set: &[CacheLine]) -> usize {
        let mut victim = 0;
        for (way, line) in set.iter().enumerate().skip(1) {
            if line.recency() > set[victim].recency() {
                victim = way;
            }
        }
        victim
    }
}
