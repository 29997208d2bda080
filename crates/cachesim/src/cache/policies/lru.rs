//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has not been accessed for the longest time,
//! i.e. the one carrying the smallest access stamp. Lines that were never
//! filled carry stamp 0 and are therefore chosen before any resident line.
//!
//! # Performance
//!
//! - **Time Complexity:** `get_victim()`: O(W) where W is the number of ways
//! - **Space Complexity:** one stamp per line, kept by the level
//! - **Best Case:** Workloads with good temporal locality
//! - **Worst Case:** Cyclic scans one block larger than the set (thrashing)

use super::ReplacementPolicy;
use crate::cache::CacheLine;

/// LRU victim selection.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    /// Returns the way with the smallest stamp; the lowest such way on ties.
    fn get_victim(&self, set: &[CacheLine]) -> usize {
        let mut victim = 0;
        for (way, line) in set.iter().enumerate().skip(1) {
            if line.recency() < set[victim].recency() {
                victim = way;
            }
        }
        victim
    }
}
