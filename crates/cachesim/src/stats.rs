//! Simulation statistics collection and reporting.
//!
//! This module tracks performance counters for the hierarchy. It provides:
//! 1. **Per-level counters:** Reads, writes, hits, misses, evictions and write-backs.
//! 2. **Memory counters:** DRAM block reads and writes.
//! 3. **Reporting:** A `Display` rendering of the whole hierarchy with miss rates.
//!
//! Counters are independent of the clock: `reset_time()` leaves them alone,
//! `initialize()` clears them.

use std::fmt;

/// Counters for one cache level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Read accesses served (including block fetches from the level above).
    pub reads: u64,
    /// Write accesses served (including write-backs from the level above).
    pub writes: u64,
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that had to fetch their block from below.
    pub misses: u64,
    /// Valid lines replaced to make room for another block.
    pub evictions: u64,
    /// Dirty blocks written to the level below (on eviction or flush).
    pub writebacks: u64,
}

impl CacheStats {
    /// Total accesses (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or `0.0` before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of accesses that missed, or `0.0` before any access.
    pub fn miss_rate(&self) -> f64 {
        if self.accesses() == 0 {
            0.0
        } else {
            1.0 - self.hit_rate()
        }
    }
}

/// Counters for main memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryStats {
    /// Blocks read from DRAM.
    pub reads: u64,
    /// Blocks written to DRAM.
    pub writes: u64,
}

/// Snapshot of every counter in a hierarchy, L1 first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HierarchyStats {
    /// One entry per enabled cache level, L1 first.
    pub levels: Vec<CacheStats>,
    /// Main memory counters.
    pub memory: MemoryStats,
    /// Simulated cycles elapsed since the last clock reset.
    pub cycles: u64,
}

impl HierarchyStats {
    /// Counters for L1.
    pub fn l1(&self) -> Option<&CacheStats> {
        self.levels.first()
    }

    /// Counters for L2, if the hierarchy has one.
    pub fn l2(&self) -> Option<&CacheStats> {
        self.levels.get(1)
    }
}

impl fmt::Display for HierarchyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "CACHE HIERARCHY STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        for (i, level) in self.levels.iter().enumerate() {
            writeln!(
                f,
                "  L{:<5} accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}% | evictions: {:<8} | writebacks: {}",
                i + 1,
                level.accesses(),
                level.hits,
                level.miss_rate() * 100.0,
                level.evictions,
                level.writebacks
            )?;
        }
        writeln!(
            f,
            "  DRAM   reads: {:<10} | writes: {}",
            self.memory.reads, self.memory.writes
        )?;
        write!(f, "==========================================================")
    }
}
