//! Cache Hierarchy.
//!
//! This module composes the cache levels over main memory and exposes the
//! word-granularity interface external callers use. It provides:
//! 1. **Routing:** Each request is one access to L1; misses recurse downward
//!    through the remaining levels until main memory.
//! 2. **Ownership:** The hierarchy owns its levels, memory and clock. There is
//!    no process-wide state; independent hierarchies can coexist.
//! 3. **Clock Control:** `reset_time` / `elapsed_time` bracket a measured run.
//! 4. **Maintenance:** Re-initialization, flushing and statistics snapshots.
//!
//! Every operation takes `&mut self` and runs to completion, so one hierarchy
//! serves one requester at a time. Concurrent callers must share it behind a
//! single lock held for a whole request: an L1 miss touches lines in every
//! level and the clock before it returns.

use crate::cache::CacheLevel;
use crate::common::SimError;
use crate::config::Config;
use crate::memory::{MainMemory, NextLevel};
use crate::stats::HierarchyStats;
use crate::timing::Clock;

/// Everything below some level: the remaining levels, then main memory.
struct Downstream<'a> {
    levels: &'a mut [CacheLevel],
    memory: &'a mut MainMemory,
}

impl NextLevel for Downstream<'_> {
    fn read_block(
        &mut self,
        addr: u64,
        block: &mut [u8],
        clock: &mut Clock,
    ) -> Result<(), SimError> {
        match self.levels.split_first_mut() {
            Some((level, levels)) => {
                let mut below = Downstream {
                    levels,
                    memory: &mut *self.memory,
                };
                level.read(addr, block, &mut below, clock).map(|_| ())
            }
            None => self.memory.read_block(addr, block, clock),
        }
    }

    fn write_block(&mut self, addr: u64, block: &[u8], clock: &mut Clock) -> Result<(), SimError> {
        match self.levels.split_first_mut() {
            Some((level, levels)) => {
                let mut below = Downstream {
                    levels,
                    memory: &mut *self.memory,
                };
                level.write(addr, block, &mut below, clock).map(|_| ())
            }
            None => self.memory.write_block(addr, block, clock),
        }
    }
}

/// L1 over an optional L2 over main memory, with a shared clock.
#[derive(Debug)]
pub struct CacheHierarchy {
    config: Config,
    levels: Vec<CacheLevel>,
    memory: MainMemory,
    clock: Clock,
}

impl CacheHierarchy {
    /// Builds a hierarchy with every line invalid, memory zeroed and the clock at zero.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if `config` fails [`Config::validate`].
    pub fn new(config: Config) -> Result<Self, SimError> {
        config.validate()?;

        let mut levels = vec![CacheLevel::new("L1", &config.cache.l1, config.block_bytes)];
        if config.cache.l2.enabled {
            levels.push(CacheLevel::new("L2", &config.cache.l2, config.block_bytes));
        }
        tracing::debug!(
            block_bytes = config.block_bytes,
            word_bytes = config.word_bytes,
            memory_bytes = config.memory.size_bytes,
            levels = ?levels,
            "cache hierarchy built"
        );

        Ok(Self {
            memory: MainMemory::new(&config.memory),
            levels,
            clock: Clock::new(),
            config,
        })
    }

    /// Returns every line to its zeroed, invalid state, zeroes memory and
    /// counters, and resets the clock.
    pub fn initialize(&mut self) {
        for level in &mut self.levels {
            level.clear();
        }
        self.memory.clear();
        self.clock.reset();
        tracing::debug!("cache hierarchy initialized");
    }

    /// Reads one word at `addr` into `out`.
    ///
    /// # Errors
    ///
    /// [`SimError::Misaligned`] if `out` is not one word long or the word
    /// crosses a block boundary; [`SimError::OutOfBounds`] if the containing
    /// block lies outside main memory.
    pub fn read(&mut self, addr: u64, out: &mut [u8]) -> Result<(), SimError> {
        self.check_word(addr, out.len())?;
        let mut path = Downstream {
            levels: &mut self.levels,
            memory: &mut self.memory,
        };
        path.read_block(addr, out, &mut self.clock)
    }

    /// Writes one word at `addr`. The data stays in L1 until evicted or flushed.
    ///
    /// # Errors
    ///
    /// Same as [`CacheHierarchy::read`].
    pub fn write(&mut self, addr: u64, word: &[u8]) -> Result<(), SimError> {
        self.check_word(addr, word.len())?;
        let mut path = Downstream {
            levels: &mut self.levels,
            memory: &mut self.memory,
        };
        path.write_block(addr, word, &mut self.clock)
    }

    /// Writes every dirty line down to main memory, top level first.
    ///
    /// Lines stay valid and become clean; the write-backs are charged to the clock.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if a write-back leaves main memory.
    pub fn flush(&mut self) -> Result<(), SimError> {
        for i in 0..self.levels.len() {
            let (upper, lower) = self.levels.split_at_mut(i + 1);
            let mut below = Downstream {
                levels: lower,
                memory: &mut self.memory,
            };
            upper[i].flush(&mut below, &mut self.clock)?;
        }
        Ok(())
    }

    /// Sets the clock back to zero; cache and memory contents are untouched.
    pub const fn reset_time(&mut self) {
        self.clock.reset();
    }

    /// Returns the simulated cycles elapsed since construction or the last reset.
    pub const fn elapsed_time(&self) -> u64 {
        self.clock.elapsed()
    }

    /// Returns a snapshot of every counter.
    pub fn stats(&self) -> HierarchyStats {
        HierarchyStats {
            levels: self.levels.iter().map(CacheLevel::stats).collect(),
            memory: self.memory.stats(),
            cycles: self.clock.elapsed(),
        }
    }

    /// Returns the configuration the hierarchy was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns main memory for inspection.
    pub const fn memory(&self) -> &MainMemory {
        &self.memory
    }

    /// Returns the cache levels, L1 first.
    pub fn levels(&self) -> &[CacheLevel] {
        &self.levels
    }

    /// Returns level `n` (0 = L1), if present.
    pub fn level(&self, n: usize) -> Option<&CacheLevel> {
        self.levels.get(n)
    }

    fn check_word(&self, addr: u64, len: usize) -> Result<(), SimError> {
        if len == self.config.word_bytes {
            Ok(())
        } else {
            Err(SimError::Misaligned { addr, len })
        }
    }
}
