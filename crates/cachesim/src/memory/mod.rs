//! Main Memory (DRAM).
//!
//! This module implements the bottom of the hierarchy. It provides:
//! 1. **Buffer:** Bounds-checked backing storage for memory contents.
//! 2. **Main Memory:** Block transfers charged at fixed DRAM latencies.
//! 3. **Next Level:** The interface a cache level uses to reach whatever sits below it.

/// Bounds-checked byte storage.
pub mod buffer;

use self::buffer::DramBuffer;
use crate::common::SimError;
use crate::config::MemoryConfig;
use crate::stats::MemoryStats;
use crate::timing::Clock;

/// Whatever sits below a cache level: another level or main memory.
///
/// A level calls [`NextLevel::read_block`] to fill a line on a miss and
/// [`NextLevel::write_block`] to write a dirty victim back. Both move whole
/// blocks and charge their own costs to `clock`.
pub trait NextLevel {
    /// Copies the block starting at `addr` into `block`.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if the range lies outside main memory.
    fn read_block(&mut self, addr: u64, block: &mut [u8], clock: &mut Clock)
    -> Result<(), SimError>;

    /// Stores `block` at `addr`.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if the range lies outside main memory.
    fn write_block(&mut self, addr: u64, block: &[u8], clock: &mut Clock) -> Result<(), SimError>;
}

/// Flat, byte-addressable main memory with fixed read and write latencies.
#[derive(Clone, Debug)]
pub struct MainMemory {
    buffer: DramBuffer,
    read_latency: u64,
    write_latency: u64,
    stats: MemoryStats,
}

impl MainMemory {
    /// Creates a zeroed memory sized and timed by `config`.
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            buffer: DramBuffer::new(config.size_bytes),
            read_latency: config.read_latency,
            write_latency: config.write_latency,
            stats: MemoryStats::default(),
        }
    }

    /// Returns the capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `len` bytes at `addr` without charging time or counting an access.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if the range does not fit.
    pub fn peek(&self, addr: u64, len: usize) -> Result<&[u8], SimError> {
        self.buffer.read_slice(addr, len)
    }

    /// Returns the block transfer counters.
    pub const fn stats(&self) -> MemoryStats {
        self.stats
    }

    /// Zeroes contents and counters.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.stats = MemoryStats::default();
    }
}

impl NextLevel for MainMemory {
    fn read_block(
        &mut self,
        addr: u64,
        block: &mut [u8],
        clock: &mut Clock,
    ) -> Result<(), SimError> {
        let src = self
            .buffer
            .read_slice(addr, block.len())
            .inspect_err(|e| tracing::warn!(addr, len = block.len(), "DRAM read rejected: {e}"))?;
        block.copy_from_slice(src);
        self.stats.reads += 1;
        clock.advance(self.read_latency);
        Ok(())
    }

    fn write_block(&mut self, addr: u64, block: &[u8], clock: &mut Clock) -> Result<(), SimError> {
        self.buffer
            .write_slice(addr, block)
            .inspect_err(|e| tracing::warn!(addr, len = block.len(), "DRAM write rejected: {e}"))?;
        self.stats.writes += 1;
        clock.advance(self.write_latency);
        Ok(())
    }
}
