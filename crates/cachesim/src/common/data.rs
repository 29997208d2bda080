//! Memory Access Types.
//!
//! This module defines the classification of accesses flowing through the
//! hierarchy. The same type drives:
//! 1. **Data Movement:** Whether bytes are copied into or out of a line.
//! 2. **Dirty Tracking:** Writes mark the serving line dirty.
//! 3. **Timing:** Reads and writes are charged separate latencies.
//! 4. **Statistics Tracking:** Per-level read and write counters.

/// Direction of a memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Copy bytes out of the hierarchy into the caller's buffer.
    Read,

    /// Copy the caller's bytes into the hierarchy.
    ///
    /// Lands in the highest level only and marks that line dirty; lower
    /// levels see the data when the line is evicted or flushed.
    Write,
}

impl AccessType {
    /// Returns `true` for [`AccessType::Write`].
    #[inline(always)]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}
