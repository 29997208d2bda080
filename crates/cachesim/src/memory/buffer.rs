//! DRAM Buffer Implementation.
//!
//! This module provides the backing store for main memory: a fixed-capacity,
//! zero-initialized byte array. Every access is range-checked up front and
//! fails as a whole; there is no truncation and no partial copy.

use crate::common::SimError;

/// A fixed-capacity byte buffer with checked slice access.
#[derive(Clone, Debug)]
pub struct DramBuffer {
    bytes: Vec<u8>,
}

impl DramBuffer {
    /// Creates a zeroed buffer of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Returns the size of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Resolves `[offset, offset + len)` to an index range inside the buffer.
    fn range(&self, offset: u64, len: usize) -> Result<std::ops::Range<usize>, SimError> {
        let start = usize::try_from(offset).ok();
        let end = start.and_then(|s| s.checked_add(len));
        match (start, end) {
            (Some(start), Some(end)) if end <= self.bytes.len() => Ok(start..end),
            _ => Err(SimError::OutOfBounds {
                addr: offset,
                len,
                capacity: self.bytes.len(),
            }),
        }
    }

    /// Reads a slice of memory.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if the range does not fit.
    pub fn read_slice(&self, offset: u64, len: usize) -> Result<&[u8], SimError> {
        let range = self.range(offset, len)?;
        Ok(&self.bytes[range])
    }

    /// Writes a slice of memory.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if the range does not fit; nothing is written.
    pub fn write_slice(&mut self, offset: u64, data: &[u8]) -> Result<(), SimError> {
        let range = self.range(offset, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Zeroes the whole buffer.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }
}
