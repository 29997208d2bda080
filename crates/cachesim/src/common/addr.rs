//! Address decomposition.
//!
//! This module splits linear addresses into the fields a cache level indexes
//! with. It provides the following:
//! 1. **Decoding:** `(tag, index, offset)` for a given block size and set count.
//! 2. **Composition:** The exact inverse, used to rebuild a victim line's address.
//! 3. **Block Alignment:** Helpers for the base address of the containing block.
//!
//! Every function is pure. Any `u64` is a valid input once the geometry has a
//! non-zero block size and set count.

/// An address split into the three fields a cache level uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// High bits identifying which block occupies a line.
    pub tag: u64,
    /// Set (or line, when direct-mapped) the block maps to.
    pub index: usize,
    /// Byte offset inside the block.
    pub offset: usize,
}

/// Shape of one cache level as seen by the address decoder.
///
/// `block_bytes` is a power of two; `sets` may be any non-zero count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Bytes per block.
    pub block_bytes: usize,
    /// Number of sets (lines for a direct-mapped level).
    pub sets: usize,
}

impl Geometry {
    /// Creates a geometry for `sets` sets of `block_bytes`-byte blocks.
    ///
    /// # Arguments
    ///
    /// * `block_bytes` - Block size in bytes.
    /// * `sets` - Number of sets.
    ///
    /// # Panics
    ///
    /// In debug builds, if either count is zero. Decoding with a zero count
    /// divides by zero.
    #[inline(always)]
    pub const fn new(block_bytes: usize, sets: usize) -> Self {
        debug_assert!(block_bytes > 0 && sets > 0, "geometry counts must be non-zero");
        Self { block_bytes, sets }
    }

    /// Splits `addr` into `(tag, index, offset)`.
    ///
    /// `offset = addr mod block`, `index = (addr / block) mod sets`,
    /// `tag = addr / (block * sets)`.
    #[inline]
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        let block = self.block_bytes as u64;
        let sets = self.sets as u64;
        let block_num = addr / block;
        DecodedAddr {
            tag: block_num / sets,
            index: (block_num % sets) as usize,
            offset: (addr % block) as usize,
        }
    }

    /// Rebuilds the address that `decode` split into `parts`.
    #[inline]
    pub const fn compose(&self, parts: &DecodedAddr) -> u64 {
        let block = self.block_bytes as u64;
        let sets = self.sets as u64;
        (parts.tag * sets + parts.index as u64) * block + parts.offset as u64
    }

    /// Returns the address of byte 0 of the block stored under `tag` at `index`.
    #[inline]
    pub const fn line_addr(&self, tag: u64, index: usize) -> u64 {
        self.compose(&DecodedAddr {
            tag,
            index,
            offset: 0,
        })
    }

    /// Rounds `addr` down to the start of its block.
    #[inline]
    pub const fn block_base(&self, addr: u64) -> u64 {
        addr - addr % self.block_bytes as u64
    }
}
