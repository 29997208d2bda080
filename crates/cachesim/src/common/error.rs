//! Simulation error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Fatal Accesses:** Out-of-bounds memory ranges that end the simulation.
//! 2. **Configuration Errors:** Geometry and policy problems rejected at construction.
//! 3. **Caller Errors:** Word buffers that do not fit a single block.
//!
//! None of these are transient. Every variant reports a logic or configuration
//! bug upstream, so nothing here is ever retried.

use thiserror::Error;

/// Errors returned by the cache hierarchy and main memory.
#[derive(Debug, Error)]
pub enum SimError {
    /// An access range `[addr, addr + len)` does not fit in main memory.
    ///
    /// The simulation cannot continue past this point; the hierarchy is left
    /// in the state it had when the access failed.
    #[error("memory access {addr:#x}+{len} out of bounds (capacity {capacity:#x})")]
    OutOfBounds {
        /// First byte of the rejected range.
        addr: u64,
        /// Length of the rejected range in bytes.
        len: usize,
        /// Capacity of main memory in bytes.
        capacity: usize,
    },

    /// A word buffer has the wrong length or crosses a block boundary.
    #[error("misaligned access of {len} bytes at {addr:#x}")]
    Misaligned {
        /// Address of the first byte of the word.
        addr: u64,
        /// Length of the caller's buffer in bytes.
        len: usize,
    },

    /// The configuration was rejected before any state was built.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Reasons a [`Config`](crate::config::Config) is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Block size must be a non-zero power of two.
    #[error("block size {0} is not a power of two")]
    BlockSize(usize),

    /// Word size must be a non-zero power of two no larger than a block.
    #[error("word size {word} does not fit a {block}-byte block")]
    WordSize {
        /// Configured word size in bytes.
        word: usize,
        /// Configured block size in bytes.
        block: usize,
    },

    /// A cache level was configured with no sets.
    #[error("{level}: set count must be non-zero")]
    ZeroSets {
        /// Level name (`L1`, `L2`).
        level: &'static str,
    },

    /// A cache level was configured with no ways.
    #[error("{level}: way count must be non-zero")]
    ZeroWays {
        /// Level name (`L1`, `L2`).
        level: &'static str,
    },

    /// A set-associative level needs a replacement policy to pick victims.
    #[error("{level}: {ways} ways require a replacement policy")]
    MissingPolicy {
        /// Level name (`L1`, `L2`).
        level: &'static str,
        /// Configured associativity.
        ways: usize,
    },

    /// Main memory must hold a whole number of blocks, at least one.
    #[error("memory size {size} is not a non-zero multiple of the {block}-byte block")]
    MemorySize {
        /// Configured memory size in bytes.
        size: usize,
        /// Configured block size in bytes.
        block: usize,
    },

    /// The first level of the hierarchy cannot be disabled.
    #[error("L1 cannot be disabled")]
    L1Disabled,

    /// The configuration text could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
