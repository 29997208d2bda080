//! Two-level cache hierarchy simulator library.
//!
//! This crate models an L1/L2 write-back cache hierarchy above a flat main
//! memory, with the following:
//! 1. **Caches:** One generic level type; direct-mapped is one way, set-associative
//!    levels pick victims with LRU (or MRU, to reproduce the lab benchmark).
//! 2. **Memory:** Bounds-checked DRAM with fixed block read/write latencies.
//! 3. **Timing:** A resettable clock advanced by per-operation costs.
//! 4. **Configuration:** Serde-deserializable geometry and latency settings.
//! 5. **Statistics:** Hit, miss, eviction and write-back counters per level.
//!
//! ```
//! use cachesim_core::{CacheHierarchy, Config};
//!
//! let mut caches = CacheHierarchy::new(Config::default())?;
//! caches.write(0, &[1, 2, 3, 4])?;
//! let mut word = [0; 4];
//! caches.read(0, &mut word)?;
//! assert_eq!(word, [1, 2, 3, 4]);
//! # Ok::<(), cachesim_core::SimError>(())
//! ```

/// Cache levels, lines and replacement policies.
pub mod cache;
/// Common types (address decoding, access types, errors).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// L1/L2/memory composition and the external read/write interface.
pub mod hierarchy;
/// Main memory and the next-level interface.
pub mod memory;
/// Hit/miss/eviction counters and reporting.
pub mod stats;
/// Simulated time.
pub mod timing;

/// Error type returned by every fallible operation.
pub use crate::common::SimError;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// The hierarchy; construct with `CacheHierarchy::new`.
pub use crate::hierarchy::CacheHierarchy;
