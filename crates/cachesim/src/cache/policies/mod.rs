//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim ways in set-associative levels.
//! Policies are stateless: the owning level stamps every line it touches with
//! a per-level access counter, and a policy reads those stamps to pick a way.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used (smallest stamp).
//! - `Mru`: Most Recently Used (largest stamp).
//!
//! Both break ties by taking the lowest way index.

/// Least Recently Used replacement policy.
pub mod lru;

/// Most Recently Used replacement policy.
pub mod mru;

pub use lru::LruPolicy;
pub use mru::MruPolicy;

use std::fmt;

use super::CacheLine;

/// Trait for cache replacement policies.
///
/// Defines the interface for selecting the way to evict from a full set.
pub trait ReplacementPolicy: Send + Sync + fmt::Debug {
    /// Selects a victim line to evict from a set.
    ///
    /// # Arguments
    ///
    /// * `set` - The lines of one set, way 0 first. Never empty.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&self, set: &[CacheLine]) -> usize;
}
