//! Common types shared by every component of the cache simulator.
//!
//! This module provides the building blocks used across the hierarchy:
//! 1. **Address Decoding:** Tag, index and offset extraction for a cache geometry.
//! 2. **Memory Access:** The read/write direction of a request.
//! 3. **Error Handling:** The simulator's error and configuration error types.

/// Address decomposition (tag, index, offset).
pub mod addr;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{DecodedAddr, Geometry};
pub use data::AccessType;
pub use error::{ConfigError, SimError};
