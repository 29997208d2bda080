//! # Unit Components
//!
//! Tests for each building block of the simulator, leaves first: address
//! decoding and errors, the clock, main memory, single cache levels, and the
//! composed hierarchy.


/// Clock behavior.
pub mod timing;
