//! # Error Tests
//!
//! Display strings and conversions of the simulator's error types.

use cachesim_core::common::{ConfigError, SimError};

#[test]
fn out_of_bounds_display_names_range_and_capacity() {
    let err = SimError::OutOfBounds {
        addr: 0x1000,
        len: 16,
        capacity: 0x1000,
    };
    let text = err.to_string();
    assert!(text.contains("0x1000+16"), "{text}");
    assert!(text.contains("capacity 0x1000"), "{text}");
}

#[test]
fn misaligned_display() {
    let err = SimError::Misaligned { addr: 0xe, len: 4 };
    assert_eq!(err.to_string(), "misaligned access of 4 bytes at 0xe");
}

#[test]
fn config_error_converts_into_sim_error() {
    let err: SimError = ConfigError::BlockSize(48).into();
    assert!(matches!(err, SimError::Config(ConfigError::BlockSize(48))));
    assert_eq!(
        err.to_string(),
        "invalid configuration: block size 48 is not a power of two"
    );
}

#[test]
fn config_error_display_names_level() {
    let err = ConfigError::MissingPolicy {
        level: "L2",
        ways: 4,
    };
    assert_eq!(err.to_string(), "L2: 4 ways require a replacement policy");
}

#[test]
fn config_error_source_is_preserved() {
    use std::error::Error;
    let err: SimError = ConfigError::ZeroWays { level: "L1" }.into();
    assert!(err.source().is_some());
}
