//! # Clock Tests

use cachesim_core::timing::Clock;
use proptest::prelude::*;

#[test]
fn new_clock_is_zero() {
    assert_eq!(Clock::new().elapsed(), 0);
    assert_eq!(Clock::default(), Clock::new());
}

#[test]
fn advance_accumulates_and_reset_zeroes() {
    let mut clock = Clock::new();
    clock.advance(100);
    clock.advance(10);
    clock.advance(1);
    assert_eq!(clock.elapsed(), 111);
    clock.reset();
    assert_eq!(clock.elapsed(), 0);
    clock.advance(5);
    assert_eq!(clock.elapsed(), 5);
}

#[test]
fn advance_saturates() {
    let mut clock = Clock::new();
    clock.advance(u64::MAX - 1);
    clock.advance(10);
    assert_eq!(clock.elapsed(), u64::MAX);
}

proptest! {
    #[test]
    fn elapsed_is_sum_of_costs(costs in prop::collection::vec(0u64..1_000, 0..64)) {
        let mut clock = Clock::new();
        let mut previous = 0;
        for &cost in &costs {
            clock.advance(cost);
            prop_assert!(clock.elapsed() >= previous);
            previous = clock.elapsed();
        }
        prop_assert_eq!(clock.elapsed(), costs.iter().sum::<u64>());
    }
}
