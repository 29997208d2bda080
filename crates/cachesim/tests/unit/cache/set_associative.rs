//! # Set-Associative Level Tests
//!
//! Levels under test have 4 sets of 16-byte blocks, so set index =
//! (addr / 16) % 4 and tag = addr / 64: the addresses `k * 64` all land in
//! set 0 with tag `k`.

use cachesim_core::config::ReplacementPolicy;
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::Rig;
use crate::common::l2_config;

const STRIDE: u64 = 64;

fn rig(ways: usize, policy: ReplacementPolicy) -> Rig {
    Rig::new(&l2_config(4, ways, policy))
}

fn resident(rig: &Rig, tags: impl IntoIterator<Item = u64>) -> Vec<u64> {
    tags.into_iter()
        .filter(|&k| rig.level.probe(k * STRIDE).is_some())
        .collect()
}

/// N+1 distinct tags in an N-way set: the first N fill free ways, and every
/// insertion after that evicts exactly one line, keeping the N most recent.
#[rstest]
#[case(2)]
#[case(4)]
#[case(8)]
fn capacity_keeps_most_recent_ways(#[case] ways: usize) {
    let mut rig = rig(ways, ReplacementPolicy::Lru);
    let n = ways as u64;

    for k in 0..n {
        let (hit, _) = rig.read(k * STRIDE);
        assert!(!hit);
    }
    assert_eq!(rig.level.stats().evictions, 0);
    assert_eq!(resident(&rig, 0..n), (0..n).collect::<Vec<_>>());

    for k in n..n + 3 {
        let _ = rig.read(k * STRIDE);
        assert_eq!(rig.level.stats().evictions, k - n + 1);
        assert_eq!(resident(&rig, 0..=k), (k + 1 - n..=k).collect::<Vec<_>>());
    }
}

/// Cold fills take free ways in order, lowest first.
#[test]
fn cold_fills_take_lowest_free_way() {
    let mut rig = rig(4, ReplacementPolicy::Lru);
    for k in 0..4 {
        let _ = rig.read(k * STRIDE);
    }
    let tags: Vec<u64> = rig.level.set(0).unwrap().iter().map(|line| line.tag()).collect();
    assert_eq!(tags, vec![0, 1, 2, 3]);
}

/// Re-reading the oldest block makes the next-oldest the victim.
#[test]
fn read_hit_refreshes_recency() {
    let mut rig = rig(4, ReplacementPolicy::Lru);
    for k in 0..4 {
        let _ = rig.read(k * STRIDE);
    }
    assert!(rig.read(0).0);
    let _ = rig.read(4 * STRIDE);
    assert_eq!(resident(&rig, 0..5), vec![0, 2, 3, 4]);
}

/// Writes refresh recency exactly like reads.
#[test]
fn write_hit_refreshes_recency() {
    let mut rig = rig(2, ReplacementPolicy::Lru);
    let _ = rig.read(0);
    let _ = rig.read(STRIDE);
    assert!(rig.write(0, [9, 9, 9, 9]));
    let _ = rig.read(2 * STRIDE);
    assert_eq!(resident(&rig, 0..3), vec![0, 2]);
}

/// Filling set 0 never disturbs set 1.
#[test]
fn sets_are_independent() {
    let mut rig = rig(2, ReplacementPolicy::Lru);
    let _ = rig.read(16);
    for k in 0..6 {
        let _ = rig.read(k * STRIDE);
    }
    assert!(rig.level.probe(16).is_some());
}

/// A dirty LRU victim reaches memory at its own address.
#[test]
fn dirty_victim_written_back() {
    let mut rig = rig(2, ReplacementPolicy::Lru);
    let _ = rig.write(STRIDE + 8, [4, 3, 2, 1]);
    let _ = rig.read(2 * STRIDE);
    assert_eq!(rig.memory.peek(STRIDE + 8, 4).unwrap(), &[0, 0, 0, 0]);

    let _ = rig.read(3 * STRIDE);
    assert_eq!(rig.memory.peek(STRIDE + 8, 4).unwrap(), &[4, 3, 2, 1]);
    assert_eq!(rig.level.stats().writebacks, 1);
}

/// Recency stamps belong to the level, so resetting the clock does not
/// disturb LRU order.
#[test]
fn clock_reset_keeps_lru_order() {
    let mut rig = rig(2, ReplacementPolicy::Lru);
    let _ = rig.read(0);
    let _ = rig.read(STRIDE);
    rig.clock.reset();
    let _ = rig.read(0);
    let _ = rig.read(2 * STRIDE);
    assert_eq!(resident(&rig, 0..3), vec![0, 2]);
}

/// MRU evicts the block just installed, so way 0 is recycled forever and
/// the other ways stay empty.
#[test]
fn mru_keeps_recycling_way_zero() {
    let mut rig = rig(2, ReplacementPolicy::Mru);
    let _ = rig.read(0);
    let _ = rig.read(STRIDE);
    assert!(rig.level.probe(0).is_none());
    assert!(rig.level.probe(STRIDE).is_some());

    for k in 2..6 {
        let _ = rig.read(k * STRIDE);
    }
    let set = rig.level.set(0).unwrap();
    assert!(set[0].is_valid());
    assert_eq!(set[0].tag(), 5);
    assert!(!set[1].is_valid());
    assert_eq!(rig.level.stats().evictions, 5);
}

/// Under MRU, the most recently touched way is the one replaced.
#[test]
fn mru_evicts_most_recent() {
    let mut rig = rig(4, ReplacementPolicy::Mru);
    let _ = rig.read(0);
    let _ = rig.read(STRIDE);
    assert_eq!(resident(&rig, 0..2), vec![1]);
    assert_eq!(rig.level.set(0).unwrap()[0].tag(), 1);
}

/// Hit/miss counters across a mixed sequence.
#[rstest]
#[case(ReplacementPolicy::Lru, 2, 3)]
#[case(ReplacementPolicy::Mru, 0, 5)]
fn hit_and_miss_counts(
    #[case] policy: ReplacementPolicy,
    #[case] hits: u64,
    #[case] misses: u64,
) {
    let mut rig = rig(2, policy);
    // Under MRU every access replaces the line the previous one installed.
    for k in [0, 1, 0, 1, 2] {
        let _ = rig.read(k * STRIDE);
    }
    let stats = rig.level.stats();
    assert_eq!((stats.hits, stats.misses), (hits, misses));
}

/// Sets are addressable up to the configured count and no further.
#[test]
fn set_lookup_is_bounded() {
    let rig = rig(2, ReplacementPolicy::Lru);
    assert_eq!(rig.level.set(3).map(<[_]>::len), Some(2));
    assert!(rig.level.set(4).is_none());
}
