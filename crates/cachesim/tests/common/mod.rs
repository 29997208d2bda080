//! Shared helpers for building small, hand-traceable hierarchies.

use cachesim_core::config::{CacheConfig, Config, MemoryConfig, ReplacementPolicy};
use cachesim_core::CacheHierarchy;
use tracing_subscriber::EnvFilter;

/// Block size of the test configuration.
pub const BLOCK: usize = 16;
/// Word size of the test configuration.
pub const WORD: usize = 4;
/// Memory capacity of the test configuration (256 blocks).
pub const MEMORY: usize = 4096;

/// Latencies of the test configuration.
pub const L1_READ: u64 = 1;
/// L1 write latency.
pub const L1_WRITE: u64 = 2;
/// L2 read latency.
pub const L2_READ: u64 = 10;
/// L2 write latency.
pub const L2_WRITE: u64 = 5;
/// DRAM read latency.
pub const DRAM_READ: u64 = 100;
/// DRAM write latency.
pub const DRAM_WRITE: u64 = 50;

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A direct-mapped level of `sets` lines with the L1 test latencies.
pub fn l1_config(sets: usize) -> CacheConfig {
    CacheConfig {
        enabled: true,
        sets,
        ways: 1,
        policy: ReplacementPolicy::None,
        read_latency: L1_READ,
        write_latency: L1_WRITE,
        miss_latency: 0,
    }
}

/// A `sets × ways` level with the L2 test latencies.
pub fn l2_config(sets: usize, ways: usize, policy: ReplacementPolicy) -> CacheConfig {
    CacheConfig {
        enabled: true,
        sets,
        ways,
        policy,
        read_latency: L2_READ,
        write_latency: L2_WRITE,
        miss_latency: 0,
    }
}

/// Small deterministic configuration.
///
/// - 16-byte blocks, 4-byte words, 4 KiB memory
/// - L1: 4 direct-mapped lines (conflict stride 64 bytes)
/// - L2: 4 sets × 2 ways, LRU (conflict stride 64 bytes)
///
/// L1 index = (addr / 16) % 4, L1 tag = addr / 64; L2 uses the same split.
pub fn test_config() -> Config {
    Config {
        block_bytes: BLOCK,
        word_bytes: WORD,
        memory: MemoryConfig {
            size_bytes: MEMORY,
            read_latency: DRAM_READ,
            write_latency: DRAM_WRITE,
        },
        cache: cachesim_core::config::CacheHierarchyConfig {
            l1: l1_config(4),
            l2: l2_config(4, 2, ReplacementPolicy::Lru),
        },
    }
}

/// The test configuration with L2 disabled.
pub fn l1_only_config() -> Config {
    let mut config = test_config();
    config.cache.l2.enabled = false;
    config
}

/// Builds a hierarchy from `config`, panicking on a rejected configuration.
pub fn build(config: Config) -> CacheHierarchy {
    init_tracing();
    CacheHierarchy::new(config).unwrap()
}

/// Reads one word and returns it by value.
pub fn read_word(caches: &mut CacheHierarchy, addr: u64) -> [u8; WORD] {
    let mut word = [0; WORD];
    caches.read(addr, &mut word).unwrap();
    word
}
