//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize a hierarchy. It provides:
//! 1. **Defaults:** The baseline lab geometry and latencies.
//! 2. **Structures:** Hierarchical config for memory and each cache level.
//! 3. **Enums:** Replacement policy selection.
//! 4. **Validation:** Rejection of geometries that would corrupt state later.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built from
//! `Config::default()` and adjusted field by field.

use serde::{Deserialize, Deserializer};

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values reproduce the lab setup the hierarchy was designed around.
mod defaults {
    /// Bytes moved per read/write request.
    pub const WORD_BYTES: usize = 4;

    /// Bytes per block (16 words).
    ///
    /// One value for every level and for DRAM transfers.
    pub const BLOCK_BYTES: usize = 16 * WORD_BYTES;

    /// DRAM capacity in bytes (1024 blocks).
    pub const DRAM_SIZE: usize = 1024 * BLOCK_BYTES;

    /// Cycles charged for one DRAM block read.
    pub const DRAM_READ_LATENCY: u64 = 100;

    /// Cycles charged for one DRAM block write.
    pub const DRAM_WRITE_LATENCY: u64 = 50;

    /// L1 line count (256 lines of 64 bytes = 16 KiB).
    pub const L1_SETS: usize = 256;

    /// L1 associativity (direct-mapped).
    pub const L1_WAYS: usize = 1;

    /// Cycles charged for an L1 read served from a resident line.
    pub const L1_READ_LATENCY: u64 = 1;

    /// Cycles charged for an L1 write served into a resident line.
    pub const L1_WRITE_LATENCY: u64 = 1;

    /// L2 set count (256 sets × 2 ways × 64 bytes = 32 KiB).
    pub const L2_SETS: usize = 256;

    /// L2 associativity.
    pub const L2_WAYS: usize = 2;

    /// Cycles charged for an L2 read served from a resident line.
    pub const L2_READ_LATENCY: u64 = 10;

    /// Cycles charged for an L2 write served into a resident line.
    pub const L2_WRITE_LATENCY: u64 = 5;

    /// Extra cycles charged by a level on a miss, before the lower level is consulted.
    pub const MISS_LATENCY: u64 = 0;
}

/// Cache replacement policy algorithms.
///
/// Specifies how a victim is chosen when a block must be installed in a full
/// set. Direct-mapped levels have a single candidate and ignore the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// No replacement policy.
    ///
    /// Only valid for direct-mapped (`ways = 1`) levels.
    #[serde(alias = "None")]
    None,
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the way with the oldest access stamp.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// Most Recently Used replacement policy.
    ///
    /// Evicts the way with the newest access stamp. Lab reference timings were
    /// produced with this rule; use it only to match those numbers.
    #[serde(alias = "Mru")]
    Mru,
}

/// Root configuration for a cache hierarchy.
///
/// # Example
///
/// ```
/// use cachesim_core::config::Config;
/// let json = r#"{ "block_bytes": 32, "cache": { "l2": { "enabled": false } } }"#;
/// let config = Config::from_json(json)?;
/// assert_eq!(config.block_bytes, 32);
/// assert!(!config.cache.l2.enabled);
/// # Ok::<(), cachesim_core::common::ConfigError>(())
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bytes per block, shared by every level and by DRAM transfers.
    #[serde(default = "Config::default_block_bytes")]
    pub block_bytes: usize,

    /// Bytes per read/write request.
    #[serde(default = "Config::default_word_bytes")]
    pub word_bytes: usize,

    /// Main memory configuration.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Cache level configuration.
    #[serde(default)]
    pub cache: CacheHierarchyConfig,
}

impl Config {
    /// Returns the default block size in bytes.
    fn default_block_bytes() -> usize {
        defaults::BLOCK_BYTES
    }

    /// Returns the default word size in bytes.
    fn default_word_bytes() -> usize {
        defaults::WORD_BYTES
    }

    /// Parses a configuration from JSON; omitted fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid configuration JSON.
    /// The result is not validated; see [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks that the configuration describes a buildable hierarchy.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in the order: block size, word size,
    /// memory size, L1, L2 (skipped when disabled).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.block_bytes.is_power_of_two() {
            return Err(ConfigError::BlockSize(self.block_bytes));
        }
        if !self.word_bytes.is_power_of_two() || self.word_bytes > self.block_bytes {
            return Err(ConfigError::WordSize {
                word: self.word_bytes,
                block: self.block_bytes,
            });
        }
        let size = self.memory.size_bytes;
        if size == 0 || size % self.block_bytes != 0 {
            return Err(ConfigError::MemorySize {
                size,
                block: self.block_bytes,
            });
        }
        if !self.cache.l1.enabled {
            return Err(ConfigError::L1Disabled);
        }
        self.cache.l1.validate("L1")?;
        if self.cache.l2.enabled {
            self.cache.l2.validate("L2")?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_bytes: defaults::BLOCK_BYTES,
            word_bytes: defaults::WORD_BYTES,
            memory: MemoryConfig::default(),
            cache: CacheHierarchyConfig::default(),
        }
    }
}

/// Main memory (DRAM) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Capacity in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,

    /// Cycles per block read
    #[serde(default = "MemoryConfig::default_read_latency")]
    pub read_latency: u64,

    /// Cycles per block write
    #[serde(default = "MemoryConfig::default_write_latency")]
    pub write_latency: u64,
}

impl MemoryConfig {
    /// Returns the default DRAM capacity in bytes.
    fn default_size() -> usize {
        defaults::DRAM_SIZE
    }

    /// Returns the default DRAM read latency in cycles.
    fn default_read_latency() -> u64 {
        defaults::DRAM_READ_LATENCY
    }

    /// Returns the default DRAM write latency in cycles.
    fn default_write_latency() -> u64 {
        defaults::DRAM_WRITE_LATENCY
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::DRAM_SIZE,
            read_latency: defaults::DRAM_READ_LATENCY,
            write_latency: defaults::DRAM_WRITE_LATENCY,
        }
    }
}

/// Cache hierarchy configuration.
///
/// Each level is read field by field on top of its own defaults, so a
/// partial `l1` object stays a direct-mapped L1.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheHierarchyConfig {
    /// First-level cache; always enabled.
    #[serde(
        default = "CacheConfig::default_l1",
        deserialize_with = "CacheConfig::deserialize_l1"
    )]
    pub l1: CacheConfig,
    /// Second-level cache; when disabled L1 talks to memory directly.
    #[serde(
        default = "CacheConfig::default_l2",
        deserialize_with = "CacheConfig::deserialize_l2"
    )]
    pub l2: CacheConfig,
}

impl Default for CacheHierarchyConfig {
    fn default() -> Self {
        Self {
            l1: CacheConfig::default_l1(),
            l2: CacheConfig::default_l2(),
        }
    }
}

/// Individual cache level configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Enable this cache level
    pub enabled: bool,

    /// Number of sets (lines when direct-mapped)
    pub sets: usize,

    /// Associativity (number of ways)
    pub ways: usize,

    /// Replacement policy
    pub policy: ReplacementPolicy,

    /// Cycles for a read served by this level
    pub read_latency: u64,

    /// Cycles for a write served by this level
    pub write_latency: u64,

    /// Extra cycles on a miss, on top of the lower level's costs
    pub miss_latency: u64,
}

/// One level's JSON object: every field optional, omitted ones taken from
/// the level's defaults.
#[derive(Deserialize)]
struct CacheOverrides {
    enabled: Option<bool>,
    sets: Option<usize>,
    ways: Option<usize>,
    policy: Option<ReplacementPolicy>,
    read_latency: Option<u64>,
    write_latency: Option<u64>,
    miss_latency: Option<u64>,
}

impl CacheOverrides {
    fn apply(self, base: CacheConfig) -> CacheConfig {
        CacheConfig {
            enabled: self.enabled.unwrap_or(base.enabled),
            sets: self.sets.unwrap_or(base.sets),
            ways: self.ways.unwrap_or(base.ways),
            policy: self.policy.unwrap_or(base.policy),
            read_latency: self.read_latency.unwrap_or(base.read_latency),
            write_latency: self.write_latency.unwrap_or(base.write_latency),
            miss_latency: self.miss_latency.unwrap_or(base.miss_latency),
        }
    }
}

impl CacheConfig {
    fn deserialize_l1<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CacheOverrides::deserialize(deserializer).map(|o| o.apply(Self::default_l1()))
    }

    fn deserialize_l2<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CacheOverrides::deserialize(deserializer).map(|o| o.apply(Self::default_l2()))
    }

    /// Default first-level cache: 256 direct-mapped lines, 1-cycle hits.
    pub fn default_l1() -> Self {
        Self {
            enabled: true,
            sets: defaults::L1_SETS,
            ways: defaults::L1_WAYS,
            policy: ReplacementPolicy::None,
            read_latency: defaults::L1_READ_LATENCY,
            write_latency: defaults::L1_WRITE_LATENCY,
            miss_latency: defaults::MISS_LATENCY,
        }
    }

    /// Default second-level cache: 256 sets × 2 ways, LRU.
    pub fn default_l2() -> Self {
        Self {
            enabled: true,
            sets: defaults::L2_SETS,
            ways: defaults::L2_WAYS,
            policy: ReplacementPolicy::Lru,
            read_latency: defaults::L2_READ_LATENCY,
            write_latency: defaults::L2_WRITE_LATENCY,
            miss_latency: defaults::MISS_LATENCY,
        }
    }

    /// Total number of lines (`sets × ways`).
    pub const fn lines(&self) -> usize {
        self.sets * self.ways
    }

    /// Checks the geometry of one level.
    ///
    /// # Errors
    ///
    /// Zero sets, zero ways, or more than one way with no replacement policy.
    pub fn validate(&self, level: &'static str) -> Result<(), ConfigError> {
        if self.sets == 0 {
            return Err(ConfigError::ZeroSets { level });
        }
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays { level });
        }
        if self.ways > 1 && self.policy == ReplacementPolicy::None {
            return Err(ConfigError::MissingPolicy {
                level,
                ways: self.ways,
            });
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::default_l2()
    }
}
