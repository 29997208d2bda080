//! Set-Associative Cache Level.
//!
//! This module implements one level of the hierarchy. A level is `sets × ways`
//! lines; a direct-mapped level is simply `ways = 1`. It models:
//! 1. **Lookup:** Tag match across the ways of the set the address indexes.
//! 2. **Fill:** Block fetch from the level below on a miss (write-allocate).
//! 3. **Write-back:** Dirty victims are written to the level below only when
//!    they are evicted or flushed, never on the write itself.
//! 4. **Replacement:** Victim selection through a [`ReplacementPolicy`].
//!
//! Every access is charged to the shared [`Clock`]: the level's miss overhead
//! on a miss, whatever the level below charges for the transfers, then the
//! level's own read or write latency for serving the word.

/// Cache replacement policy implementations (LRU, MRU).
pub mod policies;

use std::fmt;

use self::policies::{LruPolicy, MruPolicy, ReplacementPolicy};
use crate::common::{AccessType, DecodedAddr, Geometry, SimError};
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType};
use crate::memory::NextLevel;
use crate::stats::CacheStats;
use crate::timing::Clock;

/// One cached copy of one memory block plus its metadata.
///
/// Lines are created zeroed and invalid and are reused in place on eviction.
#[derive(Clone, PartialEq, Eq)]
pub struct CacheLine {
    valid: bool,
    dirty: bool,
    tag: u64,
    recency: u64,
    data: Box<[u8]>,
}

impl CacheLine {
    /// Creates an invalid, zeroed line holding `block_bytes` bytes.
    pub(crate) fn new(block_bytes: usize) -> Self {
        Self {
            valid: false,
            dirty: false,
            tag: 0,
            recency: 0,
            data: vec![0; block_bytes].into_boxed_slice(),
        }
    }

    /// Whether the line holds a block.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the block is newer than the copy in the level below.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Tag of the resident block (meaningless while invalid).
    #[inline]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Access stamp of the last touch; 0 if never touched since initialization.
    #[inline]
    pub const fn recency(&self) -> u64 {
        self.recency
    }

    /// The block's bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for CacheLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheLine")
            .field("valid", &self.valid)
            .field("dirty", &self.dirty)
            .field("tag", &format_args!("{:#x}", self.tag))
            .field("recency", &self.recency)
            .finish_non_exhaustive()
    }
}

/// The caller's side of one access.
enum Payload<'a> {
    Load(&'a mut [u8]),
    Store(&'a [u8]),
}

impl Payload<'_> {
    fn len(&self) -> usize {
        match self {
            Self::Load(out) => out.len(),
            Self::Store(data) => data.len(),
        }
    }

    const fn kind(&self) -> AccessType {
        match self {
            Self::Load(_) => AccessType::Read,
            Self::Store(_) => AccessType::Write,
        }
    }
}

/// A single cache level with write-back, write-allocate semantics.
pub struct CacheLevel {
    name: &'static str,
    geometry: Geometry,
    ways: usize,
    lines: Vec<CacheLine>,
    policy: Box<dyn ReplacementPolicy>,
    read_latency: u64,
    write_latency: u64,
    miss_latency: u64,
    /// Per-level access counter used to stamp lines; never reset by the clock.
    stamp: u64,
    stats: CacheStats,
}

impl CacheLevel {
    /// Creates a cache level with every line invalid and zeroed.
    ///
    /// The configuration is assumed valid (see [`CacheConfig::validate`]).
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in logs (`L1`, `L2`).
    /// * `config` - Sets, ways, policy and latencies.
    /// * `block_bytes` - Block size shared by the whole hierarchy.
    pub fn new(name: &'static str, config: &CacheConfig, block_bytes: usize) -> Self {
        // A single way leaves nothing to choose, so `None` degenerates to LRU.
        let policy: Box<dyn ReplacementPolicy> = match config.policy {
            PolicyType::None | PolicyType::Lru => Box::new(LruPolicy),
            PolicyType::Mru => Box::new(MruPolicy),
        };

        Self {
            name,
            geometry: Geometry::new(block_bytes, config.sets),
            ways: config.ways,
            lines: vec![CacheLine::new(block_bytes); config.lines()],
            policy,
            read_latency: config.read_latency,
            write_latency: config.write_latency,
            miss_latency: config.miss_latency,
            stamp: 0,
            stats: CacheStats::default(),
        }
    }

    /// Returns the level's label.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the address geometry (block size and set count).
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Returns the associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Returns the access counters.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Returns the lines of set `index`, way 0 first, or `None` past the last set.
    pub fn set(&self, index: usize) -> Option<&[CacheLine]> {
        (index < self.geometry.sets).then(|| self.ways_of(index))
    }

    fn ways_of(&self, index: usize) -> &[CacheLine] {
        let base = index * self.ways;
        &self.lines[base..base + self.ways]
    }

    /// Returns the resident line holding the block of `addr`, if any.
    ///
    /// Pure inspection: no time is charged and no recency or counter changes.
    pub fn probe(&self, addr: u64) -> Option<&CacheLine> {
        let DecodedAddr { tag, index, .. } = self.geometry.decode(addr);
        self.lookup(tag, index).map(|way| &self.lines[index * self.ways + way])
    }

    /// Reads `out.len()` bytes at `addr` into `out`.
    ///
    /// # Returns
    ///
    /// `true` on a hit, `false` if the block had to be fetched from `lower`.
    ///
    /// # Errors
    ///
    /// [`SimError::Misaligned`] if the range crosses a block boundary;
    /// [`SimError::OutOfBounds`] if a transfer below leaves main memory.
    pub fn read(
        &mut self,
        addr: u64,
        out: &mut [u8],
        lower: &mut dyn NextLevel,
        clock: &mut Clock,
    ) -> Result<bool, SimError> {
        self.access(addr, Payload::Load(out), lower, clock)
    }

    /// Writes `data` at `addr`, marking the serving line dirty.
    ///
    /// # Returns
    ///
    /// `true` on a hit, `false` if the block had to be fetched from `lower`.
    ///
    /// # Errors
    ///
    /// Same as [`CacheLevel::read`].
    pub fn write(
        &mut self,
        addr: u64,
        data: &[u8],
        lower: &mut dyn NextLevel,
        clock: &mut Clock,
    ) -> Result<bool, SimError> {
        self.access(addr, Payload::Store(data), lower, clock)
    }

    fn access(
        &mut self,
        addr: u64,
        payload: Payload<'_>,
        lower: &mut dyn NextLevel,
        clock: &mut Clock,
    ) -> Result<bool, SimError> {
        let DecodedAddr { tag, index, offset } = self.geometry.decode(addr);
        let len = payload.len();
        if offset + len > self.geometry.block_bytes {
            return Err(SimError::Misaligned { addr, len });
        }

        self.stamp += 1;
        match payload.kind() {
            AccessType::Read => self.stats.reads += 1,
            AccessType::Write => self.stats.writes += 1,
        }

        let (way, hit) = match self.lookup(tag, index) {
            Some(way) => {
                self.stats.hits += 1;
                (way, true)
            }
            None => {
                self.stats.misses += 1;
                (self.fill(addr, tag, index, lower, clock)?, false)
            }
        };

        let line = &mut self.lines[index * self.ways + way];
        line.recency = self.stamp;
        match payload {
            Payload::Load(out) => {
                out.copy_from_slice(&line.data[offset..offset + len]);
                clock.advance(self.read_latency);
            }
            Payload::Store(data) => {
                line.data[offset..offset + len].copy_from_slice(data);
                line.dirty = true;
                clock.advance(self.write_latency);
            }
        }
        Ok(hit)
    }

    /// Returns the way of set `index` holding `tag`, if resident.
    fn lookup(&self, tag: u64, index: usize) -> Option<usize> {
        self.ways_of(index)
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Makes room for the block of `addr` in set `index` and fetches it.
    ///
    /// Returns the way the block now occupies. The line is valid and clean;
    /// the caller services the request and stamps it.
    ///
    /// If the fetch fails the victim stays resident (clean, if its write-back
    /// already went down) and no eviction is counted.
    fn fill(
        &mut self,
        addr: u64,
        tag: u64,
        index: usize,
        lower: &mut dyn NextLevel,
        clock: &mut Clock,
    ) -> Result<usize, SimError> {
        clock.advance(self.miss_latency);

        let base = index * self.ways;
        let way = self.policy.get_victim(self.ways_of(index));
        let line = &mut self.lines[base + way];

        let evicting = line.valid;
        if evicting && line.dirty {
            let victim_addr = self.geometry.line_addr(line.tag, index);
            tracing::trace!(
                level = self.name,
                victim_addr,
                index,
                way,
                "write-back on eviction"
            );
            lower.write_block(victim_addr, &line.data, clock)?;
            line.dirty = false;
            self.stats.writebacks += 1;
        }

        let block_addr = self.geometry.block_base(addr);
        tracing::trace!(level = self.name, block_addr, tag, index, way, "fill");
        lower.read_block(block_addr, &mut line.data, clock)?;
        if evicting {
            self.stats.evictions += 1;
        }
        line.valid = true;
        line.dirty = false;
        line.tag = tag;
        Ok(way)
    }

    /// Writes every dirty line to `lower` and marks it clean.
    ///
    /// Lines stay valid. Charged like ordinary write-backs.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if a write-back leaves main memory; lines
    /// flushed before the failure stay clean.
    pub fn flush(&mut self, lower: &mut dyn NextLevel, clock: &mut Clock) -> Result<(), SimError> {
        for (slot, line) in self.lines.iter_mut().enumerate() {
            if line.valid && line.dirty {
                let addr = self.geometry.line_addr(line.tag, slot / self.ways);
                lower.write_block(addr, &line.data, clock)?;
                line.dirty = false;
                self.stats.writebacks += 1;
            }
        }
        Ok(())
    }

    /// Invalidates and zeroes every line and clears the counters.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            *line = CacheLine::new(self.geometry.block_bytes);
        }
        self.stamp = 0;
        self.stats = CacheStats::default();
    }
}

impl fmt::Debug for CacheLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheLevel")
            .field("name", &self.name)
            .field("geometry", &self.geometry)
            .field("ways", &self.ways)
            .field("policy", &self.policy)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
