//! # Chunk Cache
//!
//! Bounded store of generated chunks with least-recently-used eviction.
//!
//! ## Layout
//!
//! Chunks live in a dense arena (`Vec<Slot>`). A hash map goes from key to
//! arena index, and every slot carries `prev`/`next` indices forming an
//! intrusive doubly linked recency list:
//!
//! ```text
//!   head (most recent)                               tail (least recent)
//!     [slot 3] <-> [slot 0] <-> [slot 2] <-> [slot 1]
//! ```
//!
//! Lookup, touch, insert and remove are all O(1). Removal swaps the last
//! slot into the hole and patches the moved slot's neighbours, so the arena
//! never has gaps and no slot is ever `None`.
//!
//! ## Pinning
//!
//! Eviction takes a [`PinSet`]. Pinned keys are skipped no matter how old
//! they are. When more keys are pinned than the capacity allows, the cache
//! stays over capacity: the bound is soft, the pin contract is not.

use std::collections::HashMap;
use std::collections::HashSet;

use tracing::trace;

use crate::chunk::Chunk;
use crate::coords::ChunkKey;
use crate::error::{ConfigError, ConfigResult};

/// Keys that must survive the current eviction pass.
///
/// Rebuilt every tick; a key pinned last tick and not this tick is fair game.
#[derive(Clone, Debug, Default)]
pub struct PinSet {
    keys: HashSet<ChunkKey>,
}

impl PinSet {
    /// Creates an empty pin set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins a key.
    pub fn pin(&mut self, key: ChunkKey) {
        self.keys.insert(key);
    }

    /// Returns true if `key` is pinned.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: ChunkKey) -> bool {
        self.keys.contains(&key)
    }

    /// Number of pinned keys.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if nothing is pinned.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<ChunkKey> for PinSet {
    fn from_iter<I: IntoIterator<Item = ChunkKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a ChunkKey> for PinSet {
    fn from_iter<I: IntoIterator<Item = &'a ChunkKey>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

/// Running counters for a cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// `get_or_generate` calls answered from the cache.
    pub hits: u64,
    /// Chunks generated on a miss.
    pub generated: u64,
    /// Chunks dropped by eviction.
    pub evicted: u64,
}

struct Slot {
    key: ChunkKey,
    chunk: Chunk,
    /// Neighbour toward the most recent end.
    prev: Option<usize>,
    /// Neighbour toward the least recent end.
    next: Option<usize>,
}

/// Bounded LRU store of chunks keyed by [`ChunkKey`].
///
/// Single owner, single writer: nothing here is `Sync`-aware and nothing
/// needs to be.
pub struct ChunkCache {
    slots: Vec<Slot>,
    index: HashMap<ChunkKey, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
    stats: CacheStats,
}

impl ChunkCache {
    /// Creates an empty cache that aims to hold at most `capacity` chunks.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> ConfigResult<Self> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        Ok(Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
            capacity,
            stats: CacheStats::default(),
        })
    }

    /// Capacity target in chunks.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of resident chunks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no chunks are resident.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if `key` is resident.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: ChunkKey) -> bool {
        self.index.contains_key(&key)
    }

    /// Running counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Looks up a chunk without changing its recency.
    ///
    /// A miss means "not streamed yet", not an error.
    #[inline]
    #[must_use]
    pub fn get(&self, key: ChunkKey) -> Option<&Chunk> {
        self.index.get(&key).map(|&idx| &self.slots[idx].chunk)
    }

    /// Marks `key` as most recently used.
    ///
    /// Returns false (and does nothing) if the key is not resident: a key
    /// only enters the recency order together with its chunk, and insertion
    /// already places it at the front.
    pub fn touch(&mut self, key: ChunkKey) -> bool {
        match self.index.get(&key) {
            Some(&idx) => {
                self.move_to_front(idx);
                true
            }
            None => false,
        }
    }

    /// Returns the chunk for `key`, generating it first if absent.
    ///
    /// Either way the key ends up most recently used. `generate` runs only
    /// on a miss, so a resident chunk is never built twice.
    pub fn get_or_generate<F>(&mut self, key: ChunkKey, generate: F) -> &Chunk
    where
        F: FnOnce(ChunkKey) -> Chunk,
    {
        let idx = if let Some(&idx) = self.index.get(&key) {
            self.stats.hits += 1;
            self.move_to_front(idx);
            idx
        } else {
            let chunk = generate(key);
            self.stats.generated += 1;
            self.push_front(key, chunk)
        };

        &self.slots[idx].chunk
    }

    /// Evicts least recently used, unpinned chunks until the cache is back
    /// within capacity or only pinned chunks remain.
    ///
    /// Returns the number of chunks evicted.
    pub fn evict_to_capacity(&mut self, pinned: &PinSet) -> usize {
        let mut evicted = 0;
        let mut cursor = self.tail;

        while self.slots.len() > self.capacity {
            let Some(idx) = cursor else {
                // Everything left is pinned
                break;
            };

            let prev = self.slots[idx].prev;
            if pinned.contains(self.slots[idx].key) {
                cursor = prev;
                continue;
            }

            let last = self.slots.len() - 1;
            let slot = self.remove_at(idx);
            trace!(chunk = %slot.chunk.coord(), "evicted chunk");
            evicted += 1;

            // The slot that used to be last now lives at `idx`
            cursor = match prev {
                Some(p) if p == last => Some(idx),
                other => other,
            };
        }

        self.stats.evicted += evicted as u64;
        evicted
    }

    /// Keys from most to least recently used.
    #[must_use]
    pub fn keys_by_recency(&self) -> RecencyIter<'_> {
        RecencyIter {
            cache: self,
            cursor: self.head,
        }
    }

    /// Resident chunks in arbitrary order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.slots.iter().map(|slot| &slot.chunk)
    }

    fn push_front(&mut self, key: ChunkKey, chunk: Chunk) -> usize {
        let idx = self.slots.len();
        self.slots.push(Slot {
            key,
            chunk,
            prev: None,
            next: None,
        });
        self.link_front(idx);
        self.index.insert(key, idx);
        idx
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    fn link_front(&mut self, idx: usize) {
        self.slots[idx].prev = None;
        self.slots[idx].next = self.head;
        match self.head {
            Some(head) => self.slots[head].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;

        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }

        self.slots[idx].prev = None;
        self.slots[idx].next = None;
    }

    /// Removes the slot at `idx` from list, index and arena together.
    fn remove_at(&mut self, idx: usize) -> Slot {
        self.unlink(idx);
        self.index.remove(&self.slots[idx].key);

        let last = self.slots.len() - 1;
        let removed = self.slots.swap_remove(idx);

        if idx != last {
            let moved_prev = self.slots[idx].prev;
            let moved_next = self.slots[idx].next;
            match moved_prev {
                Some(p) => self.slots[p].next = Some(idx),
                None => self.head = Some(idx),
            }
            match moved_next {
                Some(n) => self.slots[n].prev = Some(idx),
                None => self.tail = Some(idx),
            }
            self.index.insert(self.slots[idx].key, idx);
        }

        removed
    }
}

impl std::fmt::Debug for ChunkCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkCache")
            .field("len", &self.slots.len())
            .field("capacity", &self.capacity)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Iterator over resident keys, most recently used first.
pub struct RecencyIter<'a> {
    cache: &'a ChunkCache,
    cursor: Option<usize>,
}

impl Iterator for RecencyIter<'_> {
    type Item = ChunkKey;

    fn next(&mut self) -> Option<ChunkKey> {
        let idx = self.cursor?;
        let slot = &self.cache.slots[idx];
        self.cursor = slot.next;
        Some(slot.key)
    }
}
