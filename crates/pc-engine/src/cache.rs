use std::sync::{Arc, Mutex, MutexGuard};

use pc_core::{PlateId, ReconstructionTree};

struct CacheEntry {
    time: f64,
    anchor_plate_id: PlateId,
    tree: Arc<ReconstructionTree>,
    last_used: u64,
}

struct CacheInner {
    entries: Vec<CacheEntry>,
    tick: u64,
    builds: u64,
}

/// Bounded least-recently-used cache of reconstruction trees keyed by
/// `(time, anchor_plate_id)`.
///
/// All access is serialized through an internal mutex, so concurrent
/// misses cannot double-insert a key or corrupt the recency order. Hits
/// return the same `Arc` instance as long as the entry is resident;
/// eviction only drops the cache's reference, so callers still holding an
/// `Arc` keep the tree alive.
pub struct ReconstructionTreeCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

impl ReconstructionTreeCache {
    /// Create a cache holding at most `capacity` trees (clamped to ≥ 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: Vec::new(),
                tick: 0,
                builds: 0,
            }),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The cached tree for `(time, anchor_plate_id)`, building it with
    /// `build` on a miss. A hit promotes the entry to most recently used;
    /// a miss that exceeds capacity evicts the least recently used entry.
    ///
    /// Times are matched bitwise: the cache answers "was this exact query
    /// seen before", it does not interpolate between nearby times.
    pub fn get_or_build<F>(
        &self,
        time: f64,
        anchor_plate_id: PlateId,
        build: F,
    ) -> Arc<ReconstructionTree>
    where
        F: FnOnce() -> ReconstructionTree,
    {
        let mut inner = self.lock();
        inner.tick += 1;
        let tick = inner.tick;

        if let Some(entry) = inner
            .entries
            .iter_mut()
            .find(|e| e.anchor_plate_id == anchor_plate_id && e.time.to_bits() == time.to_bits())
        {
            entry.last_used = tick;
            return Arc::clone(&entry.tree);
        }

        let tree = Arc::new(build());
        inner.builds += 1;
        inner.entries.push(CacheEntry {
            time,
            anchor_plate_id,
            tree: Arc::clone(&tree),
            last_used: tick,
        });

        if inner.entries.len() > self.capacity {
            if let Some(lru) = inner
                .entries
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(i, _)| i)
            {
                inner.entries.remove(lru);
            }
        }

        tree
    }

    /// Number of trees built since creation — every call that missed.
    pub fn build_count(&self) -> u64 {
        self.lock().builds
    }

    /// Number of resident trees.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Drop all resident trees. Outstanding `Arc`s remain valid.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        // A panic mid-build never leaves the map half-updated, so a
        // poisoned lock is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
