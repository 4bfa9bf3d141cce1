use hashbrown::HashMap as FastHashMap;
use memchr::memchr_iter;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::Segments;

pub const DEFAULT_SEGMENT_CACHE_CAPACITY: usize = 10_000;
pub const DEFAULT_EVICT_PERCENT: u8 = 10;

// consulted before the cache, never evicted
const COMMON_PATHS: [&str; 7] = [
    "/",
    "/api",
    "/api/v1",
    "/health",
    "/status",
    "/metrics",
    "/favicon.ico",
];

/// Splits a path on `/`, dropping empty runs. Bytes are preserved as-is.
pub fn split_segments(path: &str) -> Vec<Box<str>> {
    let bytes = path.as_bytes();
    let mut out = Vec::new();
    let mut start = 0usize;

    for slash in memchr_iter(b'/', bytes).chain(std::iter::once(bytes.len())) {
        if slash > start {
            out.push(path[start..slash].to_owned().into_boxed_str());
        }
        start = slash + 1;
    }

    out
}

#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStats {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Bounded memo of `raw path -> segments` with unordered percentage eviction.
#[derive(Debug)]
pub struct SegmentCache {
    entries: RwLock<FastHashMap<Box<str>, Segments>>,
    max_size: usize,
    evict_percent: u8,
    stats: CacheStats,
}

impl SegmentCache {
    pub fn new(max_size: usize, evict_percent: u8) -> Self {
        let max_size = max_size.max(1);
        Self {
            entries: RwLock::new(FastHashMap::with_capacity(max_size.min(1024))),
            max_size,
            evict_percent: evict_percent.clamp(1, 100),
            stats: CacheStats::default(),
        }
    }

    pub fn get(&self, path: &str) -> Option<Segments> {
        self.entries.read().get(path).cloned()
    }

    pub fn insert(&self, path: &str, segments: Segments) -> Segments {
        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(path) {
            return existing.clone();
        }

        if entries.len() >= self.max_size {
            let target = self.eviction_batch();
            let mut removed = 0usize;
            entries.retain(|_, _| {
                if removed < target {
                    removed += 1;
                    false
                } else {
                    true
                }
            });
            tracing::event!(
                tracing::Level::DEBUG,
                evicted = removed as u64,
                remaining = entries.len() as u64,
                "segment cache eviction"
            );
        }

        entries.insert(path.to_owned().into_boxed_str(), segments.clone());
        segments
    }

    fn eviction_batch(&self) -> usize {
        (self.max_size * self.evict_percent as usize / 100).max(1)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.clear();
        entries.shrink_to_fit();
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[derive(Debug)]
pub struct PathSegmenter {
    common: FastHashMap<&'static str, Segments>,
    cache: SegmentCache,
    debug: bool,
}

impl PathSegmenter {
    pub fn new(max_size: usize, evict_percent: u8) -> Self {
        let common = COMMON_PATHS
            .iter()
            .map(|path| (*path, Segments::from(split_segments(path))))
            .collect();

        Self {
            common,
            cache: SegmentCache::new(max_size, evict_percent),
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn split(&self, path: &str) -> Segments {
        if let Some(segments) = self.common.get(path) {
            self.cache.stats().record_hit();
            return segments.clone();
        }

        if let Some(segments) = self.cache.get(path) {
            self.cache.stats().record_hit();
            if self.debug {
                tracing::event!(tracing::Level::DEBUG, cache = "hit", path = %path, "segment cache hit");
            }
            return segments;
        }

        self.cache.stats().record_miss();
        if self.debug {
            tracing::event!(tracing::Level::DEBUG, cache = "miss", path = %path, "segment cache miss");
        }
        let segments = Segments::from(split_segments(path));
        self.cache.insert(path, segments)
    }

    pub fn cache(&self) -> &SegmentCache {
        &self.cache
    }

    pub fn stats(&self) -> SegmentCacheStats {
        let (hits, misses) = self.cache.stats().snapshot();
        SegmentCacheStats {
            hits,
            misses,
            entries: self.cache.len(),
        }
    }
}

impl Default for PathSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_CACHE_CAPACITY, DEFAULT_EVICT_PERCENT)
    }
}
