mod error;
mod normalize;
mod segment;

pub use error::{PathError, PathResult};
pub use normalize::{join_paths, resolve_static_path};
pub use segment::{
    CacheStats, DEFAULT_EVICT_PERCENT, DEFAULT_SEGMENT_CACHE_CAPACITY, PathSegmenter,
    SegmentCache, SegmentCacheStats, split_segments,
};
