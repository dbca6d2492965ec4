//! Memoizing path normalizer.

use std::num::NonZeroUsize;

use lru::LruCache;

use super::{CanonicalPath, PathSpec, lower_to_cubics, to_absolute};
use crate::defaults::NORMALIZER_CACHE_CAPACITY;

/// Configuration for a [`PathNormalizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Maximum number of normalized paths kept. Values below 1 are raised
    /// to 1.
    pub cache_capacity: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            cache_capacity: NORMALIZER_CACHE_CAPACITY,
        }
    }
}

/// Statistics for the normalization cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries currently cached.
    pub len: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate as a fraction (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache key: the exact input text. Raw path data and command sequences
/// are kept apart even when they print the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PathKey {
    Raw(String),
    Segments(String),
}

impl PathKey {
    fn of(spec: &PathSpec) -> Self {
        match spec {
            PathSpec::Raw(source) => PathKey::Raw(source.clone()),
            PathSpec::Segments(_) => PathKey::Segments(spec.to_string()),
        }
    }
}

/// Resolves [`PathSpec`]s into [`CanonicalPath`]s, remembering the most
/// recently used results.
///
/// Not `Sync`; use one per thread or wrap it in a `Mutex`.
pub struct PathNormalizer {
    cache: LruCache<PathKey, CanonicalPath>,
    hits: u64,
    misses: u64,
}

impl PathNormalizer {
    pub fn new() -> Self {
        Self::with_config(&NormalizerConfig::default())
    }

    pub fn with_config(config: &NormalizerConfig) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        PathNormalizer {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Canonical form of `spec`.
    ///
    /// Input that is empty, unreadable or contains no commands degrades to
    /// a single move to the origin.
    pub fn normalize(&mut self, spec: &PathSpec) -> CanonicalPath {
        let key = PathKey::of(spec);

        if let Some(path) = self.cache.get(&key) {
            self.hits += 1;
            crate::log::trace!(?key, "normalize cache hit");
            return path.clone();
        }

        self.misses += 1;
        crate::log::trace!(?key, "normalize cache miss");
        let path = normalize_uncached(spec);
        self.cache.put(key, path.clone());
        path
    }

    /// Current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    /// Drop every cached path and reset the counters.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for PathNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize without touching any cache.
pub fn normalize_uncached(spec: &PathSpec) -> CanonicalPath {
    let commands = spec.commands();
    let path = lower_to_cubics(&to_absolute(&commands));
    if path.is_empty() {
        CanonicalPath::origin()
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{CanonicalSegment, PathCommand};
    use glam::dvec2;
    use insta::assert_snapshot;

    fn normalize(source: &str) -> CanonicalPath {
        normalize_uncached(&PathSpec::from(source))
    }

    #[test]
    fn straight_line_snapshot() {
        assert_snapshot!(normalize("M0,0L100,100").to_string(), @"M0,0C0,0,100,100,100,100");
    }

    #[test]
    fn relative_polyline_snapshot() {
        assert_snapshot!(
            normalize("m10,10 h10 v10 z").to_string(),
            @"M10,10C10,10,20,10,20,10C20,10,20,20,20,20C20,20,10,10,10,10"
        );
    }

    #[test]
    fn quadratic_snapshot() {
        assert_snapshot!(normalize("M0,0 Q30,30 60,0").to_string(), @"M0,0C20,20,40,20,60,0");
    }

    #[test]
    fn empty_and_unreadable_input_degrade_to_origin() {
        assert_eq!(normalize(""), CanonicalPath::origin());
        assert_eq!(normalize("M0,0 L10;10"), CanonicalPath::origin());
        assert_eq!(
            normalize_uncached(&PathSpec::Segments(Vec::new())),
            CanonicalPath::origin()
        );
    }

    #[test]
    fn segments_and_raw_agree() {
        let raw = normalize("M0,100 L100,0");
        let segments = normalize_uncached(&PathSpec::from(vec![
            PathCommand::move_to(0.0, 100.0),
            PathCommand::line_to(100.0, 0.0),
        ]));
        assert_eq!(raw, segments);
    }

    #[test]
    fn move_only_path_is_kept() {
        assert_eq!(
            normalize("M5,5").segments(),
            &[CanonicalSegment::MoveTo(dvec2(5.0, 5.0))]
        );
    }

    #[test]
    fn cache_counts_hits_and_misses() {
        let mut normalizer = PathNormalizer::new();
        let spec = PathSpec::from("M0,0L10,10");
        let first = normalizer.normalize(&spec);
        let second = normalizer.normalize(&spec);
        assert_eq!(first, second);

        let stats = normalizer.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.len, 1);
        assert_eq!(stats.capacity, NORMALIZER_CACHE_CAPACITY);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn cache_evicts_least_recently_used() {
        let mut normalizer = PathNormalizer::with_config(&NormalizerConfig { cache_capacity: 2 });
        let a = PathSpec::from("M0,0L1,1");
        let b = PathSpec::from("M0,0L2,2");
        let c = PathSpec::from("M0,0L3,3");

        normalizer.normalize(&a);
        normalizer.normalize(&b);
        normalizer.normalize(&a);
        normalizer.normalize(&c); // evicts b
        normalizer.normalize(&a);
        assert_eq!(normalizer.stats().hits, 2);

        normalizer.normalize(&b);
        assert_eq!(normalizer.stats().misses, 4);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut normalizer = PathNormalizer::with_config(&NormalizerConfig { cache_capacity: 0 });
        assert_eq!(normalizer.stats().capacity, 1);
        let spec = PathSpec::from("M0,0L1,1");
        normalizer.normalize(&spec);
        normalizer.normalize(&spec);
        assert_eq!(normalizer.stats().hits, 1);
    }

    #[test]
    fn clear_resets_everything() {
        let mut normalizer = PathNormalizer::new();
        normalizer.normalize(&PathSpec::from("M0,0L1,1"));
        normalizer.clear();
        assert_eq!(
            normalizer.stats(),
            CacheStats {
                capacity: NORMALIZER_CACHE_CAPACITY,
                ..CacheStats::default()
            }
        );
    }
}
