//! Memoization of candidate scores.
//!
//! Trained tables never change within a process, so a score computed once
//! for a (candidate, observed) pair stays valid. The cache is shared behind
//! a read-write lock and can be used from many threads at once.
//!
//! The cache holds at most a fixed number of pairs. Once it is full, new
//! pairs are still scored but no longer stored.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::spelling::scorer::CandidateScorer;

/// Default maximum number of memoized pairs.
pub const DEFAULT_CACHE_SIZE_LIMIT: usize = 10000;

/// Thread-safe cache of candidate scores.
#[derive(Debug)]
pub struct ScoreCache {
    scores: RwLock<HashMap<(String, String), f64>>,
    capacity_limit: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::with_capacity_limit(DEFAULT_CACHE_SIZE_LIMIT)
    }
}

/// Cache usage counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of memoized pairs.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to be computed.
    pub misses: u64,
}

impl ScoreCache {
    /// Create an empty cache with the default size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache holding at most `limit` pairs.
    pub fn with_capacity_limit(limit: usize) -> Self {
        ScoreCache {
            scores: RwLock::new(HashMap::new()),
            capacity_limit: limit,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Maximum number of memoized pairs.
    pub fn capacity_limit(&self) -> usize {
        self.capacity_limit
    }

    /// Return the cached score for the pair, computing it with `scorer` on a miss.
    pub fn get_or_score<S>(&self, scorer: &S, candidate: &str, observed: &str) -> f64
    where
        S: CandidateScorer + ?Sized,
    {
        let key = (candidate.to_string(), observed.to_string());
        if let Some(&score) = self.scores.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return score;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let score = scorer.score(candidate, observed);
        let mut scores = self.scores.write();
        if scores.len() < self.capacity_limit {
            scores.insert(key, score);
        }
        score
    }

    /// Current usage counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.scores.read().len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drop all memoized scores and reset the counters.
    pub fn clear(&self) {
        self.scores.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// A scorer that consults a [`ScoreCache`] before delegating.
#[derive(Debug, Clone, Copy)]
pub struct CachedScorer<'a, S> {
    inner: S,
    cache: &'a ScoreCache,
}

impl<'a, S: CandidateScorer> CachedScorer<'a, S> {
    /// Wrap `inner` with `cache`.
    pub fn new(inner: S, cache: &'a ScoreCache) -> Self {
        CachedScorer { inner, cache }
    }
}

impl<S: CandidateScorer> CandidateScorer for CachedScorer<'_, S> {
    fn score(&self, candidate: &str, observed: &str) -> f64 {
        self.cache.get_or_score(&self.inner, candidate, observed)
    }
}
