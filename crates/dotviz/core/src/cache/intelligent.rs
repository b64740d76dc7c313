// Dotviz
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Key→value cache with dependency-tag invalidation and dual eviction
//!
//! Two pressure kinds trigger two deliberately different policies:
//! - Count pressure evicts the stalest entry by usage score
//!   (`age / max(access_count, 1)`), so old and rarely read entries go first.
//! - Byte pressure evicts the single largest entry, maximizing headroom
//!   gained per eviction.
//!
//! The asymmetry is inherited behavior and observable; do not unify the two
//! policies.
//!
//! Every public operation completes its whole state mutation under one lock
//! acquisition, so interleaving is only possible between operations.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::size::{SerdeSizeEstimator, SizeEstimator};

const MIN_MAX_ENTRIES: usize = 100;
const MAX_MAX_ENTRIES: usize = 10_000;
const MIN_MEMORY_MB: usize = 10;
const MAX_MEMORY_MB: usize = 1_000;

/// Cache capacity configuration
///
/// Both limits are clamped at construction: entries to `[100, 10000]`,
/// memory to `[10, 1000]` MB.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    max_entries: usize,
    max_memory_mb: usize,
}

impl CacheConfig {
    pub fn new(max_entries: usize, max_memory_mb: usize) -> Self {
        Self {
            max_entries: max_entries.clamp(MIN_MAX_ENTRIES, MAX_MAX_ENTRIES),
            max_memory_mb: max_memory_mb.clamp(MIN_MEMORY_MB, MAX_MEMORY_MB),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn max_bytes(&self) -> usize {
        self.max_memory_mb * 1024 * 1024
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(1_000, 50)
    }
}

/// Statistics about cache performance and usage
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    pub total_entries: usize,       // Current number of entries
    pub max_entries: usize,         // Entry cap
    pub total_bytes: usize,         // Sum of all entries' estimated sizes
    pub max_bytes: usize,           // Byte cap
    pub memory_usage_percent: f64,  // total_bytes as a percentage of max_bytes
    pub hit_rate_estimate: f64,     // entries / (entries + total access count)
    pub hit_count: u64,             // True lookup hits
    pub miss_count: u64,            // True lookup misses
    pub eviction_count: u64,        // Entries removed under pressure
    pub insertion_count: u64,       // Entries inserted
}

/// Internal representation of a cached value with metadata
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant, // Refreshed on every hit, acting as a recency signal
    access_count: u64,
    estimated_size: usize,
    dependency_tags: HashSet<String>,
}

impl<V> CacheEntry<V> {
    /// Staleness heuristic: higher means older and/or less accessed
    fn usage_score(&self, now: Instant) -> f64 {
        let age = now.duration_since(self.created_at).as_secs_f64();
        age / self.access_count.max(1) as f64
    }
}

#[derive(Debug)]
struct CacheInner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    total_bytes: usize,
    hit_count: u64,
    miss_count: u64,
    eviction_count: u64,
    insertion_count: u64,
}

impl<V> CacheInner<V> {
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.total_bytes = self.total_bytes.saturating_sub(entry.estimated_size);
        Some(entry)
    }

    /// Count-pressure policy: drop the entry with the worst usage score
    fn evict_stalest(&mut self, now: Instant) {
        let victim = self
            .entries
            .iter()
            .max_by(|a, b| a.1.usage_score(now).total_cmp(&b.1.usage_score(now)))
            .map(|(key, _)| key.clone());
        if let Some(key) = victim {
            debug!(key = %key, "evicting stalest entry under count pressure");
            self.remove_entry(&key);
            self.eviction_count += 1;
        }
    }

    /// Byte-pressure policy: drop the single largest entry
    fn evict_largest(&mut self) {
        let victim = self
            .entries
            .iter()
            .max_by_key(|(_, entry)| entry.estimated_size)
            .map(|(key, _)| key.clone());
        if let Some(key) = victim {
            debug!(key = %key, "evicting largest entry under byte pressure");
            self.remove_entry(&key);
            self.eviction_count += 1;
        }
    }
}

/// Bounded cache for derived rendering results
///
/// Values are stored under string keys with optional dependency tags, so an
/// upstream producer can invalidate every derived result of a dataset in one
/// call without knowing key structure.
pub struct IntelligentCache<V> {
    inner: Mutex<CacheInner<V>>,
    config: CacheConfig,
    estimator: Box<dyn SizeEstimator<V>>,
}

impl<V: Clone + Serialize> IntelligentCache<V> {
    /// Creates a cache using serialization-based size estimation
    pub fn new(config: CacheConfig) -> Self {
        Self::with_estimator(config, SerdeSizeEstimator)
    }
}

impl<V: Clone> IntelligentCache<V> {
    /// Creates a cache with a caller-supplied size estimator
    pub fn with_estimator(config: CacheConfig, estimator: impl SizeEstimator<V> + 'static) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                total_bytes: 0,
                hit_count: 0,
                miss_count: 0,
                eviction_count: 0,
                insertion_count: 0,
            }),
            config,
            estimator: Box::new(estimator),
        }
    }

    /// Stores a value, evicting under count or byte pressure as needed
    ///
    /// Replacing an existing key credits back the old entry's size first.
    /// A value whose estimated size alone exceeds the byte budget is not
    /// cached at all; that is the only case where `set` has no effect.
    pub fn set(&self, key: &str, value: V, dependency_tags: &[&str]) {
        let size = self.estimator.estimate(&value);
        let mut inner = self.inner.lock();

        // Bail out before touching any existing entry so an uncacheable
        // replacement leaves the old value in place
        if size > self.config.max_bytes() {
            warn!(key = %key, size, budget = self.config.max_bytes(), "value exceeds entire byte budget, not caching");
            return;
        }

        let _ = inner.remove_entry(key);

        let now = Instant::now();
        while inner.entries.len() >= self.config.max_entries() {
            inner.evict_stalest(now);
        }
        while inner.total_bytes + size > self.config.max_bytes() && !inner.entries.is_empty() {
            inner.evict_largest();
        }

        inner.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                created_at: now,
                access_count: 1,
                estimated_size: size,
                dependency_tags: dependency_tags.iter().map(|tag| (*tag).to_string()).collect(),
            },
        );
        inner.total_bytes += size;
        inner.insertion_count += 1;
    }

    /// Retrieves a value; a hit refreshes the entry's recency signal
    pub fn get(&self, key: &str) -> Option<V> {
        let mut inner = self.inner.lock();
        match inner.entries.get_mut(key) {
            Some(entry) => {
                entry.access_count += 1;
                entry.created_at = Instant::now();
                let value = entry.value.clone();
                inner.hit_count += 1;
                Some(value)
            }
            None => {
                inner.miss_count += 1;
                None
            }
        }
    }

    /// Removes every entry carrying `tag`, returning how many were removed
    pub fn invalidate_by_dependency(&self, tag: &str) -> usize {
        let mut inner = self.inner.lock();
        let victims: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.dependency_tags.contains(tag))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &victims {
            let _ = inner.remove_entry(key);
        }
        debug!(tag = %tag, removed = victims.len(), "invalidated entries by dependency");
        victims.len()
    }

    /// Removes a single key, returning its value if present
    pub fn remove(&self, key: &str) -> Option<V> {
        self.inner.lock().remove_entry(key).map(|entry| entry.value)
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.total_bytes = 0;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    /// Current usage statistics
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let entries = inner.entries.len();
        let total_accesses: u64 = inner.entries.values().map(|entry| entry.access_count).sum();
        let denominator = entries as f64 + total_accesses as f64;
        let max_bytes = self.config.max_bytes();

        CacheStats {
            total_entries: entries,
            max_entries: self.config.max_entries(),
            total_bytes: inner.total_bytes,
            max_bytes,
            memory_usage_percent: inner.total_bytes as f64 / max_bytes as f64 * 100.0,
            hit_rate_estimate: if denominator == 0.0 { 0.0 } else { entries as f64 / denominator },
            hit_count: inner.hit_count,
            miss_count: inner.miss_count,
            eviction_count: inner.eviction_count,
            insertion_count: inner.insertion_count,
        }
    }
}
