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

//! Time-boxed, size-boxed memoization for a single computation
//!
//! Same spirit as the dependency-tagged cache but scoped to one function's
//! results: entries expire after a TTL, and when the count cap is hit the
//! lowest-hit-count entries are pruned first.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

/// Memoizer lifecycle configuration
#[derive(Debug, Clone, Copy)]
pub struct MemoConfig {
    pub ttl: Duration,
    pub max_entries: usize,
}

impl MemoConfig {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
        }
    }
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(30), 100)
    }
}

#[derive(Debug, Clone)]
struct MemoEntry<V> {
    value: V,
    created_at: Instant,
    hit_count: u64,
}

/// Result cache layered over one computation
pub struct Memoizer<V> {
    entries: Mutex<HashMap<String, MemoEntry<V>>>,
    config: MemoConfig,
}

impl<V: Clone> Memoizer<V> {
    pub fn new(config: MemoConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Returns the cached value for `key` if present and younger than the TTL
    ///
    /// Computes, stores, and prunes otherwise. The computation runs outside
    /// the lock.
    pub fn get_or_compute(&self, key: &str, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.lookup(key) {
            return value;
        }

        let value = compute();
        let mut entries = self.entries.lock();
        Self::prune(&mut entries, self.config);
        entries.insert(
            key.to_string(),
            MemoEntry {
                value: value.clone(),
                created_at: Instant::now(),
                hit_count: 0,
            },
        );
        value
    }

    /// TTL-checked lookup; an expired entry is removed, not returned
    pub fn lookup(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock();
        match entries.get_mut(key) {
            Some(entry) if entry.created_at.elapsed() <= self.config.ttl => {
                entry.hit_count += 1;
                debug!(key = %key, hits = entry.hit_count, "memo hit");
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Drops expired entries, then lowest-hit-count entries while over the cap
    fn prune(entries: &mut HashMap<String, MemoEntry<V>>, config: MemoConfig) {
        entries.retain(|_, entry| entry.created_at.elapsed() <= config.ttl);

        while entries.len() >= config.max_entries {
            let victim = entries
                .iter()
                .min_by_key(|(_, entry)| entry.hit_count)
                .map(|(key, _)| key.clone());
            match victim {
                Some(key) => {
                    debug!(key = %key, "pruning lowest-hit memo entry");
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// Derives a cache key by structural serialization of the arguments
///
/// Equivalent inputs fingerprint identically. Arguments that cannot be
/// serialized collapse onto a shared per-type key, which only costs cache
/// effectiveness, never correctness.
pub fn fingerprint<A: Serialize>(args: &A) -> String {
    match serde_json::to_string(args) {
        Ok(key) => key,
        Err(err) => {
            warn!(error = %err, "fingerprint serialization failed");
            format!("unserializable:{}", std::any::type_name::<A>())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_second_call_is_served_from_cache() {
        let memo: Memoizer<u64> = Memoizer::new(MemoConfig::default());
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            42
        };

        assert_eq!(memo.get_or_compute("answer", compute), 42);
        assert_eq!(memo.get_or_compute("answer", compute), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_expired_entries_are_recomputed() {
        let memo: Memoizer<u64> = Memoizer::new(MemoConfig::new(Duration::from_millis(20), 10));
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            1
        };

        memo.get_or_compute("k", compute);
        thread::sleep(Duration::from_millis(40));
        memo.get_or_compute("k", compute);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_count_cap_prunes_lowest_hit_entries() {
        let memo: Memoizer<usize> = Memoizer::new(MemoConfig::new(Duration::from_secs(60), 3));
        for i in 0..3 {
            memo.get_or_compute(&format!("k{i}"), || i);
        }
        // k0 gets hits, k1/k2 stay cold
        memo.lookup("k0");
        memo.lookup("k0");

        memo.get_or_compute("k3", || 3);
        assert!(memo.len() <= 3);
        assert!(memo.lookup("k0").is_some());
        assert!(memo.lookup("k3").is_some());
    }

    #[test]
    fn test_fingerprint_is_structural() {
        let a = fingerprint(&(1, "x", vec![1.0, 2.0]));
        let b = fingerprint(&(1, "x", vec![1.0, 2.0]));
        let c = fingerprint(&(2, "x", vec![1.0, 2.0]));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clear_empties_the_cache() {
        let memo: Memoizer<u8> = Memoizer::new(MemoConfig::default());
        memo.get_or_compute("k", || 1);
        memo.clear();
        assert!(memo.is_empty());
    }
}
