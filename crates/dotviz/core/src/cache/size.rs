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

//! Byte-size estimation strategies for cached values
//!
//! Serialization-based sizing is inherently approximate, so it is a
//! pluggable strategy rather than hard-coded: callers with a better idea of
//! their value layout supply their own estimator.

use serde::Serialize;
use tracing::warn;

/// Fallback size when estimation fails, in bytes
pub const DEFAULT_ENTRY_SIZE: usize = 256;

/// Best-effort byte-size estimation for a cached value
pub trait SizeEstimator<V>: Send + Sync {
    fn estimate(&self, value: &V) -> usize;
}

/// Estimates size as the value's JSON serialization length
///
/// Falls back to [`DEFAULT_ENTRY_SIZE`] when the value cannot be serialized.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeSizeEstimator;

impl<V: Serialize> SizeEstimator<V> for SerdeSizeEstimator {
    fn estimate(&self, value: &V) -> usize {
        match serde_json::to_vec(value) {
            Ok(bytes) => bytes.len().max(1),
            Err(err) => {
                warn!(error = %err, "size estimation failed, using fixed default");
                DEFAULT_ENTRY_SIZE
            }
        }
    }
}

/// Charges every value the same fixed size
///
/// Useful when values are uniform or when serialization cost matters more
/// than accounting accuracy.
#[derive(Debug, Clone, Copy)]
pub struct FixedSizeEstimator(pub usize);

impl<V> SizeEstimator<V> for FixedSizeEstimator {
    fn estimate(&self, _value: &V) -> usize {
        self.0.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_estimate_tracks_serialized_length() {
        let estimator = SerdeSizeEstimator;
        let small = estimator.estimate(&1u8);
        let large = estimator.estimate(&vec![0u32; 100]);
        assert!(large > small);
        assert_eq!(small, 1); // "1"
    }

    #[test]
    fn test_fixed_estimator_ignores_the_value() {
        let estimator = FixedSizeEstimator(64);
        assert_eq!(SizeEstimator::<String>::estimate(&estimator, &"abc".to_string()), 64);
        assert_eq!(SizeEstimator::<Vec<u8>>::estimate(&estimator, &vec![0; 1000]), 64);
    }

    #[test]
    fn test_estimates_are_never_zero() {
        let estimator = FixedSizeEstimator(0);
        assert_eq!(SizeEstimator::<u8>::estimate(&estimator, &0), 1);
    }
}
