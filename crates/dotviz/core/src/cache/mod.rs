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

//! Derived-result caching
//!
//! Two layers with the same spirit and different scope:
//! - `intelligent`: a general key→value cache with dependency-tag
//!   invalidation and dual eviction (count pressure and byte pressure)
//! - `memo`: a TTL- and count-bounded cache for one function's results
//!
//! Size accounting goes through the pluggable estimators in `size`.

pub mod intelligent; // Dependency-tagged bounded cache
pub mod memo; // Per-function memoization
pub mod size; // Byte-size estimation strategies

// Re-export main components for easier access
pub use intelligent::{CacheConfig, CacheStats, IntelligentCache};
pub use memo::{MemoConfig, Memoizer, fingerprint};
pub use size::{FixedSizeEstimator, SerdeSizeEstimator, SizeEstimator};
